//! Catalog paging configuration

use core_config::{env_parse, ConfigError, FromEnv};
use strum::{Display, EnumString};
use tracing::debug;

use crate::error::{ProductError, ProductResult};

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const MAX_PAGE_SIZE: usize = 8;

/// What to do with out-of-range paging input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PageSizePolicy {
    /// Bring values into range
    #[default]
    Clamp,
    /// Fail with a validation error
    Reject,
}

/// Paging bounds for catalog listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub page_size_policy: PageSizePolicy,
}

/// A page request that is already within the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            page_size_policy: PageSizePolicy::Clamp,
        }
    }
}

impl FromEnv for CatalogConfig {
    /// Reads from environment variables with defaults:
    /// - CATALOG_DEFAULT_PAGE_SIZE: 6
    /// - CATALOG_MAX_PAGE_SIZE: 8
    /// - CATALOG_PAGE_SIZE_POLICY: clamp (or reject)
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            default_page_size: env_parse("CATALOG_DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            max_page_size: env_parse("CATALOG_MAX_PAGE_SIZE", MAX_PAGE_SIZE)?,
            page_size_policy: env_parse("CATALOG_PAGE_SIZE_POLICY", PageSizePolicy::Clamp)?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "CATALOG_MAX_PAGE_SIZE must be at least 1".to_string(),
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "CATALOG_DEFAULT_PAGE_SIZE must be between 1 and {}",
                self.max_page_size
            )));
        }
        Ok(())
    }

    /// Bound untrusted paging input before any evaluation runs.
    ///
    /// Missing values take the defaults (index 1, default page size).
    /// Non-positive values and sizes above the maximum are clamped or
    /// rejected according to [`PageSizePolicy`].
    pub fn resolve_page(
        &self,
        page_index: Option<i64>,
        page_size: Option<i64>,
    ) -> ProductResult<PageRequest> {
        let reject = self.page_size_policy == PageSizePolicy::Reject;

        let index = match page_index {
            None => 1,
            Some(i) if i >= 1 => usize::try_from(i).unwrap_or(usize::MAX),
            Some(i) if reject => {
                return Err(ProductError::Validation(format!(
                    "pageIndex must be at least 1, got {i}"
                )));
            }
            Some(_) => 1,
        };

        let size = match page_size {
            None => self.default_page_size,
            Some(s) if s < 1 && reject => {
                return Err(ProductError::Validation(format!(
                    "pageSize must be at least 1, got {s}"
                )));
            }
            Some(s) if s < 1 => self.default_page_size,
            Some(s) => match usize::try_from(s) {
                Ok(size) if size <= self.max_page_size => size,
                _ if reject => {
                    return Err(ProductError::PageSizeExceeded {
                        requested: s,
                        max: self.max_page_size,
                    });
                }
                _ => {
                    debug!(requested = s, max = self.max_page_size, "clamping page size");
                    self.max_page_size
                }
            },
        };

        Ok(PageRequest { index, size })
    }
}
