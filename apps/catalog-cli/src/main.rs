//! Catalog CLI
//!
//! Runs catalog queries against the bundled product data and prints the
//! results as JSON.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_products::{CatalogConfig, ProductService, ProductSpecParams};
use eyre::Result;
use serde::Serialize;
use tracing::info;

mod seed;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Query the product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching a filter
    Products {
        /// Exact brand name
        #[arg(short, long)]
        brand: Option<String>,

        /// Exact product type
        #[arg(short = 't', long = "type")]
        product_type: Option<String>,

        /// Sort order: name, priceAsc or priceDesc
        #[arg(short, long)]
        sort: Option<String>,

        /// Case-insensitive search on the product name
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// 1-based page index
        #[arg(short = 'p', long, allow_negative_numbers = true)]
        page_index: Option<i64>,

        /// Items per page
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        page_size: Option<i64>,

        /// Return a plain list instead of a page envelope
        #[arg(short, long)]
        all: bool,
    },

    /// Show a single product
    Get {
        /// Product id
        id: i32,
    },

    /// List distinct brands
    Brands,

    /// List distinct product types
    Types,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = CatalogConfig::from_env()?;
    let cli = Cli::parse();

    let service = ProductService::new(seed::store()?, config);

    match cli.command {
        Commands::Products {
            brand,
            product_type,
            sort,
            search,
            page_index,
            page_size,
            all,
        } => {
            let params = ProductSpecParams {
                brand,
                product_type,
                sort,
                search,
                page_index,
                page_size,
            };

            if all {
                let products = service.list_all_products(params).await?;
                info!(count = products.len(), "Listed all matching products");
                print_json(&products)?;
            } else {
                print_json(&service.list_products(params).await?)?;
            }
        }

        Commands::Get { id } => {
            print_json(&service.get_product(id).await?)?;
        }

        Commands::Brands => {
            print_json(&service.brands().await?)?;
        }

        Commands::Types => {
            print_json(&service.types().await?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_products_args() {
        let cli = Cli::try_parse_from([
            "catalog-cli",
            "products",
            "--brand",
            "React",
            "--type",
            "Gloves",
            "-p",
            "2",
            "-n",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Products {
                brand,
                product_type,
                page_index,
                page_size,
                all,
                ..
            } => {
                assert_eq!(brand.as_deref(), Some("React"));
                assert_eq!(product_type.as_deref(), Some("Gloves"));
                assert_eq!(page_index, Some(2));
                assert_eq!(page_size, Some(3));
                assert!(!all);
            }
            _ => panic!("expected products command"),
        }
    }
}
