/// Store-assigned integer identity.
pub type EntityId = i32;

/// A record owned by a store and addressed by an integer identity.
///
/// Identity `0` means "not yet assigned"; stores assign a fresh identity on
/// commit and never change it afterwards.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);

    /// Store-level constraints, checked for every added or updated entity at
    /// commit time. A violation fails the whole commit.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}
