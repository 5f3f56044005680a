use itemvault_types::Item;

/// Optional per-type validation hook, run against the current item state
/// before every write. Return `Err(message)` to reject the save; no write
/// occurs on rejection.
pub trait ItemValidator: Send + Sync {
    fn validate(&self, item: &Item) -> Result<(), String>;
}

/// Blanket impl so plain functions and closures can be registered directly.
impl<F> ItemValidator for F
where
    F: Fn(&Item) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, item: &Item) -> Result<(), String> {
        self(item)
    }
}
