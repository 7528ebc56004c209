//! Output ports (interfaces) for domain services.

/// Port producing short, human-usable place identifiers.
pub trait ShortIdGenerator: Send + Sync {
    /// Generate a fresh identifier of exactly `length` characters.
    fn new_short_id(&self, length: usize) -> String;
}
