//! Row identifier generation

use uuid::Uuid;

/// Source of row identifiers
///
/// Closures returning a [`Uuid`] implement this trait, which lets tests supply
/// a deterministic sequence:
///
/// ```rust
/// use artisan_merge::merge::IdGenerator;
/// use uuid::Uuid;
///
/// let mut n = 0u128;
/// let mut ids = move || {
///     n += 1;
///     Uuid::from_u128(n)
/// };
/// assert_eq!(ids.next_id(), Uuid::from_u128(1));
/// assert_eq!(ids.next_id(), Uuid::from_u128(2));
/// ```
pub trait IdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Random (version 4) identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> Uuid,
{
    fn next_id(&mut self) -> Uuid {
        self()
    }
}
