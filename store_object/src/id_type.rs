//! Id Type module
//!
//! Identity assignment for stores that generate keys themselves.

/// Integer-like ids a store can hand out in ascending order
pub trait SequentialId: Copy + Ord + Send + Sync {
    /// The id given to the first record
    fn first() -> Self;

    /// The id following `self`, `None` on overflow
    fn successor(&self) -> Option<Self>;
}

impl SequentialId for i32 {
    fn first() -> Self {
        1
    }

    fn successor(&self) -> Option<Self> {
        self.checked_add(1)
    }
}

impl SequentialId for i64 {
    fn first() -> Self {
        1
    }

    fn successor(&self) -> Option<Self> {
        self.checked_add(1)
    }
}
