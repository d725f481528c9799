//! Ownership of state slices that a host may control.

/// A state slice owned either by the host (`External`) or by the grid
/// (`Internal`). The owner is fixed at construction.
///
/// Local gestures only change `Internal` values; for `External` values the
/// grid reports the proposed value through callbacks and waits for the host
/// to push it back with [`Owned::sync`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owned<T> {
    /// Mirrors a host-supplied value.
    External(T),
    /// Owned by the grid.
    Internal(T),
}

impl<T> Owned<T> {
    /// `External` when the host supplied a value, otherwise `Internal` with
    /// the fallback.
    pub fn from_override(external: Option<T>, fallback: impl FnOnce() -> T) -> Self {
        match external {
            Some(value) => Owned::External(value),
            None => Owned::Internal(fallback()),
        }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        match self {
            Owned::External(value) | Owned::Internal(value) => value,
        }
    }

    /// Check if the host owns this slice.
    pub fn is_external(&self) -> bool {
        matches!(self, Owned::External(_))
    }

    /// Apply a locally originated change. Returns `true` if it was stored.
    pub fn apply_local(&mut self, next: T) -> bool {
        match self {
            Owned::Internal(value) => {
                *value = next;
                true
            }
            Owned::External(_) => false,
        }
    }

    /// Mirror a new host value. Returns `false` for internally owned slices,
    /// which ignore host pushes.
    pub fn sync(&mut self, next: T) -> bool {
        match self {
            Owned::External(value) => {
                *value = next;
                true
            }
            Owned::Internal(_) => false,
        }
    }
}
