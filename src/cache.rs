//! Eigensystem cache validity.
//!
//! Setters never touch the flag directly. Each one reports a [`Change`]
//! event, and the owner of the eigensystem folds it into its
//! [`CacheValidity`] with [`CacheValidity::and`].

/// Whether a setter actually modified the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    Changed,
}

impl Change {
    /// Compare old and new values with exact equality.
    #[inline]
    pub fn between<T: PartialEq>(old: &T, new: &T) -> Self {
        if old == new {
            Change::Unchanged
        } else {
            Change::Changed
        }
    }

    #[inline]
    pub fn is_changed(self) -> bool {
        matches!(self, Change::Changed)
    }

    /// Combine two events: changed if either changed.
    #[inline]
    pub fn merge(self, other: Change) -> Change {
        if self.is_changed() || other.is_changed() {
            Change::Changed
        } else {
            Change::Unchanged
        }
    }
}

/// State of the cached eigen-decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheValidity {
    /// Nothing has been diagonalized yet.
    #[default]
    Uninitialized,
    /// Inputs changed since the last diagonalization.
    Stale,
    /// The last diagonalization matches the current inputs.
    Valid,
}

impl CacheValidity {
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, CacheValidity::Valid)
    }

    /// Conjunction update: stays `Valid` only if already valid and nothing
    /// changed. Never promotes an invalid state.
    #[inline]
    pub fn and(self, change: Change) -> CacheValidity {
        match (self, change) {
            (CacheValidity::Valid, Change::Unchanged) => CacheValidity::Valid,
            (CacheValidity::Valid, Change::Changed) => CacheValidity::Stale,
            (other, _) => other,
        }
    }

    /// Fold an event into the flag in place.
    #[inline]
    pub fn update(&mut self, change: Change) {
        *self = self.and(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_survives_only_unchanged() {
        assert_eq!(CacheValidity::Valid.and(Change::Unchanged), CacheValidity::Valid);
        assert_eq!(CacheValidity::Valid.and(Change::Changed), CacheValidity::Stale);
    }

    #[test]
    fn test_invalid_never_promoted() {
        for change in [Change::Unchanged, Change::Changed] {
            assert!(!CacheValidity::Stale.and(change).is_valid());
            assert!(!CacheValidity::Uninitialized.and(change).is_valid());
        }
    }

    #[test]
    fn test_exact_comparison() {
        assert_eq!(Change::between(&0.1, &0.1), Change::Unchanged);
        assert_eq!(Change::between(&0.1, &(0.1 + 1e-15)), Change::Changed);
        assert_eq!(Change::Unchanged.merge(Change::Changed), Change::Changed);
    }
}
