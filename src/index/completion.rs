//! Index population lifecycle.
//!
//! An index starts `Partial` and advances monotonically: once every file in
//! its scope has been statically analyzed it becomes `StaticComplete`, and
//! once cross-file resolution has also run it becomes `Complete`. There is
//! no transition backward; the only reset is constructing a new index.
//!
//! Queries are valid in every state — partial results mid-population are
//! expected, and consumers treat them as such.

/// Population state of an index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Completeness {
    /// Population is still in progress.
    #[default]
    Partial,
    /// Static analysis has covered every file in scope.
    StaticComplete,
    /// Cross-file resolution has also finished; the index is final.
    Complete,
}

impl Completeness {
    /// Restore a state from its persisted flag pair. A snapshot claiming
    /// `complete` without `static_complete` is normalized to `Complete`;
    /// the states are ordered and the stronger claim wins.
    pub fn from_flags(static_complete: bool, complete: bool) -> Self {
        if complete {
            Completeness::Complete
        } else if static_complete {
            Completeness::StaticComplete
        } else {
            Completeness::Partial
        }
    }

    /// Whether static analysis has finished.
    pub fn is_static_complete(self) -> bool {
        self >= Completeness::StaticComplete
    }

    /// Whether the index is fully populated.
    pub fn is_complete(self) -> bool {
        self == Completeness::Complete
    }

    /// Advance `Partial` → `StaticComplete`. Returns whether a transition
    /// occurred; already being at `StaticComplete` or `Complete` is a no-op.
    pub fn advance_static(&mut self) -> bool {
        if *self == Completeness::Partial {
            *self = Completeness::StaticComplete;
            true
        } else {
            false
        }
    }

    /// Advance to `Complete`, promoting through `StaticComplete` first if
    /// that step was skipped. Returns `(newly_static, newly_complete)` so
    /// the caller can emit each notification exactly once.
    pub fn advance_complete(&mut self) -> (bool, bool) {
        let newly_static = self.advance_static();
        let newly_complete = if *self == Completeness::StaticComplete {
            *self = Completeness::Complete;
            true
        } else {
            false
        };
        (newly_static, newly_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_partial() {
        let state = Completeness::default();
        assert!(!state.is_static_complete());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_advance_static() {
        let mut state = Completeness::Partial;
        assert!(state.advance_static());
        assert!(state.is_static_complete());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_advance_static_is_idempotent() {
        let mut state = Completeness::Partial;
        assert!(state.advance_static());
        assert!(!state.advance_static());
        assert_eq!(state, Completeness::StaticComplete);
    }

    #[test]
    fn test_advance_complete_promotes_through_static() {
        let mut state = Completeness::Partial;
        assert_eq!(state.advance_complete(), (true, true));
        assert!(state.is_static_complete());
        assert!(state.is_complete());
    }

    #[test]
    fn test_advance_complete_after_static() {
        let mut state = Completeness::Partial;
        state.advance_static();
        assert_eq!(state.advance_complete(), (false, true));
        assert!(state.is_complete());
    }

    #[test]
    fn test_advance_complete_is_idempotent() {
        let mut state = Completeness::Partial;
        state.advance_complete();
        assert_eq!(state.advance_complete(), (false, false));
        assert_eq!(state, Completeness::Complete);
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(Completeness::from_flags(false, false), Completeness::Partial);
        assert_eq!(Completeness::from_flags(true, false), Completeness::StaticComplete);
        assert_eq!(Completeness::from_flags(true, true), Completeness::Complete);
        // Stronger claim wins even when the pair is inconsistent.
        assert_eq!(Completeness::from_flags(false, true), Completeness::Complete);
    }
}
