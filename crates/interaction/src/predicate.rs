//! Acceptance predicates over notification kinds.

use uidrive_common::error::{UidriveError, UidriveResult};
use uidrive_event_model::notification::{NotificationKind, NotificationKinds};

/// How a set of requested kinds must be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitMode {
    /// Any one requested kind satisfies the wait.
    Any,
    /// Every requested kind must be seen at least once, in any order.
    All,
}

/// Matcher state for one correlated wait.
///
/// Built fresh for every wait; it is consumed by observing notifications
/// and is not meant to be reused once satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPredicate {
    Any {
        kinds: NotificationKinds,
    },
    All {
        kinds: NotificationKinds,
        remaining: NotificationKinds,
    },
}

impl EventPredicate {
    /// Build a predicate. An empty kind set is a caller error.
    pub fn new(mode: WaitMode, kinds: NotificationKinds) -> UidriveResult<Self> {
        if kinds.is_empty() {
            return Err(UidriveError::invalid_argument("events mask cannot be zero"));
        }
        Ok(match mode {
            WaitMode::Any => EventPredicate::Any { kinds },
            WaitMode::All => EventPredicate::All {
                kinds,
                remaining: kinds,
            },
        })
    }

    pub fn any(kinds: impl Into<NotificationKinds>) -> UidriveResult<Self> {
        Self::new(WaitMode::Any, kinds.into())
    }

    pub fn all(kinds: impl Into<NotificationKinds>) -> UidriveResult<Self> {
        Self::new(WaitMode::All, kinds.into())
    }

    /// Feed one observed kind. Returns `true` once the predicate is satisfied.
    ///
    /// Kinds outside the requested set never change the state.
    pub fn observe(&mut self, kind: NotificationKind) -> bool {
        match self {
            EventPredicate::Any { kinds } => kinds.has(kind),
            EventPredicate::All { kinds, remaining } => {
                if !kinds.has(kind) {
                    return false;
                }
                remaining.remove(kind.into());
                remaining.is_empty()
            }
        }
    }

    pub fn mode(&self) -> WaitMode {
        match self {
            EventPredicate::Any { .. } => WaitMode::Any,
            EventPredicate::All { .. } => WaitMode::All,
        }
    }

    /// The full requested set.
    pub fn kinds(&self) -> NotificationKinds {
        match self {
            EventPredicate::Any { kinds } | EventPredicate::All { kinds, .. } => *kinds,
        }
    }

    /// Kinds still required before the predicate is satisfied.
    pub fn remaining(&self) -> NotificationKinds {
        match self {
            EventPredicate::Any { kinds } => *kinds,
            EventPredicate::All { remaining, .. } => *remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use NotificationKind::*;

    #[test]
    fn test_empty_kinds_rejected() {
        let err = EventPredicate::new(WaitMode::Any, NotificationKinds::empty()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(EventPredicate::new(WaitMode::All, NotificationKinds::empty()).is_err());
    }

    #[test]
    fn test_any_matches_first_requested_kind() {
        let mut predicate = EventPredicate::any(WindowStateChanged | ViewScrolled).unwrap();
        assert!(!predicate.observe(ViewClicked));
        assert!(predicate.observe(ViewScrolled));

        let mut predicate = EventPredicate::any(WindowStateChanged | ViewScrolled).unwrap();
        assert!(predicate.observe(WindowStateChanged));
    }

    #[test]
    fn test_all_requires_every_kind_in_any_order() {
        let mut predicate = EventPredicate::all(WindowStateChanged | WindowContentChanged).unwrap();
        assert!(!predicate.observe(WindowContentChanged));
        assert!(!predicate.observe(WindowContentChanged));
        assert_eq!(
            predicate.remaining(),
            NotificationKinds::from(WindowStateChanged)
        );
        assert!(predicate.observe(WindowStateChanged));
    }

    #[test]
    fn test_all_ignores_unrequested_kinds() {
        let mut predicate = EventPredicate::all(ViewClicked | ViewFocused).unwrap();
        let before = predicate.clone();
        assert!(!predicate.observe(Announcement));
        assert_eq!(predicate, before);
    }

    #[test]
    fn test_single_kind_all_behaves_like_any() {
        let mut predicate = EventPredicate::all(ViewScrolled).unwrap();
        assert_eq!(predicate.mode(), WaitMode::All);
        assert!(predicate.observe(ViewScrolled));
    }

    proptest! {
        #[test]
        fn prop_all_satisfied_exactly_when_both_seen(
            stream in proptest::collection::vec(0usize..4, 0..24)
        ) {
            let pool = [WindowStateChanged, WindowContentChanged, ViewClicked, Announcement];
            let mut predicate =
                EventPredicate::all(WindowStateChanged | WindowContentChanged).unwrap();
            let mut seen_a = false;
            let mut seen_b = false;
            let mut satisfied = false;
            for idx in stream {
                let kind = pool[idx];
                seen_a |= kind == WindowStateChanged;
                seen_b |= kind == WindowContentChanged;
                satisfied = predicate.observe(kind);
                if satisfied {
                    break;
                }
                prop_assert!(!(seen_a && seen_b));
            }
            prop_assert_eq!(satisfied, seen_a && seen_b);
        }
    }
}
