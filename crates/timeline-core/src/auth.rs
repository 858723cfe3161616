//! Delete-affordance gate
//!
//! The client never decides authorization. The server computes the auth flag
//! while rendering the page and the gate only reflects it, so a forged flag
//! yields a button whose request the server will still refuse.

use timeline_types::AuthFlag;

/// Decides whether a delete control is attached to a pane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthGate;

impl AuthGate {
    /// Create gate
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether the viewer is offered a delete control
    #[inline]
    #[must_use]
    pub fn can_delete(&self, flag: AuthFlag) -> bool {
        flag.is_logged_in()
    }

    /// Same decision, straight from the surface marker
    #[inline]
    #[must_use]
    pub fn can_delete_marker(&self, marker: Option<&str>) -> bool {
        self.can_delete(AuthFlag::from_marker(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_marker_only() {
        let gate = AuthGate::new();
        assert!(gate.can_delete_marker(Some("logged-in")));
        assert!(!gate.can_delete_marker(Some("Logged-In")));
        assert!(!gate.can_delete_marker(Some(" logged-in")));
        assert!(!gate.can_delete_marker(Some("")));
        assert!(!gate.can_delete_marker(None));
    }

    proptest! {
        #[test]
        fn any_other_marker_is_denied(marker in "\\PC*") {
            prop_assume!(marker != "logged-in");
            prop_assert!(!AuthGate::new().can_delete_marker(Some(&marker)));
        }
    }
}
