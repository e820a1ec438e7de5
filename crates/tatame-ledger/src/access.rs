//! Access control gate: which surface does a caller get?

use tatame_common::models::member::Role;
use tatame_store::Identity;

/// Where a caller lands once their session is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// No identity — back to login.
    Denied,
    /// A student gets the dashboard.
    GrantStudent,
    /// An admin is never shown the student dashboard.
    RedirectAdmin,
}

/// Resolve the access decision for a caller.
///
/// Returns `None` while the role is not yet known for an authenticated
/// identity: that state is still-loading, and presenting a view from it would
/// be wrong. Only a missing identity short-circuits to `Denied`.
pub fn resolve_access(identity: Option<&Identity>, role: Option<Role>) -> Option<AccessDecision> {
    match (identity, role) {
        (None, _) => Some(AccessDecision::Denied),
        (Some(_), None) => None,
        (Some(_), Some(role)) if role.is_admin() => Some(AccessDecision::RedirectAdmin),
        (Some(_), Some(_)) => Some(AccessDecision::GrantStudent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            uid: "u1".into(),
            email: "ana@example.com".into(),
        }
    }

    #[test]
    fn no_identity_is_denied() {
        assert_eq!(resolve_access(None, None), Some(AccessDecision::Denied));
        // A stale role without an identity is still a denial.
        assert_eq!(
            resolve_access(None, Some(Role::Admin)),
            Some(AccessDecision::Denied)
        );
    }

    #[test]
    fn unknown_role_is_not_a_decision() {
        let id = identity();
        assert_eq!(resolve_access(Some(&id), None), None);
    }

    #[test]
    fn admin_is_redirected_away_from_dashboard() {
        let id = identity();
        assert_eq!(
            resolve_access(Some(&id), Some(Role::Admin)),
            Some(AccessDecision::RedirectAdmin)
        );
    }

    #[test]
    fn student_gets_dashboard() {
        let id = identity();
        assert_eq!(
            resolve_access(Some(&id), Some(Role::Student)),
            Some(AccessDecision::GrantStudent)
        );
    }
}
