use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMIN, ROLE_REPORTER, ROLE_SUPERVISOR};

/// Session context resolved from a validated bearer token.
///
/// Passed explicitly to every data-access call; there is no ambient
/// authentication state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub account_id: String,
    pub sub: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user is admin (backup export, incident review, full access)
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Check if user is supervisor (incident review, payment registration)
    pub fn is_supervisor(&self) -> bool {
        self.has_role(ROLE_SUPERVISOR)
    }

    /// Check if user is reporter (incident submission, media upload)
    pub fn is_reporter(&self) -> bool {
        self.has_role(ROLE_REPORTER)
    }

    /// Check if user has supervisor-level access (admin or supervisor)
    pub fn has_supervisor_access(&self) -> bool {
        self.is_admin() || self.is_supervisor()
    }

    /// Check if user has reporter-level access (any known role)
    pub fn has_reporter_access(&self) -> bool {
        self.has_supervisor_access() || self.is_reporter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            account_id: "acc-1".to_string(),
            sub: "sub-1".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_admin_has_every_access_level() {
        let user = user_with_roles(&["admin"]);
        assert!(user.is_admin());
        assert!(user.has_supervisor_access());
        assert!(user.has_reporter_access());
    }

    #[test]
    fn test_supervisor_is_not_admin() {
        let user = user_with_roles(&["supervisor"]);
        assert!(!user.is_admin());
        assert!(user.has_supervisor_access());
        assert!(user.has_reporter_access());
    }

    #[test]
    fn test_reporter_has_only_reporter_access() {
        let user = user_with_roles(&["reporter"]);
        assert!(!user.has_supervisor_access());
        assert!(user.has_reporter_access());
    }

    #[test]
    fn test_unknown_role_has_no_access() {
        let user = user_with_roles(&["visitor"]);
        assert!(!user.has_reporter_access());
    }
}
