/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - full access, including backup export and incident review
pub const ROLE_ADMIN: &str = "admin";

/// Supervisor role - can review incidents and register payments
pub const ROLE_SUPERVISOR: &str = "supervisor";

/// Reporter role - can submit incidents and upload media
pub const ROLE_REPORTER: &str = "reporter";
