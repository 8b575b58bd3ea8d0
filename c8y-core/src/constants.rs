//! Platform-wide constants.

/// Client name, used in the default config directory.
pub const APP_NAME: &str = "c8y";

/// Client version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default vendor segment of the `application/vnd.<vendor>.<resource>+json` media types.
pub const DEFAULT_MEDIA_VENDOR: &str = "com.nsn.cumulocity";

/// Smallest page size the platform accepts.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size the platform accepts.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Query parameter names understood by every collection resource.
pub mod query {
    pub const PAGE_SIZE: &str = "pageSize";
    pub const CURRENT_PAGE: &str = "currentPage";
    pub const WITH_TOTAL_PAGES: &str = "withTotalPages";
}

/// Base paths of the platform's REST resources.
pub mod paths {
    pub const NEW_DEVICE_REQUESTS: &str = "/devicecontrol/newDeviceRequests";
    pub const DEVICE_CREDENTIALS: &str = "/devicecontrol/deviceCredentials";
    pub const OPERATIONS: &str = "/devicecontrol/operations";
    pub const BULK_OPERATIONS: &str = "/devicecontrol/bulkoperations";
    pub const MANAGED_OBJECTS: &str = "/inventory/managedObjects";
    pub const EVENTS: &str = "/event/events";
    pub const ROLES: &str = "/user/roles";

    /// `/user/{tenant}/users`
    pub fn users(tenant: &str) -> String {
        format!("/user/{tenant}/users")
    }

    /// `/user/{tenant}/groups`
    pub fn groups(tenant: &str) -> String {
        format!("/user/{tenant}/groups")
    }
}
