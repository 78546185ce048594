//! API constants for the Intacct XML gateway

/// Default gateway; replaced by the session endpoint once a session is established
pub const API_URL: &str = "https://api.intacct.com/ia/xml/xmlgw.phtml";

/// Content type the gateway expects on every request
pub const CONTENT_TYPE: &str = "x-intacct-xml-request";

pub const USER_AGENT: &str = concat!("intacct-cli/", env!("CARGO_PKG_VERSION"));

/// Page size used when none is requested or the request exceeds the maximum
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Largest page size the gateway accepts for readByQuery
pub const MAX_PAGE_SIZE: u32 = 100_000;

/// Protocol versions accepted in the control block
pub const DTD_VERSIONS: [&str; 2] = ["3.0", "2.1"];

pub const DEFAULT_DTD_VERSION: &str = "3.0";

pub const DEFAULT_CONTROL_ID: &str = "foobar";

/// Record types whose metadata is cached by default
pub const DEFAULT_CACHE_OBJECTS: [&str; 2] = ["User", "User Role"];

/// Metadata cache file name, stored in the user's home directory
pub const CACHE_FILE_NAME: &str = ".intacct.cache";

/// Result status reported by the gateway on success
pub const STATUS_SUCCESS: &str = "success";

/// Response paths
pub mod paths {
    pub const CONTROL_STATUS: &str = "control/status";
    pub const RESULT: &str = "operation/result";
    pub const RESULT_DATA: &str = "operation/result/data";
    pub const SESSION_ID: &str = "operation/result/data/api/sessionid";
    pub const SESSION_ENDPOINT: &str = "operation/result/data/api/endpoint";
}
