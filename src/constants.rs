/// Version of the Flipt Rust client.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const USER_AGENT_VALUE: &str = concat!("Flipt-Rust/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const BOOLEAN_EVALUATION_PATH: &str = "/evaluate/v1/boolean";
pub const VARIANT_EVALUATION_PATH: &str = "/evaluate/v1/variant";

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";
