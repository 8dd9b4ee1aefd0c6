//! Names shared between the HTTP surface and the OpenAPI document.

pub const API_TITLE: &str = "Hugo";
pub const API_DESCRIPTION: &str = "Compliance Assistance";
pub const API_VERSION: &str = "0.0.1";

pub const SYSTEM_TAG: &str = "System";
pub const CONTROLS_TAG: &str = "Controls";

/// Environment variable prefix for configuration overrides (`HUGO__SERVER__PORT`).
pub const ENV_PREFIX: &str = "HUGO";
/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG: &str = "server";
