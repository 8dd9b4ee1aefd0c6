pub use crate::config::{ConfigError, load_config};
pub use crate::domain::config::ApiConfig;
pub use crate::domain::slice::{FeatureSlice, InitializedSlice};
pub use crate::error::format_context;
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateError};
