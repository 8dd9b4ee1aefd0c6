use crate::domain::constants::{DEFAULT_CONFIG, ENV_PREFIX};
use crate::error::format_context;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Error raised while assembling or deserializing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config {
        #[source]
        source: config::ConfigError,
        context: Option<Cow<'static, str>>,
    },
}

impl ConfigError {
    fn with(context: &'static str) -> impl FnOnce(config::ConfigError) -> Self {
        move |source| Self::Config { source, context: Some(context.into()) }
    }
}

/// Loads configuration by layering environment overrides on top of an optional file.
///
/// 1. **Base File**: `path` (extension optional, `server` by default). A missing file is not an
///    error; every section falls back to its defaults.
/// 2. **Environment Overrides**: variables prefixed with `HUGO__`, nested with double
///    underscores (`HUGO__SERVER__PORT=9000` maps to `server.port`).
///
/// # Errors
/// Returns [`ConfigError`] if a source is malformed or the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use hugo_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    info!("Loading config from {}", effective_path.display());

    load_layered(&effective_path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__").try_parsing(true)
}

fn load_layered<T>(path: &Path, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(env)
        .build()
        .map_err(ConfigError::with("Failed to build config"))?
        .try_deserialize::<T>()
        .map_err(ConfigError::with("Failed to deserialize config"))
}
