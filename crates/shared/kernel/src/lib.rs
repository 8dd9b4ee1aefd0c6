//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading, the slice-aware server state
//! and the system routes every deployment exposes.
//!
//! ## Config loading
//! ```rust,no_run
//! use hugo_kernel::config::load_config;
//! use hugo_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! ```
pub mod config;
pub mod error;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use hugo_domain as domain;
