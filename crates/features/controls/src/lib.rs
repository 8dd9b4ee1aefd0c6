//! Controls feature slice: an in-memory registry of compliance controls keyed by id,
//! plus the HTTP handlers that expose it.

mod error;
#[cfg(feature = "server")]
mod handlers;
mod registry;
#[cfg(feature = "server")]
pub mod router;

pub use error::ControlError;
#[cfg(feature = "server")]
pub use handlers::{
    AddedResponse, ControlsResponse, DeletedResponse, ErrorResponse, UpdatedResponse,
};
pub use registry::ControlRegistry;

use hugo_kernel::domain::slice::InitializedSlice;

/// Initialize the controls feature with an empty registry.
#[must_use]
pub fn init() -> InitializedSlice {
    tracing::info!("Controls slice initialized");
    InitializedSlice::new(ControlRegistry::new())
}
