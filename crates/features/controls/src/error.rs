use hugo_kernel::error::format_context;
use std::borrow::Cow;

/// Errors returned by the control registry and its HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The referenced id is not in the registry.
    #[error("control with id={id} does not exist.{}", format_context(.context))]
    NotFound { id: i64, context: Option<Cow<'static, str>> },

    /// A control with this id is already registered.
    #[error("control with id={id} already exists.{}", format_context(.context))]
    Conflict { id: i64, context: Option<Cow<'static, str>> },

    /// The request carried nothing to act on.
    #[error("{message}{}", format_context(.context))]
    InvalidArgument { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The registry slice is not wired into the server state.
    #[cfg(feature = "server")]
    #[error("Controls state error{}: {source}", format_context(.context))]
    State {
        #[source]
        source: hugo_kernel::server::ApiStateError,
        context: Option<Cow<'static, str>>,
    },
}

impl ControlError {
    pub(crate) const fn not_found(id: i64) -> Self {
        Self::NotFound { id, context: None }
    }

    pub(crate) const fn conflict(id: i64) -> Self {
        Self::Conflict { id, context: None }
    }

    pub(crate) fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument { message: message.into(), context: None }
    }

    /// Attaches a context note shown in parentheses after the message.
    #[must_use]
    pub fn context(mut self, note: impl Into<Cow<'static, str>>) -> Self {
        match &mut self {
            Self::NotFound { context, .. }
            | Self::Conflict { context, .. }
            | Self::InvalidArgument { context, .. } => *context = Some(note.into()),
            #[cfg(feature = "server")]
            Self::State { context, .. } => *context = Some(note.into()),
        }
        self
    }
}

#[cfg(feature = "server")]
impl From<hugo_kernel::server::ApiStateError> for ControlError {
    fn from(source: hugo_kernel::server::ApiStateError) -> Self {
        Self::State { source, context: None }
    }
}

#[cfg(feature = "server")]
mod http {
    use super::ControlError;
    use crate::handlers::ErrorResponse;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    impl ControlError {
        #[must_use]
        pub const fn status_code(&self) -> StatusCode {
            match self {
                Self::NotFound { .. } => StatusCode::NOT_FOUND,
                Self::Conflict { .. } | Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
                Self::State { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for ControlError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if status.is_server_error() {
                tracing::error!(error = %self, "Controls request failed");
            }

            (status, Json(ErrorResponse { detail: self.to_string() })).into_response()
        }
    }
}
