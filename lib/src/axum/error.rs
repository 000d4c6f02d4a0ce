use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::{Error, ErrorKind};

/// Implements conversion into a response for all possible error variants.
///
/// Lookup failures become `404`, malformed input becomes `400`. Anything else
/// is logged and answered with an empty `500`; its details are only available
/// through the application logs.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self.kind {
            ErrorKind::PageNotFound(_) | ErrorKind::PathNotFound(_) => {
                tracing::debug!("{}", self.kind);
                (StatusCode::NOT_FOUND, self.kind.to_string()).into_response()
            }
            ErrorKind::InvalidPath(_)
            | ErrorKind::DuplicatePage(_)
            | ErrorKind::DuplicatePath(_)
            | ErrorKind::MissingPage(_)
            | ErrorKind::BaseMismatch(_)
            | ErrorKind::ParsingError(_) => {
                tracing::trace!("{}", self.kind);
                (StatusCode::BAD_REQUEST, self.kind.to_string()).into_response()
            }
            _ => {
                tracing::error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
