use thiserror::Error;

use super::InternalError;

/// Failures of the authorization oracle itself
///
/// A denial is not an error; it is an `Ok(false)` review result.
#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Access review for {verb} in namespace {namespace} failed: {source}")]
    ReviewFailed {
        namespace: String,
        verb: String,
        #[source]
        source: Box<InternalError>,
    },
}
