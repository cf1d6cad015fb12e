//! Errors surfaced at the controller boundary.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum SupportError {
    /// Submit was requested while the form does not pass validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No gateway was supplied, so nothing can be sent.
    #[error("SupportKit is not configured: no submission gateway was provided")]
    NotConfigured,

    /// Submit was requested from a thread with no async runtime to run it on.
    #[error("no async runtime is available to run the submission")]
    NoRuntime,

    /// The gateway reported a failure; the text is passed through unchanged.
    #[error(transparent)]
    Submission(#[from] GatewayError),
}
