//! Core library for SupportKit.
//!
//! This crate provides the feedback data model, validation, the submission
//! gateway abstraction and the pure form state machine, independent of any
//! async runtime or storage backend.
//!
//! # Usage
//!
//! ```
//! use supportkit_core::{reduce, FeedbackKind, FormEvent, FormState};
//!
//! let state = reduce(FormState::default(), FormEvent::EmailChanged("a@b.com".into()));
//! let state = reduce(state, FormEvent::DescriptionChanged("crash on launch".into()));
//! let state = reduce(state, FormEvent::KindChanged(FeedbackKind::Bug));
//!
//! assert!(state.is_valid());
//! ```

pub mod error;
pub mod gateway;
pub mod models;
pub mod state;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::SupportError;
pub use gateway::{GatewayError, MemoryGateway, SubmissionGateway};
pub use models::*;
pub use state::{reduce, FormEvent, FormState, SubmitBlocked, SubmissionStatus, SUCCESS_MESSAGE};
pub use validation::{validate, ValidationError};
