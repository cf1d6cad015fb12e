//! SupportKit: an embeddable feedback form backed by a pluggable store.
//!
//! The domain model and the pure state machine live in `supportkit-core`
//! and are re-exported here. This crate adds the Tokio-driven
//! [`SubmissionController`], the [`SupportKit`] entry point and a Firestore
//! provider.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use supportkit::{FeedbackKind, FirestoreGateway, FirestoreSettings, SupportKit};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = FirestoreGateway::new(FirestoreSettings::load_default()?)?;
//! let kit = SupportKit::new(Arc::new(gateway));
//!
//! let form = kit.controller();
//! form.set_email("user@example.com");
//! form.set_kind(FeedbackKind::Bug);
//! form.set_description("The app crashes when I open settings");
//!
//! if let Some(ticket) = form.request_submit()? {
//!     ticket.finished().await;
//! }
//! println!("{:?}", form.status());
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod firestore;
pub mod kit;

pub use controller::{SubmissionController, SubmissionOutcome, SubmissionTicket};
pub use firestore::{ConfigError, FirestoreGateway, FirestoreSettings};
pub use kit::SupportKit;
pub use supportkit_core::*;
