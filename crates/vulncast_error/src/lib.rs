//! Error types for the Vulncast content bot.
//!
//! This crate provides the foundation error types used throughout the
//! Vulncast workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enums define specific error conditions where more than one
//!   condition exists
//! - `*Error` structs wrap the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use vulncast_error::{VulncastResult, FeedError};
//!
//! fn fetch_disclosures() -> VulncastResult<Vec<String>> {
//!     Err(FeedError::new("Connection refused"))?
//! }
//!
//! match fetch_disclosures() {
//!     Ok(ids) => println!("Got {} disclosures", ids.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod feed;
mod generation;
mod publish;
mod store;

pub use config::ConfigError;
pub use error::{VulncastError, VulncastErrorKind, VulncastResult};
pub use feed::FeedError;
pub use generation::GenerationError;
pub use publish::{PublishError, PublishErrorKind};
pub use store::{StoreError, StoreErrorKind};
