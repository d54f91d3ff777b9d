//! Collaborator contracts for the Vulncast content bot.
//!
//! This crate defines the traits the decision-and-orchestration layer depends
//! on. The implementations behind them (HTTP feed client, text-generation
//! transport, publishing API, persistent storage) live outside the core and
//! are mocked in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ContentStore, FeedSource, Generator, Publisher};
pub use types::{GeneratedPost, GeneratedThread};
