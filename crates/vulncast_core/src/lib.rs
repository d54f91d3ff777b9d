//! Domain types and pure decision logic for the Vulncast content bot.
//!
//! This crate holds everything that needs no I/O: the disclosure and post
//! records, the daily cadence counters, the interestingness classifier, and
//! the post metadata annotator. The orchestration layer in `vulncast_bot`
//! composes these with the collaborator contracts from `vulncast_interface`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotate;
mod cadence;
mod classify;
mod disclosure;
mod post;
mod telemetry;

pub use annotate::{Annotation, annotate, key_concepts, prerequisites, technical_depth};
pub use cadence::CadenceState;
pub use classify::{Verdict, classify};
pub use disclosure::DisclosureRecord;
pub use post::PostRecord;
pub use telemetry::init_telemetry;
