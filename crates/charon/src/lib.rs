//! # CHARON - The Ferryman
//!
//! Cross-runtime marshalling between a live host object graph and a
//! native runtime that reads the results straight out of a shared
//! buffer.
//!
//! ## Data Flow
//!
//! ```text
//! HOST (per cycle)                    NATIVE
//!   |                                    |
//!   |  startup: publish groups --------->| resolve once, cache refs
//!   |                                    |
//!   |  query_region(results) -> count    |
//!   |                                    | read count * 56 bytes
//!   |                                    | by fixed offset
//!   |<-- checkIn / proxy calls ----------|
//! ```
//!
//! Batch encode-then-read, plus a call-proxy registry. Not a message
//! queue: there is no streaming and no per-object call round trip.
//!
//! ## Example
//!
//! ```rust,ignore
//! use charon::{publish_standard_groups, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default());
//! let info = session.initialize(game_time)?;        // once
//! publish_standard_groups(&mut session, &classes);  // once
//!
//! // every cycle:
//! let outcome = session.query_region(&query_results)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bindings;
pub mod config;
pub mod session;

pub use bindings::{publish_standard_groups, GAME_GROUP, OBJECT_GROUP, WRAPPED_GROUP};
pub use config::{ConfigError, SessionConfig};
pub use session::{Session, SessionError};

// The two halves of the crossing, re-exported for drivers that need the
// underlying types.
pub use charon_marshal as marshal;
pub use charon_registry as registry;
