//! # Wire Codecs
//!
//! Field-level encoders shared by the packet encoder: fixed-width
//! identifiers, position records, and packed creep bodies.

pub mod body;
pub mod ident;
pub mod position;
