//! # CHARON Registry - The Ledger
//!
//! The entire surface the native runtime can call into the host through.
//!
//! ## Architecture
//!
//! - **Values**: [`Value`] is the boundary call currency - arguments and
//!   results of every cross-runtime invocation.
//! - **Proxy Tables**: one generic invocation table per entity class,
//!   built from explicit per-class registrations (one entry per method
//!   declared directly on the class; parent declarations are not walked).
//! - **Capability Registry**: a flat namespace of qualified group names
//!   (`"object"`, `"game"`, `"game/prototypes/wrapped"`) mapping symbol
//!   names to direct functions, nested groups, or proxy tables.
//!
//! The native side resolves every name it needs once at startup and
//! caches the references; a missing name at that point is fatal to the
//! session, so [`RegistryError::UnknownCapability`] carries the name.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod capability;
pub mod error;
pub mod proxy;
pub mod value;

pub use capability::{Binding, CapabilityGroup, CapabilityRegistry, HostFn};
pub use error::{CallError, RegistryError, RegistryResult};
pub use proxy::{build_proxy_table, ClassSpec, ProxyTable};
pub use value::Value;
