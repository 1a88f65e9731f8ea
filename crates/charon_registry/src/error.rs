//! # Registry Error Types

use thiserror::Error;

/// Errors from the capability registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The native side resolved a group name that was never registered.
    ///
    /// Resolution happens once at native-runtime startup; this error is
    /// fatal to that session.
    #[error("unknown capability group '{0}'")]
    UnknownCapability(String),

    /// A group member lookup failed after the group itself resolved.
    #[error("unknown member '{member}' in capability group '{group}'")]
    UnknownMember {
        /// Group that was resolved.
        group: String,
        /// Member that was missing.
        member: String,
    },
}

/// Errors from invoking a bound function or proxy method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The proxy table has no method of this name.
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// The instance passed to a proxy wrapper is not of the class the
    /// table was built for.
    #[error("instance is not a '{expected}'")]
    WrongInstanceType {
        /// Class name the table was built for.
        expected: &'static str,
    },

    /// An argument had the wrong shape for the method.
    #[error("bad argument {index}: expected {expected}")]
    BadArgument {
        /// Zero-based argument position.
        index: usize,
        /// What the wrapper expected there.
        expected: &'static str,
    },

    /// The host operation itself reported a failure code.
    #[error("host operation failed with code {0}")]
    HostFailure(i32),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
