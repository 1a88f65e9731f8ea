//! # Capability Registry
//!
//! Named groups of bindings the native runtime resolves once at startup:
//! direct functions, nested groups, and proxy tables.
//!
//! Group names form a flat namespace of qualified strings (`"object"`,
//! `"game"`, `"game/prototypes/wrapped"`). Re-registering a name replaces
//! the previous group entirely; there is no merge. After startup the
//! native side calls through its cached references, never through the
//! registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CallError, RegistryError, RegistryResult};
use crate::proxy::ProxyTable;
use crate::value::Value;

/// A directly callable host function.
pub type HostFn = Arc<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;

/// One named member of a capability group.
#[derive(Clone)]
pub enum Binding {
    /// A direct function.
    Function(HostFn),
    /// A nested group.
    Group(CapabilityGroup),
    /// A per-class proxy table.
    Proxy(Arc<ProxyTable>),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Binding::Function"),
            Self::Group(group) => f.debug_tuple("Binding::Group").field(group).finish(),
            Self::Proxy(table) => f.debug_tuple("Binding::Proxy").field(table).finish(),
        }
    }
}

impl Binding {
    /// Wraps a closure as a direct function binding.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// The function, if this binding is one.
    #[must_use]
    pub fn as_function(&self) -> Option<&HostFn> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The nested group, if this binding is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&CapabilityGroup> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }

    /// The proxy table, if this binding is one.
    #[must_use]
    pub fn as_proxy(&self) -> Option<&ProxyTable> {
        match self {
            Self::Proxy(t) => Some(t),
            _ => None,
        }
    }
}

/// A named mapping from symbol name to binding.
#[derive(Clone, Debug, Default)]
pub struct CapabilityGroup {
    members: HashMap<String, Binding>,
}

impl CapabilityGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
        }
    }

    /// Adds or replaces a member, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.insert(name, binding);
        self
    }

    /// Adds or replaces a member.
    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) {
        self.members.insert(name.into(), binding);
    }

    /// Looks up a member.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.members.get(name)
    }

    /// Member names, sorted.
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The process-wide table of capability groups for one session.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    groups: HashMap<String, CapabilityGroup>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Registers a group under a qualified name.
    ///
    /// A second registration under the same name replaces the previous
    /// group's contents entirely.
    pub fn register_group(&mut self, name: impl Into<String>, group: CapabilityGroup) {
        let name = name.into();
        if self.groups.insert(name.clone(), group).is_some() {
            tracing::debug!(group = %name, "capability group replaced");
        }
    }

    /// Resolves a group by qualified name.
    ///
    /// Called once per name at native-runtime startup; the caller caches
    /// the result for the rest of the session.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownCapability`] - fatal to the session's
    /// startup.
    pub fn resolve(&self, name: &str) -> RegistryResult<&CapabilityGroup> {
        self.groups
            .get(name)
            .ok_or_else(|| RegistryError::UnknownCapability(name.to_owned()))
    }

    /// Resolves a single member in one step.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownCapability`] or
    /// [`RegistryError::UnknownMember`].
    pub fn resolve_member(&self, group: &str, member: &str) -> RegistryResult<&Binding> {
        self.resolve(group)?
            .get(member)
            .ok_or_else(|| RegistryError::UnknownMember {
                group: group.to_owned(),
                member: member.to_owned(),
            })
    }

    /// Registered group names, sorted.
    #[must_use]
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
