//! # Proxy Tables
//!
//! One generic invocation table per entity class, so the native side can
//! call host methods without a hand-written stub per method per kind.
//!
//! Class method sets are declared explicitly at initialization (the host
//! language has no universal runtime reflection to lean on). A class may
//! name a parent, but [`build_proxy_table`] only takes the methods
//! declared directly on the class itself: callers that need inherited
//! behavior flatten it into the class at registration time.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CallError;
use crate::value::Value;

/// Type-erased method wrapper: `(instance, args) -> result`.
type ErasedMethod = Arc<dyn Fn(&dyn Any, &[Value]) -> Result<Value, CallError> + Send + Sync>;

/// Declaration of an entity class: its name, optional parent, and the
/// methods declared directly on it.
#[derive(Clone)]
pub struct ClassSpec {
    name: &'static str,
    parent: Option<Arc<ClassSpec>>,
    methods: Vec<(&'static str, ErasedMethod)>,
}

impl fmt::Debug for ClassSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassSpec")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name))
            .field("methods", &self.methods.len())
            .finish()
    }
}

impl ClassSpec {
    /// Starts a class declaration.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            methods: Vec::new(),
        }
    }

    /// Names the parent class. Parent methods are NOT inherited by the
    /// built table; this exists so hosts can introspect the hierarchy.
    #[must_use]
    pub fn with_parent(mut self, parent: Arc<ClassSpec>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declares a method directly on this class.
    ///
    /// The typed closure is erased over `&dyn Any`; invoking it with an
    /// instance of the wrong type yields [`CallError::WrongInstanceType`]
    /// instead of a panic. Re-declaring a name replaces the previous
    /// wrapper.
    #[must_use]
    pub fn method<T, F>(mut self, name: &'static str, f: F) -> Self
    where
        T: 'static,
        F: Fn(&T, &[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        let class_name = self.name;
        let erased: ErasedMethod = Arc::new(move |instance, args| {
            let instance = instance
                .downcast_ref::<T>()
                .ok_or(CallError::WrongInstanceType {
                    expected: class_name,
                })?;
            f(instance, args)
        });
        self.methods.retain(|(existing, _)| *existing != name);
        self.methods.push((name, erased));
        self
    }

    /// Class name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Parent class, if declared.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<ClassSpec>> {
        self.parent.as_ref()
    }

    /// Number of directly declared methods.
    #[must_use]
    pub fn declared_len(&self) -> usize {
        self.methods.len()
    }
}

/// A built method-invocation table for one class.
#[derive(Clone)]
pub struct ProxyTable {
    class_name: &'static str,
    methods: HashMap<&'static str, ErasedMethod>,
}

impl fmt::Debug for ProxyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyTable")
            .field("class_name", &self.class_name)
            .field("methods", &self.methods.len())
            .finish()
    }
}

impl ProxyTable {
    /// Name of the class this table was built for.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Invokes a method on an instance.
    ///
    /// # Errors
    ///
    /// [`CallError::UnknownMethod`] for names not in the table, plus
    /// whatever the wrapper itself reports.
    pub fn invoke(
        &self,
        method: &str,
        instance: &dyn Any,
        args: &[Value],
    ) -> Result<Value, CallError> {
        let wrapper = self
            .methods
            .get(method)
            .ok_or_else(|| CallError::UnknownMethod(method.to_owned()))?;
        wrapper(instance, args)
    }

    /// True if the table has a method of this name.
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Names of all methods in the table, sorted.
    #[must_use]
    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of methods in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// True if the table has no methods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Builds the invocation table for a class: exactly one entry per method
/// declared directly on `spec`, regardless of what any parent declares.
#[must_use]
pub fn build_proxy_table(spec: &ClassSpec) -> ProxyTable {
    let methods = spec
        .methods
        .iter()
        .map(|(name, wrapper)| (*name, Arc::clone(wrapper)))
        .collect();
    ProxyTable {
        class_name: spec.name,
        methods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Creep {
        energy: i64,
    }

    struct RoomObject;

    fn room_object_spec() -> Arc<ClassSpec> {
        Arc::new(
            ClassSpec::new("RoomObject")
                .method::<RoomObject, _>("getPosition", |_, _| Ok(Value::Unit)),
        )
    }

    fn creep_spec() -> ClassSpec {
        ClassSpec::new("Creep")
            .with_parent(room_object_spec())
            .method::<Creep, _>("foo", |creep, _| Ok(Value::Int(creep.energy)))
            .method::<Creep, _>("bar", |creep, args| {
                let delta = args
                    .first()
                    .and_then(Value::as_int)
                    .ok_or(CallError::BadArgument {
                        index: 0,
                        expected: "Int",
                    })?;
                Ok(Value::Int(creep.energy + delta))
            })
    }

    #[test]
    fn test_table_has_exactly_declared_methods() {
        let table = build_proxy_table(&creep_spec());
        assert_eq!(table.method_names(), vec!["bar", "foo"]);
        // Parent's methods are not walked into the table.
        assert!(!table.contains("getPosition"));
    }

    #[test]
    fn test_invoke_dispatches_to_instance() {
        let table = build_proxy_table(&creep_spec());
        let creep = Creep { energy: 40 };

        assert_eq!(table.invoke("foo", &creep, &[]), Ok(Value::Int(40)));
        assert_eq!(
            table.invoke("bar", &creep, &[Value::Int(2)]),
            Ok(Value::Int(42))
        );
    }

    #[test]
    fn test_unknown_method() {
        let table = build_proxy_table(&creep_spec());
        let creep = Creep { energy: 0 };
        assert_eq!(
            table.invoke("baz", &creep, &[]),
            Err(CallError::UnknownMethod("baz".into()))
        );
    }

    #[test]
    fn test_wrong_instance_type() {
        let table = build_proxy_table(&creep_spec());
        let not_a_creep = RoomObject;
        assert_eq!(
            table.invoke("foo", &not_a_creep, &[]),
            Err(CallError::WrongInstanceType { expected: "Creep" })
        );
    }

    #[test]
    fn test_bad_argument() {
        let table = build_proxy_table(&creep_spec());
        let creep = Creep { energy: 1 };
        assert_eq!(
            table.invoke("bar", &creep, &[Value::Str("nope".into())]),
            Err(CallError::BadArgument {
                index: 0,
                expected: "Int",
            })
        );
    }

    #[test]
    fn test_redeclared_method_replaces() {
        let spec = ClassSpec::new("X")
            .method::<Creep, _>("m", |_, _| Ok(Value::Int(1)))
            .method::<Creep, _>("m", |_, _| Ok(Value::Int(2)));
        let table = build_proxy_table(&spec);
        assert_eq!(table.len(), 1);
        let creep = Creep { energy: 0 };
        assert_eq!(table.invoke("m", &creep, &[]), Ok(Value::Int(2)));
    }
}
