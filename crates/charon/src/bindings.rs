//! # Standard Binding Groups
//!
//! The capability groups every native session expects to resolve at
//! startup: generic object helpers, the game surface, and one proxy
//! table per registered entity class.

use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use charon_marshal::{EntityKind, UNREGISTERED_TAG};
use charon_registry::{
    build_proxy_table, Binding, CallError, CapabilityGroup, ClassSpec, Value,
};

use crate::session::Session;

/// Qualified name of the generic object helper group.
pub const OBJECT_GROUP: &str = "object";

/// Qualified name of the game surface group.
pub const GAME_GROUP: &str = "game";

/// Qualified name of the wrapped-prototype group.
pub const WRAPPED_GROUP: &str = "game/prototypes/wrapped";

/// Builds and registers the standard groups on `session`, with one proxy
/// table per class in `classes`.
///
/// Call after [`Session::initialize`], so the class-name lookup sees the
/// registered type tags. Re-publishing replaces the previous groups
/// entirely.
pub fn publish_standard_groups(session: &mut Session, classes: &[Arc<ClassSpec>]) {
    // Wire tag -> host class name, frozen at publish time. The native
    // side reads a record's type_tag and asks here which wrapped
    // prototype to construct.
    let mut class_names: HashMap<i64, &'static str> = HashMap::new();
    for kind in EntityKind::ALL {
        let tag = session.tags().tag_of(kind);
        if tag != UNREGISTERED_TAG {
            class_names.insert(i64::from(tag), kind.name());
        }
    }

    let object = CapabilityGroup::new()
        .with(
            "getConstructorOf",
            Binding::function(move |args| {
                let tag = args
                    .first()
                    .and_then(Value::as_int)
                    .ok_or(CallError::BadArgument {
                        index: 0,
                        expected: "Int",
                    })?;
                Ok(class_names
                    .get(&tag)
                    .map_or(Value::Unit, |name| Value::Str((*name).to_owned())))
            }),
        )
        .with(
            "interpretDateTime",
            Binding::function(|args| {
                let millis = match args.first() {
                    Some(Value::Num(n)) => *n,
                    #[allow(clippy::cast_precision_loss)]
                    Some(Value::Int(i)) => *i as f64,
                    _ => {
                        return Err(CallError::BadArgument {
                            index: 0,
                            expected: "Num",
                        })
                    }
                };
                Ok(Value::Num(millis / 1000.0))
            }),
        );

    let cell = session.check_in_cell();
    let game = CapabilityGroup::new().with(
        "checkIn",
        Binding::function(move |args| {
            let cycle = args
                .first()
                .and_then(Value::as_int)
                .ok_or(CallError::BadArgument {
                    index: 0,
                    expected: "Int",
                })?;
            let cycle = u64::try_from(cycle).map_err(|_| CallError::BadArgument {
                index: 0,
                expected: "non-negative Int",
            })?;
            cell.store(cycle, Ordering::Relaxed);
            Ok(Value::Unit)
        }),
    );

    let mut wrapped = CapabilityGroup::new();
    for spec in classes {
        wrapped.insert(
            spec.name(),
            Binding::Proxy(Arc::new(build_proxy_table(spec))),
        );
    }

    let registry = session.registry_mut();
    registry.register_group(OBJECT_GROUP, object);
    registry.register_group(GAME_GROUP, game);
    registry.register_group(WRAPPED_GROUP, wrapped);
    tracing::info!(classes = classes.len(), "standard capability groups published");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;

    struct Source {
        energy: i64,
    }

    fn source_spec() -> Arc<ClassSpec> {
        Arc::new(
            ClassSpec::new("Source")
                .method::<Source, _>("getEnergy", |source, _| Ok(Value::Int(source.energy))),
        )
    }

    #[test]
    fn test_standard_groups_resolve() {
        let mut session = Session::new(SessionConfig::default());
        session.initialize(0).unwrap();
        publish_standard_groups(&mut session, &[source_spec()]);

        for name in [OBJECT_GROUP, GAME_GROUP, WRAPPED_GROUP] {
            assert!(session.registry().resolve(name).is_ok());
        }
    }

    #[test]
    fn test_get_constructor_of_maps_tags_to_class_names() {
        let mut session = Session::new(SessionConfig::default());
        session.initialize(0).unwrap();
        publish_standard_groups(&mut session, &[]);

        let lookup = session
            .registry()
            .resolve_member(OBJECT_GROUP, "getConstructorOf")
            .unwrap()
            .as_function()
            .unwrap()
            .clone();
        let tag = i64::from(session.tags().tag_of(EntityKind::Spawn));
        assert_eq!(
            lookup(&[Value::Int(tag)]),
            Ok(Value::Str("StructureSpawn".into()))
        );
        // The unregistered sentinel names no class.
        assert_eq!(
            lookup(&[Value::Int(i64::from(UNREGISTERED_TAG))]),
            Ok(Value::Unit)
        );
        assert!(lookup(&[]).is_err());
    }

    #[test]
    fn test_checkin_binding_feeds_watchdog() {
        let mut session = Session::new(SessionConfig::default());
        session.initialize(0).unwrap();
        publish_standard_groups(&mut session, &[]);

        let check_in = session
            .registry()
            .resolve_member(GAME_GROUP, "checkIn")
            .unwrap()
            .as_function()
            .unwrap()
            .clone();
        check_in(&[Value::Int(7)]).unwrap();
        assert_eq!(session.cycles_since_check_in(7), 0);
    }

    #[test]
    fn test_checkin_rejects_negative_cycles() {
        let mut session = Session::new(SessionConfig::default());
        session.initialize(5).unwrap();
        publish_standard_groups(&mut session, &[]);

        let check_in = session
            .registry()
            .resolve_member(GAME_GROUP, "checkIn")
            .unwrap()
            .as_function()
            .unwrap()
            .clone();
        assert_eq!(
            check_in(&[Value::Int(-3)]),
            Err(CallError::BadArgument {
                index: 0,
                expected: "non-negative Int",
            })
        );
        // A rejected check-in must not disturb the watchdog.
        assert_eq!(session.cycles_since_check_in(5), 0);
    }

    #[test]
    fn test_wrapped_prototypes_invoke() {
        let mut session = Session::new(SessionConfig::default());
        session.initialize(0).unwrap();
        publish_standard_groups(&mut session, &[source_spec()]);

        let binding = session
            .registry()
            .resolve_member(WRAPPED_GROUP, "Source")
            .unwrap();
        let table = binding.as_proxy().unwrap();
        let source = Source { energy: 3000 };
        assert_eq!(
            table.invoke("getEnergy", &source, &[]),
            Ok(Value::Int(3000))
        );
    }

    #[test]
    fn test_interpret_date_time() {
        let mut session = Session::new(SessionConfig::default());
        session.initialize(0).unwrap();
        publish_standard_groups(&mut session, &[]);

        let f = session
            .registry()
            .resolve_member(OBJECT_GROUP, "interpretDateTime")
            .unwrap()
            .as_function()
            .unwrap()
            .clone();
        assert_eq!(f(&[Value::Num(1500.0)]), Ok(Value::Num(1.5)));
    }
}
