//! The universe scope: predeclared types, constants and builtin functions.

use gocheck_core::{
    BasicKind, BuiltinId, ConstValue, InterfaceType, NamedType, Object, ObjectKind, Param, Signature, Span, Type,
    TypeHash, TypeId,
};

use crate::registry::SymbolRegistry;

/// Fill a fresh registry with the universe.
///
/// Basic types are pushed first, in discriminant order, so that
/// `BasicKind::type_id` addresses them.
pub(crate) fn populate(registry: &mut SymbolRegistry) {
    for kind in BasicKind::ALL {
        registry.push_type(Type::Basic(kind));
    }
    for kind in BasicKind::ALL {
        if kind == BasicKind::Invalid || kind.is_untyped() {
            continue;
        }
        declare_type_name(registry, kind.name(), kind.type_id());
    }
    declare_type_name(registry, "byte", BasicKind::Uint8.type_id());
    declare_type_name(registry, "rune", BasicKind::Int32.type_id());
    declare_error(registry);

    for (name, value) in [("true", true), ("false", false)] {
        registry.bind_universe(Object::new(
            name,
            None,
            Span::default(),
            ObjectKind::Constant {
                ty: BasicKind::UntypedBool.type_id(),
                value: ConstValue::Bool(value),
            },
        ));
    }
    registry.bind_universe(Object::new(
        "nil",
        None,
        Span::default(),
        ObjectKind::Constant {
            ty: BasicKind::UntypedNil.type_id(),
            value: ConstValue::Nil,
        },
    ));

    for id in BuiltinId::ALL {
        let ty = registry.push_type(Type::Builtin(id));
        registry.bind_universe(Object::new(
            id.name(),
            None,
            Span::default(),
            ObjectKind::Function { ty, recv: None },
        ));
    }
}

fn declare_type_name(registry: &mut SymbolRegistry, name: &str, ty: TypeId) {
    registry.bind_universe(Object::new(name, None, Span::default(), ObjectKind::TypeName { ty }));
}

/// `type error interface { Error() string }`
fn declare_error(registry: &mut SymbolRegistry) {
    let sig = registry.push_type(Type::Signature(Signature::new(
        vec![],
        vec![Param::unnamed(BasicKind::String.type_id())],
        false,
    )));
    let iface = registry.push_type(Type::Interface(InterfaceType::default()));
    let method = registry.push_object(Object::new(
        "Error",
        None,
        Span::default(),
        ObjectKind::Function {
            ty: sig,
            recv: Some(iface),
        },
    ));
    registry.set_type(iface, Type::Interface(InterfaceType { methods: vec![method] }));

    let ty = TypeId::global(registry.type_count() as u32);
    let obj = registry.bind_universe(Object::new("error", None, Span::default(), ObjectKind::TypeName { ty }));
    registry.push_type(Type::Named(NamedType {
        obj,
        hash: TypeHash::from_name("error"),
        underlying: iface,
        methods: Vec::new(),
    }));
}
