//! Go-syntax rendering of types for diagnostics.

use std::fmt::Write;

use crate::ids::{PackageId, TypeId};
use crate::types::{Param, Signature, Symbols, Type};

/// Render `ty` in source syntax.
///
/// Named types declared outside `relative_to` are qualified with their
/// package name (`fmt.Stringer`); those declared inside it are not.
pub fn type_string<S: Symbols + ?Sized>(symbols: &S, ty: TypeId, relative_to: Option<PackageId>) -> String {
    let mut out = String::new();
    TypeWriter { symbols, relative_to }.write_type(&mut out, ty);
    out
}

/// Render a signature without the leading `func` keyword.
pub fn signature_string<S: Symbols + ?Sized>(symbols: &S, sig: &Signature, relative_to: Option<PackageId>) -> String {
    let mut out = String::new();
    TypeWriter { symbols, relative_to }.write_signature(&mut out, sig);
    out
}

struct TypeWriter<'s, S: ?Sized> {
    symbols: &'s S,
    relative_to: Option<PackageId>,
}

impl<S: Symbols + ?Sized> TypeWriter<'_, S> {
    fn write_type(&self, out: &mut String, ty: TypeId) {
        match self.symbols.ty(ty) {
            Type::Basic(kind) => out.push_str(kind.name()),
            Type::Pointer(base) => {
                out.push('*');
                self.write_type(out, *base);
            }
            Type::Slice(elem) => {
                out.push_str("[]");
                self.write_type(out, *elem);
            }
            Type::Struct(st) => {
                out.push_str("struct{");
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    let field = self.symbols.object(*field);
                    if !field.is_embedded() {
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    if let Some(fty) = field.ty() {
                        self.write_type(out, fty);
                    }
                }
                out.push('}');
            }
            Type::Signature(sig) => {
                out.push_str("func");
                self.write_signature(out, sig);
            }
            Type::Tuple(vars) => self.write_params(out, vars, false),
            Type::Interface(iface) => {
                out.push_str("interface{");
                for (i, method) in iface.methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    let method = self.symbols.object(*method);
                    out.push_str(&method.name);
                    if let Some(sig) = method.ty().and_then(|t| self.symbols.ty(t).as_signature()) {
                        self.write_signature(out, sig);
                    }
                }
                out.push('}');
            }
            Type::Named(named) => {
                let obj = self.symbols.object(named.obj);
                if let Some(pkg) = obj.pkg.filter(|pkg| Some(*pkg) != self.relative_to) {
                    out.push_str(&self.symbols.package(pkg).name);
                    out.push('.');
                }
                out.push_str(&obj.name);
            }
            Type::Builtin(id) => {
                let _ = write!(out, "func {}", id.name());
            }
        }
    }

    fn write_signature(&self, out: &mut String, sig: &Signature) {
        self.write_params(out, &sig.params, sig.variadic);
        match sig.results.as_slice() {
            [] => {}
            [single] if single.name.is_none() => {
                out.push(' ');
                self.write_type(out, single.ty);
            }
            results => {
                out.push(' ');
                self.write_params(out, results, false);
            }
        }
    }

    fn write_params(&self, out: &mut String, params: &[Param], variadic: bool) {
        out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if let Some(name) = &param.name {
                out.push_str(name);
                out.push(' ');
            }
            let last = i + 1 == params.len();
            match self.symbols.ty(param.ty) {
                Type::Slice(elem) if variadic && last => {
                    out.push_str("...");
                    self.write_type(out, *elem);
                }
                _ => self.write_type(out, param.ty),
            }
        }
        out.push(')');
    }
}
