//! A small program shared by the unit tests of this crate.
//!
//! ```text
//! package lib                          // example.com/lib
//!     const MaxSize = 64
//!     type Buffer struct { data []byte; Size int }
//!     func (b *Buffer) Reset()
//!     var Default Buffer
//!     func New() *Buffer
//!     func helper()
//!
//! package main                         // example.com/main
//!     import "example.com/lib"
//!     type Point struct { X, Y int }
//!     func (p *Point) Scale(f int)
//!     func (p Point) Norm() float64
//!     type Circle struct { Point; Radius int }
//!     type Node struct { *Point; Label string }
//!     type A struct { Name string }
//!     type B struct { Name string }
//!     type Both struct { A; B }
//!     type Shadow struct { A; B; Name string }
//!     type Shape interface { Area() float64 }
//!     type List struct { *List }
//!     func (l List) Len() int
//!     type MyErr struct{}
//!     func (e *MyErr) Error() string
//!     func variadic(a int, b ...string)
//!     func pair() (int, string)
//!     func takes2(int, string)
//!     func takes1(int)
//!     func noresult()
//!     const Limit int = 10
//!
//!     func body() {
//!         var p Point; var pp *Point; var c Circle; var nd Node
//!         var s []string; var n int; var bs []byte; var sh Shape
//!     }
//! ```

use gocheck_core::{BasicKind, ConstValue, ObjectId, PackageId, ScopeId, TypeId};
use gocheck_registry::{FieldDecl, ScopeKind, SymbolRegistry};

pub(crate) struct Fixture {
    pub registry: SymbolRegistry,
    pub main: PackageId,
    pub lib: PackageId,
    /// Function body scope of `main`; sees locals, imports and package members.
    pub body: ScopeId,

    pub point: TypeId,
    pub point_ptr: TypeId,
    pub scale: ObjectId,
    pub norm: ObjectId,
    pub circle: TypeId,
    pub node: TypeId,
    pub both: TypeId,
    pub shadow: TypeId,
    pub shape: TypeId,
    pub list: TypeId,
    pub my_err: TypeId,
    pub lib_buffer: TypeId,
    pub strings: TypeId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut r = SymbolRegistry::new();
        let int = BasicKind::Int.type_id();
        let string = BasicKind::String.type_id();
        let float64 = BasicKind::Float64.type_id();
        let bytes = r.slice_of(BasicKind::Uint8.type_id());
        let strings = r.slice_of(string);

        // package lib
        let lib = r.new_package("example.com/lib", "lib").unwrap();
        let lib_scope = r.package_scope(lib);
        r.declare_const(lib_scope, "MaxSize", BasicKind::UntypedInt.type_id(), ConstValue::Int(64))
            .unwrap();
        let buffer_struct = r
            .new_struct(Some(lib), &[FieldDecl::named("data", bytes), FieldDecl::named("Size", int)])
            .unwrap();
        let lib_buffer = r.declare_named(lib_scope, "Buffer", buffer_struct).unwrap();
        let unit = r.func(&[], &[], false).unwrap();
        r.add_method(lib_buffer, "Reset", true, unit).unwrap();
        r.declare_var(lib_scope, "Default", lib_buffer).unwrap();
        let buffer_ptr = r.pointer_to(lib_buffer);
        let new_sig = r.func(&[], &[buffer_ptr], false).unwrap();
        r.declare_func(lib_scope, "New", new_sig).unwrap();
        r.declare_func(lib_scope, "helper", unit).unwrap();

        // package main
        let main = r.new_package("example.com/main", "main").unwrap();
        let scope = r.package_scope(main);
        let file = r.new_file_scope(main).unwrap();
        r.import(file, lib, None).unwrap();

        let point_struct = r
            .new_struct(Some(main), &[FieldDecl::named("X", int), FieldDecl::named("Y", int)])
            .unwrap();
        let point = r.declare_named(scope, "Point", point_struct).unwrap();
        let point_ptr = r.pointer_to(point);
        let scale_sig = r.func(&[int], &[], false).unwrap();
        let scale = r.add_method(point, "Scale", true, scale_sig).unwrap();
        let norm_sig = r.func(&[], &[float64], false).unwrap();
        let norm = r.add_method(point, "Norm", false, norm_sig).unwrap();

        let circle_struct = r
            .new_struct(Some(main), &[FieldDecl::embedded(point), FieldDecl::named("Radius", int)])
            .unwrap();
        let circle = r.declare_named(scope, "Circle", circle_struct).unwrap();
        let node_struct = r
            .new_struct(Some(main), &[FieldDecl::embedded(point_ptr), FieldDecl::named("Label", string)])
            .unwrap();
        let node = r.declare_named(scope, "Node", node_struct).unwrap();

        let a_struct = r.new_struct(Some(main), &[FieldDecl::named("Name", string)]).unwrap();
        let a = r.declare_named(scope, "A", a_struct).unwrap();
        let b_struct = r.new_struct(Some(main), &[FieldDecl::named("Name", string)]).unwrap();
        let b = r.declare_named(scope, "B", b_struct).unwrap();
        let both_struct = r
            .new_struct(Some(main), &[FieldDecl::embedded(a), FieldDecl::embedded(b)])
            .unwrap();
        let both = r.declare_named(scope, "Both", both_struct).unwrap();
        let shadow_struct = r
            .new_struct(
                Some(main),
                &[FieldDecl::embedded(a), FieldDecl::embedded(b), FieldDecl::named("Name", string)],
            )
            .unwrap();
        let shadow = r.declare_named(scope, "Shadow", shadow_struct).unwrap();

        let area_sig = r.func(&[], &[float64], false).unwrap();
        let shape_iface = r.new_interface(Some(main), &[("Area", area_sig)]).unwrap();
        let shape = r.declare_named(scope, "Shape", shape_iface).unwrap();

        let list = r.declare_type(scope, "List").unwrap();
        let list_ptr = r.pointer_to(list);
        let list_struct = r.new_struct(Some(main), &[FieldDecl::embedded(list_ptr)]).unwrap();
        r.set_underlying(list, list_struct).unwrap();
        let len_sig = r.func(&[], &[int], false).unwrap();
        r.add_method(list, "Len", false, len_sig).unwrap();

        let empty = r.new_struct(Some(main), &[]).unwrap();
        let my_err = r.declare_named(scope, "MyErr", empty).unwrap();
        let error_sig = r.func(&[], &[string], false).unwrap();
        r.add_method(my_err, "Error", true, error_sig).unwrap();

        let variadic = r.func(&[int, strings], &[], true).unwrap();
        r.declare_func(scope, "variadic", variadic).unwrap();
        let pair = r.func(&[], &[int, string], false).unwrap();
        r.declare_func(scope, "pair", pair).unwrap();
        let takes2 = r.func(&[int, string], &[], false).unwrap();
        r.declare_func(scope, "takes2", takes2).unwrap();
        let takes1 = r.func(&[int], &[], false).unwrap();
        r.declare_func(scope, "takes1", takes1).unwrap();
        r.declare_func(scope, "noresult", unit).unwrap();
        r.declare_const(scope, "Limit", int, ConstValue::Int(10)).unwrap();

        let body = r.new_scope(file, ScopeKind::Function).unwrap();
        for (name, ty) in [
            ("p", point),
            ("pp", point_ptr),
            ("c", circle),
            ("nd", node),
            ("s", strings),
            ("n", int),
            ("bs", bytes),
            ("sh", shape),
        ] {
            r.declare_var(body, name, ty).unwrap();
        }

        Self {
            registry: r,
            main,
            lib,
            body,
            point,
            point_ptr,
            scale,
            norm,
            circle,
            node,
            both,
            shadow,
            shape,
            list,
            my_err,
            lib_buffer,
            strings,
        }
    }

    /// A checker positioned in the function body.
    pub fn checker(&self) -> crate::Checker<'_> {
        let mut checker = crate::Checker::new(&self.registry, self.main);
        checker.set_scope(self.body);
        checker
    }
}
