//! Benchmarks for call and selector checking.
//!
//! - Embedding depth: selectors and method sets through chains of embedded structs
//! - Call width: variadic calls with growing argument lists
//! - Mixed: a batch of typical calls and selectors
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gocheck::prelude::*;
use gocheck::registry::ScopeKind;
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Embedding depths used by the chain benchmarks.
const DEPTHS: [usize; 4] = [1, 4, 16, 64];

/// A package with `type E0 struct { X int }`, `func (*E0) M()` and
/// `type Ek struct { E(k-1) }` up to `depth`, plus `var v E<depth>` and
/// `func join(sep string, parts ...string)`.
struct Chain {
    registry: SymbolRegistry,
    pkg: PackageId,
    body: ScopeId,
    top: TypeId,
}

impl Chain {
    fn new(depth: usize) -> Self {
        let mut r = SymbolRegistry::new();
        let int = BasicKind::Int.type_id();
        let string = BasicKind::String.type_id();
        let pkg = r.new_package("example.com/bench", "bench").unwrap();
        let scope = r.package_scope(pkg);

        let leaf = r.new_struct(Some(pkg), &[FieldDecl::named("X", int)]).unwrap();
        let mut top = r.declare_named(scope, "E0", leaf).unwrap();
        let unit = r.func(&[], &[], false).unwrap();
        r.add_method(top, "M", true, unit).unwrap();
        for k in 1..=depth {
            let st = r.new_struct(Some(pkg), &[FieldDecl::embedded(top)]).unwrap();
            top = r.declare_named(scope, &format!("E{k}"), st).unwrap();
        }

        let strings = r.slice_of(string);
        let join = r.func(&[string, strings], &[string], true).unwrap();
        r.declare_func(scope, "join", join).unwrap();

        let body = r.new_scope(scope, ScopeKind::Function).unwrap();
        r.declare_var(body, "v", top).unwrap();
        Chain {
            registry: r,
            pkg,
            body,
            top,
        }
    }

    fn checker(&self) -> Checker<'_> {
        let mut checker = Checker::new(&self.registry, self.pkg);
        checker.set_scope(self.body);
        checker
    }
}

fn embedding_depth_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("selector/embedding_depth");

    for depth in DEPTHS {
        let chain = Chain::new(depth);
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let field = b.path("v.X");
        let method = b.call(b.path("v.M"), &[]);

        group.bench_with_input(BenchmarkId::new("field", depth), &depth, |bench, _| {
            bench.iter(|| {
                let mut checker = chain.checker();
                black_box(checker.expr(black_box(field)));
                end_profiling_frame();
            });
        });
        group.bench_with_input(BenchmarkId::new("method_call", depth), &depth, |bench, _| {
            bench.iter(|| {
                let mut checker = chain.checker();
                black_box(checker.raw_expr(black_box(method)));
                end_profiling_frame();
            });
        });
        group.bench_with_input(BenchmarkId::new("method_set", depth), &depth, |bench, _| {
            bench.iter(|| black_box(method_set(&chain.registry, black_box(chain.top))));
        });
    }
    group.finish();
}

fn call_width_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let chain = Chain::new(1);
    let mut group = c.benchmark_group("call/variadic_width");

    for width in [1usize, 8, 64, 512] {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut args = vec![b.string(",")];
        args.extend((0..width).map(|i| b.string(&format!("part{i}"))));
        let call = b.call(b.ident("join"), &args);

        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |bench, _| {
            bench.iter(|| {
                let mut checker = chain.checker();
                black_box(checker.expr(black_box(call)));
                end_profiling_frame();
            });
        });
    }
    group.finish();
}

fn mixed_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let chain = Chain::new(4);
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let exprs = [
        b.path("v.X"),
        b.call(b.path("v.M"), &[]),
        b.call(b.ident("join"), &[b.string("-"), b.string("a"), b.string("b")]),
        b.call(b.ident("len"), &[b.string("hello")]),
        b.call(b.ident("int64"), &[b.path("v.X")]),
        b.path("E4.M"),
        b.path("v.Missing"),
    ];

    let mut group = c.benchmark_group("mixed");
    group.throughput(Throughput::Elements(exprs.len() as u64));
    group.bench_function("typical_batch", |bench| {
        bench.iter(|| {
            let mut checker = chain.checker();
            for e in exprs {
                black_box(checker.raw_expr(e));
            }
            black_box(checker.finish());
            end_profiling_frame();
        });
    });
    group.finish();
}

criterion_group!(benches, embedding_depth_benchmarks, call_width_benchmarks, mixed_benchmarks);
criterion_main!(benches);
