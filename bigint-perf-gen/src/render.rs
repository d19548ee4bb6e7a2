//! Turns one catalog entry into benchmark function text.
//!
//! Rendering is table driven: the operation kind picks the statement shape,
//! the bound pool's element domain picks the loop pattern and operands, and
//! the operation's [`EdgeCasePolicy`] contributes the same guard to every
//! loop body.

use bigint_perf_defs::{
    Catalog, CatalogError, ElementDomain, OperationKind, OperationSpec, PoolBinding,
};
use tracing::{debug, trace};

use crate::edge::{EdgeCasePolicy, Operand};
use crate::template::{bigint_type, pool_ident};

/// One generated benchmark function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    /// Unique within a document
    pub function_name: String,
    /// Complete function text, including its `#[divan::bench]` attribute
    pub body_text: String,
}

/// Renders operations of a single catalog.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'c> {
    catalog: &'c Catalog,
}

/// How a loop over one pool binds its operands.
struct LoopShape {
    /// Pattern of the outer `for`
    pattern: &'static str,
    lhs: &'static str,
    rhs: Operand<'static>,
    /// Extra loop nested inside the outer one
    inner: Option<&'static str>,
}

impl LoopShape {
    fn for_domain(kind: OperationKind, domain: ElementDomain) -> Self {
        if kind == OperationKind::Shift {
            return LoopShape {
                pattern: "n",
                lhs: "n",
                rhs: Operand::Primitive("shift"),
                inner: Some("for shift in SHIFTS {"),
            };
        }

        match domain {
            ElementDomain::Int | ElementDomain::BigValue => LoopShape {
                pattern: "n",
                lhs: "n",
                rhs: Operand::Big("n"),
                inner: None,
            },
            ElementDomain::IntBig => LoopShape {
                pattern: "&(int, big)",
                lhs: "big",
                rhs: Operand::Big("int"),
                inner: None,
            },
            ElementDomain::BigBig => LoopShape {
                pattern: "&(lhs, rhs)",
                lhs: "lhs",
                rhs: Operand::Big("rhs"),
                inner: None,
            },
        }
    }
}

/// Indented line buffer for function text.
struct Lines {
    text: String,
    depth: usize,
}

impl Lines {
    fn new() -> Self {
        Self {
            text: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, line: &str) {
        for _ in 0..self.depth {
            self.text.push_str("    ");
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn open(&mut self, line: &str) {
        self.line(line);
        self.depth += 1;
    }

    fn close(&mut self, line: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(line);
    }

    fn finish(self) -> String {
        self.text
    }
}

impl<'c> Renderer<'c> {
    /// Renderer resolving pools and bases from `catalog`.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Render every block of `operation`, in rule order.
    pub fn render(&self, operation: &OperationSpec) -> Result<Vec<RenderedBlock>, CatalogError> {
        operation.validate(&self.catalog.pools)?;

        let blocks = match &operation.source_pools {
            PoolBinding::BigOnly { big } => self.render_string(operation, big)?,
            PoolBinding::Split { int, big } => {
                let mut blocks = self.render_side(operation, int)?;
                blocks.extend(self.render_side(operation, big)?);
                blocks
            }
        };

        debug!(
            operation = %operation.display_name,
            kind = %operation.kind,
            blocks = blocks.len(),
            guarded = EdgeCasePolicy::for_operation(operation).is_active(),
            "rendered operation"
        );
        Ok(blocks)
    }

    fn render_side(
        &self,
        operation: &OperationSpec,
        pool_name: &str,
    ) -> Result<Vec<RenderedBlock>, CatalogError> {
        let context = format!("operation '{}'", operation.display_name);
        let pool = self.catalog.pools.resolve(&context, pool_name)?;
        let shape = LoopShape::for_domain(operation.kind, pool.element_domain);
        let policy = EdgeCasePolicy::for_operation(operation);
        let stem = format!(
            "{}_{}_{}",
            operation.kind.prefix(),
            operation.name_segment(),
            pool.element_domain.suffix()
        );
        let pool_ident = pool_ident(&pool.name);
        let symbol = operation.symbol.as_str();

        let plain = match operation.kind {
            OperationKind::Unary => vec![format!("black_box({symbol}{});", shape.lhs)],
            _ => vec![format!(
                "black_box({} {symbol} {});",
                shape.lhs,
                shape.rhs.name()
            )],
        };
        let mut blocks = vec![measured_block(stem.clone(), &pool_ident, &shape, &policy, &plain)];

        if operation.mutating_variant_required {
            let in_place = vec![
                format!("let mut copy = {}.clone();", shape.lhs),
                format!("copy {symbol}= {};", shape.rhs.name()),
                "black_box(copy);".to_string(),
            ];
            blocks.push(measured_block(
                format!("{stem}_inout"),
                &pool_ident,
                &shape,
                &policy,
                &in_place,
            ));
        }

        Ok(blocks)
    }

    fn render_string(
        &self,
        operation: &OperationSpec,
        pool_name: &str,
    ) -> Result<Vec<RenderedBlock>, CatalogError> {
        let context = format!("operation '{}'", operation.display_name);
        let pool = self.catalog.pools.resolve(&context, pool_name)?;
        let pool_ident = pool_ident(&pool.name);
        let big = bigint_type(&self.catalog.target);
        let stem = format!("{}_{}", operation.kind.prefix(), operation.name_segment());

        let mut blocks = Vec::with_capacity(self.catalog.radixes.len() * 2);
        for radix in self.catalog.radixes.iter() {
            let mut parse = Lines::new();
            let name = format!("{stem}_parse_{radix}");
            parse.line("#[divan::bench]");
            parse.open(&format!("fn {name}(bencher: Bencher) {{"));
            parse.line(&format!(
                "let strings: Vec<String> = {pool_ident}.iter().map(|n| n.to_str_radix({radix})).collect();"
            ));
            parse.open("bencher.bench(|| {");
            parse.open("for s in &strings {");
            parse.line(&format!(
                "black_box({big}::parse_bytes(s.as_bytes(), {radix}));"
            ));
            parse.close("}");
            parse.close("});");
            parse.close("}");
            blocks.push(block(name, parse.finish()));

            let mut render = Lines::new();
            let name = format!("{stem}_render_{radix}");
            render.line("#[divan::bench]");
            render.open(&format!("fn {name}(bencher: Bencher) {{"));
            render.open(&format!("measure(bencher, &{pool_ident}, |values| {{"));
            render.open("for n in values {");
            render.line(&format!("black_box(n.to_str_radix({radix}));"));
            render.close("}");
            render.close("});");
            render.close("}");
            blocks.push(block(name, render.finish()));
        }

        Ok(blocks)
    }
}

/// A block timing `statements` once per pool element (and shift amount).
fn measured_block(
    function_name: String,
    pool_ident: &str,
    shape: &LoopShape,
    policy: &EdgeCasePolicy,
    statements: &[String],
) -> RenderedBlock {
    let mut out = Lines::new();
    out.line("#[divan::bench]");
    out.open(&format!("fn {function_name}(bencher: Bencher) {{"));
    out.open(&format!("measure(bencher, &{pool_ident}, |values| {{"));
    out.open(&format!("for {} in values {{", shape.pattern));
    if let Some(inner) = shape.inner {
        out.open(inner);
    }
    if let Some(guard) = policy.guard(shape.rhs) {
        out.line(&guard);
    }
    for statement in statements {
        out.line(statement);
    }
    if shape.inner.is_some() {
        out.close("}");
    }
    out.close("}");
    out.close("});");
    out.close("}");
    block(function_name, out.finish())
}

fn block(function_name: String, body_text: String) -> RenderedBlock {
    trace!(function = %function_name, "rendered block");
    RenderedBlock {
        function_name,
        body_text,
    }
}
