//! Fixed text fragments of a generated suite.

use bigint_perf_defs::{Catalog, ElementDomain, PoolOrigin, TargetConfig, ValuePoolSpec};
use heck::ToShoutySnakeCase;

/// Closes every generated file.
pub const POSTAMBLE: &str = "fn main() {\n    divan::main();\n}\n";

/// Name of the static holding a pool.
pub fn pool_ident(pool_name: &str) -> String {
    pool_name.to_shouty_snake_case()
}

/// Last path segment of the big-integer type, as used in generated code.
pub fn bigint_type(target: &TargetConfig) -> &str {
    target
        .bigint_path
        .rsplit("::")
        .next()
        .unwrap_or(&target.bigint_path)
}

/// Render an integer literal with `_` digit separators past four digits.
pub fn int_literal(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 4 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push('_');
        }
        out.push(digit);
    }
    out
}

/// Preamble fragments, in emission order.
pub fn preamble(catalog: &Catalog) -> Vec<String> {
    vec![
        header(catalog),
        imports(&catalog.target),
        constants(catalog),
        pool_section(catalog),
        MEASURE_SHIM.to_string(),
    ]
}

fn header(catalog: &Catalog) -> String {
    let mut output = String::new();

    output.push_str("//! ⚠️  AUTO-GENERATED by bigint-perf-gen ⚠️\n");
    output.push_str("//!\n");
    output.push_str("//! ❌ DO NOT EDIT THIS FILE DIRECTLY\n");
    output.push_str(&format!(
        "//! ✅ Instead, edit the `{}` preset in bigint-perf-defs\n",
        catalog.preset
    ));
    output.push_str("//!\n");
    output.push_str(&format!(
        "//! Catalog: {} v{}\n",
        catalog.preset, catalog.version
    ));
    output.push_str(&format!(
        "//! To regenerate: cargo run -p bigint-perf-gen -- --preset {} > benches/bigint_perf.rs\n\n",
        catalog.preset
    ));

    output.push_str("#![allow(dead_code)]\n");
    output.push_str("#![allow(unused_imports)]\n");
    output.push_str("#![allow(clippy::op_ref)]\n");

    output
}

fn imports(target: &TargetConfig) -> String {
    let mut output = String::new();

    output.push_str("use std::hint::black_box;\n");
    output.push_str("use std::sync::LazyLock;\n\n");
    output.push_str("use divan::Bencher;\n");
    output.push_str("use num_traits::{One, ToPrimitive, Zero};\n");
    output.push_str(&format!(
        "use {}::{{cartesian_product, generate_big_values, generate_plain_values}};\n",
        target.fixtures_module
    ));
    output.push_str(&format!("use {};\n", target.bigint_path));

    output
}

fn constants(catalog: &Catalog) -> String {
    let shifts: Vec<String> = catalog
        .shift_amounts
        .iter()
        .map(|amount| amount.to_string())
        .collect();

    let mut output = String::new();
    output.push_str("/// Upper bound on the 64-bit words of generated big values.\n");
    output.push_str(&format!(
        "const MAX_WORD_COUNT: usize = {};\n",
        catalog.target.max_word_count
    ));
    output.push_str("/// Right-hand operands of every shift benchmark.\n");
    output.push_str(&format!(
        "const SHIFTS: [usize; {}] = [{}];\n",
        shifts.len(),
        shifts.join(", ")
    ));
    output
}

fn pool_section(catalog: &Catalog) -> String {
    let mut output = String::new();

    output.push_str("// Pool sizes are targets: the fixture provider may return a few more or fewer.\n");
    for pool in catalog.pools.iter() {
        output.push('\n');
        output.push_str(&pool_statement(pool, &catalog.target));
    }

    output
}

/// The `static` binding a pool's name to its lazily computed elements.
pub fn pool_statement(pool: &ValuePoolSpec, target: &TargetConfig) -> String {
    let ident = pool_ident(&pool.name);
    let big = bigint_type(target);
    let count = int_literal(pool.approximate_count);

    match (&pool.origin, pool.element_domain) {
        (PoolOrigin::Product { left, right }, _) => format!(
            "/// {left} x {right} (~{count} pairs)\nstatic {ident}: LazyLock<Vec<(&'static {big}, &'static {big})>> =\n    LazyLock::new(|| cartesian_product(&{}, &{}));\n",
            pool_ident(left),
            pool_ident(right),
        ),
        (PoolOrigin::Fixture, ElementDomain::Int) => format!(
            "/// ~{count} machine integers\nstatic {ident}: LazyLock<Vec<{big}>> = LazyLock::new(|| {{\n    generate_plain_values({count})\n        .into_iter()\n        .map({big}::from)\n        .collect()\n}});\n"
        ),
        (PoolOrigin::Fixture, _) => format!(
            "/// ~{count} big values\nstatic {ident}: LazyLock<Vec<{big}>> =\n    LazyLock::new(|| generate_big_values({count}, MAX_WORD_COUNT));\n"
        ),
    }
}

/// Keeps lazy pool initialisation out of the timed region.
const MEASURE_SHIM: &str = r#"/// Forces `pool` before timing starts, so fixture setup never lands in a sample.
fn measure<T: Sync>(
    bencher: Bencher,
    pool: &'static LazyLock<T>,
    body: impl Fn(&'static T) + Sync,
) {
    let values = LazyLock::force(pool);
    bencher.bench(|| body(values));
}
"#;
