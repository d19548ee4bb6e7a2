//! Generate a divan benchmark suite for a big-integer type from a
//! [`Catalog`].
//!
//! ```text
//! preamble (header, imports, constants, pool statics, measure shim)
//! per operation: banner + rendered blocks
//! pi digit benchmarks + spigot helpers
//! postamble (fn main)
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assemble;
mod edge;
mod render;
mod spigot;
mod template;

pub use assemble::{SuiteAssembler, SuiteDocument, assemble};
pub use edge::{EdgeCasePolicy, Operand, zero_guard};
pub use render::{RenderedBlock, Renderer};
pub use spigot::{SpecialBenchmarks, pi_benchmarks};
pub use template::{POSTAMBLE, pool_ident, pool_statement, preamble};

use bigint_perf_defs::{Catalog, CatalogError};

/// Validate `catalog` and produce its complete benchmark file.
pub fn generate(catalog: &Catalog) -> Result<SuiteDocument, CatalogError> {
    catalog.validate()?;
    let document = SuiteAssembler::new(catalog).assemble()?;

    tracing::info!(
        preset = %catalog.preset,
        version = catalog.version,
        pools = catalog.pools.len(),
        operations = catalog.operations.len(),
        functions = document.blocks().len(),
        bytes = document.as_str().len(),
        "generated benchmark suite"
    );
    Ok(document)
}
