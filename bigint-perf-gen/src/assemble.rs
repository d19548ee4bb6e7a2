//! Orders rendered blocks into the final document.

use core::fmt;

use bigint_perf_defs::{Catalog, CatalogError, OperationSpec};
use indexmap::IndexMap;
use tracing::debug;

use crate::render::{RenderedBlock, Renderer};
use crate::spigot::{SpecialBenchmarks, pi_benchmarks};
use crate::template::{POSTAMBLE, bigint_type, preamble};

/// A finished benchmark file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteDocument {
    text: String,
    blocks: Vec<RenderedBlock>,
}

impl SuiteDocument {
    /// The complete file text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Function names in emission order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.function_name.as_str())
    }

    /// Every emitted block, operations first, then the pi benchmarks.
    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    /// Take the file text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for SuiteDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render every operation, check names, then emit the document.
///
/// Nothing is emitted when any operation fails to render or two blocks share
/// a function name.
pub fn assemble(
    preamble_fragments: &[String],
    ordered_operations: &[OperationSpec],
    renderer: &Renderer<'_>,
    special: &SpecialBenchmarks,
    postamble: &str,
) -> Result<SuiteDocument, CatalogError> {
    let mut sections = Vec::with_capacity(ordered_operations.len());
    for operation in ordered_operations {
        sections.push((operation, renderer.render(operation)?));
    }

    let mut owners: IndexMap<&str, &str> = IndexMap::new();
    let rendered = sections.iter().flat_map(|(operation, blocks)| {
        let owner = operation.display_name.as_str();
        blocks.iter().map(move |block| (owner, block))
    });
    let special_blocks = special.blocks.iter().map(|b| ("pi", b));
    for (owner, block) in rendered.chain(special_blocks) {
        if owners.insert(block.function_name.as_str(), owner).is_some() {
            return Err(CatalogError::DuplicateFunctionName {
                name: block.function_name.clone(),
                operation: owner.to_string(),
            });
        }
    }
    debug!(functions = owners.len(), "function names are unique");

    let mut output = String::new();
    for fragment in preamble_fragments {
        output.push_str(fragment);
        output.push('\n');
    }

    let mut blocks = Vec::with_capacity(owners.len());
    for (operation, rendered) in sections {
        let filter = operation
            .edge_case_filter
            .map(|filter| format!(" [{}]", filter.tag()))
            .unwrap_or_default();
        output.push_str(&format!(
            "// ===== {}: {}{filter} =====\n\n",
            operation.kind, operation.display_name
        ));
        for block in rendered {
            output.push_str(&block.body_text);
            output.push('\n');
            blocks.push(block);
        }
    }

    if !special.is_empty() {
        output.push_str("// ===== pi digits =====\n\n");
        for block in &special.blocks {
            output.push_str(&block.body_text);
            output.push('\n');
            blocks.push(block.clone());
        }
        if let Some(support) = &special.support {
            output.push_str(support);
            output.push('\n');
        }
    }

    output.push_str(postamble);

    Ok(SuiteDocument {
        text: output,
        blocks,
    })
}

/// Assembles the document for one catalog with the fixed fragments.
pub struct SuiteAssembler<'c> {
    catalog: &'c Catalog,
}

impl<'c> SuiteAssembler<'c> {
    /// Assembler for `catalog`.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Render, check and emit the catalog's document.
    pub fn assemble(&self) -> Result<SuiteDocument, CatalogError> {
        let catalog = self.catalog;
        let special = pi_benchmarks(&catalog.pi_digit_counts, bigint_type(&catalog.target));
        assemble(
            &preamble(catalog),
            &catalog.operations,
            &Renderer::new(catalog),
            &special,
            POSTAMBLE,
        )
    }
}
