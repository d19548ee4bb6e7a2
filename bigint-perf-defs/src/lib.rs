//! Declarative catalog for big-integer benchmark generation.
//!
//! A [`Catalog`] names pools of input values ([`PoolRegistry`]) and the
//! operations benchmarked over them ([`OperationSpec`]). `bigint-perf-gen`
//! turns a catalog into a divan benchmark file.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod error;
mod operation;
mod pool;
mod preset;

pub use catalog::{Catalog, RadixSpec, TargetConfig};
pub use error::CatalogError;
pub use operation::{EdgeCaseFilter, OperationKind, OperationSpec, PoolBinding};
pub use pool::{
    ElementDomain, PairPools, PoolOrigin, PoolRegistry, RESERVED_POOL_NAMES, ScalarPools,
    ValuePoolSpec,
};
pub use preset::{DEFAULT_PRESET, PRESETS, Preset, find_preset};

use facet::Facet;
use facet_args as args;

/// Command-line arguments of the generator.
#[derive(Facet, Debug, Default)]
pub struct GenerateArgs {
    /// Catalog preset to render (defaults to the latest full preset)
    #[facet(args::named, default)]
    pub preset: Option<String>,

    /// Print the available presets and exit
    #[facet(args::named)]
    pub list_presets: bool,

    /// Pretty-print the selected catalog to stderr before generating
    #[facet(args::named)]
    pub dump_catalog: bool,

    /// Only render operations of this kind (`unary`, `binary`, `shift`,
    /// `equality`, `comparison` or `string-round-trip`)
    #[facet(args::named, default)]
    pub kind: Option<String>,
}

impl GenerateArgs {
    /// The requested preset, or [`DEFAULT_PRESET`].
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or(DEFAULT_PRESET)
    }
}
