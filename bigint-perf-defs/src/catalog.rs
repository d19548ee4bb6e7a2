use facet::Facet;

use crate::{CatalogError, OperationKind, OperationSpec, PoolRegistry};

/// Numeric bases used by string round-trip benchmarks, in declaration order.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct RadixSpec {
    bases: Vec<u32>,
}

impl RadixSpec {
    /// Every base must lie in 2..=36 and appear once.
    pub fn new(bases: &[u32]) -> Result<Self, CatalogError> {
        for (index, &radix) in bases.iter().enumerate() {
            if !(2..=36).contains(&radix) || bases[..index].contains(&radix) {
                return Err(CatalogError::InvalidRadix { radix });
            }
        }
        Ok(Self {
            bases: bases.to_vec(),
        })
    }

    /// Bases in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.bases.iter().copied()
    }

    /// Number of bases.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Whether no string round trips will be rendered.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Names the generated file uses for its external collaborators.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    /// Path of the big-integer type under test
    pub bigint_path: String,
    /// Module exposing `generate_plain_values`, `generate_big_values` and
    /// `cartesian_product`
    pub fixtures_module: String,
    /// Upper bound on the 64-bit words of generated big values
    pub max_word_count: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            bigint_path: "num_bigint::BigInt".to_string(),
            fixtures_module: "bigint_fixtures".to_string(),
            max_word_count: 100,
        }
    }
}

/// A complete, static benchmark catalog.
#[derive(Facet, Debug, Clone)]
pub struct Catalog {
    /// Preset this catalog was built from
    pub preset: String,
    /// Version of that preset
    pub version: u32,
    /// Every pool, in declaration order
    pub pools: PoolRegistry,
    /// Rendered in exactly this order
    pub operations: Vec<OperationSpec>,
    /// Bases of the string round trips
    pub radixes: RadixSpec,
    /// Right-hand operands shared by every shift benchmark
    pub shift_amounts: Vec<u32>,
    /// One digit-extraction benchmark is emitted per entry
    pub pi_digit_counts: Vec<u32>,
    /// Names of the generated file's collaborators
    pub target: TargetConfig,
}

impl Catalog {
    /// An empty catalog for the default target.
    pub fn new(preset: &str, version: u32) -> Self {
        Self {
            preset: preset.to_string(),
            version,
            pools: PoolRegistry::new(),
            operations: Vec::new(),
            radixes: RadixSpec { bases: Vec::new() },
            shift_amounts: Vec::new(),
            pi_digit_counts: Vec::new(),
            target: TargetConfig::default(),
        }
    }

    /// Append an operation; validation happens when the catalog is rendered.
    pub fn push(&mut self, operation: OperationSpec) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Validate every operation against the declared pools.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for operation in &self.operations {
            operation.validate(&self.pools)?;
        }
        Ok(())
    }

    /// Drop every operation not of `kind`. Pools stay declared.
    pub fn retain_kind(&mut self, kind: OperationKind) -> &mut Self {
        self.operations.retain(|operation| operation.kind == kind);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_kind_keeps_order() {
        let mut catalog = crate::find_preset("quick").unwrap().catalog().unwrap();
        let pools = catalog.pools.len();
        catalog.retain_kind(OperationKind::Binary);

        let names: Vec<_> = catalog
            .operations
            .iter()
            .map(|op| op.display_name.as_str())
            .collect();
        assert_eq!(names, ["Add", "Sub", "Mul", "Div", "Mod", "And", "Or", "Xor"]);
        assert_eq!(catalog.pools.len(), pools);
    }

    #[test]
    fn radixes_are_checked() {
        let radixes = RadixSpec::new(&[8, 10, 16]).unwrap();
        assert_eq!(radixes.iter().collect::<Vec<_>>(), [8, 10, 16]);
        assert_eq!(radixes.len(), 3);

        assert_eq!(
            RadixSpec::new(&[10, 1]),
            Err(CatalogError::InvalidRadix { radix: 1 })
        );
        assert_eq!(
            RadixSpec::new(&[37]),
            Err(CatalogError::InvalidRadix { radix: 37 })
        );
        assert_eq!(
            RadixSpec::new(&[16, 8, 16]),
            Err(CatalogError::InvalidRadix { radix: 16 })
        );
    }
}
