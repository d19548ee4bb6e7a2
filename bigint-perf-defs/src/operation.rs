//! Benchmarked operations and the pools they draw from.

use core::fmt;

use facet::Facet;

use crate::error::check_identifier;
use crate::{CatalogError, ElementDomain, PairPools, PoolRegistry, ScalarPools};

/// Structural category of an operation; decides which blocks get rendered.
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OperationKind {
    /// `-n`, `!n` over single values
    Unary,
    /// `lhs op rhs` over pairs, optionally with `op=`
    Binary,
    /// `n << amount` for every value and shift amount
    Shift,
    /// `==` and `!=` over pairs
    Equality,
    /// Orderings over pairs
    Comparison,
    /// Parse and render in every declared base
    StringRoundTrip,
}

impl OperationKind {
    /// Every kind, in tag order.
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Unary,
        OperationKind::Binary,
        OperationKind::Shift,
        OperationKind::Equality,
        OperationKind::Comparison,
        OperationKind::StringRoundTrip,
    ];

    /// Tag used in catalog declarations.
    pub fn tag(self) -> &'static str {
        match self {
            OperationKind::Unary => "unary",
            OperationKind::Binary => "binary",
            OperationKind::Shift => "shift",
            OperationKind::Equality => "equality",
            OperationKind::Comparison => "comparison",
            OperationKind::StringRoundTrip => "string-round-trip",
        }
    }

    /// Leading segment of every function name rendered for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            OperationKind::Unary => "unary",
            OperationKind::Binary => "binary",
            OperationKind::Shift => "shift",
            OperationKind::Equality => "equatable",
            OperationKind::Comparison => "comparable",
            OperationKind::StringRoundTrip => "string",
        }
    }

    /// Parse a kind tag, failing with [`CatalogError::UnsupportedKind`] for
    /// tags that have no rendering rule.
    pub fn from_tag(operation: &str, tag: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| CatalogError::UnsupportedKind {
                operation: operation.to_string(),
                kind: tag.to_string(),
                reason: "no rendering rule for this kind",
            })
    }

    /// Operator tokens accepted for this kind.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            OperationKind::Unary => &["-", "!"],
            OperationKind::Binary => &["+", "-", "*", "/", "%", "&", "|", "^"],
            OperationKind::Shift => &["<<", ">>"],
            OperationKind::Equality => &["==", "!="],
            OperationKind::Comparison => &["<", "<=", ">", ">="],
            OperationKind::StringRoundTrip => &[],
        }
    }

    /// Domains required for the `int` and `big` sides of a split binding.
    fn split_domains(self) -> Option<(ElementDomain, ElementDomain)> {
        match self {
            OperationKind::Unary | OperationKind::Shift => {
                Some((ElementDomain::Int, ElementDomain::BigValue))
            }
            OperationKind::Binary | OperationKind::Equality | OperationKind::Comparison => {
                Some((ElementDomain::IntBig, ElementDomain::BigBig))
            }
            OperationKind::StringRoundTrip => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Operand combinations an operation must skip.
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EdgeCaseFilter {
    /// Skip iterations whose right-hand operand is zero (division, modulo)
    SkipZeroRhs,
}

impl EdgeCaseFilter {
    /// Tag used in catalog declarations and section banners.
    pub fn tag(self) -> &'static str {
        match self {
            EdgeCaseFilter::SkipZeroRhs => "skip-zero-rhs",
        }
    }
}

/// Which pools an operation iterates.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
#[repr(C)]
pub enum PoolBinding {
    /// One pool per side: the `int` side renders first, then the `big` side
    Split { int: String, big: String },
    /// A single big-value pool (string conversions)
    BigOnly { big: String },
}

impl From<&ScalarPools> for PoolBinding {
    fn from(pools: &ScalarPools) -> Self {
        PoolBinding::Split {
            int: pools.int.clone(),
            big: pools.big.clone(),
        }
    }
}

impl From<&PairPools> for PoolBinding {
    fn from(pools: &PairPools) -> Self {
        PoolBinding::Split {
            int: pools.int_big.clone(),
            big: pools.big_big.clone(),
        }
    }
}

/// One benchmarked operation.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct OperationSpec {
    /// Name as written in the catalog; lowercased into function names
    pub display_name: String,
    /// Operator token; unused (empty) for string round trips
    pub symbol: String,
    /// Decides which blocks get rendered
    pub kind: OperationKind,
    /// Pools iterated by the rendered loops
    pub source_pools: PoolBinding,
    /// Also render the `op=` form
    pub mutating_variant_required: bool,
    /// Operand combinations every block skips
    pub edge_case_filter: Option<EdgeCaseFilter>,
}

impl OperationSpec {
    /// An operation with no in-place variant and no filter.
    pub fn new(
        display_name: &str,
        symbol: &str,
        kind: OperationKind,
        source_pools: PoolBinding,
    ) -> Self {
        Self {
            display_name: display_name.to_string(),
            symbol: symbol.to_string(),
            kind,
            source_pools,
            mutating_variant_required: false,
            edge_case_filter: None,
        }
    }

    /// A unary operation over a scalar pool family.
    pub fn unary(display_name: &str, symbol: &str, pools: &ScalarPools) -> Self {
        Self::new(display_name, symbol, OperationKind::Unary, pools.into())
    }

    /// A binary operation; add [`OperationSpec::mutating`] for the `op=` blocks.
    pub fn binary(display_name: &str, symbol: &str, pools: &PairPools) -> Self {
        Self::new(display_name, symbol, OperationKind::Binary, pools.into())
    }

    /// Shifts always benchmark their in-place form too.
    pub fn shift(display_name: &str, symbol: &str, pools: &ScalarPools) -> Self {
        Self::new(display_name, symbol, OperationKind::Shift, pools.into()).mutating()
    }

    /// Equality over a pair pool family.
    pub fn equality(display_name: &str, symbol: &str, pools: &PairPools) -> Self {
        Self::new(display_name, symbol, OperationKind::Equality, pools.into())
    }

    /// An ordering over a pair pool family.
    pub fn comparison(display_name: &str, symbol: &str, pools: &PairPools) -> Self {
        Self::new(display_name, symbol, OperationKind::Comparison, pools.into())
    }

    /// Parse and render `big`'s values in every catalog base.
    pub fn string_round_trip(display_name: &str, big: &str) -> Self {
        Self::new(
            display_name,
            "",
            OperationKind::StringRoundTrip,
            PoolBinding::BigOnly {
                big: big.to_string(),
            },
        )
    }

    /// Also benchmark the in-place (`op=`) form.
    pub fn mutating(mut self) -> Self {
        self.mutating_variant_required = true;
        self
    }

    /// Skip the operand combinations `filter` names.
    pub fn with_edge_case_filter(mut self, filter: EdgeCaseFilter) -> Self {
        self.edge_case_filter = Some(filter);
        self
    }

    /// Lowercased display name, as spliced into function names.
    pub fn name_segment(&self) -> String {
        self.display_name.to_lowercase()
    }

    /// Check the declaration against its kind's rules and the declared pools.
    pub fn validate(&self, pools: &PoolRegistry) -> Result<(), CatalogError> {
        check_identifier(&self.name_segment())?;

        if self.kind != OperationKind::StringRoundTrip
            && !self.kind.symbols().contains(&self.symbol.as_str())
        {
            return Err(CatalogError::InvalidSymbol {
                operation: self.display_name.clone(),
                kind: self.kind,
                symbol: self.symbol.clone(),
            });
        }

        match self.kind {
            OperationKind::Unary
            | OperationKind::Equality
            | OperationKind::Comparison
            | OperationKind::StringRoundTrip
                if self.mutating_variant_required =>
            {
                return Err(self.unsupported("no in-place variant exists for this kind"));
            }
            OperationKind::Shift if !self.mutating_variant_required => {
                return Err(self.unsupported("shifts always render their in-place variant"));
            }
            OperationKind::StringRoundTrip if self.edge_case_filter.is_some() => {
                return Err(self.unsupported("string round trips have no operand to filter"));
            }
            _ => {}
        }

        let context = format!("operation '{}'", self.display_name);
        match (&self.source_pools, self.kind.split_domains()) {
            (PoolBinding::Split { int, big }, Some((int_domain, big_domain))) => {
                expect_domain(pools, &context, int, int_domain)?;
                expect_domain(pools, &context, big, big_domain)?;
            }
            (PoolBinding::BigOnly { big }, None) => {
                expect_domain(pools, &context, big, ElementDomain::BigValue)?;
            }
            (PoolBinding::Split { .. }, None) => {
                return Err(self.unsupported("needs a single big-value pool"));
            }
            (PoolBinding::BigOnly { .. }, Some(_)) => {
                return Err(self.unsupported("needs an int-side and a big-side pool"));
            }
        }

        Ok(())
    }

    fn unsupported(&self, reason: &'static str) -> CatalogError {
        CatalogError::UnsupportedKind {
            operation: self.display_name.clone(),
            kind: self.kind.tag().to_string(),
            reason,
        }
    }
}

fn expect_domain(
    pools: &PoolRegistry,
    context: &str,
    name: &str,
    expected: ElementDomain,
) -> Result<(), CatalogError> {
    let pool = pools.resolve(context, name)?;
    if pool.element_domain == expected {
        Ok(())
    } else {
        Err(CatalogError::PoolDomainMismatch {
            context: context.to_string(),
            pool: name.to_string(),
            expected,
            found: pool.element_domain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> (PoolRegistry, ScalarPools, PairPools) {
        let mut pools = PoolRegistry::new();
        let scalars = pools.declare_scalars("values", 10).unwrap();
        let pairs = PairPools {
            int_big: pools
                .declare_product(&scalars.int, &scalars.big)
                .unwrap()
                .name
                .clone(),
            big_big: pools
                .declare_product(&scalars.big, &scalars.big)
                .unwrap()
                .name
                .clone(),
        };
        (pools, scalars, pairs)
    }

    #[test]
    fn kind_tags_round_trip() {
        for kind in OperationKind::ALL {
            assert_eq!(OperationKind::from_tag("op", kind.tag()).unwrap(), kind);
        }
        assert!(matches!(
            OperationKind::from_tag("Pow", "ternary"),
            Err(CatalogError::UnsupportedKind { kind, .. }) if kind == "ternary"
        ));
    }

    #[test]
    fn well_formed_operations_validate() {
        let (pools, scalars, pairs) = registry();
        let ops = [
            OperationSpec::unary("Minus", "-", &scalars),
            OperationSpec::binary("Div", "/", &pairs)
                .mutating()
                .with_edge_case_filter(EdgeCaseFilter::SkipZeroRhs),
            OperationSpec::shift("Left", "<<", &scalars),
            OperationSpec::equality("Eq", "==", &pairs),
            OperationSpec::comparison("Lt", "<", &pairs),
            OperationSpec::string_round_trip("Radix", &scalars.big),
        ];
        for op in &ops {
            op.validate(&pools).unwrap();
        }
    }

    #[test]
    fn symbols_must_match_the_kind() {
        let (pools, scalars, pairs) = registry();
        let err = OperationSpec::unary("Plus", "+", &scalars)
            .validate(&pools)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSymbol { ref symbol, .. } if symbol == "+"));

        assert!(
            OperationSpec::binary("Shl", "<<", &pairs)
                .validate(&pools)
                .is_err()
        );
    }

    #[test]
    fn mutating_rules_follow_the_kind() {
        let (pools, scalars, pairs) = registry();
        assert!(matches!(
            OperationSpec::equality("Eq", "==", &pairs)
                .mutating()
                .validate(&pools),
            Err(CatalogError::UnsupportedKind { .. })
        ));

        let mut shift = OperationSpec::shift("Left", "<<", &scalars);
        shift.mutating_variant_required = false;
        assert!(matches!(
            shift.validate(&pools),
            Err(CatalogError::UnsupportedKind { .. })
        ));

        assert!(matches!(
            OperationSpec::string_round_trip("Radix", &scalars.big)
                .with_edge_case_filter(EdgeCaseFilter::SkipZeroRhs)
                .validate(&pools),
            Err(CatalogError::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn bindings_are_checked_against_the_registry() {
        let (pools, scalars, pairs) = registry();

        // unary over product pools
        let wrong = OperationSpec::new(
            "Minus",
            "-",
            OperationKind::Unary,
            PoolBinding::from(&pairs),
        );
        assert!(matches!(
            wrong.validate(&pools),
            Err(CatalogError::PoolDomainMismatch { expected: ElementDomain::Int, .. })
        ));

        let missing = OperationSpec::string_round_trip("Radix", "nope");
        assert!(matches!(
            missing.validate(&pools),
            Err(CatalogError::MissingPool { pool, .. }) if pool == "nope"
        ));

        let shape = OperationSpec::new(
            "Radix",
            "",
            OperationKind::StringRoundTrip,
            PoolBinding::from(&scalars),
        );
        assert!(matches!(
            shape.validate(&pools),
            Err(CatalogError::UnsupportedKind { .. })
        ));
    }
}
