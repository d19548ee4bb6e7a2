//! Named pools of benchmark input values.

use core::fmt;

use facet::Facet;

use crate::CatalogError;

/// Pool names whose `static` would shadow a constant every generated file declares.
pub const RESERVED_POOL_NAMES: &[&str] = &["max_word_count", "shifts"];

/// What a pool's elements are.
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementDomain {
    /// Machine-sized integers, lifted into the big-integer type
    Int,
    /// Arbitrary-precision values up to the catalog's word limit
    BigValue,
    /// Every `Int` element paired with every `BigValue` element
    IntBig,
    /// Every `BigValue` element paired with every `BigValue` element
    BigBig,
}

impl ElementDomain {
    /// Whether elements are `(left, right)` pairs.
    pub fn is_pair(self) -> bool {
        matches!(self, ElementDomain::IntBig | ElementDomain::BigBig)
    }

    /// Suffix used in benchmark function names for pools of this domain.
    pub fn suffix(self) -> &'static str {
        match self {
            ElementDomain::Int | ElementDomain::IntBig => "int",
            ElementDomain::BigValue | ElementDomain::BigBig => "big",
        }
    }
}

impl fmt::Display for ElementDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementDomain::Int => write!(f, "int"),
            ElementDomain::BigValue => write!(f, "big"),
            ElementDomain::IntBig => write!(f, "int x big"),
            ElementDomain::BigBig => write!(f, "big x big"),
        }
    }
}

/// Where a pool's elements come from.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
#[repr(C)]
pub enum PoolOrigin {
    /// Produced by the fixture provider
    Fixture,
    /// Cartesian product of two previously declared pools
    Product { left: String, right: String },
}

/// A declared pool.
///
/// `approximate_count` is a target handed to the fixture provider, which may
/// return a different (but similar) number of elements.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct ValuePoolSpec {
    /// Lowercase snake_case; the generated `static` is its uppercase form
    pub name: String,
    /// What the elements are
    pub element_domain: ElementDomain,
    /// Size requested from the fixture provider, or the product of both halves
    pub approximate_count: u64,
    /// Fixture call or product
    pub origin: PoolOrigin,
}

/// The `int` and `big` halves of a pool family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarPools {
    /// `{prefix}_int`
    pub int: String,
    /// `{prefix}_big`
    pub big: String,
}

/// The `int x big` and `big x big` products of a pool family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairPools {
    /// `{prefix}_int_big`
    pub int_big: String,
    /// `{prefix}_big_big`
    pub big_big: String,
}

/// Every pool of a catalog, in declaration order.
#[derive(Facet, Debug, Clone, Default)]
pub struct PoolRegistry {
    pools: Vec<ValuePoolSpec>,
}

impl PoolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a fixture-backed pool.
    ///
    /// Pair domains are rejected: those pools only exist as products, see
    /// [`PoolRegistry::declare_product`].
    pub fn declare(
        &mut self,
        name: &str,
        element_domain: ElementDomain,
        approximate_count: u64,
    ) -> Result<&ValuePoolSpec, CatalogError> {
        if element_domain.is_pair() {
            return Err(CatalogError::PairNeedsProduct {
                pool: name.to_string(),
            });
        }
        if approximate_count == 0 {
            return Err(CatalogError::ZeroCount {
                pool: name.to_string(),
            });
        }

        self.insert(ValuePoolSpec {
            name: name.to_string(),
            element_domain,
            approximate_count,
            origin: PoolOrigin::Fixture,
        })
    }

    /// Declare the Cartesian product of two declared pools under a derived name.
    ///
    /// `int x big` gives an [`ElementDomain::IntBig`] pool, `big x big` gives
    /// [`ElementDomain::BigBig`]. Nothing else pairs.
    pub fn declare_product(
        &mut self,
        left: &str,
        right: &str,
    ) -> Result<&ValuePoolSpec, CatalogError> {
        let context = format!("product {left} x {right}");
        let left_pool = self.resolve(&context, left)?;
        let right_pool = self.resolve(&context, right)?;

        if right_pool.element_domain != ElementDomain::BigValue {
            return Err(CatalogError::PoolDomainMismatch {
                context,
                pool: right.to_string(),
                expected: ElementDomain::BigValue,
                found: right_pool.element_domain,
            });
        }
        let element_domain = match left_pool.element_domain {
            ElementDomain::Int => ElementDomain::IntBig,
            ElementDomain::BigValue => ElementDomain::BigBig,
            found => {
                return Err(CatalogError::PoolDomainMismatch {
                    context,
                    pool: left.to_string(),
                    expected: ElementDomain::Int,
                    found,
                });
            }
        };
        let approximate_count = left_pool
            .approximate_count
            .saturating_mul(right_pool.approximate_count);

        self.insert(ValuePoolSpec {
            name: product_name(left, right),
            element_domain,
            approximate_count,
            origin: PoolOrigin::Product {
                left: left.to_string(),
                right: right.to_string(),
            },
        })
    }

    /// Declare `{prefix}_int` and `{prefix}_big`.
    pub fn declare_scalars(
        &mut self,
        prefix: &str,
        approximate_count: u64,
    ) -> Result<ScalarPools, CatalogError> {
        let int = self
            .declare(&format!("{prefix}_int"), ElementDomain::Int, approximate_count)?
            .name
            .clone();
        let big = self
            .declare(
                &format!("{prefix}_big"),
                ElementDomain::BigValue,
                approximate_count,
            )?
            .name
            .clone();
        Ok(ScalarPools { int, big })
    }

    /// Declare a full family: both scalar pools plus their two products.
    pub fn declare_pairs(
        &mut self,
        prefix: &str,
        approximate_count: u64,
    ) -> Result<PairPools, CatalogError> {
        let scalars = self.declare_scalars(prefix, approximate_count)?;
        let int_big = self
            .declare_product(&scalars.int, &scalars.big)?
            .name
            .clone();
        let big_big = self
            .declare_product(&scalars.big, &scalars.big)?
            .name
            .clone();
        Ok(PairPools { int_big, big_big })
    }

    /// The pool called `name`, if declared.
    pub fn get(&self, name: &str) -> Option<&ValuePoolSpec> {
        self.pools.iter().find(|pool| pool.name == name)
    }

    /// Look up a pool, failing with [`CatalogError::MissingPool`] on behalf of `context`.
    pub fn resolve(&self, context: &str, name: &str) -> Result<&ValuePoolSpec, CatalogError> {
        self.get(name).ok_or_else(|| CatalogError::MissingPool {
            context: context.to_string(),
            pool: name.to_string(),
        })
    }

    /// Pools in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ValuePoolSpec> {
        self.pools.iter()
    }

    /// Number of declared pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    fn insert(&mut self, pool: ValuePoolSpec) -> Result<&ValuePoolSpec, CatalogError> {
        check_pool_name(&pool.name)?;
        if self.get(&pool.name).is_some() {
            return Err(CatalogError::DuplicatePoolName { name: pool.name });
        }

        tracing::trace!(
            pool = %pool.name,
            domain = %pool.element_domain,
            count = pool.approximate_count,
            "declared pool"
        );
        let index = self.pools.len();
        self.pools.push(pool);
        Ok(&self.pools[index])
    }
}

/// Pool names become `SHOUTY_SNAKE_CASE` statics, so only lowercase
/// snake_case is accepted: that keeps the mapping one-to-one.
fn check_pool_name(name: &str) -> Result<(), CatalogError> {
    let invalid = |reason| {
        Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return invalid("pool names start with a lowercase letter");
    }
    let snake = name.split('_').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    });
    if !snake {
        return invalid("pool names are lowercase snake_case without empty segments");
    }
    if RESERVED_POOL_NAMES.contains(&name) {
        return invalid("reserved for a constant of the generated file");
    }
    Ok(())
}

/// Name of the product pool `left x right`.
///
/// Leading `_`-separated segments that `right` shares with `left` are dropped
/// from the right half: `mul_div_int` x `mul_div_big` is `mul_div_int_big`.
fn product_name(left: &str, right: &str) -> String {
    let left_segments: Vec<&str> = left.split('_').collect();
    let right_segments: Vec<&str> = right.split('_').collect();

    let shared = left_segments
        .iter()
        .zip(&right_segments)
        .take_while(|(l, r)| l == r)
        .count()
        // keep at least one segment of the right name
        .min(right_segments.len().saturating_sub(1));

    format!("{left}_{}", right_segments[shared..].join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_names() {
        assert_eq!(product_name("mul_div_int", "mul_div_big"), "mul_div_int_big");
        assert_eq!(product_name("mul_div_big", "mul_div_big"), "mul_div_big_big");
        assert_eq!(product_name("ints", "bigs"), "ints_bigs");
        assert_eq!(product_name("bigs", "bigs"), "bigs_bigs");
        assert_eq!(product_name("a_int", "b_big"), "a_int_b_big");
    }

    #[test]
    fn declare_keeps_order_and_rejects_duplicates() {
        let mut pools = PoolRegistry::new();
        pools.declare("ints", ElementDomain::Int, 10).unwrap();
        pools.declare("bigs", ElementDomain::BigValue, 10).unwrap();

        let err = pools.declare("ints", ElementDomain::BigValue, 5).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicatePoolName {
                name: "ints".to_string()
            }
        );

        let names: Vec<_> = pools.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["ints", "bigs"]);
    }

    #[test]
    fn products_derive_domain_and_count() {
        let mut pools = PoolRegistry::new();
        pools.declare("ints", ElementDomain::Int, 10).unwrap();
        pools.declare("bigs", ElementDomain::BigValue, 20).unwrap();

        let int_big = pools.declare_product("ints", "bigs").unwrap().clone();
        assert_eq!(int_big.name, "ints_bigs");
        assert_eq!(int_big.element_domain, ElementDomain::IntBig);
        assert_eq!(int_big.approximate_count, 200);
        assert_eq!(
            int_big.origin,
            PoolOrigin::Product {
                left: "ints".to_string(),
                right: "bigs".to_string()
            }
        );

        let big_big = pools.declare_product("bigs", "bigs").unwrap();
        assert_eq!(big_big.element_domain, ElementDomain::BigBig);
    }

    #[test]
    fn products_need_declared_scalar_halves() {
        let mut pools = PoolRegistry::new();
        pools.declare("ints", ElementDomain::Int, 10).unwrap();

        assert!(matches!(
            pools.declare_product("ints", "bigs"),
            Err(CatalogError::MissingPool { pool, .. }) if pool == "bigs"
        ));
        assert!(matches!(
            pools.declare_product("ints", "ints"),
            Err(CatalogError::PoolDomainMismatch { expected: ElementDomain::BigValue, .. })
        ));
    }

    #[test]
    fn pair_domains_and_zero_counts_are_rejected() {
        let mut pools = PoolRegistry::new();
        assert!(matches!(
            pools.declare("pairs", ElementDomain::IntBig, 10),
            Err(CatalogError::PairNeedsProduct { .. })
        ));
        assert!(matches!(
            pools.declare("empty", ElementDomain::Int, 0),
            Err(CatalogError::ZeroCount { .. })
        ));
        assert!(matches!(
            pools.declare("two words", ElementDomain::Int, 1),
            Err(CatalogError::InvalidName { .. })
        ));
    }

    #[test]
    fn pool_names_map_to_distinct_statics() {
        let mut pools = PoolRegistry::new();
        pools.declare("ints", ElementDomain::Int, 10).unwrap();
        pools.declare("a_b", ElementDomain::Int, 10).unwrap();
        pools.declare("x2", ElementDomain::Int, 10).unwrap();

        for name in ["INTS", "aB", "_x", "x_", "a__b", "2x", "", "shifts", "max_word_count"] {
            assert!(
                matches!(
                    pools.declare(name, ElementDomain::BigValue, 10),
                    Err(CatalogError::InvalidName { .. })
                ),
                "{name:?} was accepted"
            );
        }
        assert_eq!(pools.len(), 3);
    }

    #[test]
    fn families() {
        let mut pools = PoolRegistry::new();
        let pairs = pools.declare_pairs("mul_div", 100).unwrap();
        assert_eq!(pairs.int_big, "mul_div_int_big");
        assert_eq!(pairs.big_big, "mul_div_big_big");

        let names: Vec<_> = pools.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["mul_div_int", "mul_div_big", "mul_div_int_big", "mul_div_big_big"]
        );
    }
}
