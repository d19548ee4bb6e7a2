//! Named, versioned catalog presets.
//!
//! Pool cardinalities and operation sets change over time. Rather than
//! guessing at compatibility between those changes, every configuration gets a
//! name and a version, and the generated file records which one it came from.

use crate::{Catalog, CatalogError, EdgeCaseFilter, ElementDomain, OperationSpec, RadixSpec};

/// Preset used when none is requested.
pub const DEFAULT_PRESET: &str = "full";

/// A catalog configuration that can be rebuilt on demand.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Selected with `--preset`
    pub name: &'static str,
    /// Bumped whenever pools or operations change
    pub version: u32,
    /// One line, shown by `--list-presets`
    pub description: &'static str,
    build: fn(&Preset) -> Result<Catalog, CatalogError>,
}

impl Preset {
    /// Build this preset's catalog.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        (self.build)(self)
    }
}

/// Every known preset, default first.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "full",
        version: 3,
        description: "complete arithmetic suite with production-sized pools",
        build: full,
    },
    Preset {
        name: "quick",
        version: 1,
        description: "same operations over small pools, for smoke-testing the harness",
        build: quick,
    },
];

/// Look a preset up by name.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

/// Approximate pool sizes for one catalog configuration.
struct Cardinalities {
    string: u64,
    equatable_comparable: u64,
    unary: u64,
    add_sub: u64,
    mul_div: u64,
    and_or_xor: u64,
    shift: u64,
}

fn full(preset: &Preset) -> Result<Catalog, CatalogError> {
    numerics(
        preset,
        &Cardinalities {
            string: 1_000,
            equatable_comparable: 1_000,
            unary: 100_000,
            add_sub: 200,
            mul_div: 100,
            and_or_xor: 200,
            shift: 20_000,
        },
        &[500, 1_000, 5_000],
    )
}

fn quick(preset: &Preset) -> Result<Catalog, CatalogError> {
    numerics(
        preset,
        &Cardinalities {
            string: 50,
            equatable_comparable: 50,
            unary: 1_000,
            add_sub: 20,
            mul_div: 10,
            and_or_xor: 20,
            shift: 200,
        },
        &[100],
    )
}

fn numerics(
    preset: &Preset,
    counts: &Cardinalities,
    pi_digit_counts: &[u32],
) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new(preset.name, preset.version);
    catalog.radixes = RadixSpec::new(&[8, 10, 16])?;
    catalog.shift_amounts = vec![0, 7, 61, 67, 127];
    catalog.pi_digit_counts = pi_digit_counts.to_vec();

    let pools = &mut catalog.pools;
    let string = pools
        .declare("string_big", ElementDomain::BigValue, counts.string)?
        .name
        .clone();
    let equatable = pools.declare_pairs("equatable_comparable", counts.equatable_comparable)?;
    let unary = pools.declare_scalars("unary", counts.unary)?;
    let add_sub = pools.declare_pairs("add_sub", counts.add_sub)?;
    let mul_div = pools.declare_pairs("mul_div", counts.mul_div)?;
    let and_or_xor = pools.declare_pairs("and_or_xor", counts.and_or_xor)?;
    let shift = pools.declare_scalars("shift", counts.shift)?;

    let skip_zero = EdgeCaseFilter::SkipZeroRhs;
    catalog
        .push(OperationSpec::string_round_trip("Radix", &string))
        .push(OperationSpec::equality("Eq", "==", &equatable))
        .push(OperationSpec::comparison("Lt", "<", &equatable))
        .push(OperationSpec::unary("Minus", "-", &unary))
        .push(OperationSpec::unary("Not", "!", &unary))
        .push(OperationSpec::binary("Add", "+", &add_sub).mutating())
        .push(OperationSpec::binary("Sub", "-", &add_sub).mutating())
        .push(OperationSpec::binary("Mul", "*", &mul_div).mutating())
        .push(
            OperationSpec::binary("Div", "/", &mul_div)
                .mutating()
                .with_edge_case_filter(skip_zero),
        )
        .push(
            OperationSpec::binary("Mod", "%", &mul_div)
                .mutating()
                .with_edge_case_filter(skip_zero),
        )
        .push(OperationSpec::binary("And", "&", &and_or_xor).mutating())
        .push(OperationSpec::binary("Or", "|", &and_or_xor).mutating())
        .push(OperationSpec::binary("Xor", "^", &and_or_xor).mutating())
        .push(OperationSpec::shift("Left", "<<", &shift))
        .push(OperationSpec::shift("Right", ">>", &shift));

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_build_and_validate() {
        for preset in PRESETS {
            let catalog = preset.catalog().unwrap();
            catalog.validate().unwrap();
            assert_eq!(catalog.preset, preset.name);
            assert_eq!(catalog.version, preset.version);
            assert_eq!(catalog.operations.len(), 15);
        }
    }

    #[test]
    fn default_preset_exists() {
        let preset = find_preset(DEFAULT_PRESET).unwrap();
        assert_eq!(preset.name, PRESETS[0].name);
        assert!(find_preset("nightly").is_none());
    }

    #[test]
    fn full_preset_pools() {
        let catalog = find_preset("full").unwrap().catalog().unwrap();
        let mul_div = catalog.pools.get("mul_div_int").unwrap();
        assert_eq!(mul_div.approximate_count, 100);
        assert!(catalog.pools.get("string_int").is_none());
        assert_eq!(catalog.pi_digit_counts, [500, 1_000, 5_000]);
    }
}
