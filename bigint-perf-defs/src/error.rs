use core::fmt;

use miette::Diagnostic;

use crate::{ElementDomain, OperationKind};

/// A defect in a catalog declaration, detected while building or rendering it.
///
/// None of these are runtime conditions: they all mean the catalog author made
/// an inconsistent declaration, and generation stops before any output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    /// A pool with this name was already declared
    DuplicatePoolName { name: String },

    /// An operation (or product) references a pool that was never declared
    MissingPool { context: String, pool: String },

    /// A pair domain was declared directly instead of as a product
    PairNeedsProduct { pool: String },

    /// The operation's kind has no rendering rule for what was asked of it
    UnsupportedKind {
        operation: String,
        kind: String,
        reason: &'static str,
    },

    /// Two rendered blocks derived the same function name
    DuplicateFunctionName { name: String, operation: String },

    /// The operator token is not valid for the kind in the rendering target
    InvalidSymbol {
        operation: String,
        kind: OperationKind,
        symbol: String,
    },

    /// A pool was bound where a different element domain is required
    PoolDomainMismatch {
        context: String,
        pool: String,
        expected: ElementDomain,
        found: ElementDomain,
    },

    /// A string-conversion base outside 2..=36, or listed twice
    InvalidRadix { radix: u32 },

    /// A pool or operation name that cannot be spliced into an identifier
    InvalidName { name: String, reason: &'static str },

    /// A pool declared with an approximate count of zero
    ZeroCount { pool: String },
}

impl CatalogError {
    fn code_str(&self) -> &'static str {
        match self {
            CatalogError::DuplicatePoolName { .. } => "catalog::duplicate_pool_name",
            CatalogError::MissingPool { .. } => "catalog::missing_pool",
            CatalogError::PairNeedsProduct { .. } => "catalog::pair_needs_product",
            CatalogError::UnsupportedKind { .. } => "catalog::unsupported_kind",
            CatalogError::DuplicateFunctionName { .. } => "catalog::duplicate_function_name",
            CatalogError::InvalidSymbol { .. } => "catalog::invalid_symbol",
            CatalogError::PoolDomainMismatch { .. } => "catalog::pool_domain_mismatch",
            CatalogError::InvalidRadix { .. } => "catalog::invalid_radix",
            CatalogError::InvalidName { .. } => "catalog::invalid_name",
            CatalogError::ZeroCount { .. } => "catalog::zero_count",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        match self {
            CatalogError::DuplicatePoolName { .. } => {
                Some("every pool needs its own name; products get a derived name automatically")
            }
            CatalogError::MissingPool { .. } => {
                Some("declare the pool in the registry before binding operations to it")
            }
            CatalogError::PairNeedsProduct { .. } => {
                Some("declare both halves, then call `declare_product(left, right)`")
            }
            CatalogError::DuplicateFunctionName { .. } => {
                Some("operation display names must be unique per kind")
            }
            CatalogError::InvalidSymbol { .. } => Some(
                "unary: - !, binary: + - * / % & | ^, shift: << >>, equality: == !=, comparison: < <= > >=",
            ),
            CatalogError::InvalidName { .. } => {
                Some("operation names are ASCII alphanumerics or underscores; pool names are lowercase snake_case")
            }
            _ => None,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicatePoolName { name } => {
                write!(f, "pool '{name}' is declared more than once")
            }
            CatalogError::MissingPool { context, pool } => {
                write!(f, "{context} uses undeclared pool '{pool}'")
            }
            CatalogError::PairNeedsProduct { pool } => {
                write!(f, "pool '{pool}' holds pairs and must be declared as a product")
            }
            CatalogError::UnsupportedKind {
                operation,
                kind,
                reason,
            } => {
                write!(
                    f,
                    "operation '{operation}': kind '{kind}' cannot be rendered ({reason})"
                )
            }
            CatalogError::DuplicateFunctionName { name, operation } => {
                write!(
                    f,
                    "operation '{operation}' renders function '{name}', which already exists"
                )
            }
            CatalogError::InvalidSymbol {
                operation,
                kind,
                symbol,
            } => {
                write!(
                    f,
                    "operation '{operation}': '{symbol}' is not a {kind} operator"
                )
            }
            CatalogError::PoolDomainMismatch {
                context,
                pool,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{context}: pool '{pool}' holds {found} values, expected {expected}"
                )
            }
            CatalogError::InvalidRadix { radix } => {
                write!(f, "radix {radix} is repeated or outside 2..=36")
            }
            CatalogError::InvalidName { name, reason } => {
                write!(f, "'{name}' cannot be used in an identifier: {reason}")
            }
            CatalogError::ZeroCount { pool } => {
                write!(f, "pool '{pool}' has an approximate count of zero")
            }
        }
    }
}

impl core::error::Error for CatalogError {}

impl Diagnostic for CatalogError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }
}

/// Check that `name` can be spliced into a generated identifier.
pub(crate) fn check_identifier(name: &str) -> Result<(), CatalogError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: "not an ASCII identifier",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(check_identifier("mul_div_int").is_ok());
        assert!(check_identifier("_x9").is_ok());
        assert!(check_identifier("").is_err());
        assert!(check_identifier("9lives").is_err());
        assert!(check_identifier("shift left").is_err());
        assert!(check_identifier("add+").is_err());
    }

    #[test]
    fn diagnostic_codes() {
        let err = CatalogError::DuplicatePoolName {
            name: "ints".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("catalog::duplicate_pool_name")
        );
        assert!(err.help().is_some());
        assert_eq!(err.to_string(), "pool 'ints' is declared more than once");
    }
}
