//! Skip-guards for operand combinations an operation is undefined for.

use bigint_perf_defs::{EdgeCaseFilter, OperationSpec};

/// The right-hand operand of a generated loop body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    /// Bound to a big-integer reference
    Big(&'a str),
    /// Bound to a machine integer (shift amounts)
    Primitive(&'a str),
}

impl Operand<'_> {
    /// Variable name in the generated loop.
    pub fn name(&self) -> &str {
        match self {
            Operand::Big(name) | Operand::Primitive(name) => name,
        }
    }
}

/// Guard policy of a single operation.
///
/// Every block rendered for the operation asks the same policy for its guard,
/// so plain, in-place, scalar and big blocks can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCasePolicy {
    filter: Option<EdgeCaseFilter>,
}

impl EdgeCasePolicy {
    /// The policy every block of `operation` shares.
    pub fn for_operation(operation: &OperationSpec) -> Self {
        Self {
            filter: operation.edge_case_filter,
        }
    }

    /// Whether blocks get a guard at all.
    pub fn is_active(&self) -> bool {
        self.filter.is_some()
    }

    /// The guard line to open a loop body with, if any.
    pub fn guard(&self, rhs: Operand<'_>) -> Option<String> {
        match self.filter? {
            EdgeCaseFilter::SkipZeroRhs => Some(zero_guard(rhs)),
        }
    }
}

/// `continue`s past iterations whose operand is zero.
pub fn zero_guard(operand: Operand<'_>) -> String {
    match operand {
        Operand::Big(name) => format!("if {name}.is_zero() {{ continue; }}"),
        Operand::Primitive(name) => format!("if {name} == 0 {{ continue; }}"),
    }
}
