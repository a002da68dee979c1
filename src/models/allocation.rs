//! Allocation model types
//!
//! Charges, the fee specification, per-charge allocation lines and the
//! advisory warnings produced while resolving an allocation.

use std::fmt;

use super::amount::Amount;

/// Where a charge came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeOrigin {
    /// Given on the command line
    #[default]
    Supplied,
    /// Recovered from the gap between the total and the other quantities
    Inferred,
}

impl fmt::Display for ChargeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeOrigin::Supplied => write!(f, "supplied"),
            ChargeOrigin::Inferred => write!(f, "inferred"),
        }
    }
}

/// One line item amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    pub amount: Amount,
    pub origin: ChargeOrigin,
}

impl Charge {
    /// Create a charge supplied by the caller
    pub fn supplied(amount: Amount) -> Self {
        Self {
            amount,
            origin: ChargeOrigin::Supplied,
        }
    }

    /// Create a charge recovered by inference
    pub fn inferred(amount: Amount) -> Self {
        Self {
            amount,
            origin: ChargeOrigin::Inferred,
        }
    }

    /// Check if this charge was inferred
    pub fn is_inferred(&self) -> bool {
        self.origin == ChargeOrigin::Inferred
    }
}

/// Total and fee as given by the caller
///
/// An absent value is represented by zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeSpec {
    pub total: Amount,
    pub fee: Amount,
}

impl FeeSpec {
    /// Check that at least one of total and fee was given
    pub fn is_specified(&self) -> bool {
        !(self.total.is_zero() && self.fee.is_zero())
    }
}

/// The quantity recovered during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inference {
    /// The fee was omitted and recovered from the total
    Fee(Amount),
    /// A charge was missing and has been appended
    Charge(Amount),
}

impl Inference {
    /// Get the inferred amount
    pub fn amount(&self) -> &Amount {
        match self {
            Inference::Fee(amount) | Inference::Charge(amount) => amount,
        }
    }

    /// Short name of the inferred quantity
    pub fn kind(&self) -> &'static str {
        match self {
            Inference::Fee(_) => "fee",
            Inference::Charge(_) => "charge",
        }
    }
}

/// A charge with its exact share of the fee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationLine {
    pub charge: Charge,
    /// Exact share of the fee
    pub proportion: Amount,
    /// Exact `charge + proportion`
    pub line_total: Amount,
}

impl AllocationLine {
    /// Build a line from a charge and its share of the fee
    pub fn new(charge: Charge, proportion: Amount) -> Self {
        let line_total = &charge.amount + &proportion;
        Self {
            charge,
            proportion,
            line_total,
        }
    }

    /// Render as `<charge> + <proportion> = <lineTotal>`
    pub fn format(&self, precision: u32) -> String {
        format!(
            "{} + {} = {}",
            self.charge.amount.format(precision),
            self.proportion.format(precision),
            self.line_total.format(precision)
        )
    }
}

/// A non-fatal condition noticed while allocating
///
/// Warnings never abort the computation and are reported after the lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    NegativeInferredCharge,
    NegativeFee,
    /// Rounded line totals do not add up to the total
    Remainder { amount: Amount, precision: u32 },
}

impl Warning {
    /// Position in the report; lower sorts first
    pub fn rank(&self) -> u8 {
        match self {
            Warning::NegativeInferredCharge => 0,
            Warning::NegativeFee => 1,
            Warning::Remainder { .. } => 2,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NegativeInferredCharge => write!(f, "inferred charge is negative"),
            Warning::NegativeFee => write!(f, "fee is negative"),
            Warning::Remainder { amount, precision } => {
                write!(f, "remainder: {}", amount.format(*precision))
            }
        }
    }
}

/// The result of allocating a fee across charges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Lines in resolved order, an inferred charge last
    pub lines: Vec<AllocationLine>,
    /// Exact sum of all charges
    pub sum: Amount,
    pub fee: Amount,
    /// Reconciled total, always `sum + fee`
    pub total: Amount,
    pub precision: u32,
    pub inference: Option<Inference>,
    pub warnings: Vec<Warning>,
}

impl Allocation {
    /// Formatted lines at the allocation's precision
    pub fn formatted_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.format(self.precision)).collect()
    }

    /// Sum of the line totals after rounding each one
    pub fn rounded_sum(&self) -> Amount {
        self.lines
            .iter()
            .map(|l| l.line_total.round_to(self.precision))
            .sum()
    }

    /// Check if a remainder warning was recorded
    pub fn has_remainder(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::Remainder { .. }))
    }
}
