//! Allocation service
//!
//! Provides the fee allocation pipeline: parse the literals, infer a missing
//! fee or charge, split the fee across the charges in exact arithmetic, and
//! reconcile the rounding remainder at the display precision.

use tracing::debug;

use crate::error::{FeeError, FeeResult};
use crate::models::{Allocation, AllocationLine, Amount, Charge, FeeSpec, Inference, Warning};

/// Raw literals to allocate, as received from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Charge literals in input order
    pub charges: Vec<String>,
    /// Total literal; `None` or empty means absent
    pub total: Option<String>,
    /// Fee literal; `None` or empty means absent
    pub fee: Option<String>,
}

impl AllocationRequest {
    /// Create a request for the given charges
    pub fn new<I, S>(charges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            charges: charges.into_iter().map(Into::into).collect(),
            total: None,
            fee: None,
        }
    }

    /// Set the total literal
    pub fn with_total(mut self, total: impl Into<String>) -> Self {
        self.total = Some(total.into());
        self
    }

    /// Set the fee literal
    pub fn with_fee(mut self, fee: impl Into<String>) -> Self {
        self.fee = Some(fee.into());
        self
    }
}

/// Charges and fee after the missing quantity has been inferred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub charges: Vec<Charge>,
    pub sum: Amount,
    pub fee: Amount,
    /// Always `sum + fee`
    pub total: Amount,
    pub inference: Option<Inference>,
    pub warnings: Vec<Warning>,
}

/// Service for fee allocation
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    precision: u32,
}

impl Allocator {
    /// Create an allocator rounding to `precision` decimal places
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Get the display precision
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Run the whole pipeline
    ///
    /// Every fatal condition is detected here, before anything is rendered.
    pub fn allocate(&self, request: &AllocationRequest) -> FeeResult<Allocation> {
        let (charges, spec) = parse_inputs(request)?;
        let resolution = resolve(charges, spec);
        let lines = split(&resolution.charges, &resolution.fee, &resolution.sum)?;

        let mut warnings = resolution.warnings;
        warnings.extend(reconcile(&lines, &resolution.total, self.precision));
        warnings.sort_by_key(Warning::rank);

        Ok(Allocation {
            lines,
            sum: resolution.sum,
            fee: resolution.fee,
            total: resolution.total,
            precision: self.precision,
            inference: resolution.inference,
            warnings,
        })
    }
}

/// Parse one literal, naming it on failure
pub fn parse_literal(literal: &str) -> FeeResult<Amount> {
    Amount::parse(literal).map_err(|e| FeeError::parse(literal, e))
}

/// Parse an optional literal; absent or blank is zero
fn parse_optional(literal: Option<&str>) -> FeeResult<Amount> {
    match literal {
        Some(s) if !s.trim().is_empty() => parse_literal(s),
        _ => Ok(Amount::zero()),
    }
}

/// Validate and parse the request literals
pub fn parse_inputs(request: &AllocationRequest) -> FeeResult<(Vec<Charge>, FeeSpec)> {
    if request.charges.is_empty() {
        return Err(FeeError::Input("no charges provided".into()));
    }

    let charges = request
        .charges
        .iter()
        .map(|literal| parse_literal(literal).map(Charge::supplied))
        .collect::<FeeResult<Vec<_>>>()?;

    let spec = FeeSpec {
        total: parse_optional(request.total.as_deref())?,
        fee: parse_optional(request.fee.as_deref())?,
    };

    if !spec.is_specified() {
        return Err(FeeError::Input("either fee or total must be provided".into()));
    }

    Ok((charges, spec))
}

/// Infer the missing fee or charge and reconcile the total
///
/// A non-zero gap between the given total and `fee + sum` becomes the fee
/// when no fee was given, otherwise it is appended as a last charge. The
/// returned total is recomputed from the charges and fee.
pub fn resolve(charges: Vec<Charge>, spec: FeeSpec) -> Resolution {
    let mut charges = charges;
    let mut sum: Amount = charges.iter().map(|c| &c.amount).sum();
    let mut fee = spec.fee;
    let mut inference = None;
    let mut warnings = Vec::new();

    debug!(charges = charges.len(), %sum, "parsed charges");

    if !spec.total.is_zero() {
        let inferred = &spec.total - &(&fee + &sum);

        if !inferred.is_zero() {
            if fee.is_zero() {
                debug!(%inferred, "fee inferred from total");
                fee = inferred.clone();
                inference = Some(Inference::Fee(inferred.clone()));
            } else {
                debug!(%inferred, "charge inferred from total");
                sum += &inferred;
                charges.push(Charge::inferred(inferred.clone()));
                inference = Some(Inference::Charge(inferred.clone()));
            }
        }

        if inferred.is_negative() {
            warnings.push(Warning::NegativeInferredCharge);
        }
    }

    let total = &sum + &fee;
    if fee.is_negative() {
        warnings.push(Warning::NegativeFee);
    }

    debug!(%sum, %fee, %total, "reconciled total");

    Resolution {
        charges,
        sum,
        fee,
        total,
        inference,
        warnings,
    }
}

/// Split the fee across the charges in proportion to their size
///
/// A zero fee needs no division, so zero-sum charges are only rejected when
/// there is something to distribute.
pub fn split(charges: &[Charge], fee: &Amount, sum: &Amount) -> FeeResult<Vec<AllocationLine>> {
    charges
        .iter()
        .map(|charge| -> FeeResult<AllocationLine> {
            let proportion = if fee.is_zero() {
                Amount::zero()
            } else {
                (fee * &charge.amount).checked_div(sum).ok_or_else(|| {
                    FeeError::Arithmetic(
                        "charges sum to zero, the fee cannot be split proportionally".into(),
                    )
                })?
            };
            Ok(AllocationLine::new(charge.clone(), proportion))
        })
        .collect()
}

/// Compare the rounded line totals with the exact total
///
/// Returns a remainder warning when they differ. The remainder is shown at
/// `precision` if it is exact there, otherwise with two extra digits.
pub fn reconcile(lines: &[AllocationLine], total: &Amount, precision: u32) -> Option<Warning> {
    let rounded_sum: Amount = lines
        .iter()
        .map(|l| l.line_total.round_to(precision))
        .sum();

    if &rounded_sum == total {
        return None;
    }

    let remainder = total - &rounded_sum;
    let shown = if remainder.is_representable(precision) {
        precision
    } else {
        precision.saturating_add(2)
    };
    debug!(%remainder, precision = shown, "rounding remainder");

    Some(Warning::Remainder {
        amount: remainder,
        precision: shown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        Amount::parse(s).unwrap()
    }

    fn charges(literals: &[&str]) -> Vec<Charge> {
        literals.iter().map(|l| Charge::supplied(amount(l))).collect()
    }

    #[test]
    fn test_even_split() {
        let request = AllocationRequest::new(["10", "20", "30"]).with_fee("6");
        let allocation = Allocator::new(2).allocate(&request).unwrap();

        assert_eq!(
            allocation.formatted_lines(),
            vec![
                "10.00 + 1.00 = 11.00",
                "20.00 + 2.00 = 22.00",
                "30.00 + 3.00 = 33.00",
            ]
        );
        assert!(allocation.warnings.is_empty());
        assert_eq!(allocation.total, Amount::from_integer(66));
        assert_eq!(allocation.inference, None);
    }

    #[test]
    fn test_fee_inferred_from_total() {
        let request = AllocationRequest::new(["7"]).with_total("10");
        let allocation = Allocator::new(2).allocate(&request).unwrap();

        assert_eq!(allocation.formatted_lines(), vec!["7.00 + 3.00 = 10.00"]);
        assert_eq!(allocation.fee, Amount::from_integer(3));
        assert_eq!(
            allocation.inference,
            Some(Inference::Fee(Amount::from_integer(3)))
        );
        assert!(allocation.warnings.is_empty());
    }

    #[test]
    fn test_remainder_at_zero_precision() {
        let request = AllocationRequest::new(["1", "1", "1"]).with_fee("1");
        let allocation = Allocator::new(0).allocate(&request).unwrap();

        assert_eq!(
            allocation.formatted_lines(),
            vec!["1 + 0 = 1", "1 + 0 = 1", "1 + 0 = 1"]
        );
        assert_eq!(
            allocation.warnings,
            vec![Warning::Remainder {
                amount: Amount::from_integer(1),
                precision: 0,
            }]
        );
        assert_eq!(allocation.warnings[0].to_string(), "remainder: 1");
    }

    #[test]
    fn test_no_charges() {
        let request = AllocationRequest::new(Vec::<String>::new()).with_fee("1");
        let err = Allocator::new(2).allocate(&request).unwrap_err();
        assert!(err.is_input());
        assert_eq!(err.to_string(), "no charges provided");
    }

    #[test]
    fn test_negative_fee() {
        let request = AllocationRequest::new(["5"]).with_fee("-2");
        let allocation = Allocator::new(2).allocate(&request).unwrap();

        assert_eq!(allocation.formatted_lines(), vec!["5.00 + -2.00 = 3.00"]);
        assert_eq!(allocation.warnings, vec![Warning::NegativeFee]);
    }

    #[test]
    fn test_neither_fee_nor_total() {
        let request = AllocationRequest::new(["5"]);
        let err = Allocator::new(2).allocate(&request).unwrap_err();
        assert_eq!(err.to_string(), "either fee or total must be provided");

        let explicit_zeros = AllocationRequest::new(["5"]).with_fee("0").with_total("");
        let err = Allocator::new(2).allocate(&explicit_zeros).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_parse_error_names_literal() {
        let request = AllocationRequest::new(["10", "twelve"]).with_fee("1");
        let err = Allocator::new(2).allocate(&request).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("'twelve'"));

        let bad_total = AllocationRequest::new(["10"]).with_total("1,000");
        let err = Allocator::new(2).allocate(&bad_total).unwrap_err();
        assert!(err.to_string().contains("'1,000'"));
    }

    #[test]
    fn test_zero_sum_with_fee_is_arithmetic_error() {
        let request = AllocationRequest::new(["5", "-5"]).with_fee("1");
        let err = Allocator::new(2).allocate(&request).unwrap_err();
        assert!(err.is_arithmetic());
    }

    #[test]
    fn test_zero_fee_allocates_nothing() {
        let lines = split(&charges(&["5", "-5"]), &Amount::zero(), &Amount::zero()).unwrap();
        assert!(lines.iter().all(|l| l.proportion.is_zero()));

        // total equals the charges, so the fee resolves to zero
        let request = AllocationRequest::new(["4", "-4", "3"]).with_total("3");
        let allocation = Allocator::new(2).allocate(&request).unwrap();
        assert!(allocation.fee.is_zero());
        assert_eq!(allocation.formatted_lines()[2], "3.00 + 0.00 = 3.00");
    }

    #[test]
    fn test_missing_charge_inferred() {
        let request = AllocationRequest::new(["10", "20"]).with_fee("6").with_total("66");
        let allocation = Allocator::new(2).allocate(&request).unwrap();

        assert_eq!(allocation.lines.len(), 3);
        assert!(allocation.lines[2].charge.is_inferred());
        assert_eq!(allocation.lines[2].charge.amount, Amount::from_integer(30));
        assert_eq!(allocation.formatted_lines()[2], "30.00 + 3.00 = 33.00");
        assert_eq!(
            allocation.inference,
            Some(Inference::Charge(Amount::from_integer(30)))
        );
        assert!(allocation.warnings.is_empty());
    }

    #[test]
    fn test_negative_inferred_charge_warns() {
        let request = AllocationRequest::new(["10"]).with_fee("-2").with_total("5");
        let allocation = Allocator::new(2).allocate(&request).unwrap();

        // inferred = 5 - (-2 + 10) = -3
        assert_eq!(
            allocation.inference,
            Some(Inference::Charge(Amount::from_integer(-3)))
        );
        assert_eq!(
            allocation.warnings,
            vec![Warning::NegativeInferredCharge, Warning::NegativeFee]
        );
        assert_eq!(allocation.total, Amount::from_integer(5));
    }

    #[test]
    fn test_negative_inferred_fee_warns() {
        let request = AllocationRequest::new(["10"]).with_total("5");
        let allocation = Allocator::new(2).allocate(&request).unwrap();

        assert_eq!(allocation.formatted_lines(), vec!["10.00 + -5.00 = 5.00"]);
        assert_eq!(
            allocation.inference,
            Some(Inference::Fee(Amount::from_integer(-5)))
        );
        assert_eq!(
            allocation.warnings,
            vec![Warning::NegativeInferredCharge, Warning::NegativeFee]
        );
    }

    #[test]
    fn test_allocates_at_maximum_precision() {
        let request = AllocationRequest::new(["1", "2"]).with_fee("1");
        let allocation = Allocator::new(crate::models::MAX_PRECISION)
            .allocate(&request)
            .unwrap();

        let lines = allocation.formatted_lines();
        assert!(lines[0].starts_with("1.000"));
        assert!(lines[0].contains(" + 0.3333"));
        assert!(lines[1].contains(" + 0.6666"));
        assert!(lines[1].ends_with('7'));
        // the rounded thirds still add up to the total
        assert!(allocation.warnings.is_empty());
    }

    #[test]
    fn test_consistent_fee_and_total_trusts_fee() {
        let request = AllocationRequest::new(["10", "20", "30"])
            .with_fee("6")
            .with_total("66");
        let allocation = Allocator::new(2).allocate(&request).unwrap();

        assert_eq!(allocation.inference, None);
        assert_eq!(allocation.lines.len(), 3);
        assert_eq!(allocation.fee, Amount::from_integer(6));
    }

    #[test]
    fn test_conservation_is_exact() {
        let cases: &[(&[&str], &str)] = &[
            (&["1", "1", "1"], "1"),
            (&["3", "7", "11", "13"], "0.01"),
            (&["0.1", "0.2", "0.7"], "1/3"),
            (&["123.45", "0.01", "99999"], "17.17"),
            (&["2", "5"], "-1.5"),
        ];

        for (literals, fee) in cases {
            let charges = charges(literals);
            let sum: Amount = charges.iter().map(|c| &c.amount).sum();
            let fee = amount(fee);
            let lines = split(&charges, &fee, &sum).unwrap();

            let shares: Amount = lines.iter().map(|l| &l.proportion).sum();
            assert_eq!(shares, fee, "charges {:?}", literals);
        }
    }

    #[test]
    fn test_reconciliation_for_each_omission() {
        // charges 10, 20, 30 with fee 6 give total 66
        let omit_total = AllocationRequest::new(["10", "20", "30"]).with_fee("6");
        let omit_fee = AllocationRequest::new(["10", "20", "30"]).with_total("66");
        let omit_charge = AllocationRequest::new(["10", "30"]).with_fee("6").with_total("66");

        for request in [omit_total, omit_fee, omit_charge] {
            let allocation = Allocator::new(2).allocate(&request).unwrap();
            let charges: Amount = allocation.lines.iter().map(|l| &l.charge.amount).sum();
            assert_eq!(allocation.total, &charges + &allocation.fee);
            assert_eq!(allocation.total, Amount::from_integer(66));
        }
    }

    #[test]
    fn test_remainder_absent_at_sufficient_precision() {
        let request = AllocationRequest::new(["1", "1", "1", "1"]).with_fee("1");
        let coarse = Allocator::new(1).allocate(&request).unwrap();
        let exact = Allocator::new(2).allocate(&request).unwrap();

        // 1.25 rounds to 1.3 four times, 5.2 against 5
        assert!(coarse.has_remainder());
        assert_eq!(coarse.warnings[0].to_string(), "remainder: -0.2");
        assert!(!exact.has_remainder());
        assert_eq!(exact.rounded_sum(), exact.total);
    }

    #[test]
    fn test_remainder_uses_extra_digits_when_inexact() {
        let lines = split(
            &charges(&["1", "2"]),
            &amount("1/3"),
            &Amount::from_integer(3),
        )
        .unwrap();
        let total = amount("10/3");

        // line totals 10/9 and 20/9 round to 1.11 and 2.22
        let warning = reconcile(&lines, &total, 2).unwrap();
        assert_eq!(
            warning,
            Warning::Remainder {
                amount: amount("1/300"),
                precision: 4,
            }
        );
        assert_eq!(warning.to_string(), "remainder: 0.0033");
    }

    #[test]
    fn test_deterministic() {
        let request = AllocationRequest::new(["3.3", "1/7", "2e1"]).with_total("100");
        let first = Allocator::new(3).allocate(&request).unwrap();
        let second = Allocator::new(3).allocate(&request).unwrap();
        assert_eq!(first, second);
    }
}
