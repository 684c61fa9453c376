//! Payment schedule derivation.
//!
//! A schedule is derived from exactly one assessment (or one parsed hint) and
//! never mutated; re-submitting a calculation produces a replacement schedule.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{TaxAssessment, TaxCategory, TaxError};

/// Days until the default due date ("upon receipt of payment within 30 days").
pub const DEFAULT_PAYMENT_WINDOW_DAYS: i64 = 30;

/// Caller overrides for schedule generation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScheduleOptions {
    /// Explicit due date; defaults to 30 days after the calculation date.
    pub due_date: Option<NaiveDate>,
    /// Explicit installment count; defaults by tax category.
    pub installments: Option<u32>,
    /// For PAYE only: request an installment plan instead of a single payment.
    pub installment_plan: bool,
}

/// An installment plan for a calculated liability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    pub total_amount: Decimal,
    pub due_date: NaiveDate,
    pub installment_count: u32,
    /// Whole-naira installments; the last one absorbs the rounding residue so
    /// the amounts always sum to `total_amount` exactly.
    pub installment_amounts: Vec<Decimal>,
}

impl PaymentSchedule {
    /// Builds a schedule from an explicit total, due date, and count.
    pub fn new(
        total_amount: Decimal,
        due_date: NaiveDate,
        installment_count: u32,
    ) -> Result<Self, TaxError> {
        if total_amount < Decimal::ZERO {
            return Err(TaxError::invalid_input(
                "total_amount",
                total_amount,
                "total amount cannot be negative",
            ));
        }
        if installment_count == 0 {
            return Err(TaxError::invalid_input(
                "installments",
                installment_count,
                "installment count must be at least 1",
            ));
        }

        Ok(Self {
            total_amount,
            due_date,
            installment_count,
            installment_amounts: split_amount(total_amount, installment_count),
        })
    }

    /// Derives the schedule for an assessment, applying the category defaults:
    /// PAYE settles in one payment (three if a plan is requested), CIT is
    /// quarterly, CGT is a single payment within the 30-day window.
    pub fn for_assessment(
        assessment: &TaxAssessment,
        options: ScheduleOptions,
        calculated_on: NaiveDate,
    ) -> Result<Self, TaxError> {
        let installments = options
            .installments
            .unwrap_or_else(|| default_installments(assessment.tax_type, options.installment_plan));
        let due_date = options
            .due_date
            .unwrap_or_else(|| calculated_on + Duration::days(DEFAULT_PAYMENT_WINDOW_DAYS));

        Self::new(assessment.total_tax, due_date, installments)
    }
}

/// Default installment count per category.
pub fn default_installments(tax_type: TaxCategory, installment_plan: bool) -> u32 {
    match tax_type {
        TaxCategory::Paye if installment_plan => 3,
        TaxCategory::Paye => 1,
        TaxCategory::Cit => 4,
        TaxCategory::Cgt => 1,
    }
}

/// Splits a total into `count` whole-naira installments. The first
/// `count - 1` get the floored base; the last absorbs the residue.
fn split_amount(total: Decimal, count: u32) -> Vec<Decimal> {
    if count == 1 {
        return vec![total];
    }

    let base = (total / Decimal::from(count)).floor();
    let mut amounts = vec![base; count as usize - 1];
    amounts.push(total - base * Decimal::from(count - 1));
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cit_assessment(total_tax: Decimal) -> TaxAssessment {
        TaxAssessment {
            tax_type: TaxCategory::Cit,
            gross_amount: total_tax,
            reliefs: dec!(0),
            chargeable: total_tax,
            total_tax,
            breakdown: vec![],
            label: None,
        }
    }

    #[test]
    fn test_quarterly_cit_split() {
        // 1,525,000 over 4 -> 381,250 each, exact.
        let schedule = PaymentSchedule::for_assessment(
            &cit_assessment(dec!(1525000)),
            ScheduleOptions::default(),
            date(2026, 3, 1),
        )
        .unwrap();

        assert_eq!(schedule.installment_count, 4);
        assert_eq!(schedule.due_date, date(2026, 3, 31));
        assert_eq!(schedule.installment_amounts, vec![dec!(381250); 4]);
    }

    #[test]
    fn test_residue_goes_to_last_installment() {
        let schedule = PaymentSchedule::new(dec!(1000001), date(2026, 6, 30), 3).unwrap();

        assert_eq!(schedule.installment_amounts[0], dec!(333333));
        assert_eq!(schedule.installment_amounts[1], dec!(333333));
        assert_eq!(schedule.installment_amounts[2], dec!(333335));
        let sum: Decimal = schedule.installment_amounts.iter().sum();
        assert_eq!(sum, dec!(1000001));
    }

    #[test]
    fn test_sum_is_exact_for_fractional_totals() {
        // Development levy can produce sub-naira totals.
        let schedule = PaymentSchedule::new(dec!(100000.50), date(2026, 6, 30), 4).unwrap();
        let sum: Decimal = schedule.installment_amounts.iter().sum();
        assert_eq!(sum, dec!(100000.50));
        assert_eq!(schedule.installment_amounts[3], dec!(25000.50));
    }

    #[test]
    fn test_paye_defaults() {
        let mut assessment = cit_assessment(dec!(110000));
        assessment.tax_type = TaxCategory::Paye;

        let single = PaymentSchedule::for_assessment(
            &assessment,
            ScheduleOptions::default(),
            date(2026, 1, 15),
        )
        .unwrap();
        assert_eq!(single.installment_count, 1);
        assert_eq!(single.installment_amounts, vec![dec!(110000)]);

        let plan = PaymentSchedule::for_assessment(
            &assessment,
            ScheduleOptions {
                installment_plan: true,
                ..Default::default()
            },
            date(2026, 1, 15),
        )
        .unwrap();
        assert_eq!(plan.installment_count, 3);
    }

    #[test]
    fn test_explicit_overrides() {
        let schedule = PaymentSchedule::for_assessment(
            &cit_assessment(dec!(600000)),
            ScheduleOptions {
                due_date: Some(date(2026, 12, 31)),
                installments: Some(6),
                installment_plan: false,
            },
            date(2026, 3, 1),
        )
        .unwrap();

        assert_eq!(schedule.due_date, date(2026, 12, 31));
        assert_eq!(schedule.installment_count, 6);
        assert_eq!(schedule.installment_amounts, vec![dec!(100000); 6]);
    }

    #[test]
    fn test_zero_installments_rejected() {
        let err = PaymentSchedule::new(dec!(1000), date(2026, 6, 30), 0).unwrap_err();
        assert!(matches!(err, TaxError::InvalidInput { ref field, .. } if field == "installments"));
    }

    #[test]
    fn test_negative_total_rejected() {
        assert!(PaymentSchedule::new(dec!(-1), date(2026, 6, 30), 1).is_err());
    }

    #[test]
    fn test_zero_total_is_fine() {
        let schedule = PaymentSchedule::new(dec!(0), date(2026, 6, 30), 4).unwrap();
        assert_eq!(schedule.installment_amounts, vec![dec!(0); 4]);
    }
}
