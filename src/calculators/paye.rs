//! PAYE (Pay-As-You-Earn) personal income tax.
//!
//! Annual gross is monthly salary times twelve; the personal relief from the
//! active schedule is deducted before the progressive bands apply. A salary
//! low enough that relief exceeds gross simply yields zero chargeable income.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::inputs::IntoTaxDecimal;
use crate::traits::CalculateTax;
use crate::types::{TaxAssessment, TaxCategory, TaxError};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayeCalculator {
    pub monthly_salary: Decimal,
    /// Set when the caller already holds annual gross (the wire payload
    /// carries annual income); takes precedence over `monthly_salary`.
    pub annual_override: Option<Decimal>,
    pub label: Option<String>,
}

impl PayeCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monthly_salary(mut self, salary: impl IntoTaxDecimal) -> Self {
        if let Ok(s) = salary.into_tax_decimal() {
            self.monthly_salary = s;
        }
        self
    }

    pub fn annual_income(mut self, income: impl IntoTaxDecimal) -> Self {
        if let Ok(i) = income.into_tax_decimal() {
            self.annual_override = Some(i);
        }
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl CalculateTax for PayeCalculator {
    fn calculate_tax(&self, config: &TaxConfig) -> Result<TaxAssessment, TaxError> {
        let annual_gross = match self.annual_override {
            Some(annual) => {
                if annual < Decimal::ZERO {
                    return Err(TaxError::invalid_input(
                        "annual_income",
                        annual,
                        "annual income cannot be negative",
                    )
                    .with_source(self.label.clone().unwrap_or_default()));
                }
                annual
            }
            None => {
                if self.monthly_salary < Decimal::ZERO {
                    return Err(TaxError::invalid_input(
                        "monthly_salary",
                        self.monthly_salary,
                        "monthly salary cannot be negative",
                    )
                    .with_source(self.label.clone().unwrap_or_default()));
                }
                self.monthly_salary * dec!(12)
            }
        };

        let chargeable = (annual_gross - config.personal_relief).max(Decimal::ZERO);
        let (total_tax, breakdown) = config.brackets.apply(chargeable);

        Ok(TaxAssessment {
            tax_type: TaxCategory::Paye,
            gross_amount: annual_gross,
            reliefs: config.personal_relief,
            chargeable,
            total_tax,
            breakdown,
            label: self.label.clone(),
        })
    }

    fn get_label(&self) -> Option<String> {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        // Monthly 150,000 -> annual 1,800,000, relief 400,000,
        // chargeable 1,400,000 -> tax 110,000.
        let config = TaxConfig::default();
        let result = PayeCalculator::new()
            .monthly_salary(dec!(150000))
            .calculate_tax(&config)
            .unwrap();

        assert_eq!(result.tax_type, TaxCategory::Paye);
        assert_eq!(result.gross_amount, dec!(1800000));
        assert_eq!(result.reliefs, dec!(400000));
        assert_eq!(result.chargeable, dec!(1400000));
        assert_eq!(result.total_tax, dec!(110000));
    }

    #[test]
    fn test_salary_below_relief() {
        // Annual 240,000 < relief 400,000 -> chargeable clamps to zero.
        let config = TaxConfig::default();
        let result = PayeCalculator::new()
            .monthly_salary(dec!(20000))
            .calculate_tax(&config)
            .unwrap();

        assert_eq!(result.chargeable, dec!(0));
        assert_eq!(result.total_tax, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn test_annual_override_matches_monthly_path() {
        let config = TaxConfig::default();
        let monthly = PayeCalculator::new()
            .monthly_salary(dec!(150000))
            .calculate_tax(&config)
            .unwrap();
        let annual = PayeCalculator::new()
            .annual_income(dec!(1800000))
            .calculate_tax(&config)
            .unwrap();

        assert_eq!(monthly.total_tax, annual.total_tax);
        assert_eq!(monthly.chargeable, annual.chargeable);
    }

    #[test]
    fn test_negative_salary_rejected() {
        let config = TaxConfig::default();
        let err = PayeCalculator::new()
            .monthly_salary(dec!(-1))
            .calculate_tax(&config)
            .unwrap_err();
        assert!(matches!(err, TaxError::InvalidInput { ref field, .. } if field == "monthly_salary"));
    }

    #[test]
    fn test_relief_is_configurable() {
        // Same salary, larger relief, lower chargeable income.
        let config = TaxConfig::default()
            .with_personal_relief(dec!(800000))
            .unwrap();
        let result = PayeCalculator::new()
            .monthly_salary(dec!(150000))
            .calculate_tax(&config)
            .unwrap();

        assert_eq!(result.chargeable, dec!(1000000));
        // 300,000 * 5% + 400,000 * 10% = 55,000
        assert_eq!(result.total_tax, dec!(55000));
    }

    #[test]
    fn test_idempotent() {
        let config = TaxConfig::default();
        let calc = PayeCalculator::new().monthly_salary(dec!(275000)).label("Main job");
        let first = calc.calculate_tax(&config).unwrap();
        let second = calc.calculate_tax(&config).unwrap();
        assert_eq!(first, second);
    }
}
