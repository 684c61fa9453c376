//! Business tax: Corporate Income Tax plus the Development Levy, both flat
//! rates over profit. An expenses figure above revenue is tolerated (the
//! estimator clamps profit to zero and warns) rather than rejected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::inputs::IntoTaxDecimal;
use crate::traits::CalculateTax;
use crate::types::{LineItem, TaxAssessment, TaxCategory, TaxError};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessTaxCalculator {
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub label: Option<String>,
}

impl BusinessTaxCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revenue(mut self, revenue: impl IntoTaxDecimal) -> Self {
        if let Ok(r) = revenue.into_tax_decimal() {
            self.revenue = r;
        }
        self
    }

    pub fn expenses(mut self, expenses: impl IntoTaxDecimal) -> Self {
        if let Ok(e) = expenses.into_tax_decimal() {
            self.expenses = e;
        }
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl CalculateTax for BusinessTaxCalculator {
    fn calculate_tax(&self, config: &TaxConfig) -> Result<TaxAssessment, TaxError> {
        if self.revenue < Decimal::ZERO {
            return Err(TaxError::invalid_input(
                "revenue",
                self.revenue,
                "revenue cannot be negative",
            )
            .with_source(self.label.clone().unwrap_or_default()));
        }
        if self.expenses < Decimal::ZERO {
            return Err(TaxError::invalid_input(
                "expenses",
                self.expenses,
                "expenses cannot be negative",
            )
            .with_source(self.label.clone().unwrap_or_default()));
        }

        if self.expenses > self.revenue {
            tracing::warn!(
                revenue = %self.revenue,
                expenses = %self.expenses,
                "expenses exceed revenue; clamping profit to zero"
            );
        }
        let profit = (self.revenue - self.expenses).max(Decimal::ZERO);

        let cit = profit * config.cit_rate;
        let levy = profit * config.development_levy_rate;

        Ok(TaxAssessment {
            tax_type: TaxCategory::Cit,
            gross_amount: self.revenue,
            reliefs: self.expenses,
            chargeable: profit,
            total_tax: cit + levy,
            breakdown: vec![
                LineItem::new("CIT", cit),
                LineItem::new("Development Levy", levy),
            ],
            label: self.label.clone(),
        })
    }

    fn get_label(&self) -> Option<String> {
        self.label.clone()
    }
}
