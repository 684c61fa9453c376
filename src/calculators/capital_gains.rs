//! Capital Gains Tax on realized gains from property, securities, and crypto
//! assets. The gain is proceeds less cost basis and transaction costs
//! (broker fees, gas fees, transfer taxes), clamped at zero for losses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::inputs::IntoTaxDecimal;
use crate::traits::CalculateTax;
use crate::types::{LineItem, TaxAssessment, TaxCategory, TaxError};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalGainsCalculator {
    pub proceeds: Decimal,
    pub cost_basis: Decimal,
    pub transaction_costs: Decimal,
    pub label: Option<String>,
}

impl CapitalGainsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the calculator from a token disposal: `quantity` units bought
    /// at `buy_price` and sold at `sell_price`, with `fees` paid on the way.
    pub fn from_trade(
        quantity: impl IntoTaxDecimal,
        buy_price: impl IntoTaxDecimal,
        sell_price: impl IntoTaxDecimal,
        fees: impl IntoTaxDecimal,
    ) -> Result<Self, TaxError> {
        let quantity = quantity.into_tax_decimal()?;
        if quantity <= Decimal::ZERO {
            return Err(TaxError::invalid_input(
                "quantity",
                quantity,
                "quantity must be greater than 0",
            ));
        }
        Ok(Self {
            proceeds: sell_price.into_tax_decimal()? * quantity,
            cost_basis: buy_price.into_tax_decimal()? * quantity,
            transaction_costs: fees.into_tax_decimal()?,
            label: None,
        })
    }

    pub fn proceeds(mut self, proceeds: impl IntoTaxDecimal) -> Self {
        if let Ok(p) = proceeds.into_tax_decimal() {
            self.proceeds = p;
        }
        self
    }

    pub fn cost_basis(mut self, cost_basis: impl IntoTaxDecimal) -> Self {
        if let Ok(c) = cost_basis.into_tax_decimal() {
            self.cost_basis = c;
        }
        self
    }

    pub fn transaction_costs(mut self, costs: impl IntoTaxDecimal) -> Self {
        if let Ok(c) = costs.into_tax_decimal() {
            self.transaction_costs = c;
        }
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl CalculateTax for CapitalGainsCalculator {
    fn calculate_tax(&self, config: &TaxConfig) -> Result<TaxAssessment, TaxError> {
        for (field, value) in [
            ("proceeds", self.proceeds),
            ("cost_basis", self.cost_basis),
            ("transaction_costs", self.transaction_costs),
        ] {
            if value < Decimal::ZERO {
                return Err(TaxError::invalid_input(
                    field,
                    value,
                    format!("{field} cannot be negative"),
                )
                .with_source(self.label.clone().unwrap_or_default()));
            }
        }

        let deductions = self.cost_basis + self.transaction_costs;
        let gain = (self.proceeds - deductions).max(Decimal::ZERO);
        let total_tax = gain * config.cgt_rate;

        Ok(TaxAssessment {
            tax_type: TaxCategory::Cgt,
            gross_amount: self.proceeds,
            reliefs: deductions,
            chargeable: gain,
            total_tax,
            breakdown: vec![LineItem::new("CGT", total_tax)],
            label: self.label.clone(),
        })
    }

    fn get_label(&self) -> Option<String> {
        self.label.clone()
    }
}
