use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::brackets::BracketTable;
use crate::inputs::IntoTaxDecimal;
use crate::types::TaxError;

/// Rates and thresholds for one tax year.
///
/// Defaults to the 2026 schedule. The relief and flat rates live here rather
/// than inside the calculators so a future-year schedule is a config change,
/// not a code change. Initialized once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Fixed personal relief deducted from annual gross before PAYE brackets.
    pub personal_relief: Decimal,
    /// Corporate Income Tax rate on business profit.
    pub cit_rate: Decimal,
    /// Development Levy rate applied alongside CIT.
    pub development_levy_rate: Decimal,
    /// Capital Gains Tax rate on realized gains.
    pub cgt_rate: Decimal,
    /// Progressive PAYE bands.
    pub brackets: BracketTable,
}

impl Default for TaxConfig {
    fn default() -> Self {
        TaxConfig {
            personal_relief: dec!(400000),
            cit_rate: dec!(0.30),
            development_levy_rate: dec!(0.005),
            cgt_rate: dec!(0.10),
            brackets: BracketTable::nigeria_2026(),
        }
    }
}

impl std::str::FromStr for TaxConfig {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: TaxConfig = serde_json::from_str(s)
            .map_err(|e| TaxError::configuration(format!("failed to parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

impl TaxConfig {
    /// Validates rates and the bracket coverage invariant.
    ///
    /// Must be called on any config that did not come through a validating
    /// constructor (e.g. a hand-assembled struct literal) before serving
    /// calculations.
    pub fn validate(&self) -> Result<(), TaxError> {
        if self.personal_relief < Decimal::ZERO {
            return Err(TaxError::configuration(
                "personal relief must be non-negative",
            ));
        }
        for (name, rate) in [
            ("cit_rate", self.cit_rate),
            ("development_levy_rate", self.development_levy_rate),
            ("cgt_rate", self.cgt_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(TaxError::configuration(format!(
                    "{name} {rate} is outside [0, 1]"
                )));
            }
        }
        self.brackets.validate()
    }

    /// Loads and validates a schedule from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, TaxError> {
        let content = fs::read_to_string(path)
            .map_err(|e| TaxError::configuration(format!("failed to read config file: {e}")))?;
        content.parse()
    }

    // Fluent helpers for overriding single values of the default schedule.

    pub fn with_personal_relief(mut self, relief: impl IntoTaxDecimal) -> Result<Self, TaxError> {
        self.personal_relief = relief.into_tax_decimal()?;
        self.validate()?;
        Ok(self)
    }

    pub fn with_cit_rate(mut self, rate: impl IntoTaxDecimal) -> Result<Self, TaxError> {
        self.cit_rate = rate.into_tax_decimal()?;
        self.validate()?;
        Ok(self)
    }

    pub fn with_development_levy_rate(
        mut self,
        rate: impl IntoTaxDecimal,
    ) -> Result<Self, TaxError> {
        self.development_levy_rate = rate.into_tax_decimal()?;
        self.validate()?;
        Ok(self)
    }

    pub fn with_cgt_rate(mut self, rate: impl IntoTaxDecimal) -> Result<Self, TaxError> {
        self.cgt_rate = rate.into_tax_decimal()?;
        self.validate()?;
        Ok(self)
    }

    pub fn with_brackets(mut self, brackets: BracketTable) -> Result<Self, TaxError> {
        self.brackets = brackets;
        self.validate()?;
        Ok(self)
    }
}
