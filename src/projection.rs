//! Multi-year investment projection under the CGT rate.
//!
//! Mirrors the `/tax/simulate` service endpoint: the holding compounds at a
//! fixed annual return and each year's gain is taxed at the configured
//! capital-gains rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::report::format_naira;
use crate::types::TaxError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub initial_investment: Decimal,
    /// Fractional annual return, e.g. `0.12` for 12%.
    pub annual_return: Decimal,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,
    /// Holding value at the end of the year, before tax.
    pub value: Decimal,
    /// CGT due on the year's gain.
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub projections: Vec<YearProjection>,
    pub total_tax: Decimal,
    pub summary: String,
}

/// Projects year-by-year value and CGT for a holding.
pub fn project(
    request: &ProjectionRequest,
    config: &TaxConfig,
) -> Result<ProjectionResponse, TaxError> {
    if request.initial_investment < Decimal::ZERO {
        return Err(TaxError::invalid_input(
            "initialInvestment",
            request.initial_investment,
            "investment cannot be negative",
        ));
    }
    if request.annual_return < Decimal::ZERO {
        return Err(TaxError::invalid_input(
            "annualReturn",
            request.annual_return,
            "annual return cannot be negative",
        ));
    }
    if request.years == 0 {
        return Err(TaxError::invalid_input(
            "years",
            request.years,
            "projection must cover at least 1 year",
        ));
    }

    let mut value = request.initial_investment;
    let mut total_tax = Decimal::ZERO;
    let mut projections = Vec::with_capacity(request.years as usize);

    for year in 1..=request.years {
        let gain = (value * request.annual_return).round_dp(2);
        let tax = (gain * config.cgt_rate).round_dp(2);
        value += gain;
        total_tax += tax;
        projections.push(YearProjection { year, value, tax });
    }

    let summary = format!(
        "Projected {} CGT on {} invested over {} years",
        format_naira(total_tax),
        format_naira(request.initial_investment),
        request.years
    );

    Ok(ProjectionResponse {
        projections,
        total_tax,
        summary,
    })
}
