//! Wire shapes for the external tax-calculation service.
//!
//! The engine speaks the same JSON contract the remote `/tax/calculate`
//! endpoint uses, so a calculation can be served locally or delegated and the
//! caller cannot tell the difference. Field names are camelCase on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculators::{BusinessTaxCalculator, CapitalGainsCalculator, PayeCalculator};
use crate::config::TaxConfig;
use crate::report::format_naira;
use crate::schedule::PaymentSchedule;
use crate::traits::CalculateTax;
use crate::types::{LineItem, TaxAssessment, TaxCategory, TaxError};

/// Request body of `POST /tax/calculate`.
///
/// Note the PAYE convention: `income` carries ANNUAL gross on the wire, even
/// though the form-facing calculator takes a monthly salary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_gains: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_income: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_profit: Option<Decimal>,
    pub tax_type: String,
}

impl CalculationRequest {
    /// Builds the PAYE request from an assessment-ready monthly salary.
    pub fn paye(monthly_salary: Decimal) -> Self {
        Self {
            income: Some(monthly_salary * Decimal::from(12)),
            tax_type: TaxCategory::Paye.to_string(),
            ..Default::default()
        }
    }

    pub fn business(revenue: Decimal, expenses: Decimal) -> Self {
        Self {
            income: Some(revenue),
            expenses: Some(expenses),
            business_profit: Some(revenue - expenses),
            tax_type: TaxCategory::Cit.to_string(),
            ..Default::default()
        }
    }

    pub fn capital_gains(gain: Decimal) -> Self {
        Self {
            capital_gains: Some(gain),
            taxable_income: Some(gain),
            tax_type: TaxCategory::Cgt.to_string(),
            ..Default::default()
        }
    }
}

/// Per-levy amounts in the response. Absent levies are skipped on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgt: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_levy: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_assets_tax: Option<Decimal>,
}

/// Response body of `POST /tax/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub total_tax: Decimal,
    #[serde(default)]
    pub breakdown: TaxBreakdown,
    pub summary: String,
}

/// Serves a wire request with the local calculators.
///
/// Dispatch is strict: the fields required by the requested category must be
/// present, and an unknown category is a validation error, not a guess.
pub fn calculate(
    request: &CalculationRequest,
    config: &TaxConfig,
) -> Result<CalculationResponse, TaxError> {
    let category: TaxCategory = request.tax_type.parse().map_err(|_| {
        TaxError::invalid_input(
            "taxType",
            &request.tax_type,
            "expected one of PAYE, CIT, CGT",
        )
    })?;

    let assessment = match category {
        TaxCategory::Paye => {
            let income = request.income.ok_or_else(|| TaxError::missing_field("income"))?;
            PayeCalculator::new().annual_income(income).calculate_tax(config)?
        }
        TaxCategory::Cit => match (request.income, request.business_profit) {
            (Some(revenue), _) => BusinessTaxCalculator::new()
                .revenue(revenue)
                .expenses(request.expenses.unwrap_or(Decimal::ZERO))
                .calculate_tax(config)?,
            (None, Some(profit)) => BusinessTaxCalculator::new()
                .revenue(profit)
                .calculate_tax(config)?,
            (None, None) => return Err(TaxError::missing_field("businessProfit")),
        },
        TaxCategory::Cgt => {
            let gain = request
                .capital_gains
                .or(request.taxable_income)
                .ok_or_else(|| TaxError::missing_field("capitalGains"))?;
            CapitalGainsCalculator::new().proceeds(gain).calculate_tax(config)?
        }
    };

    Ok(response_from_assessment(&assessment))
}

/// Converts a locally computed assessment into the wire response shape.
pub fn response_from_assessment(assessment: &TaxAssessment) -> CalculationResponse {
    let mut breakdown = TaxBreakdown::default();
    match assessment.tax_type {
        TaxCategory::Cit => {
            breakdown.cit = line_amount(assessment, "CIT");
            breakdown.development_levy = line_amount(assessment, "Development Levy");
        }
        TaxCategory::Cgt => {
            breakdown.cgt = line_amount(assessment, "CGT");
        }
        // PAYE brackets have no per-levy slots on the wire; the liability
        // travels in totalTax and the summary.
        TaxCategory::Paye => {}
    }

    CalculationResponse {
        total_tax: assessment.total_tax,
        breakdown,
        summary: assessment.summary(),
    }
}

fn line_amount(assessment: &TaxAssessment, label: &str) -> Option<Decimal> {
    assessment
        .breakdown
        .iter()
        .find(|line| line.label == label)
        .map(|line| line.amount)
}

/// Reconstructs an assessment from a server-side computation.
///
/// The wire response does not carry gross/relief/chargeable, so those come
/// back as zero; the total and the per-levy breakdown are preserved.
pub fn assessment_from_response(
    response: &CalculationResponse,
    tax_type: TaxCategory,
) -> TaxAssessment {
    let mut breakdown = Vec::new();
    for (label, amount) in [
        ("CIT", response.breakdown.cit),
        ("CGT", response.breakdown.cgt),
        ("VAT", response.breakdown.vat),
        ("Development Levy", response.breakdown.development_levy),
        ("Digital Assets Tax", response.breakdown.digital_assets_tax),
    ] {
        if let Some(amount) = amount {
            breakdown.push(LineItem::new(label, amount));
        }
    }

    TaxAssessment {
        tax_type,
        gross_amount: Decimal::ZERO,
        reliefs: Decimal::ZERO,
        chargeable: Decimal::ZERO,
        total_tax: response.total_tax,
        breakdown,
        label: None,
    }
}

/// Persisted/displayed status of a scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Pending,
    Verified,
    Failed,
}

/// The audit-trail record shape consumed by the payment-reminder display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleRecord {
    pub id: Uuid,
    pub tax_type: String,
    /// Currency-prefixed display string, e.g. `"₦1,525,000"`.
    pub total_amount: String,
    /// ISO date string, e.g. `"2026-03-31"`.
    pub due_date: String,
    pub status: ScheduleStatus,
    pub installments: u32,
}

impl PaymentScheduleRecord {
    /// Freezes a schedule into a record. A re-submission produces a fresh
    /// record with a new id; records are never updated in place.
    pub fn new(schedule: &PaymentSchedule, tax_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tax_type: tax_type.into(),
            total_amount: format_naira(schedule.total_amount),
            due_date: schedule.due_date.format("%Y-%m-%d").to_string(),
            status: ScheduleStatus::Pending,
            installments: schedule.installment_count,
        }
    }
}
