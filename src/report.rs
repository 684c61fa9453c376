//! Rendering assessments for chat transcripts, and the reverse: best-effort
//! recovery of a calculation from free text written by an external agent.
//!
//! The parser is heuristic by design. It is the fallback path for replies the
//! engine did not compute itself and its output is never authoritative; the
//! primary path is always a local calculator.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use separator::Separatable;
use std::fmt::Write;
use std::str::FromStr;

use crate::schedule::{DEFAULT_PAYMENT_WINDOW_DAYS, PaymentSchedule};
use crate::types::{TaxAssessment, TaxCategory, TaxError};

/// Formats an amount as whole naira with thousands separators, e.g.
/// `₦1,525,000`. Midpoint rounding is away from zero.
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    match rounded.to_i64() {
        Some(whole) => format!("₦{}", whole.separated_string()),
        None => format!("₦{rounded}"),
    }
}

/// Renders an assessment with a fixed section order: tax type, gross, relief,
/// chargeable, total, then the line-item breakdown. Re-formatting the same
/// assessment always yields byte-identical output.
pub fn format_assessment(assessment: &TaxAssessment) -> String {
    let mut out = String::new();

    writeln!(&mut out, "Tax Calculation Result").unwrap();
    if let Some(label) = &assessment.label {
        writeln!(&mut out, "Asset: {label}").unwrap();
    }
    writeln!(&mut out, "Tax Type: {}", assessment.tax_type).unwrap();
    writeln!(&mut out, "Gross Amount: {}", format_naira(assessment.gross_amount)).unwrap();
    writeln!(
        &mut out,
        "Relief / Deductions: {}",
        format_naira(assessment.reliefs)
    )
    .unwrap();
    writeln!(
        &mut out,
        "Chargeable Amount: {}",
        format_naira(assessment.chargeable)
    )
    .unwrap();
    writeln!(&mut out, "Total Tax: {}", format_naira(assessment.total_tax)).unwrap();

    writeln!(&mut out, "Breakdown:").unwrap();
    if assessment.breakdown.is_empty() {
        writeln!(&mut out, "  (no tax due)").unwrap();
    }
    for line in &assessment.breakdown {
        writeln!(&mut out, "  - {}: {}", line.label, format_naira(line.amount)).unwrap();
    }

    out
}

const CALCULATION_KEYWORDS: &[&str] = &[
    "tax",
    "calculate",
    "amount",
    "₦",
    "naira",
    "income",
    "paye",
    "cit",
    "cgt",
];

// The total is preferred over the first amount in the text: agent replies
// routinely list gross and relief before the liability itself.
static TOTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)total[^₦\n]*₦([\d,]+)").unwrap());
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"₦([\d,]+)").unwrap());
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(PAYE|CIT|CGT|Business|Crypto)\b").unwrap());
static DUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)due[^\n]*?(\d{4}-\d{2}-\d{2})").unwrap());
static INSTALLMENTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*installments?").unwrap());

/// Structured data recovered from an agent's free-text reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationHint {
    /// Uppercased category keyword found in the text, or `"TAX"` if none.
    pub tax_label: String,
    pub total_amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub installments: u32,
}

impl CalculationHint {
    /// Maps the recovered label onto a known category where possible.
    pub fn category(&self) -> Option<TaxCategory> {
        self.tax_label.parse().ok()
    }

    /// Hands the recovered figures to the same schedule generator a locally
    /// computed assessment goes through.
    pub fn to_schedule(&self, calculated_on: NaiveDate) -> Result<PaymentSchedule, TaxError> {
        let due_date = self
            .due_date
            .unwrap_or_else(|| calculated_on + Duration::days(DEFAULT_PAYMENT_WINDOW_DAYS));
        PaymentSchedule::new(self.total_amount, due_date, self.installments)
    }
}

/// Attempts to recover a calculation from free text.
///
/// Returns `None` when the text does not look like a calculation at all; that
/// is an expected outcome, not an error.
pub fn detect_calculation(text: &str) -> Option<CalculationHint> {
    let lowered = text.to_lowercase();
    if !CALCULATION_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return None;
    }

    let amount_capture = TOTAL_RE
        .captures(text)
        .or_else(|| AMOUNT_RE.captures(text))?;
    let total_amount = parse_amount(&amount_capture[1])?;

    let tax_label = TYPE_RE
        .captures(text)
        .map(|c| c[1].to_uppercase())
        .unwrap_or_else(|| "TAX".to_string());

    let due_date = DUE_RE
        .captures(text)
        .and_then(|c| NaiveDate::parse_from_str(&c[1], "%Y-%m-%d").ok());

    let installments = INSTALLMENTS_RE
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(3);

    tracing::debug!(%total_amount, %tax_label, "recovered calculation from free text");

    Some(CalculationHint {
        tax_label,
        total_amount,
        due_date,
        installments,
    })
}

fn parse_amount(digits: &str) -> Option<Decimal> {
    Decimal::from_str(&digits.replace(',', "")).ok()
}
