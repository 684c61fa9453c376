use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::format_naira;

/// The tax categories recognized by the 2026 Nigerian schedule.
///
/// Wire strings are the uppercase short codes (`"PAYE"`, `"CIT"`, `"CGT"`).
/// Chat agents frequently say `"Business"` or `"Crypto"` instead, so those
/// parse as aliases of CIT and CGT respectively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum TaxCategory {
    /// Pay-As-You-Earn: progressive personal income tax on employment earnings.
    Paye,
    /// Corporate Income Tax plus Development Levy on business profit.
    #[strum(to_string = "CIT", serialize = "BUSINESS")]
    Cit,
    /// Capital Gains Tax on realized investment/asset gains.
    #[strum(to_string = "CGT", serialize = "CRYPTO")]
    Cgt,
}

/// A single labelled line of a tax breakdown (one bracket, or one levy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// The outcome of a single tax calculation.
///
/// Produced once per calculation call and never mutated afterwards. The
/// breakdown lists the per-bracket or per-levy contributions in the order
/// they were applied; their amounts always sum to `total_tax`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAssessment {
    /// The category this assessment was computed under.
    pub tax_type: TaxCategory,
    /// Gross income, revenue, or sale proceeds the calculation started from.
    pub gross_amount: Decimal,
    /// Relief, expenses, or acquisition costs deducted before taxing.
    pub reliefs: Decimal,
    /// The taxable base after deductions (never negative).
    pub chargeable: Decimal,
    /// Total liability across all breakdown lines.
    pub total_tax: Decimal,
    /// Ordered per-bracket / per-levy contributions.
    pub breakdown: Vec<LineItem>,
    /// Optional caller-supplied label (e.g. "Main job", "BTC disposal").
    pub label: Option<String>,
}

impl TaxAssessment {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.is_empty() {
            self.label = Some(label);
        }
        self
    }

    /// One-line summary suitable for chat transcripts and logs.
    pub fn summary(&self) -> String {
        format!(
            "{}: Total Tax {} (Chargeable {})",
            self.tax_type,
            format_naira(self.total_tax),
            format_naira(self.chargeable)
        )
    }
}

impl std::fmt::Display for TaxAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Errors surfaced by the engine.
///
/// Validation failures carry the offending field and constraint so callers
/// can render an actionable message without re-deriving it. Configuration
/// errors are raised at startup and must prevent serving any calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum TaxError {
    #[error("invalid input for `{field}`: {reason} (got {value})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
        source_label: Option<String>,
    },
    #[error("missing required field `{field}`")]
    MissingField {
        field: String,
        source_label: Option<String>,
    },
    #[error("configuration error: {reason}")]
    ConfigurationError {
        reason: String,
        source_label: Option<String>,
    },
}

impl TaxError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        TaxError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
            source_label: None,
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        TaxError::MissingField {
            field: field.into(),
            source_label: None,
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        TaxError::ConfigurationError {
            reason: reason.into(),
            source_label: None,
        }
    }

    /// Attaches the label of the asset/calculator that produced the error.
    pub fn with_source(mut self, label: impl Into<String>) -> Self {
        let label = Some(label.into());
        match &mut self {
            TaxError::InvalidInput { source_label, .. }
            | TaxError::MissingField { source_label, .. }
            | TaxError::ConfigurationError { source_label, .. } => *source_label = label,
        }
        self
    }
}
