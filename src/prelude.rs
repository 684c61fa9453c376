//! Prelude module.
//!
//! Re-exports commonly used structs, traits, and types to allow for easier
//! usage of the library.
//!
//! # Usage
//!
//! ```rust
//! use naira_tax::prelude::*;
//! ```

// Core exports
pub use crate::config::TaxConfig;
pub use crate::traits::CalculateTax;
pub use crate::types::{LineItem, TaxAssessment, TaxCategory, TaxError};

// Calculators
pub use crate::calculators::{BusinessTaxCalculator, CapitalGainsCalculator, PayeCalculator};

// Brackets and schedules
pub use crate::brackets::{BracketTable, TaxBand};
pub use crate::schedule::{PaymentSchedule, ScheduleOptions};

// Reporting and interop
pub use crate::api::{
    CalculationRequest, CalculationResponse, PaymentScheduleRecord, ScheduleStatus, TaxBreakdown,
};
pub use crate::report::{CalculationHint, detect_calculation, format_assessment, format_naira};
