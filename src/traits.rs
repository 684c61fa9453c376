use crate::config::TaxConfig;
use crate::types::{TaxAssessment, TaxError};

/// Trait implemented by all tax calculators.
///
/// Calculations are pure: the same input and config always produce the same
/// assessment, and nothing is mutated in the process.
pub trait CalculateTax {
    /// Computes the liability under the given schedule.
    fn calculate_tax(&self, config: &TaxConfig) -> Result<TaxAssessment, TaxError>;

    /// Returns the label of this calculation, if any.
    fn get_label(&self) -> Option<String> {
        None
    }
}
