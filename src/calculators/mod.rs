pub mod business;
pub mod capital_gains;
pub mod paye;

pub use business::BusinessTaxCalculator;
pub use capital_gains::CapitalGainsCalculator;
pub use paye::PayeCalculator;
