pub mod api;
pub mod brackets;
pub mod calculators;
pub mod config;
pub mod inputs;
pub mod prelude;
pub mod projection;
pub mod report;
pub mod schedule;
pub mod traits;
pub mod types;

pub use config::TaxConfig;
pub use schedule::{PaymentSchedule, ScheduleOptions};
pub use traits::CalculateTax;
pub use types::{TaxAssessment, TaxCategory, TaxError};
