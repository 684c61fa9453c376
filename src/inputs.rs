use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::TaxError;

/// Trait for converting various numeric types into `Decimal` amounts.
///
/// Allows callers to pass `i64`, `f64`, `&str`, etc. directly into calculator
/// setters without wrapping them in `dec!()` or `Decimal::from()`.
pub trait IntoTaxDecimal {
    fn into_tax_decimal(self) -> Result<Decimal, TaxError>;
}

impl IntoTaxDecimal for Decimal {
    fn into_tax_decimal(self) -> Result<Decimal, TaxError> {
        Ok(self)
    }
}

macro_rules! impl_into_tax_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoTaxDecimal for $t {
                fn into_tax_decimal(self) -> Result<Decimal, TaxError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_tax_decimal_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_tax_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoTaxDecimal for $t {
                fn into_tax_decimal(self) -> Result<Decimal, TaxError> {
                    Decimal::from_f64_retain(self as f64).ok_or_else(|| {
                        TaxError::invalid_input("amount", self, "not a representable number")
                    })
                }
            }
        )*
    };
}

impl_into_tax_decimal_float!(f32, f64);

impl IntoTaxDecimal for &str {
    fn into_tax_decimal(self) -> Result<Decimal, TaxError> {
        Decimal::from_str(self)
            .map_err(|e| TaxError::invalid_input("amount", self, format!("invalid format: {e}")))
    }
}

impl IntoTaxDecimal for String {
    fn into_tax_decimal(self) -> Result<Decimal, TaxError> {
        self.as_str().into_tax_decimal()
    }
}
