//! Progressive tax bands for PAYE.
//!
//! The 2026 schedule is data, not prose: an ordered table of half-open
//! `[lower, upper)` bands covering `[0, ∞)` with no gaps or overlaps. An
//! amount sitting exactly on a boundary is taxed at the lower band's rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::report::format_naira;
use crate::types::{LineItem, TaxError};

/// One progressive band. `upper == None` marks the final, unbounded band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBand {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    pub fn new(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> Self {
        Self { lower, upper, rate }
    }

    /// Breakdown label, e.g. `"₦300,000 - ₦600,000 (5%)"`.
    pub fn label(&self) -> String {
        let percent = (self.rate * dec!(100)).normalize();
        match self.upper {
            Some(upper) => format!(
                "{} - {} ({}%)",
                format_naira(self.lower),
                format_naira(upper),
                percent
            ),
            None => format!("Above {} ({}%)", format_naira(self.lower), percent),
        }
    }
}

/// Ordered, validated table of progressive bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTable {
    bands: Vec<TaxBand>,
}

impl BracketTable {
    /// Builds a table, enforcing the coverage invariant: bands ascend from 0,
    /// are contiguous, and exactly the last band is unbounded.
    pub fn new(bands: Vec<TaxBand>) -> Result<Self, TaxError> {
        Self::validate_bands(&bands)?;
        Ok(Self { bands })
    }

    /// The 2026 PAYE schedule.
    pub fn nigeria_2026() -> Self {
        Self {
            bands: vec![
                TaxBand::new(dec!(0), Some(dec!(300000)), dec!(0)),
                TaxBand::new(dec!(300000), Some(dec!(600000)), dec!(0.05)),
                TaxBand::new(dec!(600000), Some(dec!(1100000)), dec!(0.10)),
                TaxBand::new(dec!(1100000), Some(dec!(2100000)), dec!(0.15)),
                TaxBand::new(dec!(2100000), Some(dec!(3500000)), dec!(0.19)),
                TaxBand::new(dec!(3500000), None, dec!(0.21)),
            ],
        }
    }

    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    /// Re-checks the coverage invariant (used after deserializing a table).
    pub fn validate(&self) -> Result<(), TaxError> {
        Self::validate_bands(&self.bands)
    }

    fn validate_bands(bands: &[TaxBand]) -> Result<(), TaxError> {
        let Some(first) = bands.first() else {
            return Err(TaxError::configuration("bracket table is empty"));
        };
        if !first.lower.is_zero() {
            return Err(TaxError::configuration(format!(
                "bracket table must start at 0, got {}",
                first.lower
            )));
        }

        for (i, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(TaxError::configuration(format!(
                    "band {i} rate {} is outside [0, 1]",
                    band.rate
                )));
            }

            let is_last = i == bands.len() - 1;
            match band.upper {
                None if !is_last => {
                    return Err(TaxError::configuration(format!(
                        "band {i} is unbounded but not the last band"
                    )));
                }
                Some(upper) if is_last => {
                    return Err(TaxError::configuration(format!(
                        "last band must be unbounded, got upper bound {upper}"
                    )));
                }
                Some(upper) => {
                    if upper <= band.lower {
                        return Err(TaxError::configuration(format!(
                            "band {i} upper bound {upper} is not above lower bound {}",
                            band.lower
                        )));
                    }
                    // Contiguity: the next band must start exactly here.
                    if bands[i + 1].lower != upper {
                        return Err(TaxError::configuration(format!(
                            "gap or overlap between band {i} (upper {upper}) and band {} (lower {})",
                            i + 1,
                            bands[i + 1].lower
                        )));
                    }
                }
                None => {}
            }
        }

        Ok(())
    }

    /// Applies the progressive bands to a chargeable amount.
    ///
    /// Each band whose lower bound lies below `chargeable` contributes
    /// `rate * (min(chargeable, upper) - lower)`; bands entirely above the
    /// amount are omitted from the breakdown. The returned line amounts sum
    /// to the total exactly.
    pub fn apply(&self, chargeable: Decimal) -> (Decimal, Vec<LineItem>) {
        let mut total = Decimal::ZERO;
        let mut lines = Vec::new();

        for band in &self.bands {
            if band.lower >= chargeable {
                break;
            }
            let top = band.upper.map_or(chargeable, |upper| upper.min(chargeable));
            let due = (top - band.lower) * band.rate;
            total += due;
            lines.push(LineItem::new(band.label(), due));
        }

        (total, lines)
    }
}

impl Default for BracketTable {
    fn default() -> Self {
        Self::nigeria_2026()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        // Chargeable 1,400,000:
        // 300,000 * 0% + 300,000 * 5% + 500,000 * 10% + 300,000 * 15% = 110,000
        let table = BracketTable::nigeria_2026();
        let (total, lines) = table.apply(dec!(1400000));

        assert_eq!(total, dec!(110000));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].amount, dec!(0));
        assert_eq!(lines[1].amount, dec!(15000));
        assert_eq!(lines[2].amount, dec!(50000));
        assert_eq!(lines[3].amount, dec!(45000));
    }

    #[test]
    fn test_zero_chargeable() {
        let (total, lines) = BracketTable::nigeria_2026().apply(dec!(0));
        assert_eq!(total, dec!(0));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_boundary_taxed_at_lower_band() {
        // Exactly 300,000 never reaches the 5% band.
        let (total, lines) = BracketTable::nigeria_2026().apply(dec!(300000));
        assert_eq!(total, dec!(0));
        assert_eq!(lines.len(), 1);

        // One naira above picks it up.
        let (total, _) = BracketTable::nigeria_2026().apply(dec!(300001));
        assert_eq!(total, dec!(0.05));
    }

    #[test]
    fn test_top_band_unbounded() {
        // 10,000,000 chargeable: full run of every band.
        // 0 + 15,000 + 50,000 + 150,000 + 266,000 + 6,500,000 * 21% = 1,846,000
        let (total, lines) = BracketTable::nigeria_2026().apply(dec!(10000000));
        assert_eq!(total, dec!(1846000));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_lines_sum_to_total() {
        let table = BracketTable::nigeria_2026();
        for amount in [0u64, 1, 299_999, 300_000, 650_000, 2_100_000, 99_999_999] {
            let (total, lines) = table.apply(Decimal::from(amount));
            let sum: Decimal = lines.iter().map(|l| l.amount).sum();
            assert_eq!(sum, total, "drift at chargeable {amount}");
        }
    }

    #[test]
    fn test_monotonic_in_chargeable() {
        let table = BracketTable::nigeria_2026();
        let mut previous = Decimal::ZERO;
        for amount in (0..5_000_000u64).step_by(50_000) {
            let (total, _) = table.apply(Decimal::from(amount));
            assert!(total >= previous, "total decreased at chargeable {amount}");
            previous = total;
        }
    }

    #[test]
    fn test_rejects_gap() {
        let bands = vec![
            TaxBand::new(dec!(0), Some(dec!(300000)), dec!(0)),
            TaxBand::new(dec!(400000), None, dec!(0.05)),
        ];
        assert!(BracketTable::new(bands).is_err());
    }

    #[test]
    fn test_rejects_overlap() {
        let bands = vec![
            TaxBand::new(dec!(0), Some(dec!(300000)), dec!(0)),
            TaxBand::new(dec!(200000), None, dec!(0.05)),
        ];
        assert!(BracketTable::new(bands).is_err());
    }

    #[test]
    fn test_rejects_bounded_last_band() {
        let bands = vec![TaxBand::new(dec!(0), Some(dec!(300000)), dec!(0))];
        assert!(BracketTable::new(bands).is_err());
    }

    #[test]
    fn test_rejects_nonzero_start() {
        let bands = vec![TaxBand::new(dec!(100), None, dec!(0.05))];
        assert!(BracketTable::new(bands).is_err());
    }

    #[test]
    fn test_rejects_rate_above_one() {
        let bands = vec![TaxBand::new(dec!(0), None, dec!(1.5))];
        assert!(BracketTable::new(bands).is_err());
    }
}
