//! Validated Price and Return Series
//!
//! Newtypes enforcing the invariants the rest of the pipeline assumes:
//! prices are finite and strictly positive, returns are finite. The `clean`
//! pipeline turns raw daily bars into an aligned pair of both.

use log::debug;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::daily::StockSeries;
use crate::error::{Error, Result};

/// Ordered sequence of strictly positive, finite prices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    /// Validate and wrap a price vector.
    ///
    /// Every entry must be finite and strictly positive (the log return of
    /// a zero or negative price is undefined).
    pub fn new(values: Vec<f64>) -> Result<Self> {
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::NonPositivePrice { index, value });
            }
        }
        Ok(Self(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Self::new(values).map_err(de::Error::custom)
    }
}

/// Ordered sequence of finite log returns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// Validate and wrap a return vector. Every entry must be finite.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::NonFiniteReturn { index });
            }
        }
        Ok(Self(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ReturnSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Self::new(values).map_err(de::Error::custom)
    }
}

/// Clean raw daily bars into an aligned price/return pair.
///
/// Bars are sorted by date ascending and bars without a usable close
/// (NaN, infinite, zero or negative) are dropped. Log returns are computed
/// over consecutive surviving closes. The first surviving close has no
/// preceding price, so it is consumed by the first return and not emitted:
/// both outputs have length `n - 1` for `n` surviving closes, and entry `i`
/// of the price series is the close that return `i` ends at, giving
/// `returns[i] == ln(prices[i] / prices[i-1])` for `i >= 1`.
pub fn clean(series: &StockSeries) -> Result<(PriceSeries, ReturnSeries)> {
    let mut dated: Vec<_> = series
        .bars
        .iter()
        .map(|b| (b.date, b.close))
        .collect();
    dated.sort_by_key(|&(date, _)| date);

    let closes: Vec<f64> = dated
        .iter()
        .filter(|(_, close)| close.is_finite() && *close > 0.0)
        .map(|&(_, close)| close)
        .collect();

    let dropped = series.bars.len() - closes.len();
    if dropped > 0 {
        debug!("clean: dropped {} of {} bars", dropped, series.bars.len());
    }

    if closes.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "need at least 2 usable closes to compute returns, got {}",
            closes.len()
        )));
    }

    let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let prices: Vec<f64> = closes[1..].to_vec();

    Ok((PriceSeries::new(prices)?, ReturnSeries::new(returns)?))
}
