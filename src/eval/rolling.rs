//! Rolling Prediction and Price Path Reconstruction
//!
//! Runs a fitted regressor one step ahead over a prefix of the return
//! history, then rebuilds the implied price path by compounding the
//! predicted returns from a known starting stretch of actual prices.

use ndarray::{Array1, Axis};

use crate::data::{PriceSeries, ReturnSeries};
use crate::error::{Error, Result};
use crate::model::Regressor;

/// One-step-ahead predictions over the first `length` entries of a return
/// series, feeding the model actual history at every step.
///
/// Each feature window is built from observed returns, never from earlier
/// predictions, so this is an in-sample fit diagnostic rather than an
/// autoregressive forecast. Output `k` corresponds to target index
/// `window_size + k`.
pub fn rolling_predictions<R: Regressor>(
    model: &mut R,
    returns: &ReturnSeries,
    window_size: usize,
    length: usize,
) -> Result<Vec<f64>> {
    if window_size < 1 {
        return Err(Error::invalid("window_size must be at least 1"));
    }
    if length <= window_size {
        return Err(Error::invalid("length must exceed window_size"));
    }
    if length > returns.len() {
        return Err(Error::invalid(format!(
            "length {} exceeds available returns ({})",
            length,
            returns.len()
        )));
    }

    let series = returns.as_slice();
    let mut predictions = Vec::with_capacity(length - window_size);

    for t in window_size..length {
        let window = &series[t - window_size..t];
        let features = Array1::from_vec(window.to_vec()).insert_axis(Axis(0));
        let output = model.predict(&features);
        predictions.push(output[0]);
    }

    Ok(predictions)
}

/// Rebuild an implied price path from predicted log returns.
///
/// The first `window_size` prices are copied from the actual series since no
/// prediction exists for them. Every later price compounds on the previously
/// reconstructed one, `out[i] = out[i-1] * exp(predicted[i - window_size])`,
/// so prediction error accumulates across the horizon instead of resetting
/// at each step.
pub fn reconstruct_prices(
    predicted: &[f64],
    prices: &PriceSeries,
    window_size: usize,
    length: usize,
) -> Result<PriceSeries> {
    if window_size < 1 {
        return Err(Error::invalid("window_size must be at least 1"));
    }
    if length > prices.len() {
        return Err(Error::invalid(format!(
            "length {} exceeds available prices ({})",
            length,
            prices.len()
        )));
    }
    let expected = length.checked_sub(window_size).ok_or_else(|| {
        Error::invalid(format!(
            "length {} is smaller than window_size {}",
            length, window_size
        ))
    })?;
    if predicted.len() != expected {
        return Err(Error::invalid(format!(
            "expected {} predicted returns for length {} and window_size {}, got {}",
            expected,
            length,
            window_size,
            predicted.len()
        )));
    }

    let actual = prices.as_slice();
    let mut reconstructed = actual[..window_size].to_vec();

    for i in window_size..length {
        let previous = reconstructed[i - 1];
        reconstructed.push(previous * predicted[i - window_size].exp());
    }

    PriceSeries::new(reconstructed)
}
