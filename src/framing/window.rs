//! Windowed Supervised Framing
//!
//! Turns a cleaned return series into fixed-window (features, label) pairs
//! and splits them chronologically. Both operations are pure and
//! deterministic: returns are time-ordered, so example order is preserved
//! everywhere and the split is positional, never randomized.

use ndarray::{Array1, Array2};

use crate::data::ReturnSeries;
use crate::error::{Error, Result};

/// One supervised example: a fixed-length window of past returns and the
/// return immediately following it.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Feature window, oldest return first
    pub window: Vec<f64>,
    /// The return at the index right after the window
    pub label: f64,
}

/// Frame a return series into supervised examples.
///
/// For every index `t` in `[window_size, len)` this emits one example with
/// feature window `returns[t-window_size..t]` (oldest first) and label
/// `returns[t]`, in ascending `t` order. A series shorter than
/// `window_size + 1` frames to an empty collection.
pub fn frame(returns: &ReturnSeries, window_size: usize) -> Result<Vec<Example>> {
    if window_size < 1 {
        return Err(Error::invalid("window_size must be at least 1"));
    }

    let values = returns.as_slice();
    let count = values.len().saturating_sub(window_size);
    let mut examples = Vec::with_capacity(count);

    for t in window_size..values.len() {
        examples.push(Example {
            window: values[t - window_size..t].to_vec(),
            label: values[t],
        });
    }

    Ok(examples)
}

/// Split examples into a leading train segment and a trailing test segment
/// of exactly `test_size` examples, preserving order on both sides.
///
/// A random split would leak future returns into training, so the cut is
/// always positional.
pub fn chronological_split(
    mut examples: Vec<Example>,
    test_size: usize,
) -> Result<(Vec<Example>, Vec<Example>)> {
    if test_size > examples.len() {
        return Err(Error::invalid(format!(
            "test_size {} exceeds number of examples {}",
            test_size,
            examples.len()
        )));
    }

    let test = examples.split_off(examples.len() - test_size);
    Ok((examples, test))
}

/// Convert examples into the matrix/vector pair a `Regressor` consumes:
/// one row per example, one column per window position.
pub fn to_arrays(examples: &[Example]) -> Result<(Array2<f64>, Array1<f64>)> {
    let first = examples.first().ok_or_else(|| {
        Error::InsufficientData("cannot build matrices from zero examples".to_string())
    })?;
    let width = first.window.len();

    let mut features = Array2::zeros((examples.len(), width));
    let mut labels = Array1::zeros(examples.len());

    for (row, example) in examples.iter().enumerate() {
        if example.window.len() != width {
            return Err(Error::invalid(format!(
                "ragged window at example {}: expected length {}, got {}",
                row,
                width,
                example.window.len()
            )));
        }

        for (col, &value) in example.window.iter().enumerate() {
            features[[row, col]] = value;
        }
        labels[row] = example.label;
    }

    Ok((features, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn returns(values: &[f64]) -> ReturnSeries {
        ReturnSeries::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_frame_concrete_scenario() {
        let series = returns(&[0.01, -0.02, 0.03, 0.00, 0.01, 0.02, -0.01]);
        let examples = frame(&series, 5).unwrap();

        assert_eq!(examples.len(), 2);

        assert_eq!(examples[0].window, vec![0.01, -0.02, 0.03, 0.00, 0.01]);
        assert_eq!(examples[0].label, 0.02);

        assert_eq!(examples[1].window, vec![-0.02, 0.03, 0.00, 0.01, 0.02]);
        assert_eq!(examples[1].label, -0.01);
    }

    #[test]
    fn test_frame_count_and_alignment() {
        let values: Vec<f64> = (0..20).map(|i| i as f64 * 0.001).collect();
        let series = returns(&values);
        let w = 4;

        let examples = frame(&series, w).unwrap();
        assert_eq!(examples.len(), values.len() - w);

        for (k, example) in examples.iter().enumerate() {
            assert_eq!(example.window, values[k..k + w].to_vec());
            assert_eq!(example.label, values[w + k]);
        }
    }

    #[test]
    fn test_frame_short_series_is_empty() {
        let series = returns(&[0.01, 0.02, 0.03]);
        assert!(frame(&series, 3).unwrap().is_empty());
        assert!(frame(&series, 10).unwrap().is_empty());
        assert_eq!(frame(&series, 2).unwrap().len(), 1);
    }

    #[test]
    fn test_frame_rejects_zero_window() {
        let series = returns(&[0.01, 0.02]);
        assert!(frame(&series, 0).is_err());
    }

    #[test]
    fn test_split_lengths_and_order() {
        let series = returns(&[0.01, -0.02, 0.03, 0.00, 0.01, 0.02, -0.01, 0.04]);
        let examples = frame(&series, 2).unwrap();
        let all = examples.clone();

        let (train, test) = chronological_split(examples, 2).unwrap();
        assert_eq!(train.len(), all.len() - 2);
        assert_eq!(test.len(), 2);

        // Concatenation reproduces the original order exactly.
        let rejoined: Vec<Example> = train.iter().chain(test.iter()).cloned().collect();
        assert_eq!(rejoined, all);
    }

    #[test]
    fn test_split_edges() {
        let series = returns(&[0.01, -0.02, 0.03, 0.00, 0.01]);
        let examples = frame(&series, 2).unwrap();
        let n = examples.len();

        let (train, test) = chronological_split(examples.clone(), 0).unwrap();
        assert_eq!(train.len(), n);
        assert!(test.is_empty());

        let (train, test) = chronological_split(examples.clone(), n).unwrap();
        assert!(train.is_empty());
        assert_eq!(test.len(), n);

        assert!(chronological_split(examples, n + 1).is_err());
    }

    #[test]
    fn test_to_arrays() {
        let series = returns(&[0.01, -0.02, 0.03, 0.00, 0.01, 0.02]);
        let examples = frame(&series, 3).unwrap();

        let (features, labels) = to_arrays(&examples).unwrap();
        assert_eq!(features.dim(), (3, 3));
        assert_eq!(labels.len(), 3);

        assert_eq!(features[[0, 0]], 0.01);
        assert_eq!(features[[0, 2]], 0.03);
        assert_eq!(labels[0], 0.00);
        assert_eq!(labels[2], 0.02);

        assert!(to_arrays(&[]).is_err());
    }
}
