//! Daily Stock Bar Structures
//!
//! End-of-day bar representation and CSV ingestion

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Single end-of-day bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl DailyBar {
    /// Create new daily bar
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if the close finished above the open
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Daily range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if the close is usable for return computation
    pub fn has_valid_close(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// Time series of daily bars for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSeries {
    pub symbol: String,
    pub bars: Vec<DailyBar>,
}

impl StockSeries {
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    pub fn with_bars(symbol: String, bars: Vec<DailyBar>) -> Self {
        Self { symbol, bars }
    }

    /// Get number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get closing prices as vector
    pub fn close_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Sort by date ascending
    pub fn sort_by_date(&mut self) {
        self.bars.sort_by_key(|b| b.date);
    }

    /// Save to CSV
    pub fn save_csv(&self, path: &str) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(["date", "open", "high", "low", "close", "volume"])?;

        for bar in &self.bars {
            writer.write_record(&[
                bar.date.to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Load from CSV with a `date,open,high,low,close,volume` header row.
    ///
    /// Dates must parse as ISO `YYYY-MM-DD`. A numeric field that fails to
    /// parse (empty cell, "null", ...) is loaded as NaN so the cleaning
    /// stage can drop the row instead of the whole load failing.
    pub fn load_csv(path: &str, symbol: String) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut bars = Vec::new();

        for (row, result) in reader.records().enumerate() {
            let record = result?;

            if record.len() < 6 {
                return Err(Error::Parse(format!(
                    "row {}: expected 6 fields, got {}",
                    row + 1,
                    record.len()
                )));
            }

            let date: NaiveDate = record[0]
                .parse()
                .map_err(|_| Error::Parse(format!("row {}: bad date '{}'", row + 1, &record[0])))?;

            let open = record[1].parse().unwrap_or(f64::NAN);
            let high = record[2].parse().unwrap_or(f64::NAN);
            let low = record[3].parse().unwrap_or(f64::NAN);
            let close = record[4].parse().unwrap_or(f64::NAN);
            let volume = record[5].parse().unwrap_or(f64::NAN);

            bars.push(DailyBar::new(date, open, high, low, close, volume));
        }

        info!("loaded {} bars from {}", bars.len(), path);

        Ok(Self::with_bars(symbol, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bar_helpers() {
        let bar = DailyBar::new(date(2020, 3, 2), 100.0, 110.0, 95.0, 105.0, 1000.0);
        assert!(bar.is_bullish());
        assert!((bar.range() - 15.0).abs() < 1e-12);
        assert!(bar.has_valid_close());

        let bad = DailyBar::new(date(2020, 3, 3), 100.0, 110.0, 95.0, f64::NAN, 1000.0);
        assert!(!bad.has_valid_close());
    }

    #[test]
    fn test_sort_by_date() {
        let mut series = StockSeries::with_bars(
            "ACME".to_string(),
            vec![
                DailyBar::new(date(2020, 1, 3), 1.0, 1.0, 1.0, 3.0, 0.0),
                DailyBar::new(date(2020, 1, 1), 1.0, 1.0, 1.0, 1.0, 0.0),
                DailyBar::new(date(2020, 1, 2), 1.0, 1.0, 1.0, 2.0, 0.0),
            ],
        );

        series.sort_by_date();

        let dates: Vec<NaiveDate> = series.bars.iter().map(|b| b.date).collect();
        assert_eq!(
            dates,
            vec![date(2020, 1, 1), date(2020, 1, 2), date(2020, 1, 3)]
        );
        assert_eq!(series.close_prices(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_csv_round_trip() {
        let series = StockSeries::with_bars(
            "ACME".to_string(),
            vec![
                DailyBar::new(date(2020, 1, 1), 100.0, 101.0, 99.0, 100.5, 1_000_000.0),
                DailyBar::new(date(2020, 1, 2), 100.5, 102.0, 100.0, 101.5, 1_200_000.0),
            ],
        );

        let path = std::env::temp_dir().join("rust_nn_stocks_daily_test.csv");
        let path = path.to_str().unwrap();

        series.save_csv(path).unwrap();
        let loaded = StockSeries::load_csv(path, "ACME".to_string()).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.bars[0].date, date(2020, 1, 1));
        assert!((loaded.bars[1].close - 101.5).abs() < 1e-12);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_rejects_malformed_date() {
        let path = std::env::temp_dir().join("rust_nn_stocks_bad_date_test.csv");
        let path = path.to_str().unwrap();

        std::fs::write(
            path,
            "date,open,high,low,close,volume\n\
             2020-01-01,1.0,1.0,1.0,100.0,10.0\n\
             not-a-date,1.0,1.0,1.0,101.0,10.0\n",
        )
        .unwrap();

        let err = StockSeries::load_csv(path, "ACME".to_string()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_malformed_close_loads_as_nan_and_cleans_away() {
        let path = std::env::temp_dir().join("rust_nn_stocks_nan_close_test.csv");
        let path = path.to_str().unwrap();

        std::fs::write(
            path,
            "date,open,high,low,close,volume\n\
             2020-01-01,1.0,1.0,1.0,100.0,10.0\n\
             2020-01-02,1.0,1.0,1.0,null,10.0\n\
             2020-01-03,1.0,1.0,1.0,102.0,10.0\n",
        )
        .unwrap();

        let loaded = StockSeries::load_csv(path, "ACME".to_string()).unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(loaded.bars[1].close.is_nan());

        // Cleaning drops the NaN bar instead of the load failing
        let (prices, returns) = crate::data::clean(&loaded).unwrap();
        assert_eq!(prices.as_slice(), &[102.0]);
        assert_eq!(returns.len(), 1);

        std::fs::remove_file(path).ok();
    }
}
