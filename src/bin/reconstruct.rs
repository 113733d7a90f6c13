//! Reconstruct a price path from rolling model predictions
//!
//! Usage: cargo run --bin reconstruct -- --data prices.csv --model model.json

use anyhow::Result;
use rust_nn_stocks::{
    data::{clean, StockSeries},
    eval::{mean_squared_error, reconstruct_prices, rolling_predictions, RegressionMetrics},
    nn::NeuralNetwork,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut data_path = "stock_prices.csv".to_string();
    let mut symbol = "AAPL".to_string();
    let mut model_path = "model.json".to_string();
    let mut length = 100usize;
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                data_path = args.get(i + 1).cloned().unwrap_or(data_path);
                i += 2;
            }
            "--symbol" | "-s" => {
                symbol = args.get(i + 1).cloned().unwrap_or(symbol);
                i += 2;
            }
            "--model" | "-m" => {
                model_path = args.get(i + 1).cloned().unwrap_or(model_path);
                i += 2;
            }
            "--length" | "-l" => {
                length = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(length);
                i += 2;
            }
            "--output" | "-o" => {
                output_path = args.get(i + 1).cloned();
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                i += 1;
            }
        }
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("              Rolling Price Path Reconstruction");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    // Load model; the feature window size is fixed by its input layer
    println!("Loading model from {}...", model_path);
    let mut model = NeuralNetwork::load(&model_path)?;
    let window_size = model.input_size();
    model.summary();

    // Load data
    println!("\nLoading data from {}...", data_path);
    let series = StockSeries::load_csv(&data_path, symbol.clone())?;
    println!("Loaded {} daily bars for {}", series.len(), symbol);

    let (prices, returns) = clean(&series)?;
    println!("Cleaned to {} aligned prices and returns", prices.len());

    // Rolling one-step predictions over the first `length` returns. Every
    // window holds actual history, so this measures fit, not forecasting.
    println!(
        "\nPredicting returns {}..{} with window size {}...",
        window_size, length, window_size
    );
    let predicted = rolling_predictions(&mut model, &returns, window_size, length)?;

    let actual_returns = &returns.as_slice()[window_size..length];
    let metrics = RegressionMetrics::calculate(&predicted, actual_returns)?;
    println!();
    metrics.print_report("Rolling In-Sample Return Metrics");

    // Chain predicted returns into an implied price path
    println!("\nReconstructing price path...");
    let reconstructed = reconstruct_prices(&predicted, &prices, window_size, length)?;

    let actual_prices = &prices.as_slice()[..length];
    let rebuilt = reconstructed.as_slice();

    let price_mse = mean_squared_error(rebuilt, actual_prices)?;
    let final_actual = actual_prices[length - 1];
    let final_rebuilt = rebuilt[length - 1];
    let drift = (final_rebuilt / final_actual - 1.0) * 100.0;

    println!();
    println!("Price path comparison over {} days:", length);
    println!("  Copied prefix: first {} prices", window_size);
    println!("  Price MSE: {:.6}", price_mse);
    println!("  Final actual price: {:.4}", final_actual);
    println!("  Final reconstructed price: {:.4}", final_rebuilt);
    println!("  Final drift: {:.2}%", drift);

    // Save paths for plotting
    let output_path = output_path
        .unwrap_or_else(|| format!("{}_reconstructed.csv", data_path.replace(".csv", "")));
    save_price_paths(actual_prices, rebuilt, &output_path)?;
    println!();
    println!("Price paths saved to: {}", output_path);

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                  Reconstruction Complete!");
    println!("═══════════════════════════════════════════════════════════════");

    Ok(())
}

fn save_price_paths(actual: &[f64], reconstructed: &[f64], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["index", "actual", "reconstructed"])?;

    for (i, (a, r)) in actual.iter().zip(reconstructed.iter()).enumerate() {
        writer.write_record(&[i.to_string(), a.to_string(), r.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

fn print_help() {
    println!("Reconstruct a price path from rolling model predictions");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin reconstruct -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -d, --data <PATH>         Input CSV data file (date,open,high,low,close,volume)");
    println!("    -s, --symbol <SYMBOL>     Ticker symbol label (default: AAPL)");
    println!("    -m, --model <PATH>        Trained model file (default: model.json)");
    println!("    -l, --length <N>          Days to predict and reconstruct (default: 100)");
    println!("    -o, --output <PATH>       Output CSV for the two price paths");
    println!("    -h, --help                Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin reconstruct -- --data prices.csv --model model.json");
    println!("    cargo run --bin reconstruct -- -d aapl.csv -m aapl_model.json -l 250");
}
