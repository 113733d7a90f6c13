//! Train a regression network on daily stock closes
//!
//! Usage: cargo run --bin train -- --data prices.csv --window 5 --epochs 100

use anyhow::Result;
use ndarray::Axis;
use rust_nn_stocks::{
    data::{clean, StockSeries},
    eval::{mean_squared_error, RegressionMetrics},
    framing::{chronological_split, frame, to_arrays},
    model::{MeanRegressor, Regressor},
    nn::{ActivationType, Adam, NetworkConfig, NeuralNetwork},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut data_path = "stock_prices.csv".to_string();
    let mut symbol = "AAPL".to_string();
    let mut model_path = "model.json".to_string();
    let mut window_size = 5usize;
    let mut test_size = 100usize;
    let mut epochs = 100usize;
    let mut batch_size = 32usize;
    let mut learning_rate = 0.001f64;
    let hidden_layers = vec![64, 32];

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
            "--window" | "-w" => {
                window_size = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(window_size);
                i += 2;
            }
            "--test" | "-t" => {
                test_size = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(test_size);
                i += 2;
            }
            "--epochs" | "-e" => {
                epochs = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(epochs);
                i += 2;
            }
            "--batch" | "-b" => {
                batch_size = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(batch_size);
                i += 2;
            }
            "--lr" => {
                learning_rate = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(learning_rate);
                i += 2;
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                i += 1;
            }
        }
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("          Neural Network Training on Daily Stock Returns");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    // Load data
    println!("Loading data from {}...", data_path);
    let series = StockSeries::load_csv(&data_path, symbol.clone())?;
    println!("Loaded {} daily bars for {}", series.len(), symbol);

    // Clean into aligned price and log return series
    let (_prices, returns) = clean(&series)?;
    println!("Cleaned to {} log returns", returns.len());

    // Frame into supervised examples and split chronologically
    println!("\nFraming with window size {}...", window_size);
    let examples = frame(&returns, window_size)?;
    println!("Generated {} examples", examples.len());

    let (train_examples, test_examples) = chronological_split(examples, test_size)?;
    println!("\nDataset split:");
    println!("  Training samples: {}", train_examples.len());
    println!("  Test samples: {}", test_examples.len());

    let (x_train, y_train) = to_arrays(&train_examples)?;
    let (x_test, y_test) = to_arrays(&test_examples)?;

    let y_train_2d = y_train.clone().insert_axis(Axis(1));
    let y_test_2d = y_test.clone().insert_axis(Axis(1));

    // Create model
    println!("\nCreating neural network...");
    let mut config = NetworkConfig::new(window_size);
    for &size in &hidden_layers {
        config = config.add_layer_with_dropout(size, ActivationType::ReLU, 0.2);
    }
    config = config.output_layer(1, ActivationType::Linear);

    let mut model = NeuralNetwork::from_config(config);
    model.set_optimizer(Box::new(Adam::new(learning_rate)));

    model.summary();

    // Train
    println!("\nTraining for {} epochs with batch size {}...", epochs, batch_size);
    println!("─────────────────────────────────────────────────────────────────");

    let losses = model.train(&x_train, &y_train_2d, epochs, batch_size, true);

    println!("─────────────────────────────────────────────────────────────────");

    // Evaluate
    println!("\nEvaluating on held-out examples...");
    let train_loss = model.evaluate(&x_train, &y_train_2d);
    let test_loss = model.evaluate(&x_test, &y_test_2d);

    println!("  Training Loss (MSE): {:.6e}", train_loss);
    println!("  Test Loss (MSE): {:.6e}", test_loss);

    let predictions = model.predict(&x_test);
    let metrics = RegressionMetrics::calculate(&predictions.to_vec(), &y_test.to_vec())?;
    println!();
    metrics.print_report("Held-Out Test Metrics (next-day log returns)");

    // Compare against a model that always predicts the mean training return
    let mut baseline = MeanRegressor::new();
    baseline.fit(&x_train, &y_train);
    let baseline_predictions = baseline.predict(&x_test);
    let baseline_mse = mean_squared_error(&baseline_predictions.to_vec(), &y_test.to_vec())?;

    println!();
    println!("Baseline comparison:");
    println!("  Mean-baseline MSE: {:.6e}", baseline_mse);
    println!("  Network MSE:       {:.6e}", metrics.mse);
    if metrics.mse < baseline_mse {
        println!("  Network beats the mean baseline");
    } else {
        println!("  Network does not beat the mean baseline");
    }

    // Save model
    println!("\nSaving model to {}...", model_path);
    model.save(&model_path)?;
    println!("Model saved successfully!");

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("                      Training Complete!");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Initial Loss: {:.6e}", losses.first().unwrap_or(&0.0));
    println!("  Final Loss: {:.6e}", losses.last().unwrap_or(&0.0));
    println!();

    Ok(())
}

fn print_help() {
    println!("Train a regression network on daily stock closes");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin train -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -d, --data <PATH>         Input CSV data file (date,open,high,low,close,volume)");
    println!("    -s, --symbol <SYMBOL>     Ticker symbol label (default: AAPL)");
    println!("    -m, --model <PATH>        Output model file (default: model.json)");
    println!("    -w, --window <N>          Feature window size in days (default: 5)");
    println!("    -t, --test <N>            Held-out test examples at the end (default: 100)");
    println!("    -e, --epochs <N>          Number of training epochs (default: 100)");
    println!("    -b, --batch <SIZE>        Batch size (default: 32)");
    println!("        --lr <RATE>           Learning rate (default: 0.001)");
    println!("        --help                Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin train -- --data prices.csv --epochs 200");
    println!("    cargo run --bin train -- -d aapl.csv -m aapl_model.json -w 10 -t 250");
}
