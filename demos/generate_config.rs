//! Generate a default solver configuration file
//!
//! Creates a JSON config with all default parameters

use pigment_mix::MixConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} settings/mix.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = MixConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Saturation thresholds: gray < {:.2}, low < {:.2}, medium < {:.2}",
                config.thresholds.grayscale, config.thresholds.low, config.thresholds.medium
            );
            eprintln!(
                "  Gradient descent: {} iterations, rate {} (decay {} after {})",
                config.gradient.max_iterations,
                config.gradient.learning_rate,
                config.gradient.decay,
                config.gradient.decay_after
            );
            eprintln!(
                "  Hill climbing: {} iterations, step {} (x{} every {})",
                config.hill_climb.max_iterations,
                config.hill_climb.initial_step,
                config.hill_climb.step_decay,
                config.hill_climb.decay_interval
            );
            eprintln!(
                "  Recipe: bright > {:.0}%, dark <= {:.0}%, black floor {:.0}%",
                config.recipe.high_brightness,
                config.recipe.low_brightness,
                config.recipe.min_black_low
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
