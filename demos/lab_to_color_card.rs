#!/usr/bin/env cargo
//! Look up the closest color-card entry for a Lab value
//! Usage: cargo run --example lab_to_color_card -- <L> <a> <b> [--ciede2000]

use palette::Lab;
use pigment_mix::{color_card_catalog, DistanceMetric, NearestMatchIndex};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let perceptual = args.iter().any(|a| a == "--ciede2000");
    let values: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    if values.len() != 3 {
        eprintln!("Usage: {} <L> <a> <b> [--ciede2000]", args[0]);
        eprintln!("Example: {} 45.0 -5.2 -15.8", args[0]);
        std::process::exit(1);
    }

    let parse = |s: &str, name: &str| -> f32 {
        match s.parse() {
            Ok(v) => v,
            Err(_) => {
                eprintln!("Invalid {} value: {}", name, s);
                std::process::exit(1);
            }
        }
    };
    let lab = Lab::new(
        parse(values[0], "L"),
        parse(values[1], "a"),
        parse(values[2], "b"),
    );

    let metric = if perceptual {
        DistanceMetric::DeltaE2000
    } else {
        DistanceMetric::EuclideanRgb
    };

    match NearestMatchIndex::with_metric(color_card_catalog(), metric).nearest_lab(lab) {
        Some(found) => {
            println!("{} {}", found.entry.code, found.entry.name);
            eprintln!("  {} (distance {:.2})", found.entry.hex, found.distance);
        }
        None => println!("N/A"),
    }
}
