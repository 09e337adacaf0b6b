//! Command-line interface for pigment_mix
//!
//! Prints a mixing recipe as JSON to stdout and a readable summary to stderr

use pigment_mix::{
    closest_color_card, closest_paints, describe_color, mix_from_base, paint_catalog,
    InverseMixSolver, MixConfig, MixError, PaletteKind, Recipe, RecipeStrategy, Rgb,
};
use std::{env, path::PathBuf, process};

struct Options {
    hex: String,
    palette: PaletteKind,
    base: Option<String>,
    volume: Option<f64>,
    config: Option<PathBuf>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut palette = PaletteKind::FivePigment;
    let mut base = None;
    let mut volume = None;
    let mut config = None;
    let mut hex_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--eight" => palette = PaletteKind::EightPigment,
            "--base" | "--volume" | "--config" if i + 1 >= args.len() => {
                eprintln!("Error: {} needs a value", args[i]);
                process::exit(1);
            }
            "--base" => {
                base = Some(args[i + 1].clone());
                i += 1;
            }
            "--volume" => {
                match args[i + 1].parse::<f64>() {
                    Ok(v) if v > 0.0 => volume = Some(v),
                    _ => {
                        eprintln!("Error: Invalid volume '{}'", args[i + 1]);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" => {
                config = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if hex_arg.is_none() {
                    hex_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple colors provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let hex = match hex_arg {
        Some(hex) => hex,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let options = Options {
        hex,
        palette,
        base,
        volume,
        config,
    };

    if let Err(error) = run(&options) {
        eprintln!("Mixing failed: {}", error);
        if error.is_recoverable() {
            eprintln!("Suggestion: {}", error.user_message());
        }
        process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), MixError> {
    let config = match &options.config {
        Some(path) => MixConfig::from_json_file(path)?,
        None => MixConfig::default(),
    };
    let target = Rgb::from_hex(&options.hex)?;

    if let Some(id) = &options.base {
        let entry = paint_catalog()
            .find_by_id(id)
            .or_else(|| paint_catalog().find_by_code(id))
            .ok_or_else(|| MixError::UnknownPigment { id: id.clone() })?;
        let mix = mix_from_base(entry, &options.hex)?;
        print_json(&mix);
        eprintln!();
        eprintln!("Mix from {} ({}):", entry.name, entry.code);
        for (id, percent) in mix.percentages() {
            eprintln!("  {:>5.1}%  {}", percent, id);
        }
        eprintln!("  Predicted: {} (distance {:.1})", mix.mixed, mix.error);
        return Ok(());
    }

    match options.palette {
        PaletteKind::FivePigment => {
            let solver = InverseMixSolver::for_standard(PaletteKind::FivePigment)?;
            let recipe = RecipeStrategy::new(solver)?.with_config(&config).build(target);
            print_json(&recipe);
            print_summary(&recipe, options.volume);
        }
        PaletteKind::EightPigment => {
            let solver = InverseMixSolver::for_standard(PaletteKind::EightPigment)?
                .with_config(&config);
            let solution = solver.solve(target);
            print_json(&solution);
            eprintln!();
            eprintln!("8-pigment solve ({}):", solution.strategy);
            for (id, percent) in solution.weights.labeled(solver.palette()) {
                if percent > 0.1 {
                    eprintln!("  {:>5.1}%  {}", percent, id);
                }
            }
        }
    }

    let report = describe_color(target);
    eprintln!();
    eprintln!(
        "  Lab Values: L*={:.1}, a*={:.1}, b*={:.1}",
        report.lab.l, report.lab.a, report.lab.b
    );
    eprintln!(
        "  CMYK: {}/{}/{}/{}",
        report.cmyk.c, report.cmyk.m, report.cmyk.y, report.cmyk.k
    );
    for found in closest_paints(&options.hex, 3)? {
        eprintln!(
            "  Similar paint: {} ({}), distance {:.1}",
            found.entry.name, found.entry.code, found.distance
        );
    }
    if let Some(card) = closest_color_card(&options.hex)? {
        eprintln!("  Color card: {} {}", card.entry.code, card.entry.name);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing result: {}", e),
    }
}

fn print_summary(recipe: &Recipe, volume: Option<f64>) {
    eprintln!();
    eprintln!("Recipe ({}):", recipe.strategy);
    if recipe.is_degraded() {
        eprintln!("  Warning: mixing model unavailable, showing a neutral gray.");
    }
    for entry in &recipe.entries {
        eprintln!("  {:>5.1}%  {}", entry.percent, entry.label);
    }
    if let Some(total) = volume {
        eprintln!();
        eprintln!("Volumes for {:.0} ml:", total);
        for (label, ml) in recipe.volumes(total) {
            eprintln!("  {:>6.1} ml  {}", ml, label);
        }
    }
    eprintln!();
    for (n, step) in recipe.instructions.iter().enumerate() {
        eprintln!("  {}. {}", n + 1, step);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <hex_color>", program_name);
    eprintln!();
    eprintln!("Suggest how to mix a color from a small pigment palette.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --eight            Solve against the 8-pigment palette");
    eprintln!("  --base <ID|CODE>   Start from a catalog paint");
    eprintln!("  --volume <ML>      Show pour volumes for a batch size");
    eprintln!("  --config <FILE>    Load solver settings from JSON");
    eprintln!("  --help, -h         Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} '#8D93AD'", program_name);
    eprintln!("  {} --eight --volume 120 8D93AD", program_name);
    eprintln!("  {} --base burnt-sienna '#A0522D'", program_name);
}
