use std::fs::File;
use std::io::BufWriter;

use retsim::analysis::PercentileBand;
use retsim::config::SimulationParams;
use retsim::simulation::{SimulationResult, run_monte_carlo};
use retsim::types::Age;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut params_path: Option<String> = None;
    let mut seed_override: Option<u64> = None;
    let mut trials_override: Option<usize> = None;
    let mut output_path = "result.json".to_string();
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--params" => {
                i += 1;
                params_path = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                seed_override = Some(args[i].parse().expect("--seed requires a u64"));
            }
            "--trials" => {
                i += 1;
                trials_override =
                    Some(args[i].parse().expect("--trials requires a positive integer"));
            }
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--quiet" => quiet = true,
            _ => {}
        }
        i += 1;
    }

    let mut params = match params_path {
        Some(path) => {
            let file = File::open(&path)
                .unwrap_or_else(|e| panic!("failed to open {path}: {e}"));
            serde_json::from_reader(file)
                .unwrap_or_else(|e| panic!("failed to parse {path}: {e}"))
        }
        None => SimulationParams::canonical(),
    };
    if let Some(s) = seed_override {
        params.seed = s;
    }
    if let Some(n) = trials_override {
        params.simulation_runs = n;
    }

    let result = match run_monte_carlo(&params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid parameters: {e}");
            std::process::exit(1);
        }
    };

    let file = File::create(&output_path)
        .unwrap_or_else(|e| panic!("failed to create {output_path}: {e}"));
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &result).expect("failed to serialize result");

    if !quiet {
        print_result(&result);
        println!("\nResult written to {output_path}");
    }
}

fn print_result(result: &SimulationResult) {
    println!(
        "=== Retirement projection (N={} trials, seed {}) ===",
        result.params.simulation_runs, result.params.seed
    );
    println!("Success rate: {:.1}%", result.success_rate);

    print_band_section(
        "Assets (k\u{20ac})",
        &result.ages,
        &result.assets,
        1.0 / 1_000.0,
    );
    print_band_section(
        "Retirement spending (\u{20ac}/month)",
        &result.ages,
        &result.spending,
        1.0,
    );
}

fn print_band_section(title: &str, ages: &[Age], bands: &[PercentileBand], scale: f64) {
    println!("\n--- {title} ---");
    println!(
        "{:>4} | {:>9} | {:>9} | {:>9} | {:>9} | {:>9}",
        "Age", "p10", "p20", "p50", "p80", "p90"
    );
    for (age, b) in ages.iter().zip(bands) {
        println!(
            "{:>4} | {:>9.1} | {:>9.1} | {:>9.1} | {:>9.1} | {:>9.1}",
            age,
            b.p10 * scale,
            b.p20 * scale,
            b.p50 * scale,
            b.p80 * scale,
            b.p90 * scale,
        );
    }
}
