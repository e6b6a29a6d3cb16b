use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use tessera_bench::cli::{self, BenchArgs, Command};
use tessera_bench::report;
use tessera_bench::runner::BenchmarkRunner;
use tessera_bench::scenes;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let BenchArgs {
        baseline: baseline_path,
        output: output_path,
        regression_threshold,
        iterations,
    } = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            eprint!("{}", cli::USAGE);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("ERROR: {e}\n\n{}", cli::USAGE);
            process::exit(2);
        }
    };

    let runner = BenchmarkRunner::new(iterations);

    let scene_configs = scenes::standard_scenes();
    let mut results = Vec::new();

    for config in &scene_configs {
        match runner.run_scene(config) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("ERROR: scene '{}' failed: {e}", config.name);
                process::exit(1);
            }
        }
    }

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    // Save output baseline
    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: unix_timestamp(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            eprintln!("ERROR: failed to save baseline {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    let Some(path) = baseline_path else {
        log::info!("Benchmark complete (no baseline given).");
        return;
    };
    let Some(baseline) = report::load_baseline(&path) else {
        log::warn!("Baseline file not found: {}", path.display());
        return;
    };
    log::info!("Comparing against baseline {} ({})", path.display(), baseline.timestamp);
    let regressions = report::compare(&results, &baseline, regression_threshold);
    print!("{}", report::format_comparison(&regressions, regression_threshold));
    if !regressions.is_empty() {
        process::exit(1);
    }

    log::info!("Benchmark complete.");
}

/// Seconds since the Unix epoch, without pulling in a date crate.
fn unix_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("unix-{secs}")
}
