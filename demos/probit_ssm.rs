use std::path::PathBuf;

use clap::Parser;
use gmrs_ep::ssm::{infer, simulate, ProbitSsmConfig};

/// Simulates a random walk observed through a probit link and
/// recovers it by expectation propagation
#[derive(Debug, Parser)]
struct Args {
    /// YAML file with model and inference parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the number of time steps
    #[arg(short, long)]
    steps: Option<usize>,

    /// Overrides the number of expectation propagation iterations
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Prints the posterior as YAML instead of a table
    #[arg(long)]
    yaml: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn init_logger(min_level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(min_level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.log_level)?;
    // parameters --------------------------------------------------------------------------
    let mut config = match &args.config {
        Some(path) => ProbitSsmConfig::from_file(path)?,
        None => ProbitSsmConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    config.validate()?;
    // -------------------------------------------------------------------------------------
    let data = simulate(&config)?;
    let posterior = infer(&data.observations, &config)?;
    if args.yaml {
        print!("{}", posterior.to_yaml()?);
        return Ok(());
    }
    println!(
        "{:>5} {:>10} {:>3} {:>10} {:>10} {:>10} {:>10}",
        "t", "latent", "y", "mean", "variance", "lower", "upper"
    );
    for (t, mean, variance) in posterior.rows() {
        let (lower, upper) = posterior.credible_interval(t, 2f64).unwrap_or((mean, mean));
        println!(
            "{:>5} {:>10.4} {:>3} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            t,
            data.latent[t],
            u8::from(data.observations[t]),
            mean,
            variance,
            lower,
            upper,
        );
    }
    Ok(())
}
