use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use entrykit::config::{load_config, load_config_from_path};
use entrykit::scenario::{load_scenario, run_scenario};

#[derive(Parser, Debug)]
#[command(name = "entrykit")]
#[command(about = "Replay an overlay entry scenario and print its lifecycle")]
#[command(version)]
struct Cli {
    /// Scenario file with `[[step]]` tables
    scenario: PathBuf,

    /// Config file (defaults to ~/.config/entrykit/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loaded = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };
    if let Some(warning) = &loaded.warning {
        eprintln!("warning: {}", warning);
    }

    let scenario = load_scenario(&cli.scenario)
        .wrap_err_with(|| format!("Failed to load scenario {}", cli.scenario.display()))?;
    let lines = run_scenario(&scenario, &loaded.config).wrap_err("Scenario replay failed")?;

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}
