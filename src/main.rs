//! CLI entry point for daq-templog.
//!
//! One-shot invocation: load settings, discover the instrument, run the
//! configured scan cycles, save the workbook, exit. "Device not found" exits
//! cleanly with a message; everything else surfaces as an error chain.

use anyhow::Result;
use clap::Parser;
use daq_templog::app::RunSummary;
use daq_templog::config::Settings;
use daq_templog::error::TemplogError;

#[derive(Parser)]
#[command(name = "daq-templog")]
#[command(about = "Thermocouple temperature logging for the Keysight DAQ970A", long_about = None)]
struct Cli {
    /// Configuration name under config/ (default: "default")
    #[arg(long)]
    config: Option<String>,

    /// Override the configured number of scan cycles
    #[arg(long)]
    cycles: Option<u32>,
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(summary) => {
            println!(
                "Run complete: {} cycles logged to {}",
                summary.cycles,
                summary.output.display()
            );
        }
        Err(e) => {
            if let Some(TemplogError::DeviceNotFound(fragment)) =
                e.downcast_ref::<TemplogError>()
            {
                println!("No DAQ970A matching '{fragment}' found.");
            } else {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<RunSummary> {
    let mut settings = Settings::new(cli.config.as_deref())?;
    if let Some(cycles) = cli.cycles {
        settings.scan.cycles = cycles;
    }

    let _ = env_logger::Builder::new()
        .parse_filters(&settings.log_level)
        .try_init();

    #[cfg(feature = "instrument_visa")]
    {
        let rm = daq_templog::adapters::VisaResourceManager::new()?;
        daq_templog::app::run(&rm, &settings)
    }

    #[cfg(not(feature = "instrument_visa"))]
    {
        let _ = settings;
        Err(TemplogError::FeatureNotEnabled("instrument_visa".to_string()).into())
    }
}
