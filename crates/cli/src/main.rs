use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vhd_core::{AssessmentService, CoreConfig, RawDeviceRecord};

#[derive(Parser)]
#[command(name = "vhd")]
#[command(about = "VHD health assessment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one assessment over a JSON device record
    Assess {
        /// Path to a JSON device record; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Optional YAML scoring preset (weights and thresholds)
        #[arg(long)]
        preset: Option<PathBuf>,
        /// Pretty-print the report JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the active scoring weights and thresholds as YAML
    ShowConfig {
        /// Optional YAML scoring preset (weights and thresholds)
        #[arg(long)]
        preset: Option<PathBuf>,
    },
}

fn load_config(preset: Option<PathBuf>) -> Result<CoreConfig, Box<dyn std::error::Error>> {
    match preset {
        Some(path) => Ok(CoreConfig::from_yaml_file(&path)?),
        None => Ok(CoreConfig::default()),
    }
}

fn read_record(file: Option<PathBuf>) -> Result<RawDeviceRecord, Box<dyn std::error::Error>> {
    let contents = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&contents)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess {
            file,
            preset,
            pretty,
        }) => {
            let config = load_config(preset)?;
            let record = read_record(file)?;
            let service = AssessmentService::new(config);
            match service.assess_raw(&record) {
                Ok(assessment) => {
                    let json = if pretty {
                        serde_json::to_string_pretty(&assessment)?
                    } else {
                        serde_json::to_string(&assessment)?
                    };
                    println!("{json}");
                }
                Err(e) => {
                    eprintln!("Error running assessment: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::ShowConfig { preset }) => {
            let config = load_config(preset)?;
            println!(
                "weights:\n  blood_pressure_stability: {}\n  blood_oxygen_perfusion: {}\n  temperature_pulse_synergy: {}",
                config.weights().blood_pressure_stability,
                config.weights().blood_oxygen_perfusion,
                config.weights().temperature_pulse_synergy
            );
            println!(
                "thresholds:\n  oxygen: severe below {}%, mild below {}%\n  pulse: bradycardia below {} bpm, tachycardia above {} bpm",
                config.thresholds().oxygen.severe_below,
                config.thresholds().oxygen.mild_below,
                config.thresholds().pulse.bradycardia_below,
                config.thresholds().pulse.tachycardia_above
            );
        }
        None => {
            println!("Use 'vhd --help' for commands");
        }
    }

    Ok(())
}
