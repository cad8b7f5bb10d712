use clap::{Parser, Subcommand};
use robot_info::{EnvSnapshot, RobotInfo, VariantRegistry};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "robot-info", about = "Inspect registered robot variant configs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered variants.
    List,

    /// Print the resolved config of a variant.
    Show {
        /// Variant name, e.g. "vega_1_gripper".
        variant: String,

        /// Print the serialized config as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("robot_info=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = match VariantRegistry::with_builtin_variants() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Registry error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::List => {
            for name in registry.available_variants() {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Command::Show { variant, json } => run_show(&registry, &variant, json),
    }
}

fn run_show(registry: &VariantRegistry, variant: &str, json: bool) -> ExitCode {
    let info = match RobotInfo::builder()
        .registry(registry)
        .variant(variant)
        .env(EnvSnapshot::capture())
        .build()
    {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        return match serde_json::to_string_pretty(info.config()) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Serialization error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let config = info.config();
    println!("model:    {}", config.robot_model);
    println!("abbr:     {}", config.abbr);
    println!("urdf:     {}", config.urdf_path);

    println!("components:");
    for (name, component) in config.components.iter() {
        let state = if component.enabled { "" } else { " (disabled)" };
        println!(
            "  {name:<14} {:<10} dof={}{state}",
            component.kind_name(),
            component.dof()
        );
    }

    println!("sensors:");
    for (name, sensor) in config.sensors.iter() {
        let state = if sensor.enabled { "on" } else { "off" };
        println!("  {name:<18} {:<16} {state}", sensor.kind_name());
    }

    println!("querables:");
    for (name, key) in config.querables.iter() {
        println!("  {name:<14} {key}");
    }
    ExitCode::SUCCESS
}
