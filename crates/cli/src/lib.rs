pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "bonbon",
    about = "Bonbon point-of-sale CLI",
    long_about = "Browse the demo catalog, run a scripted sales session, and manage the persisted shop settings.",
    after_help = "Examples:\n  bonbon catalog --category truffles\n  bonbon demo\n  bonbon settings show"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Tracing filter, e.g. `debug` or `bonbon_core=debug`; overrides BONBON_LOG"
    )]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the catalog, optionally narrowed by category and search text")]
    Catalog {
        #[arg(long, default_value = "all", help = "Category id, or `all`")]
        category: String,
        #[arg(long, default_value = "", help = "Case-insensitive name/description search")]
        search: String,
    },
    #[command(about = "Run a scripted end-to-end sale and print the receipt and analytics")]
    Demo,
    #[command(subcommand, about = "Inspect or initialize the persisted shop settings")]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    #[command(about = "Print the effective settings after store fallback")]
    Show {
        #[arg(long, help = "Settings store directory (default: BONBON_DATA_DIR or ./.bonbon)")]
        data_dir: Option<PathBuf>,
    },
    #[command(about = "Write the default settings blob")]
    Init {
        #[arg(long, help = "Settings store directory (default: BONBON_DATA_DIR or ./.bonbon)")]
        data_dir: Option<PathBuf>,
        #[arg(long, help = "Overwrite an existing blob")]
        force: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = match cli.command {
        Command::Catalog { category, search } => commands::catalog::run(&category, &search),
        Command::Demo => commands::demo::run(),
        Command::Settings(SettingsCommand::Show { data_dir }) => {
            commands::settings::show(&commands::settings::resolve_data_dir(data_dir))
        }
        Command::Settings(SettingsCommand::Init { data_dir, force }) => {
            commands::settings::init(&commands::settings::resolve_data_dir(data_dir), force)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env("BONBON_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).compact().try_init();
}
