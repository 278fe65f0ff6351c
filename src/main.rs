use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cashflow::cli::{handle_report_command, ReportArgs};
use cashflow::config::{ReportPaths, Settings};

#[derive(Parser)]
#[command(
    name = "cashflow",
    version,
    about = "Generate cashflow reports from transaction lists",
    long_about = "Classifies transactions into inflows and outflows, totals them \
                  and renders a Markdown, CSV or JSON cashflow report."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a cashflow report
    Report(ReportArgs),

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(args)) => {
            handle_report_command(&settings, args)?;
        }
        Some(Commands::Config) => {
            println!("Cashflow Report Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Negative style:    {:?}", settings.negative_style);
            println!("  Input date format: {}", settings.input_date_format);
            match settings.row_limit {
                Some(limit) => println!("  Row limit:         {}", limit),
                None => println!("  Row limit:         none"),
            }
            println!("  Category rules:");
            for (category, direction) in &settings.category_directions {
                println!("    {} -> {}", category, direction);
            }
        }
        None => {
            println!("cashflow - cashflow report generator");
            println!();
            println!("Run 'cashflow --help' for usage information.");
            println!("Run 'cashflow report <FILE>' to generate a report.");
        }
    }

    Ok(())
}
