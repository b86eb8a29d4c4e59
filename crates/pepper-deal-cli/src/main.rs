mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::brands::BrandsArgs;
use commands::deal::{DelayBonusArgs, DepositDateArgs, ProfitArgs};

/// Gift card resale and Pepper coin profitability calculations
#[derive(Parser)]
#[command(
    name = "pepper",
    version,
    about = "Gift card resale and Pepper coin profitability calculations",
    long_about = "A CLI for working out whether a discounted gift card deal pays off \
                  once resold, with decimal precision. Covers Pepper coin value, \
                  payment-delay bonuses, expected deposit dates and ROI under \
                  several coin-redemption assumptions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full profitability report for a deal
    Profit(ProfitArgs),
    /// Expected date resale proceeds land
    DepositDate(DepositDateArgs),
    /// Payment-delay bonus lookup
    DelayBonus(DelayBonusArgs),
    /// Historical brand defaults from the daily-deals archive
    Brands(BrandsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Profit(args) => commands::deal::run_profit(args),
        Commands::DepositDate(args) => commands::deal::run_deposit_date(args),
        Commands::DelayBonus(args) => commands::deal::run_delay_bonus(args),
        Commands::Brands(args) => commands::brands::run_brands(args),
        Commands::Version => {
            println!("pepper {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
