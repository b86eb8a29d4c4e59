use clap::Args;
use serde_json::Value;

use crate::input;

/// Arguments for the brand defaults listing
#[derive(Args)]
pub struct BrandsArgs {
    /// Daily-deals archive CSV
    #[arg(long)]
    pub file: String,

    /// Show a single brand
    #[arg(long)]
    pub brand: Option<String>,
}

pub fn run_brands(args: BrandsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = input::brands::read_brand_table(&args.file)?;
    match args.brand {
        Some(ref brand) => {
            let defaults = table
                .defaults(brand)
                .ok_or_else(|| format!("Brand '{}' not found in {}", brand, args.file))?;
            Ok(serde_json::to_value(defaults)?)
        }
        None => {
            let all: Vec<_> = table.all().collect();
            Ok(serde_json::to_value(all)?)
        }
    }
}
