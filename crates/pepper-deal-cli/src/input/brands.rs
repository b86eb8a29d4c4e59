use pepper_deal_core::reference::{BrandRateRecord, BrandRateTable};

use super::file::resolve_path;

/// Load the daily-deals archive CSV into a brand reference table.
///
/// Only the `Brand`, `Reg Rate` and `Offer` columns are read; other columns
/// are ignored.
pub fn read_brand_table(path: &str) -> Result<BrandRateTable, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(&canonical)
        .map_err(|e| format!("Failed to open '{}': {}", canonical.display(), e))?;

    let mut records = Vec::new();
    for row in reader.deserialize::<BrandRateRecord>() {
        let record =
            row.map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
        records.push(record);
    }
    Ok(BrandRateTable::from_records(records))
}
