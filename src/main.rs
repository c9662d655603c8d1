mod ledger;
mod models;
mod report;
mod run;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_path = get_data_path()?;
    let mut ledger = ledger::Ledger::open(&data_path)?;

    if args.len() > 1 {
        run::as_cli(&args, &mut ledger)
    } else {
        run::as_tui(&mut ledger)
    }
}

fn get_data_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cashlog", "CashLog")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("income_records.csv"))
}
