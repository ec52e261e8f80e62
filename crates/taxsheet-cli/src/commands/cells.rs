use clap::Args;
use serde_json::Value;

use crate::commands::scenario::{self, ScenarioArgs};

/// Arguments for reading a single cell
#[derive(Args)]
pub struct CellArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Cell identifier, e.g. E128
    #[arg(long)]
    pub cell: String,
}

pub fn run_cell(args: CellArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = scenario::build_engine(&args.scenario)?;
    let value = engine.get_value(&args.cell)?;

    let mut map = serde_json::Map::new();
    map.insert(
        args.cell.trim().to_ascii_uppercase(),
        serde_json::to_value(value)?,
    );
    Ok(Value::Object(map))
}

pub fn run_cells(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = scenario::build_engine(&args)?;
    Ok(serde_json::to_value(engine.all_cells())?)
}
