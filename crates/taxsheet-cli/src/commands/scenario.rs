use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use taxsheet_core::{with_metadata, TaxEngine};

use crate::input;

/// Scenario handling shared by the worksheet subcommands: cell writes come
/// from a file, piped stdin, and/or inline `--set` pairs, each applied
/// through the normal mutation path (full recompute per write).
#[derive(Args, Serialize)]
pub struct ScenarioArgs {
    /// Path to a JSON or YAML file mapping cell ids to values
    #[arg(long)]
    pub input: Option<String>,

    /// Inline cell write, e.g. --set C4=6000000 (repeatable, applied in order)
    #[arg(long = "set", value_name = "CELL=VALUE")]
    pub set: Vec<String>,

    /// Start from the canned workbook sample instead of the zero baseline
    #[arg(long)]
    pub demo: bool,
}

pub fn build_engine(args: &ScenarioArgs) -> Result<TaxEngine, Box<dyn std::error::Error>> {
    let mut engine = TaxEngine::new();
    if args.demo {
        engine.load_test_data();
    }

    if let Some(ref path) = args.input {
        apply_map(&mut engine, &input::file::read_cell_map(path)?)?;
    } else if let Some(map) = input::stdin::read_stdin()? {
        apply_map(&mut engine, &map)?;
    }

    for pair in &args.set {
        let (cell, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("--set expects CELL=VALUE, got '{pair}'"))?;
        engine.set_value(cell, &Value::String(raw.to_string()))?;
    }

    Ok(engine)
}

fn apply_map(
    engine: &mut TaxEngine,
    map: &serde_json::Map<String, Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    for (cell, value) in map {
        engine.set_value(cell, value)?;
    }
    Ok(())
}

pub fn run_results(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let engine = build_engine(&args)?;
    let results = engine.tax_results();
    let elapsed = start.elapsed().as_micros() as u64;

    let envelope = with_metadata(
        "Corporate-tax worksheet (fixed-order full recompute)",
        &args,
        vec![],
        elapsed,
        results,
    );
    Ok(serde_json::to_value(envelope)?)
}

pub fn run_demo() -> Result<Value, Box<dyn std::error::Error>> {
    run_results(ScenarioArgs {
        input: None,
        set: vec![],
        demo: true,
    })
}
