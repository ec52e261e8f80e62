use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde_json::Value;

use crate::cell::{CellId, Column, MAX_ROW};

/// The sparse numeric cell map plus the two enumerated flag fields.
///
/// The flags (`D6` export registration, `C142` startup regime) live outside
/// the numeric map as plain booleans; the wire layer translates Yes/No.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStore {
    cells: HashMap<CellId, f64>,
    pub pseb_registered: bool,
    pub startup_registered: bool,
}

impl Default for CellStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CellStore {
    pub fn new() -> Self {
        let mut store = CellStore {
            cells: HashMap::new(),
            pseb_registered: true,
            startup_registered: false,
        };
        store.reset();
        store
    }

    /// Zero every cell across rows 1..=160 for all three columns, then
    /// reapply the fixed defaults: `C7 = 1`, PSEB registered, not a startup.
    pub fn reset(&mut self) {
        self.cells.clear();
        for row in 1..=MAX_ROW {
            for column in Column::ALL {
                self.cells.insert(CellId::new(column, row), 0.0);
            }
        }
        // Statutory constant: the non-export ratio base.
        self.cells.insert(CellId::new(Column::C, 7), 1.0);
        self.pseb_registered = true;
        self.startup_registered = false;
    }

    /// Numeric read; cells that were never written read as zero.
    pub fn get(&self, column: Column, row: u16) -> f64 {
        self.cells
            .get(&CellId::new(column, row))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, column: Column, row: u16, value: f64) {
        self.cells.insert(CellId::new(column, row), value);
    }

    /// Sum one column over an inclusive row range.
    pub fn sum_range(&self, column: Column, rows: RangeInclusive<u16>) -> f64 {
        rows.map(|row| self.get(column, row)).sum()
    }
}

/// Coerce raw text into a worksheet amount. Blank or unparseable input
/// reads as zero; the worksheet treats garbage cells as no-ops rather than
/// surfacing validation errors.
pub fn coerce_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// Coerce an arbitrary JSON value into a worksheet amount. Numbers pass
/// through, numeric strings are parsed, everything else reads as zero.
pub fn coerce_json_amount(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => coerce_amount(s),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn reset_restores_the_zero_baseline() {
        let mut store = CellStore::new();
        store.set(Column::C, 4, 6_000_000.0);
        store.pseb_registered = false;
        store.startup_registered = true;

        store.reset();

        assert_eq!(store.get(Column::C, 4), 0.0);
        assert_eq!(store.get(Column::C, 7), 1.0);
        assert_eq!(store.get(Column::E, 160), 0.0);
        assert!(store.pseb_registered);
        assert!(!store.startup_registered);
    }

    #[test]
    fn unknown_cells_read_as_zero() {
        let mut store = CellStore::new();
        store.cells.clear();
        assert_eq!(store.get(Column::D, 42), 0.0);
    }

    #[test]
    fn sum_range_covers_the_inclusive_bounds() {
        let mut store = CellStore::new();
        for row in 9..=11 {
            store.set(Column::C, row, 1_000_000.0);
        }
        store.set(Column::C, 12, 999.0);
        assert_eq!(store.sum_range(Column::C, 9..=11), 3_000_000.0);
    }

    #[test]
    fn coercion_is_lenient() {
        assert_eq!(coerce_amount("1500000"), 1_500_000.0);
        assert_eq!(coerce_amount("  -42.5 "), -42.5);
        assert_eq!(coerce_amount("2.5e6"), 2_500_000.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("   "), 0.0);
        assert_eq!(coerce_amount("garbage"), 0.0);
        assert_eq!(coerce_amount("12abc"), 0.0);
    }

    #[test]
    fn json_coercion_covers_every_shape() {
        assert_eq!(coerce_json_amount(&json!(1500000)), 1_500_000.0);
        assert_eq!(coerce_json_amount(&json!(-0.25)), -0.25);
        assert_eq!(coerce_json_amount(&json!("1500000")), 1_500_000.0);
        assert_eq!(coerce_json_amount(&json!("")), 0.0);
        assert_eq!(coerce_json_amount(&json!(null)), 0.0);
        assert_eq!(coerce_json_amount(&json!(true)), 0.0);
        assert_eq!(coerce_json_amount(&json!([1, 2])), 0.0);
    }
}
