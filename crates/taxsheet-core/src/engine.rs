//! The worksheet engine: owned cell state plus the public operations.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::cell::Column::{C, D, E};
use crate::cell::{CellId, CellValue, YesNo, MAX_ROW, PSEB_FLAG, STARTUP_FLAG};
use crate::results::TaxResults;
use crate::stages;
use crate::store::{coerce_json_amount, CellStore};
use crate::TaxSheetResult;

/// A corporate-tax worksheet: the cell store plus the fixed-order
/// recalculation pipeline. Owned state; create one per independent
/// calculation and serialize concurrent access externally.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    store: CellStore,
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TaxEngine {
    /// Fresh engine at the zero baseline, derived cells computed.
    pub fn new() -> Self {
        let mut engine = TaxEngine {
            store: CellStore::new(),
        };
        engine.calculate_all();
        engine
    }

    /// Read a single cell. Numeric cells that were never written read as
    /// zero; the two flag cells read as Yes/No.
    pub fn get_value(&self, cell: &str) -> TaxSheetResult<CellValue> {
        let id: CellId = cell.parse()?;
        Ok(self.read(id))
    }

    /// Write a single cell and rerun the full pipeline. Malformed numeric
    /// input coerces to zero; only an invalid cell reference is an error,
    /// raised before anything is written.
    pub fn set_value(&mut self, cell: &str, raw: &Value) -> TaxSheetResult<()> {
        let id: CellId = cell.parse()?;
        self.write(id, raw);
        Ok(())
    }

    /// Typed numeric write for a known-valid cell id.
    pub fn set_amount(&mut self, cell: CellId, amount: f64) {
        self.store.set(cell.column, cell.row, amount);
        self.calculate_all();
    }

    /// Rerun the pipeline without changing any input cell. Idempotent.
    pub fn calculate_all(&mut self) {
        stages::recalculate(&mut self.store);
    }

    /// Zero baseline plus fixed defaults, recomputed.
    pub fn reset_all(&mut self) {
        self.store.reset();
        self.calculate_all();
    }

    /// Canned scenario lifted from the workbook sample. Writes go through
    /// the normal mutation path, recomputing after each one just as a
    /// sequence of caller writes would.
    pub fn load_test_data(&mut self) {
        self.store.reset();

        self.set_amount(CellId::new(C, 4), 6_000_000.0); // domestic sales
        self.set_amount(CellId::new(C, 5), 15_000_000.0); // export sales

        // Selling expenses: domestic/foreign commission, rebates.
        for row in 9..=11 {
            self.set_amount(CellId::new(C, row), 1_000_000.0);
        }
        // Direct cost of sales.
        for row in 17..=25 {
            self.set_amount(CellId::new(C, row), 1_500_000.0);
        }
        // Indirect expenses.
        for row in 29..=54 {
            self.set_amount(CellId::new(C, row), 1_500_000.0);
        }
        // Other revenues.
        for row in 57..=65 {
            self.set_amount(CellId::new(C, row), 1_500_000.0);
        }
        // Inadmissible deductions, 31 rows.
        for row in 69..=99 {
            self.set_amount(CellId::new(C, row), 1_000_000.0);
        }
        // Admissible deductions.
        for row in 102..=106 {
            self.set_amount(CellId::new(C, row), 1_500_000.0);
        }
        // Tax depreciation.
        for row in 111..=113 {
            self.set_amount(CellId::new(C, row), 1_500_000.0);
        }
        // Other incomes.
        for row in 116..=120 {
            self.set_amount(CellId::new(C, row), 0.0);
        }
        // Workers Welfare Fund allowance.
        self.set_amount(CellId::new(C, 124), 1_500_000.0);

        // Credits.
        self.set_amount(CellId::new(C, 140), 1_500_000.0); // charitable donations
        self.set_amount(CellId::new(C, 141), 0.0);
        self.store.startup_registered = false;

        // Advance tax payments.
        self.set_amount(CellId::new(E, 147), 1_000_000.0); // withholding tax
        self.set_amount(CellId::new(E, 148), 10_000_000.0); // advance tax
        self.set_amount(CellId::new(E, 149), 0.0);
        self.set_amount(CellId::new(E, 150), 0.0);

        self.store.pseb_registered = true;
        self.calculate_all();
    }

    /// The fixed 17-figure summary read from current cell state.
    pub fn tax_results(&self) -> TaxResults {
        TaxResults::from_store(&self.store)
    }

    /// Every cell across rows 1-160, keyed by wire identifier.
    pub fn all_cells(&self) -> BTreeMap<String, CellValue> {
        let mut cells = BTreeMap::new();
        for row in 1..=MAX_ROW {
            for column in [C, D, E] {
                let id = CellId::new(column, row);
                cells.insert(id.to_string(), self.read(id));
            }
        }
        cells
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    fn read(&self, id: CellId) -> CellValue {
        if id == PSEB_FLAG {
            CellValue::Flag(YesNo::from(self.store.pseb_registered))
        } else if id == STARTUP_FLAG {
            CellValue::Flag(YesNo::from(self.store.startup_registered))
        } else {
            CellValue::Amount(self.store.get(id.column, id.row))
        }
    }

    fn write(&mut self, id: CellId, raw: &Value) {
        if id == PSEB_FLAG {
            self.store.pseb_registered = is_yes(raw);
        } else if id == STARTUP_FLAG {
            self.store.startup_registered = is_yes(raw);
        } else {
            self.store.set(id.column, id.row, coerce_json_amount(raw));
        }
        self.calculate_all();
    }
}

/// Only the literal string "Yes" turns a flag on, matching the worksheet's
/// dropdown semantics.
fn is_yes(raw: &Value) -> bool {
    matches!(raw, Value::String(s) if s == "Yes")
}
