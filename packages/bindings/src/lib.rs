use napi::Result as NapiResult;
use napi_derive::napi;

use taxsheet_core::TaxEngine;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// A worksheet instance held by the JavaScript side. Values cross the
/// boundary as JSON strings; cell ids are the wire format (`C4`, `E128`).
#[napi]
pub struct Worksheet {
    engine: TaxEngine,
}

#[napi]
impl Worksheet {
    /// Fresh worksheet at the zero baseline.
    #[napi(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Worksheet {
            engine: TaxEngine::new(),
        }
    }

    /// Read one cell: a number, or "Yes"/"No" for the two flag cells.
    #[napi]
    pub fn get_value(&self, cell: String) -> NapiResult<String> {
        let value = self.engine.get_value(&cell).map_err(to_napi_error)?;
        serde_json::to_string(&value).map_err(to_napi_error)
    }

    /// Write one cell (value as JSON text) and recompute the worksheet.
    #[napi]
    pub fn set_value(&mut self, cell: String, value_json: String) -> NapiResult<()> {
        let raw: serde_json::Value = serde_json::from_str(&value_json).map_err(to_napi_error)?;
        self.engine.set_value(&cell, &raw).map_err(to_napi_error)
    }

    /// Re-run the full pipeline without changing any input cell.
    #[napi]
    pub fn calculate_all(&mut self) {
        self.engine.calculate_all();
    }

    /// Load the canned workbook sample.
    #[napi]
    pub fn load_test_data(&mut self) {
        self.engine.load_test_data();
    }

    /// Reset every cell to the zero/default baseline.
    #[napi]
    pub fn reset_all(&mut self) {
        self.engine.reset_all();
    }

    /// The 17-figure summary as a JSON object string.
    #[napi]
    pub fn tax_results(&self) -> NapiResult<String> {
        serde_json::to_string(&self.engine.tax_results()).map_err(to_napi_error)
    }

    /// Every cell across rows 1-160, keyed by wire identifier.
    #[napi]
    pub fn all_cells(&self) -> NapiResult<String> {
        serde_json::to_string(&self.engine.all_cells()).map_err(to_napi_error)
    }
}
