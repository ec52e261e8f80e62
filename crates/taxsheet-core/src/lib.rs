pub mod cell;
pub mod engine;
pub mod error;
pub mod results;
pub mod stages;
pub mod store;
pub mod types;

pub use cell::{CellId, CellValue, Column, YesNo};
pub use engine::TaxEngine;
pub use error::TaxSheetError;
pub use results::TaxResults;
pub use store::CellStore;
pub use types::*;

/// Standard result type for all taxsheet operations
pub type TaxSheetResult<T> = Result<T, TaxSheetError>;
