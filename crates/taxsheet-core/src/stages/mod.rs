//! The fixed-order recalculation pipeline.
//!
//! Every mutation re-runs the whole pipeline over the full store. The order
//! is the statutory formula order of the worksheet, not an inferred
//! dependency graph; reproducing it exactly is what keeps the figures
//! matching the workbook.

mod allocation;
mod revenue;
mod settlement;
mod tax_base;

use crate::store::CellStore;

/// One full deterministic pass over the store, re-deriving every computed
/// cell from its inputs.
pub fn recalculate(store: &mut CellStore) {
    revenue::run(store);
    allocation::run(store);
    tax_base::run(store);
    settlement::run(store);
}
