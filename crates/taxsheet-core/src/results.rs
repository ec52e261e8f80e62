//! The fixed-shape results summary read from current cell state.

use serde::{Deserialize, Serialize};

use crate::cell::Column::{C, D, E};
use crate::store::CellStore;

/// The seventeen headline figures of the worksheet, serialized with the
/// wire key names the front-end expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResults {
    pub normal_tax: f64,
    pub final_tax: f64,
    pub alternate_tax: f64,
    pub minimum_tax: f64,
    pub tax_chargeable: f64,
    pub admitted_tax: f64,
    pub refundable_tax: f64,
    pub total_tax_credits: f64,
    pub net_tax_liability: f64,
    pub advance_tax_total: f64,
    pub startup_registered: bool,
    pub export_ratio: f64,
    pub taxable_income: f64,
    pub accounting_profit: f64,
    pub domestic_sales: f64,
    pub export_sales: f64,
    pub total_revenue: f64,
}

impl TaxResults {
    pub fn from_store(store: &CellStore) -> Self {
        TaxResults {
            normal_tax: store.get(E, 129),
            final_tax: store.get(E, 130),
            alternate_tax: store.get(E, 131),
            minimum_tax: store.get(E, 132),
            tax_chargeable: store.get(E, 128),
            admitted_tax: store.get(E, 152),
            refundable_tax: store.get(E, 153),
            total_tax_credits: store.get(E, 139),
            net_tax_liability: store.get(E, 144),
            advance_tax_total: store.get(E, 146),
            startup_registered: store.startup_registered,
            export_ratio: store.get(D, 7),
            taxable_income: store.get(E, 126),
            accounting_profit: store.get(C, 66),
            domestic_sales: store.get(C, 4),
            export_sales: store.get(C, 5),
            total_revenue: store.get(C, 3),
        }
    }
}
