//! Alternative tax bases and the chargeable maximum (rows 128-137).

use crate::cell::Column::{C, D, E};
use crate::store::CellStore;

/// Normal corporate income tax rate.
pub const NORMAL_RATE: f64 = 0.29;
/// Final/fixed tax rate on exempt export proceeds.
pub const FINAL_RATE: f64 = 0.025;
/// Alternate corporate tax rate on accounting profit.
pub const ALTERNATE_RATE: f64 = 0.17;
/// Minimum tax rate on taxable turnover.
pub const MINIMUM_RATE: f64 = 0.0125;
/// Turnover threshold above which minimum tax applies.
pub const MINIMUM_TAX_THRESHOLD: f64 = 100_000_000.0;

pub(crate) fn run(store: &mut CellStore) {
    let taxable_income = store.get(E, 126);
    let normal = if taxable_income > 0.0 {
        taxable_income * NORMAL_RATE
    } else {
        0.0
    };
    store.set(E, 129, normal);

    // Final tax is charged on the exempt export proceeds regardless of the
    // sign of taxable income.
    store.set(E, 130, store.get(D, 5) * FINAL_RATE);

    let accounting_profit = store.get(C, 66);
    let alternate = if accounting_profit > 0.0 {
        accounting_profit * ALTERNATE_RATE
    } else {
        0.0
    };
    store.set(E, 131, alternate);

    let taxable_revenue = store.get(E, 3);
    let minimum = if taxable_revenue > MINIMUM_TAX_THRESHOLD {
        taxable_revenue * MINIMUM_RATE
    } else {
        0.0
    };
    store.set(E, 132, minimum);

    // Top-up differences where minimum or alternate tax exceeds normal tax.
    store.set(E, 133, if minimum > normal { minimum - normal } else { 0.0 });

    // Reserved statutory slots, always zero but addressable.
    store.set(E, 134, 0.0); // tax on high earners
    store.set(E, 135, 0.0); // tax on deemed income

    store.set(
        E,
        136,
        if alternate > normal {
            alternate - normal
        } else {
            0.0
        },
    );

    store.set(E, 137, 0.0); // difference of minimum tax chargeable

    // The binding regime is the highest of the three bases; fixed and
    // top-up charges stack on top regardless of which one bound.
    let max_tax = normal.max(alternate).max(minimum);
    store.set(
        E,
        128,
        max_tax
            + store.get(E, 130)
            + store.get(E, 133)
            + store.get(E, 134)
            + store.get(E, 135)
            + store.get(E, 136)
            + store.get(E, 137),
    );
}
