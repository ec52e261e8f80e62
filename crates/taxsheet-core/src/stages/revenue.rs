//! Revenue split and export-exemption ratio (rows 3-7).

use crate::cell::Column::{C, D, E};
use crate::store::CellStore;

pub(crate) fn run(store: &mut CellStore) {
    // Gross revenue: domestic plus export sales.
    let domestic = store.get(C, 4);
    let export = store.get(C, 5);
    store.set(C, 3, domestic + export);

    // Export ratio, divide-by-zero guarded to 0.
    let gross = store.get(C, 3);
    let ratio = if gross > 0.0 { export / gross } else { 0.0 };
    store.set(D, 7, ratio);
    store.set(E, 7, store.get(C, 7) - ratio);

    // Row 4: domestic sales are never exempt.
    store.set(D, 4, 0.0);
    store.set(E, 4, domestic - store.get(D, 4));

    // Row 5: export sales are fully exempt only with PSEB registration.
    let exempt_exports = if store.pseb_registered { export } else { 0.0 };
    store.set(D, 5, exempt_exports);
    store.set(E, 5, export - exempt_exports);

    // Totals follow from the freshly derived rows 4 and 5.
    store.set(D, 3, store.get(D, 4) + store.get(D, 5));
    store.set(E, 3, store.get(E, 4) + store.get(E, 5));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with_sales(domestic: f64, export: f64) -> CellStore {
        let mut store = CellStore::new();
        store.set(C, 4, domestic);
        store.set(C, 5, export);
        store
    }

    #[test]
    fn gross_revenue_is_domestic_plus_export() {
        let mut store = store_with_sales(6_000_000.0, 15_000_000.0);
        run(&mut store);
        assert_eq!(store.get(C, 3), 21_000_000.0);
    }

    #[test]
    fn export_ratio_is_export_over_gross() {
        let mut store = store_with_sales(6_000_000.0, 15_000_000.0);
        run(&mut store);
        assert_eq!(store.get(D, 7), 15_000_000.0 / 21_000_000.0);
        assert_eq!(store.get(E, 7), 1.0 - 15_000_000.0 / 21_000_000.0);
    }

    #[test]
    fn export_ratio_guards_zero_revenue() {
        let mut store = store_with_sales(0.0, 0.0);
        run(&mut store);
        assert_eq!(store.get(D, 7), 0.0);
        assert_eq!(store.get(E, 7), 1.0);
    }

    #[test]
    fn domestic_sales_are_never_exempt() {
        let mut store = store_with_sales(6_000_000.0, 15_000_000.0);
        run(&mut store);
        assert_eq!(store.get(D, 4), 0.0);
        assert_eq!(store.get(E, 4), 6_000_000.0);
    }

    #[test]
    fn export_exemption_follows_pseb_registration() {
        let mut store = store_with_sales(6_000_000.0, 15_000_000.0);
        run(&mut store);
        assert_eq!(store.get(D, 5), 15_000_000.0);
        assert_eq!(store.get(E, 5), 0.0);

        store.pseb_registered = false;
        run(&mut store);
        assert_eq!(store.get(D, 5), 0.0);
        assert_eq!(store.get(E, 5), 15_000_000.0);
    }

    #[test]
    fn totals_recompute_from_derived_rows() {
        let mut store = store_with_sales(6_000_000.0, 15_000_000.0);
        run(&mut store);
        assert_eq!(store.get(D, 3), 15_000_000.0);
        assert_eq!(store.get(E, 3), 6_000_000.0);
    }
}
