//! Range aggregation and proportional exemption splits (rows 8-126).
//!
//! Eight expense/income blocks share one pattern: split each row into
//! exempt/taxable portions using the export ratio, then total the block.
//! Per-row splits run before the block totals so the totals are never
//! stale after a single recompute.

use std::ops::RangeInclusive;

use crate::cell::Column::{C, D, E};
use crate::store::CellStore;

/// Derive the exempt/taxable split for each row from the export ratio:
/// `D = C * ratio`, `E = C - D`.
fn split_rows(store: &mut CellStore, rows: RangeInclusive<u16>) {
    let ratio = store.get(D, 7);
    for row in rows {
        let gross = store.get(C, row);
        let exempt = gross * ratio;
        store.set(D, row, exempt);
        store.set(E, row, gross - exempt);
    }
}

/// `E = C - D` with the exempt portion taken as declared, no proportional
/// multiply.
fn residual_rows(store: &mut CellStore, rows: RangeInclusive<u16>) {
    for row in rows {
        store.set(E, row, store.get(C, row) - store.get(D, row));
    }
}

pub(crate) fn run(store: &mut CellStore) {
    let ratio = store.get(D, 7);

    // Selling expenses (rows 9-11, totalled in row 8). Rows 9 and 10 have
    // bespoke rules: domestic commission is never exempt, foreign
    // commission always is. Row 11 (rebate/duty drawbacks) uses the ratio.
    store.set(D, 9, 0.0);
    store.set(E, 9, store.get(C, 9) - store.get(D, 9));
    store.set(D, 10, store.get(C, 10));
    store.set(E, 10, store.get(C, 10) - store.get(D, 10));
    let rebate = store.get(C, 11);
    store.set(D, 11, rebate * ratio);
    store.set(E, 11, rebate - store.get(D, 11));
    store.set(C, 8, store.sum_range(C, 9..=11));
    store.set(D, 8, store.sum_range(D, 9..=11));
    store.set(E, 8, store.sum_range(E, 9..=11));

    // Net revenue (row 13).
    store.set(C, 13, store.get(C, 3) - store.get(C, 8));
    store.set(E, 13, store.get(E, 3) - store.get(E, 8));

    // Direct cost of sales (rows 17-25, totalled in row 15).
    split_rows(store, 17..=25);
    store.set(C, 15, store.sum_range(C, 17..=25));
    store.set(D, 15, store.sum_range(D, 17..=25));
    store.set(E, 15, store.sum_range(E, 17..=25));

    // Gross profit (row 26).
    store.set(C, 26, store.get(C, 13) - store.get(C, 15));
    store.set(E, 26, store.get(E, 13) - store.get(E, 15));

    // Indirect expenses (rows 29-54, totalled in row 28).
    split_rows(store, 29..=54);
    store.set(C, 28, store.sum_range(C, 29..=54));
    store.set(E, 28, store.sum_range(E, 29..=54));

    // Other revenues (rows 57-65, totalled in row 56).
    split_rows(store, 57..=65);
    store.set(C, 56, store.sum_range(C, 57..=65));
    store.set(E, 56, store.sum_range(E, 57..=65));

    // Accounting profit (row 66).
    store.set(C, 66, store.get(C, 26) - store.get(C, 28) + store.get(C, 56));
    store.set(E, 66, store.get(E, 26) - store.get(E, 28) + store.get(E, 56));

    // Inadmissible deductions (rows 69-99, 31 rows, totalled in row 68).
    // The block totals are summed before rows 94-99 are reassigned below;
    // the workbook orders it this way, so the totals pick up the
    // cross-referenced values one recompute late. Kept as-is; see
    // DESIGN.md.
    split_rows(store, 69..=99);
    store.set(C, 68, store.sum_range(C, 69..=99));
    store.set(E, 68, store.sum_range(E, 69..=99));

    // Rows 94-99 mirror figures declared elsewhere in the return.
    store.set(C, 94, store.get(C, 51));
    store.set(C, 95, store.get(C, 52));
    store.set(C, 96, store.get(C, 53) + store.get(C, 24));
    store.set(C, 97, store.get(C, 54) + store.get(C, 25));
    store.set(C, 98, store.get(C, 63));
    store.set(C, 99, store.get(C, 64));

    // Admissible deductions (rows 102-106, totalled in row 101).
    split_rows(store, 102..=106);
    store.set(C, 101, store.sum_range(C, 102..=106));
    store.set(E, 101, store.sum_range(E, 102..=106));

    // Income before depreciation (row 108).
    store.set(C, 108, store.get(C, 66) + store.get(C, 68) - store.get(C, 101));
    store.set(E, 108, store.get(E, 66) + store.get(E, 68) - store.get(E, 101));

    // Tax depreciation (rows 111-113, totalled in row 110).
    split_rows(store, 111..=113);
    store.set(C, 110, store.sum_range(C, 111..=113));
    store.set(E, 110, store.sum_range(E, 111..=113));

    // Business income (row 115).
    store.set(C, 115, store.get(C, 108) - store.get(C, 110));
    store.set(E, 115, store.get(E, 108) - store.get(E, 110));

    // Other incomes (rows 116-120): the exempt portion is declared, not
    // ratio-derived.
    residual_rows(store, 116..=120);

    // Total income (row 121): business income plus other incomes.
    store.set(C, 121, store.sum_range(C, 115..=120));
    store.set(E, 121, store.sum_range(E, 115..=120));

    // Deductible allowances (row 123): a single pass-through of the
    // Workers Welfare Fund row 124.
    store.set(E, 124, store.get(C, 124) - store.get(D, 124));
    store.set(C, 123, store.get(C, 124));
    store.set(E, 123, store.get(E, 124));

    // Taxable income (row 126).
    store.set(C, 126, store.get(C, 121) - store.get(C, 123));
    store.set(E, 126, store.get(E, 121) - store.get(E, 123));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    /// 6M domestic / 15M export, ratio 15/21.
    fn store_with_ratio() -> CellStore {
        let mut store = CellStore::new();
        store.set(C, 4, 6_000_000.0);
        store.set(C, 5, 15_000_000.0);
        stages::recalculate(&mut store);
        store
    }

    #[test]
    fn selling_expense_rows_have_bespoke_rules() {
        let mut store = store_with_ratio();
        store.set(C, 9, 1_000_000.0);
        store.set(C, 10, 1_000_000.0);
        store.set(C, 11, 1_000_000.0);
        stages::recalculate(&mut store);

        // Domestic commission: never exempt.
        assert_eq!(store.get(D, 9), 0.0);
        assert_eq!(store.get(E, 9), 1_000_000.0);
        // Foreign commission: always fully exempt.
        assert_eq!(store.get(D, 10), 1_000_000.0);
        assert_eq!(store.get(E, 10), 0.0);
        // Rebate: proportional.
        let ratio = store.get(D, 7);
        assert_close(store.get(D, 11), 1_000_000.0 * ratio);

        assert_eq!(store.get(C, 8), 3_000_000.0);
        assert_close(
            store.get(E, 8),
            store.get(E, 9) + store.get(E, 10) + store.get(E, 11),
        );
    }

    #[test]
    fn proportional_blocks_split_by_export_ratio() {
        let mut store = store_with_ratio();
        for row in 17..=25 {
            store.set(C, row, 1_500_000.0);
        }
        for row in 29..=54 {
            store.set(C, row, 1_500_000.0);
        }
        stages::recalculate(&mut store);

        let ratio = store.get(D, 7);
        for row in (17..=25).chain(29..=54) {
            assert_close(store.get(D, row), 1_500_000.0 * ratio);
            assert_close(
                store.get(E, row),
                store.get(C, row) - store.get(D, row),
            );
        }
    }

    #[test]
    fn block_totals_match_their_ranges_after_one_pass() {
        let mut store = store_with_ratio();
        for row in 17..=25 {
            store.set(C, row, 2_000_000.0);
        }
        stages::recalculate(&mut store);

        assert_eq!(store.get(C, 15), 18_000_000.0);
        assert_close(store.get(D, 15), store.sum_range(D, 17..=25));
        assert_close(store.get(E, 15), store.sum_range(E, 17..=25));
    }

    #[test]
    fn cross_reference_rows_mirror_their_sources() {
        let mut store = store_with_ratio();
        store.set(C, 51, 100.0);
        store.set(C, 52, 200.0);
        store.set(C, 53, 300.0);
        store.set(C, 24, 40.0);
        store.set(C, 54, 500.0);
        store.set(C, 25, 60.0);
        store.set(C, 63, 700.0);
        store.set(C, 64, 800.0);
        stages::recalculate(&mut store);

        assert_eq!(store.get(C, 94), 100.0);
        assert_eq!(store.get(C, 95), 200.0);
        assert_eq!(store.get(C, 96), 340.0);
        assert_eq!(store.get(C, 97), 560.0);
        assert_eq!(store.get(C, 98), 700.0);
        assert_eq!(store.get(C, 99), 800.0);
    }

    #[test]
    fn other_income_rows_keep_declared_exempt_portions() {
        let mut store = store_with_ratio();
        store.set(C, 117, 1_000.0);
        store.set(D, 117, 250.0);
        stages::recalculate(&mut store);

        // D117 is untouched by the ratio, E is the residual.
        assert_eq!(store.get(D, 117), 250.0);
        assert_eq!(store.get(E, 117), 750.0);
    }

    #[test]
    fn income_rollup_reaches_taxable_income() {
        let mut store = CellStore::new();
        store.set(C, 4, 10_000_000.0);
        store.set(C, 124, 400_000.0);
        stages::recalculate(&mut store);

        // No exports, no expenses: everything flows straight through.
        assert_eq!(store.get(C, 26), 10_000_000.0);
        assert_eq!(store.get(C, 66), 10_000_000.0);
        assert_eq!(store.get(C, 108), 10_000_000.0);
        assert_eq!(store.get(C, 115), 10_000_000.0);
        assert_eq!(store.get(C, 121), 10_000_000.0);
        assert_eq!(store.get(C, 123), 400_000.0);
        assert_eq!(store.get(C, 126), 9_600_000.0);
        assert_eq!(store.get(E, 126), 9_600_000.0);
    }
}
