//! Tax credits, advance-tax netting, and the settlement outcome
//! (rows 139-153).

use crate::cell::Column::{C, E};
use crate::store::CellStore;

/// Cap on the charitable-donation credit as a share of taxable income.
pub const DONATION_CAP_RATE: f64 = 0.2;

pub(crate) fn run(store: &mut CellStore) {
    let tax_chargeable = store.get(E, 128);
    let taxable_income = store.get(E, 126);
    let donations = store.get(C, 140);

    // Charitable-donation credit: the lesser of proportional relief or 20%
    // of taxable income, floored at zero.
    let mut charitable = 0.0;
    if donations > 0.0 && taxable_income > 0.0 && tax_chargeable > 0.0 {
        let proportional = (tax_chargeable / taxable_income) * donations;
        charitable = proportional.min(DONATION_CAP_RATE * taxable_income);
        if charitable < 0.0 {
            charitable = 0.0;
        }
    }
    store.set(E, 140, charitable);

    // Startup relief credits the full charge; otherwise the declared credit
    // passes through unchanged.
    let other = if store.startup_registered {
        tax_chargeable
    } else {
        store.get(C, 141)
    };
    store.set(E, 141, other);

    store.set(E, 139, store.get(E, 140) + store.get(E, 141));

    // Net liability is deliberately not floored; a negative value signals
    // over-credit.
    store.set(E, 144, store.get(E, 128) - store.get(E, 139));

    // Advance tax paid across the four payment heads.
    store.set(E, 146, store.sum_range(E, 147..=150));

    // Exactly one of admitted/refundable is the settlement outcome.
    let liability = store.get(E, 144);
    let advance = store.get(E, 146);
    store.set(
        E,
        152,
        if advance > liability {
            0.0
        } else {
            liability - advance
        },
    );
    store.set(
        E,
        153,
        if store.get(E, 152) > 0.0 {
            0.0
        } else {
            advance - liability
        },
    );
}
