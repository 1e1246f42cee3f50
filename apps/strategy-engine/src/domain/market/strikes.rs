//! Strike selection helpers.
//!
//! Pure functions over an in-memory contract list. The fallback branches
//! (no strike qualifies) are defined degenerate behavior, not errors; only
//! an empty input yields `None`.
//!
//! Selection does not assume the caller pre-sorted the contracts; strike
//! order is established internally so the minimality guarantees hold for
//! any input order.

use rust_decimal::Decimal;

use super::OptionContract;

/// Smallest strike at least `distance` above `spot`.
///
/// Falls back to the largest available strike when no strike qualifies.
/// Returns `None` only for an empty contract list.
#[must_use]
pub fn select_higher_strike(
    contracts: &[OptionContract],
    spot: Decimal,
    distance: Decimal,
) -> Option<Decimal> {
    let target = spot + distance;
    contracts
        .iter()
        .map(|c| c.strike)
        .filter(|s| *s >= target)
        .min()
        .or_else(|| contracts.iter().map(|c| c.strike).max())
}

/// Largest strike at least `distance` below `spot`.
///
/// Mirror of [`select_higher_strike`]; falls back to the smallest available
/// strike. Returns `None` only for an empty contract list.
#[must_use]
pub fn select_lower_strike(
    contracts: &[OptionContract],
    spot: Decimal,
    distance: Decimal,
) -> Option<Decimal> {
    let target = spot - distance;
    contracts
        .iter()
        .map(|c| c.strike)
        .filter(|s| *s <= target)
        .max()
        .or_else(|| contracts.iter().map(|c| c.strike).min())
}

/// Strike minimizing the absolute distance to `spot`.
///
/// Ties break to the lowest strike. Returns `None` only for an empty
/// contract list.
#[must_use]
pub fn select_atm_strike(contracts: &[OptionContract], spot: Decimal) -> Option<Decimal> {
    contracts
        .iter()
        .map(|c| c.strike)
        .min_by_key(|s| ((*s - spot).abs(), *s))
}

/// Exact-match lookup by strike.
#[must_use]
pub fn find_contract_by_strike(
    contracts: &[OptionContract],
    strike: Decimal,
) -> Option<&OptionContract> {
    contracts.iter().find(|c| c.strike == strike)
}
