//! Strategy templates.
//!
//! Each template resolves its contracts from an already-fetched chain and
//! emits order legs in submission order. Templates never retry: a chain
//! without the required contracts is reported as an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::market::{
    OptionChain, OptionContract, OptionType, find_contract_by_strike, select_atm_strike,
    select_higher_strike, select_lower_strike,
};

use super::{OrderRequest, OrderSide, StrategyError, StrategyKind};

/// Contracts per leg. Every template trades single contracts.
pub const LEG_QUANTITY: u32 = 1;

/// Near/far expiration pair for template resolution.
///
/// Single-expiration templates use only `near`; calendar spreads use both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expirations {
    /// Expiration for single-expiration templates and the near calendar leg.
    pub near: NaiveDate,
    /// Expiration for the far calendar leg.
    pub far: NaiveDate,
}

impl Expirations {
    /// Create a validated expiration pair.
    ///
    /// # Errors
    ///
    /// `ExpirationOrder` unless `far` is strictly after `near`.
    pub fn new(near: NaiveDate, far: NaiveDate) -> Result<Self, StrategyError> {
        if far <= near {
            return Err(StrategyError::ExpirationOrder { near, far });
        }
        Ok(Self { near, far })
    }
}

/// A resolved strategy: the selected kind and its order legs in
/// submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPlan {
    /// The dispatched strategy.
    pub kind: StrategyKind,
    /// Order legs, first to submit first.
    pub legs: Vec<OrderRequest>,
}

/// Resolve a strategy template into concrete order legs.
///
/// # Errors
///
/// `EmptyChain` when the chain lacks contracts of a required type at a
/// required expiration; `NoMatchingContract` when a selected strike has no
/// contract (calendar spreads: the far expiration must list the near ATM
/// strike).
pub fn build_plan(
    kind: StrategyKind,
    chain: &OptionChain,
    spot: Decimal,
    strike_distance: Decimal,
    expirations: Expirations,
) -> Result<StrategyPlan, StrategyError> {
    let legs = match kind {
        StrategyKind::BullCallSpread => bull_call_spread(chain, spot, strike_distance, expirations.near)?,
        StrategyKind::BearPutSpread => bear_put_spread(chain, spot, strike_distance, expirations.near)?,
        StrategyKind::CalendarCallSpread => calendar_call_spread(chain, spot, expirations)?,
        StrategyKind::LongStraddle => long_straddle(chain, spot, expirations.near)?,
        StrategyKind::LongCall => single_leg(chain, OptionType::Call, spot, expirations.near)?,
        StrategyKind::LongPut => single_leg(chain, OptionType::Put, spot, expirations.near)?,
    };
    Ok(StrategyPlan { kind, legs })
}

/// Buy call at the lower strike, sell call at the higher strike.
fn bull_call_spread(
    chain: &OptionChain,
    spot: Decimal,
    distance: Decimal,
    expiration: NaiveDate,
) -> Result<Vec<OrderRequest>, StrategyError> {
    let calls = typed_contracts(chain, OptionType::Call, expiration)?;

    let lower = select_lower_strike(&calls, spot, distance)
        .ok_or(empty(OptionType::Call, expiration))?;
    let buy = pick(&calls, lower, OptionType::Call, expiration)?;

    let higher = select_higher_strike(&calls, spot, distance)
        .ok_or(empty(OptionType::Call, expiration))?;
    let sell = pick(&calls, higher, OptionType::Call, expiration)?;

    Ok(vec![
        OrderRequest::market(buy.contract_id.clone(), OrderSide::Buy, LEG_QUANTITY),
        OrderRequest::market(sell.contract_id.clone(), OrderSide::Sell, LEG_QUANTITY),
    ])
}

/// Buy put at the higher strike, sell put at the lower strike.
fn bear_put_spread(
    chain: &OptionChain,
    spot: Decimal,
    distance: Decimal,
    expiration: NaiveDate,
) -> Result<Vec<OrderRequest>, StrategyError> {
    let puts = typed_contracts(chain, OptionType::Put, expiration)?;

    let higher = select_higher_strike(&puts, spot, distance)
        .ok_or(empty(OptionType::Put, expiration))?;
    let buy = pick(&puts, higher, OptionType::Put, expiration)?;

    let lower = select_lower_strike(&puts, spot, distance)
        .ok_or(empty(OptionType::Put, expiration))?;
    let sell = pick(&puts, lower, OptionType::Put, expiration)?;

    Ok(vec![
        OrderRequest::market(buy.contract_id.clone(), OrderSide::Buy, LEG_QUANTITY),
        OrderRequest::market(sell.contract_id.clone(), OrderSide::Sell, LEG_QUANTITY),
    ])
}

/// Sell the near-expiration ATM call, buy the far-expiration call at the
/// same strike.
fn calendar_call_spread(
    chain: &OptionChain,
    spot: Decimal,
    expirations: Expirations,
) -> Result<Vec<OrderRequest>, StrategyError> {
    // Re-assert the pair ordering; the template must hold its own
    // precondition even when handed a hand-built pair.
    let Expirations { near, far } = Expirations::new(expirations.near, expirations.far)?;

    let near_calls = typed_contracts(chain, OptionType::Call, near)?;
    let far_calls = typed_contracts(chain, OptionType::Call, far)?;

    let atm = select_atm_strike(&near_calls, spot).ok_or(empty(OptionType::Call, near))?;
    let sell = pick(&near_calls, atm, OptionType::Call, near)?;
    let buy = pick(&far_calls, atm, OptionType::Call, far)?;

    Ok(vec![
        OrderRequest::market(sell.contract_id.clone(), OrderSide::Sell, LEG_QUANTITY),
        OrderRequest::market(buy.contract_id.clone(), OrderSide::Buy, LEG_QUANTITY),
    ])
}

/// Buy the ATM call and the put at the same strike.
fn long_straddle(
    chain: &OptionChain,
    spot: Decimal,
    expiration: NaiveDate,
) -> Result<Vec<OrderRequest>, StrategyError> {
    let calls = typed_contracts(chain, OptionType::Call, expiration)?;
    let puts = typed_contracts(chain, OptionType::Put, expiration)?;

    let atm = select_atm_strike(&calls, spot).ok_or(empty(OptionType::Call, expiration))?;
    let call = pick(&calls, atm, OptionType::Call, expiration)?;
    let put = pick(&puts, atm, OptionType::Put, expiration)?;

    Ok(vec![
        OrderRequest::market(call.contract_id.clone(), OrderSide::Buy, LEG_QUANTITY),
        OrderRequest::market(put.contract_id.clone(), OrderSide::Buy, LEG_QUANTITY),
    ])
}

/// Buy one ATM contract of the given type.
fn single_leg(
    chain: &OptionChain,
    option_type: OptionType,
    spot: Decimal,
    expiration: NaiveDate,
) -> Result<Vec<OrderRequest>, StrategyError> {
    let contracts = typed_contracts(chain, option_type, expiration)?;
    let atm = select_atm_strike(&contracts, spot).ok_or(empty(option_type, expiration))?;
    let contract = pick(&contracts, atm, option_type, expiration)?;

    Ok(vec![OrderRequest::market(
        contract.contract_id.clone(),
        OrderSide::Buy,
        LEG_QUANTITY,
    )])
}

fn typed_contracts(
    chain: &OptionChain,
    option_type: OptionType,
    expiration: NaiveDate,
) -> Result<Vec<OptionContract>, StrategyError> {
    let contracts = chain.filter(option_type, Some(expiration));
    if contracts.is_empty() {
        return Err(empty(option_type, expiration));
    }
    Ok(contracts)
}

fn pick<'a>(
    contracts: &'a [OptionContract],
    strike: Decimal,
    option_type: OptionType,
    expiration: NaiveDate,
) -> Result<&'a OptionContract, StrategyError> {
    find_contract_by_strike(contracts, strike).ok_or(StrategyError::NoMatchingContract {
        option_type,
        strike,
        expiration,
    })
}

const fn empty(option_type: OptionType, expiration: NaiveDate) -> StrategyError {
    StrategyError::EmptyChain {
        option_type,
        expiration,
    }
}
