//! Market data domain types.
//!
//! Typed snapshots of provider data: price bars and option chains.
//! Validated at the provider boundary so the rest of the engine never
//! touches a venue's raw response shape.

mod bar;
mod chain;
mod strikes;

pub use bar::PriceBar;
pub use chain::{OptionChain, OptionContract, OptionType};
pub use strikes::{
    find_contract_by_strike, select_atm_strike, select_higher_strike, select_lower_strike,
};
