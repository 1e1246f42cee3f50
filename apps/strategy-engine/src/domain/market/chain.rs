//! Option contracts and chains.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{ContractId, Symbol};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// An option contract snapshot.
///
/// Immutable snapshot from the provider at query time. No two contracts for
/// the same underlying/expiration/type share a strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Contract identifier (OCC symbol at the Alpaca boundary).
    pub contract_id: ContractId,
    /// Underlying symbol.
    pub underlying: Symbol,
    /// Option type (call/put).
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Decimal,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Implied volatility at snapshot time.
    pub implied_volatility: f64,
}

impl OptionContract {
    /// Parse an OCC option symbol into a contract.
    ///
    /// OCC format: `{ROOT}{YY}{MM}{DD}{C|P}{PRICE}`
    /// - Root: 1-6 characters
    /// - Date: 6 digits (YYMMDD)
    /// - Type: C (call) or P (put)
    /// - Price: 8 digits (strike × 1000)
    ///
    /// Returns `None` if the symbol does not follow the OCC layout.
    #[must_use]
    pub fn from_occ(occ: &str, implied_volatility: f64) -> Option<Self> {
        let len = occ.len();
        if !occ.is_ascii() || !(16..=21).contains(&len) {
            return None;
        }

        let type_pos = len - 9;
        let option_type = match occ.as_bytes()[type_pos] {
            b'C' => OptionType::Call,
            b'P' => OptionType::Put,
            _ => return None,
        };

        let price_part = &occ[len - 8..];
        let date_part = &occ[type_pos - 6..type_pos];
        if !price_part.bytes().all(|b| b.is_ascii_digit())
            || !date_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let root = &occ[..type_pos - 6];
        if root.is_empty() || !root.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }

        let year = 2000 + date_part[..2].parse::<i32>().ok()?;
        let month = date_part[2..4].parse::<u32>().ok()?;
        let day = date_part[4..6].parse::<u32>().ok()?;
        let expiration = NaiveDate::from_ymd_opt(year, month, day)?;

        // Strike is encoded in thousandths of a dollar.
        let thousandths = price_part.parse::<i64>().ok()?;
        let strike = Decimal::new(thousandths, 3).normalize();

        Some(Self {
            contract_id: ContractId::new(occ),
            underlying: Symbol::new(root),
            option_type,
            strike,
            expiration,
            implied_volatility,
        })
    }
}

/// Option chain for one underlying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    /// Underlying symbol.
    pub underlying: Symbol,
    /// Contracts in the chain, in provider order.
    pub contracts: Vec<OptionContract>,
}

impl OptionChain {
    /// Create a chain from contracts.
    #[must_use]
    pub const fn new(underlying: Symbol, contracts: Vec<OptionContract>) -> Self {
        Self {
            underlying,
            contracts,
        }
    }

    /// Number of contracts in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether the chain holds no contracts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Contracts of one type, optionally restricted to one expiration.
    #[must_use]
    pub fn filter(
        &self,
        option_type: OptionType,
        expiration: Option<NaiveDate>,
    ) -> Vec<OptionContract> {
        self.contracts
            .iter()
            .filter(|c| c.option_type == option_type)
            .filter(|c| expiration.is_none_or(|exp| c.expiration == exp))
            .cloned()
            .collect()
    }
}
