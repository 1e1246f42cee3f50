//! Alpaca market data adapter implementing MarketDataPort.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::application::ports::{BarInterval, HistorySpan, MarketDataError, MarketDataPort};
use crate::domain::market::{OptionChain, OptionContract, PriceBar};
use crate::domain::shared::{Symbol, Timestamp};

use super::api_types::{
    AlpacaBarsResponse, AlpacaLatestTradeResponse, AlpacaOptionSnapshotsResponse,
};
use super::config::AlpacaConfig;
use super::error::AlpacaError;
use super::http_client::AlpacaHttpClient;

/// Alpaca market data adapter.
///
/// Bars and trades come from the stock data API; the option chain from the
/// option snapshots API. OCC contract symbols are parsed into typed
/// contracts here so the domain never sees raw venue responses.
#[derive(Debug, Clone)]
pub struct AlpacaMarketData {
    client: AlpacaHttpClient,
}

impl AlpacaMarketData {
    /// Create a new market data adapter.
    ///
    /// # Errors
    ///
    /// Fails on empty credentials or an unbuildable HTTP client.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        Ok(Self {
            client: AlpacaHttpClient::new(config)?,
        })
    }

    /// Override the base URLs (test support).
    #[doc(hidden)]
    #[must_use]
    pub fn with_base_urls(mut self, trading: impl Into<String>, data: impl Into<String>) -> Self {
        self.client = self.client.with_base_urls(trading, data);
        self
    }
}

/// Alpaca timeframe string for a bar interval.
const fn timeframe(interval: BarInterval) -> &'static str {
    match interval {
        BarInterval::FiveMinute => "5Min",
        BarInterval::Hour => "1Hour",
        BarInterval::Day => "1Day",
    }
}

/// Window start for a history span, relative to `now`.
fn history_start(span: HistorySpan, now: DateTime<Utc>) -> DateTime<Utc> {
    let days = match span {
        HistorySpan::Week => 7,
        HistorySpan::Month => 30,
        HistorySpan::Year => 365,
    };
    now - Duration::days(days)
}

#[async_trait]
impl MarketDataPort for AlpacaMarketData {
    async fn get_price_history(
        &self,
        symbol: &Symbol,
        interval: BarInterval,
        span: HistorySpan,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        let start = history_start(span, Utc::now()).format("%Y-%m-%dT%H:%M:%SZ");
        let base_path = format!(
            "/v2/stocks/{symbol}/bars?timeframe={}&start={start}&limit=10000&adjustment=raw",
            timeframe(interval)
        );

        let mut bars = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let path = match &page_token {
                Some(token) => format!("{base_path}&page_token={token}"),
                None => base_path.clone(),
            };
            let response: AlpacaBarsResponse =
                self.client.data_get(&path).await.map_err(MarketDataError::from)?;

            for bar in response.bars.unwrap_or_default() {
                let timestamp = Timestamp::parse(&bar.t).map_err(|e| {
                    MarketDataError::ApiError {
                        message: format!("unparseable bar timestamp {}: {e}", bar.t),
                    }
                })?;
                bars.push(PriceBar {
                    timestamp,
                    open: bar.o,
                    high: bar.h,
                    low: bar.l,
                    close: bar.c,
                    volume: bar.v,
                });
            }

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(symbol = %symbol, bars = bars.len(), "Fetched price history");
        Ok(bars)
    }

    async fn get_option_chain(
        &self,
        symbol: &Symbol,
        expiration: Option<NaiveDate>,
    ) -> Result<OptionChain, MarketDataError> {
        let mut base_path = format!("/v1beta1/options/snapshots/{symbol}?limit=1000");
        if let Some(date) = expiration {
            base_path.push_str(&format!("&expiration_date={}", date.format("%Y-%m-%d")));
        }

        let mut contracts = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let path = match &page_token {
                Some(token) => format!("{base_path}&page_token={token}"),
                None => base_path.clone(),
            };
            let response: AlpacaOptionSnapshotsResponse =
                self.client.data_get(&path).await.map_err(MarketDataError::from)?;

            for (occ, snapshot) in response.snapshots {
                let Some(implied_volatility) = snapshot.implied_volatility else {
                    tracing::debug!(contract = %occ, "Skipping contract without IV");
                    continue;
                };
                match OptionContract::from_occ(&occ, implied_volatility) {
                    Some(contract) => contracts.push(contract),
                    None => {
                        tracing::warn!(contract = %occ, "Skipping unparseable OCC symbol");
                    }
                }
            }

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(symbol = %symbol, contracts = contracts.len(), "Fetched option chain");
        Ok(OptionChain::new(symbol.clone(), contracts))
    }

    async fn get_spot_price(&self, symbol: &Symbol) -> Result<Decimal, MarketDataError> {
        let path = format!("/v2/stocks/{symbol}/trades/latest");
        let response: AlpacaLatestTradeResponse =
            self.client.data_get(&path).await.map_err(MarketDataError::from)?;
        Ok(response.trade.p)
    }
}
