//! Mock port implementations for testing.
//!
//! Scripted doubles for both ports: the market data mock serves whatever
//! bars/chain/spot were set on it; the gateway mock records every
//! submission and can be told to fail at a given leg index.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::application::ports::{
    BarInterval, GatewayError, HistorySpan, MarketDataError, MarketDataPort, OrderAck,
    OrderGatewayPort, OrderStatus,
};
use crate::domain::market::{OptionChain, PriceBar};
use crate::domain::shared::{BrokerId, Symbol, Timestamp};
use crate::domain::strategy::OrderRequest;

/// Mock market data provider for testing.
#[derive(Debug)]
pub struct MockMarketData {
    bars: RwLock<Vec<PriceBar>>,
    chain: RwLock<OptionChain>,
    spot: RwLock<Decimal>,
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self {
            bars: RwLock::new(Vec::new()),
            chain: RwLock::new(OptionChain::new(Symbol::new("TEST"), Vec::new())),
            spot: RwLock::new(Decimal::new(100, 0)),
        }
    }
}

impl MockMarketData {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scripted bars.
    pub fn set_bars(&self, bars: Vec<PriceBar>) {
        *self.bars.write().unwrap() = bars;
    }

    /// Script flat bars from a closing price sequence.
    pub fn set_closes(&self, closes: &[Decimal]) {
        let bars = closes
            .iter()
            .map(|close| PriceBar {
                timestamp: Timestamp::now(),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: 1000,
            })
            .collect();
        self.set_bars(bars);
    }

    /// Replace the scripted option chain.
    pub fn set_chain(&self, chain: OptionChain) {
        *self.chain.write().unwrap() = chain;
    }

    /// Replace the scripted spot price.
    pub fn set_spot(&self, spot: Decimal) {
        *self.spot.write().unwrap() = spot;
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn get_price_history(
        &self,
        _symbol: &Symbol,
        _interval: BarInterval,
        _span: HistorySpan,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        Ok(self.bars.read().unwrap().clone())
    }

    async fn get_option_chain(
        &self,
        _symbol: &Symbol,
        expiration: Option<NaiveDate>,
    ) -> Result<OptionChain, MarketDataError> {
        let chain = self.chain.read().unwrap().clone();
        let Some(date) = expiration else {
            return Ok(chain);
        };
        let contracts = chain
            .contracts
            .into_iter()
            .filter(|c| c.expiration == date)
            .collect();
        Ok(OptionChain::new(chain.underlying, contracts))
    }

    async fn get_spot_price(&self, _symbol: &Symbol) -> Result<Decimal, MarketDataError> {
        Ok(*self.spot.read().unwrap())
    }
}

/// Mock order gateway for testing.
///
/// Records every submission; optionally fails at a scripted leg index
/// (0-based over the submissions attempted so far).
#[derive(Debug, Default)]
pub struct MockOrderGateway {
    fail_at: RwLock<Option<usize>>,
    submitted: RwLock<Vec<OrderRequest>>,
    acks: RwLock<Vec<OrderAck>>,
    canceled: RwLock<Vec<BrokerId>>,
}

impl MockOrderGateway {
    /// Create a gateway that accepts every order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the submission with this 0-based index.
    pub fn set_fail_at(&self, index: usize) {
        *self.fail_at.write().unwrap() = Some(index);
    }

    /// Every request that reached `submit_order` and was accepted.
    #[must_use]
    pub fn submissions(&self) -> Vec<OrderRequest> {
        self.submitted.read().unwrap().clone()
    }

    /// Broker ids passed to `cancel_order`.
    #[must_use]
    pub fn canceled(&self) -> Vec<BrokerId> {
        self.canceled.read().unwrap().clone()
    }
}

#[async_trait]
impl OrderGatewayPort for MockOrderGateway {
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderAck, GatewayError> {
        let mut submitted = self.submitted.write().unwrap();
        if *self.fail_at.read().unwrap() == Some(submitted.len()) {
            return Err(GatewayError::OrderRejected {
                reason: "insufficient funds".to_string(),
            });
        }

        submitted.push(request.clone());
        let ack = OrderAck {
            broker_order_id: BrokerId::new(format!("mock-{}", submitted.len())),
            client_order_id: request.client_order_id.clone(),
            status: OrderStatus::Accepted,
        };
        self.acks.write().unwrap().push(ack.clone());
        Ok(ack)
    }

    async fn cancel_order(&self, broker_order_id: &BrokerId) -> Result<(), GatewayError> {
        self.canceled.write().unwrap().push(broker_order_id.clone());
        Ok(())
    }

    async fn replace_order(
        &self,
        broker_order_id: &BrokerId,
        _new_limit: Decimal,
    ) -> Result<OrderAck, GatewayError> {
        self.get_order(broker_order_id).await
    }

    async fn get_order(&self, broker_order_id: &BrokerId) -> Result<OrderAck, GatewayError> {
        self.acks
            .read()
            .unwrap()
            .iter()
            .find(|ack| &ack.broker_order_id == broker_order_id)
            .cloned()
            .ok_or_else(|| GatewayError::OrderNotFound {
                order_id: broker_order_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::ContractId;
    use crate::domain::strategy::OrderSide;
    use rust_decimal_macros::dec;

    fn request() -> OrderRequest {
        OrderRequest::market(ContractId::new("AAPL241220C00100000"), OrderSide::Buy, 1)
    }

    #[test]
    fn gateway_records_submissions() {
        tokio_test::block_on(async {
            let gateway = MockOrderGateway::new();
            let ack = gateway.submit_order(&request()).await.unwrap();
            assert_eq!(ack.status, OrderStatus::Accepted);
            assert_eq!(gateway.submissions().len(), 1);
        });
    }

    #[test]
    fn gateway_fails_at_scripted_index() {
        tokio_test::block_on(async {
            let gateway = MockOrderGateway::new();
            gateway.set_fail_at(1);
            gateway.submit_order(&request()).await.unwrap();
            assert!(gateway.submit_order(&request()).await.is_err());
            assert_eq!(gateway.submissions().len(), 1);
        });
    }

    #[test]
    fn gateway_finds_submitted_orders() {
        tokio_test::block_on(async {
            let gateway = MockOrderGateway::new();
            let ack = gateway.submit_order(&request()).await.unwrap();
            let found = gateway.get_order(&ack.broker_order_id).await.unwrap();
            assert_eq!(found, ack);

            let missing = gateway.get_order(&BrokerId::new("nope")).await;
            assert!(matches!(missing, Err(GatewayError::OrderNotFound { .. })));
        });
    }

    #[test]
    fn market_data_serves_scripted_values() {
        tokio_test::block_on(async {
            let market_data = MockMarketData::new();
            market_data.set_closes(&[dec!(1), dec!(2)]);
            market_data.set_spot(dec!(123));

            let bars = market_data
                .get_price_history(&Symbol::new("TEST"), BarInterval::Day, HistorySpan::Week)
                .await
                .unwrap();
            assert_eq!(bars.len(), 2);
            assert_eq!(bars[1].close, dec!(2));

            let spot = market_data
                .get_spot_price(&Symbol::new("TEST"))
                .await
                .unwrap();
            assert_eq!(spot, dec!(123));
        });
    }
}
