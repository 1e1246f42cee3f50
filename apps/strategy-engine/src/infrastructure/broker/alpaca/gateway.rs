//! Alpaca order gateway adapter implementing OrderGatewayPort.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::application::ports::{GatewayError, OrderAck, OrderGatewayPort};
use crate::domain::shared::BrokerId;
use crate::domain::strategy::OrderRequest;

use super::api_types::{AlpacaOrderRequest, AlpacaOrderResponse, AlpacaReplaceRequest};
use super::config::{AlpacaConfig, AlpacaEnvironment};
use super::error::AlpacaError;
use super::http_client::AlpacaHttpClient;

/// Alpaca order gateway adapter.
///
/// Option legs are submitted as single-leg day orders addressed by OCC
/// contract symbol.
#[derive(Debug, Clone)]
pub struct AlpacaOrderGateway {
    client: AlpacaHttpClient,
    environment: AlpacaEnvironment,
}

impl AlpacaOrderGateway {
    /// Create a new order gateway adapter.
    ///
    /// # Errors
    ///
    /// Fails on empty credentials or an unbuildable HTTP client.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        Ok(Self {
            client: AlpacaHttpClient::new(config)?,
            environment: config.environment,
        })
    }

    /// Check if we're in live trading mode.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }

    /// Override the base URLs (test support).
    #[doc(hidden)]
    #[must_use]
    pub fn with_base_urls(mut self, trading: impl Into<String>, data: impl Into<String>) -> Self {
        self.client = self.client.with_base_urls(trading, data);
        self
    }
}

#[async_trait]
impl OrderGatewayPort for AlpacaOrderGateway {
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderAck, GatewayError> {
        if self.is_live() {
            tracing::warn!(
                client_order_id = %request.client_order_id,
                contract = %request.contract_id,
                "Submitting LIVE order - this will execute real trades"
            );
        }

        let wire_request = AlpacaOrderRequest::from_domain(request);

        tracing::info!(
            client_order_id = %request.client_order_id,
            contract = %request.contract_id,
            side = %wire_request.side,
            order_type = %wire_request.order_type,
            qty = %wire_request.qty,
            limit_price = ?wire_request.limit_price,
            "Submitting order to Alpaca"
        );

        let response: AlpacaOrderResponse = self
            .client
            .post("/v2/orders", &wire_request)
            .await
            .map_err(GatewayError::from)?;

        tracing::info!(
            client_order_id = %request.client_order_id,
            broker_order_id = %response.id,
            status = %response.status,
            "Order submitted"
        );

        Ok(response.to_order_ack())
    }

    async fn cancel_order(&self, broker_order_id: &BrokerId) -> Result<(), GatewayError> {
        tracing::info!(broker_order_id = %broker_order_id, "Canceling order");
        self.client
            .delete(&format!("/v2/orders/{broker_order_id}"))
            .await
            .map_err(GatewayError::from)
    }

    async fn replace_order(
        &self,
        broker_order_id: &BrokerId,
        new_limit: Decimal,
    ) -> Result<OrderAck, GatewayError> {
        tracing::info!(
            broker_order_id = %broker_order_id,
            new_limit = %new_limit,
            "Replacing order limit price"
        );

        let body = AlpacaReplaceRequest {
            limit_price: new_limit.to_string(),
        };
        let response: AlpacaOrderResponse = self
            .client
            .patch(&format!("/v2/orders/{broker_order_id}"), &body)
            .await
            .map_err(GatewayError::from)?;

        Ok(response.to_order_ack())
    }

    async fn get_order(&self, broker_order_id: &BrokerId) -> Result<OrderAck, GatewayError> {
        let response: AlpacaOrderResponse = self
            .client
            .get(&format!("/v2/orders/{broker_order_id}"))
            .await
            .map_err(GatewayError::from)?;
        Ok(response.to_order_ack())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: AlpacaEnvironment) -> AlpacaConfig {
        AlpacaConfig::new("key".to_string(), "secret".to_string(), environment)
    }

    #[test]
    fn gateway_tracks_environment() {
        let paper = AlpacaOrderGateway::new(&config(AlpacaEnvironment::Paper)).unwrap();
        assert!(!paper.is_live());

        let live = AlpacaOrderGateway::new(&config(AlpacaEnvironment::Live)).unwrap();
        assert!(live.is_live());
    }

    #[test]
    fn empty_credentials_fail_construction() {
        let mut bad = config(AlpacaEnvironment::Paper);
        bad.api_secret = String::new();
        assert!(matches!(
            AlpacaOrderGateway::new(&bad),
            Err(AlpacaError::AuthenticationFailed)
        ));
    }
}
