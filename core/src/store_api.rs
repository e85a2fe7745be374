//! Operations on the `store` resource: inventory and orders.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::{parse_empty, parse_json, send, OperationRequest};
use crate::configuration::Configuration;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::Order;

/// Client for `/store/*`. Stateless apart from the shared configuration.
#[derive(Debug, Clone)]
pub struct StoreApi {
    configuration: Arc<Configuration>,
}

impl StoreApi {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn build_get_inventory(&self) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Get, "/store/inventory").build()
    }

    /// Pet counts keyed by status. `GET /store/inventory`
    ///
    /// Keys are kept as strings: the service reports whatever statuses it
    /// has stored, which is not guaranteed to stay within `PetStatus`.
    pub async fn get_inventory(&self) -> Result<BTreeMap<String, i32>, ApiError> {
        let request = self.build_get_inventory();
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_place_order(&self, order: &Order) -> Result<HttpRequest, ApiError> {
        Ok(OperationRequest::new(&self.configuration, HttpMethod::Post, "/store/order")
            .json_body(order)?
            .build())
    }

    /// `POST /store/order`
    pub async fn place_order(&self, order: &Order) -> Result<Order, ApiError> {
        let request = self.build_place_order(order)?;
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_get_order_by_id(&self, order_id: i64) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Get, format!("/store/order/{order_id}"))
            .build()
    }

    /// `GET /store/order/{orderId}`
    pub async fn get_order_by_id(&self, order_id: i64) -> Result<Order, ApiError> {
        let request = self.build_get_order_by_id(order_id);
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_delete_order(&self, order_id: i64) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Delete, format!("/store/order/{order_id}"))
            .build()
    }

    /// `DELETE /store/order/{orderId}`
    pub async fn delete_order(&self, order_id: i64) -> Result<(), ApiError> {
        let request = self.build_delete_order(order_id);
        parse_empty(send(&self.configuration, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::OrderStatus;
    use crate::http::HttpResponse;
    use crate::transport::MockTransport;

    fn api(transport: &MockTransport) -> StoreApi {
        let config = Configuration::builder("http://localhost:3000/api/v3")
            .transport(Arc::new(transport.clone()))
            .build()
            .unwrap();
        StoreApi::new(Arc::new(config))
    }

    #[test]
    fn build_requests_use_store_paths() {
        let api = api(&MockTransport::new());

        let req = api.build_get_inventory();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v3/store/inventory");

        let req = api.build_get_order_by_id(5);
        assert_eq!(req.url, "http://localhost:3000/api/v3/store/order/5");

        let req = api.build_delete_order(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_place_order_serializes_status_literal() {
        let order = Order {
            id: Some(10),
            pet_id: Some(198772),
            quantity: Some(7),
            status: Some(OrderStatus::Approved),
            complete: Some(true),
            ..Default::default()
        };
        let req = api(&MockTransport::new()).build_place_order(&order).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"id":10,"petId":198772,"quantity":7,"status":"approved","complete":true})
        );
    }

    #[tokio::test]
    async fn get_inventory_decodes_counts() {
        let transport = MockTransport::new();
        transport.push_response(HttpResponse::ok_json(r#"{"available":3,"sold":1,"weird":2}"#));
        let inventory = api(&transport).get_inventory().await.unwrap();
        assert_eq!(inventory.get("available"), Some(&3));
        assert_eq!(inventory.get("weird"), Some(&2));
        assert_eq!(inventory.len(), 3);
    }

    #[tokio::test]
    async fn get_order_by_id_rejects_unknown_status() {
        let transport = MockTransport::new();
        transport.push_response(HttpResponse::ok_json(r#"{"id":1,"status":"lost"}"#));
        let err = api(&transport).get_order_by_id(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn delete_order_maps_404() {
        let transport = MockTransport::new();
        transport.push_response(HttpResponse::with_status(404, "Order not found"));
        let err = api(&transport).delete_order(9).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
