//! Resource routes mounted under `/api/v1`. Report paths are static segments and
//! win over the `/:id` capture on the same prefix.

use crate::handlers::{
    buyer, carrier, employee, inbound_order, locality, product, product_batch, product_record, purchase_order,
    section, seller, warehouse,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/localities", get(locality::list).post(locality::create))
        .route("/localities/reportSellers", get(locality::report_sellers))
        .route("/localities/reportCarriers", get(locality::report_carriers))
        .route(
            "/localities/:id",
            get(locality::read).patch(locality::update).delete(locality::delete),
        )
        .route("/sellers", get(seller::list).post(seller::create))
        .route("/sellers/:id", get(seller::read).patch(seller::update).delete(seller::delete))
        .route("/warehouses", get(warehouse::list).post(warehouse::create))
        .route(
            "/warehouses/:id",
            get(warehouse::read).patch(warehouse::update).delete(warehouse::delete),
        )
        .route("/sections", get(section::list).post(section::create))
        .route("/sections/reportProducts", get(section::report_products))
        .route("/sections/:id", get(section::read).patch(section::update).delete(section::delete))
        .route("/products", get(product::list).post(product::create))
        .route("/products/reportRecords", get(product::report_records))
        .route("/products/:id", get(product::read).patch(product::update).delete(product::delete))
        .route("/productRecords", get(product_record::list).post(product_record::create))
        .route(
            "/productRecords/:id",
            get(product_record::read)
                .patch(product_record::update)
                .delete(product_record::delete),
        )
        .route("/productBatches", get(product_batch::list).post(product_batch::create))
        .route(
            "/productBatches/:id",
            get(product_batch::read)
                .patch(product_batch::update)
                .delete(product_batch::delete),
        )
        .route("/carriers", get(carrier::list).post(carrier::create))
        .route("/carriers/:id", get(carrier::read).patch(carrier::update).delete(carrier::delete))
        .route("/employees", get(employee::list).post(employee::create))
        .route("/employees/reportInboundOrders", get(employee::report_inbound_orders))
        .route(
            "/employees/:id",
            get(employee::read).patch(employee::update).delete(employee::delete),
        )
        .route("/inboundOrders", get(inbound_order::list).post(inbound_order::create))
        .route(
            "/inboundOrders/:id",
            get(inbound_order::read)
                .patch(inbound_order::update)
                .delete(inbound_order::delete),
        )
        .route("/buyers", get(buyer::list).post(buyer::create))
        .route("/buyers/reportPurchaseOrders", get(buyer::report_purchase_orders))
        .route("/buyers/:id", get(buyer::read).patch(buyer::update).delete(buyer::delete))
        .route("/purchaseOrders", get(purchase_order::list).post(purchase_order::create))
        .route(
            "/purchaseOrders/:id",
            get(purchase_order::read)
                .patch(purchase_order::update)
                .delete(purchase_order::delete),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Buyer, BuyerData, BuyerPurchaseOrdersReport, LocalitySellersReport, Seller, SellerData};
    use crate::error::testing::sqlstate_error;
    use crate::error::AppError;
    use crate::store::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use mockall::predicate::*;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Repositories with no expectations; any call panics the test.
    fn empty_repos() -> Repositories {
        Repositories {
            localities: Arc::new(MockLocalityRepository::new()),
            sellers: Arc::new(MockSellerRepository::new()),
            warehouses: Arc::new(MockWarehouseRepository::new()),
            sections: Arc::new(MockSectionRepository::new()),
            products: Arc::new(MockProductRepository::new()),
            product_records: Arc::new(MockProductRecordRepository::new()),
            product_batches: Arc::new(MockProductBatchRepository::new()),
            carriers: Arc::new(MockCarrierRepository::new()),
            employees: Arc::new(MockEmployeeRepository::new()),
            inbound_orders: Arc::new(MockInboundOrderRepository::new()),
            buyers: Arc::new(MockBuyerRepository::new()),
            purchase_orders: Arc::new(MockPurchaseOrderRepository::new()),
        }
    }

    fn buyer_repos(buyers: MockBuyerRepository) -> Repositories {
        Repositories {
            buyers: Arc::new(buyers),
            ..empty_repos()
        }
    }

    fn buyer(id: i64) -> Buyer {
        Buyer {
            id,
            data: BuyerData {
                card_number_id: "402323".into(),
                first_name: "Jhon".into(),
                last_name: "Doe".into(),
            },
        }
    }

    async fn send(repos: Repositories, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let app = api_routes(AppState::new(repos));
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn list_wraps_rows_with_count() {
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_get_all().returning(|| Ok(vec![buyer(1), buyer(2)]));
        let (status, body) = send(buyer_repos(buyers), Method::GET, "/buyers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["count"], 2);
        assert_eq!(body["data"][0]["id"], 1);
        assert_eq!(body["data"][0]["card_number_id"], "402323");
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let (status, body) = send(empty_repos(), Method::GET, "/buyers/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_get().with(eq(9)).returning(|_| Ok(None));
        let (status, body) = send(buyer_repos(buyers), Method::GET, "/buyers/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn create_returns_created_row() {
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_exists_card_number().returning(|_| Ok(false));
        buyers
            .expect_create()
            .returning(|d| Ok(Buyer { id: 5, data: d.clone() }));
        let body = json!({"card_number_id": "402323", "first_name": "Jhon", "last_name": "Doe"});
        let (status, body) = send(buyer_repos(buyers), Method::POST, "/buyers", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], 5);
        assert_eq!(body["data"]["last_name"], "Doe");
    }

    #[tokio::test]
    async fn create_with_missing_field_is_unprocessable() {
        let body = json!({"card_number_id": "402323", "first_name": "Jhon"});
        let (status, body) = send(empty_repos(), Method::POST, "/buyers", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["message"], "validation: last_name is required");
    }

    #[tokio::test]
    async fn delete_answers_no_content() {
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_delete().with(eq(1)).returning(|_| Ok(()));
        let (status, body) = send(buyer_repos(buyers), Method::DELETE, "/buyers/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let mut buyers = MockBuyerRepository::new();
        buyers
            .expect_delete()
            .returning(|id| Err(AppError::not_found("buyer", id)));
        let (status, _) = send(buyer_repos(buyers), Method::DELETE, "/buyers/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_blocked_by_children_conflicts() {
        let mut buyers = MockBuyerRepository::new();
        buyers
            .expect_delete()
            .with(eq(1))
            .returning(|_| Err(AppError::Db(sqlstate_error("23503"))));
        let (status, body) = send(buyer_repos(buyers), Method::DELETE, "/buyers/1", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "conflict");
    }

    #[tokio::test]
    async fn report_with_id_returns_single_object() {
        let mut buyers = MockBuyerRepository::new();
        buyers
            .expect_report_purchase_orders()
            .with(eq(Some(1)))
            .returning(|_| {
                Ok(vec![BuyerPurchaseOrdersReport {
                    id: 1,
                    card_number_id: "402323".into(),
                    first_name: "Jhon".into(),
                    last_name: "Doe".into(),
                    purchase_orders_count: 2,
                }])
            });
        let (status, body) = send(
            buyer_repos(buyers),
            Method::GET,
            "/buyers/reportPurchaseOrders?id=1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["purchase_orders_count"], 2);
        assert!(body.get("meta").is_none());
    }

    #[tokio::test]
    async fn report_without_id_lists_every_row() {
        let mut localities = MockLocalityRepository::new();
        localities.expect_report_sellers().with(eq(None)).returning(|_| {
            Ok(vec![
                LocalitySellersReport {
                    locality_id: 1,
                    locality_name: "Palermo".into(),
                    sellers_count: 3,
                },
                LocalitySellersReport {
                    locality_id: 2,
                    locality_name: "Belgrano".into(),
                    sellers_count: 0,
                },
            ])
        });
        let repos = Repositories {
            localities: Arc::new(localities),
            ..empty_repos()
        };
        let (status, body) = send(repos, Method::GET, "/localities/reportSellers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["count"], 2);
        assert_eq!(body["data"][1]["sellers_count"], 0);
    }

    #[tokio::test]
    async fn report_for_unknown_id_is_not_found() {
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_report_purchase_orders().returning(|_| Ok(vec![]));
        let (status, _) = send(
            buyer_repos(buyers),
            Method::GET,
            "/buyers/reportPurchaseOrders?id=77",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn report_with_bad_id_is_bad_request() {
        let (status, _) = send(empty_repos(), Method::GET, "/localities/reportSellers?id=x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_to_unknown_locality_conflicts() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_get().returning(|id| {
            Ok(Some(Seller {
                id,
                data: SellerData {
                    cid: 10,
                    company_name: "Frescos SA".into(),
                    address: "Calle 1".into(),
                    telephone: "+54 11 4555-1234".into(),
                    locality_id: 1,
                },
            }))
        });
        sellers.expect_update().never();
        let mut localities = MockLocalityRepository::new();
        localities.expect_exists().with(eq(2)).returning(|_| Ok(false));
        let repos = Repositories {
            sellers: Arc::new(sellers),
            localities: Arc::new(localities),
            ..empty_repos()
        };
        let (status, body) = send(repos, Method::PATCH, "/sellers/4", Some(json!({"locality_id": 2}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "conflict: locality_id 2 does not exist");
    }
}
