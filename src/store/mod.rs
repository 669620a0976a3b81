//! Repository traits and their PostgreSQL implementations. Every statement is a
//! literal, parameterized query; errors bubble up as `AppError::Db` and are
//! classified by SQLSTATE at the HTTP boundary.

mod buyer;
mod carrier;
mod employee;
mod inbound_order;
mod locality;
mod product;
mod product_batch;
mod product_record;
mod purchase_order;
mod section;
mod seller;
mod warehouse;

pub use buyer::*;
pub use carrier::*;
pub use employee::*;
pub use inbound_order::*;
pub use locality::*;
pub use product::*;
pub use product_batch::*;
pub use product_record::*;
pub use purchase_order::*;
pub use section::*;
pub use seller::*;
pub use warehouse::*;

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgQueryResult;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::sync::Arc;

/// One handle per resource table, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub localities: Arc<dyn LocalityRepository>,
    pub sellers: Arc<dyn SellerRepository>,
    pub warehouses: Arc<dyn WarehouseRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub product_records: Arc<dyn ProductRecordRepository>,
    pub product_batches: Arc<dyn ProductBatchRepository>,
    pub carriers: Arc<dyn CarrierRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub inbound_orders: Arc<dyn InboundOrderRepository>,
    pub buyers: Arc<dyn BuyerRepository>,
    pub purchase_orders: Arc<dyn PurchaseOrderRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Repositories {
            localities: Arc::new(PgLocalityRepository::new(pool.clone())),
            sellers: Arc::new(PgSellerRepository::new(pool.clone())),
            warehouses: Arc::new(PgWarehouseRepository::new(pool.clone())),
            sections: Arc::new(PgSectionRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            product_records: Arc::new(PgProductRecordRepository::new(pool.clone())),
            product_batches: Arc::new(PgProductBatchRepository::new(pool.clone())),
            carriers: Arc::new(PgCarrierRepository::new(pool.clone())),
            employees: Arc::new(PgEmployeeRepository::new(pool.clone())),
            inbound_orders: Arc::new(PgInboundOrderRepository::new(pool.clone())),
            buyers: Arc::new(PgBuyerRepository::new(pool.clone())),
            purchase_orders: Arc::new(PgPurchaseOrderRepository::new(pool)),
        }
    }
}

/// An UPDATE or DELETE by primary key that touched nothing means the row is gone.
pub(crate) fn expect_one_row(result: PgQueryResult, kind: &str, id: i64) -> Result<(), AppError> {
    if result.rows_affected() == 0 {
        return Err(AppError::not_found(kind, id));
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
