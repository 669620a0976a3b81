//! Inbound order rules: unique order number and three referenced parents.

use crate::domain::{InboundOrder, InboundOrderData, InboundOrderRequest};
use crate::error::AppError;
use crate::service::require_parent;
use crate::service::validation::text;
use crate::store::{EmployeeRepository, InboundOrderRepository, ProductBatchRepository, WarehouseRepository};
use std::sync::Arc;

pub struct InboundOrderService {
    orders: Arc<dyn InboundOrderRepository>,
    employees: Arc<dyn EmployeeRepository>,
    batches: Arc<dyn ProductBatchRepository>,
    warehouses: Arc<dyn WarehouseRepository>,
}

impl InboundOrderService {
    pub fn new(
        orders: Arc<dyn InboundOrderRepository>,
        employees: Arc<dyn EmployeeRepository>,
        batches: Arc<dyn ProductBatchRepository>,
        warehouses: Arc<dyn WarehouseRepository>,
    ) -> Self {
        Self {
            orders,
            employees,
            batches,
            warehouses,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<InboundOrder>, AppError> {
        self.orders.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<InboundOrder, AppError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("inbound order", id))
    }

    /// Checks each referenced row, skipping ids that match the stored order.
    async fn check_parents(&self, data: &InboundOrderData, current: Option<&InboundOrderData>) -> Result<(), AppError> {
        if current.map_or(true, |c| c.employee_id != data.employee_id) {
            require_parent(self.employees.exists(data.employee_id).await?, "employee_id", data.employee_id)?;
        }
        if current.map_or(true, |c| c.product_batch_id != data.product_batch_id) {
            let found = self.batches.exists(data.product_batch_id).await?;
            require_parent(found, "product_batch_id", data.product_batch_id)?;
        }
        if current.map_or(true, |c| c.warehouse_id != data.warehouse_id) {
            require_parent(self.warehouses.exists(data.warehouse_id).await?, "warehouse_id", data.warehouse_id)?;
        }
        Ok(())
    }

    pub async fn create(&self, req: InboundOrderRequest) -> Result<InboundOrder, AppError> {
        let data = req.into_data()?;
        text(&data.order_number, "order_number")?;
        if self.orders.exists_order_number(&data.order_number).await? {
            return Err(AppError::duplicate("order_number", &data.order_number));
        }
        self.check_parents(&data, None).await?;
        let order = self.orders.create(&data).await?;
        tracing::info!(id = order.id, order_number = %order.data.order_number, "inbound order created");
        Ok(order)
    }

    pub async fn update(&self, id: i64, req: InboundOrderRequest) -> Result<InboundOrder, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        text(&data.order_number, "order_number")?;
        if data.order_number != current.data.order_number
            && self.orders.exists_order_number(&data.order_number).await?
        {
            return Err(AppError::duplicate("order_number", &data.order_number));
        }
        self.check_parents(&data, Some(&current.data)).await?;
        self.orders.update(id, &data).await?;
        tracing::info!(id, "inbound order updated");
        Ok(InboundOrder { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.orders.delete(id).await?;
        tracing::info!(id, "inbound order deleted");
        Ok(())
    }
}
