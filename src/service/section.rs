//! Section rules: capacity and temperature bounds, existing warehouse.

use crate::domain::{Section, SectionData, SectionProductsReport, SectionRequest};
use crate::error::AppError;
use crate::service::validation::{at_least, not_greater, positive};
use crate::service::{report_rows, require_parent};
use crate::store::{SectionRepository, WarehouseRepository};
use std::sync::Arc;

pub struct SectionService {
    sections: Arc<dyn SectionRepository>,
    warehouses: Arc<dyn WarehouseRepository>,
}

/// Capacities are non-negative and bounded by `maximum_capacity`; a section
/// never reports a temperature below its own minimum.
fn validate(data: &SectionData) -> Result<(), AppError> {
    positive(data.section_number, "section_number")?;
    positive(data.product_type_id, "product_type_id")?;
    at_least(data.current_capacity, 0, "current_capacity")?;
    at_least(data.minimum_capacity, 0, "minimum_capacity")?;
    at_least(data.maximum_capacity, 0, "maximum_capacity")?;
    not_greater(data.minimum_capacity, "minimum_capacity", data.maximum_capacity, "maximum_capacity")?;
    not_greater(data.current_capacity, "current_capacity", data.maximum_capacity, "maximum_capacity")?;
    not_greater(
        data.minimum_temperature,
        "minimum_temperature",
        data.current_temperature,
        "current_temperature",
    )
}

impl SectionService {
    pub fn new(sections: Arc<dyn SectionRepository>, warehouses: Arc<dyn WarehouseRepository>) -> Self {
        Self { sections, warehouses }
    }

    pub async fn get_all(&self) -> Result<Vec<Section>, AppError> {
        self.sections.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Section, AppError> {
        self.sections
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("section", id))
    }

    pub async fn create(&self, req: SectionRequest) -> Result<Section, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.sections.exists_section_number(data.section_number).await? {
            return Err(AppError::duplicate("section_number", data.section_number));
        }
        require_parent(self.warehouses.exists(data.warehouse_id).await?, "warehouse_id", data.warehouse_id)?;
        let section = self.sections.create(&data).await?;
        tracing::info!(id = section.id, section_number = section.data.section_number, "section created");
        Ok(section)
    }

    pub async fn update(&self, id: i64, req: SectionRequest) -> Result<Section, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.section_number != current.data.section_number
            && self.sections.exists_section_number(data.section_number).await?
        {
            return Err(AppError::duplicate("section_number", data.section_number));
        }
        if data.warehouse_id != current.data.warehouse_id {
            require_parent(self.warehouses.exists(data.warehouse_id).await?, "warehouse_id", data.warehouse_id)?;
        }
        self.sections.update(id, &data).await?;
        tracing::info!(id, "section updated");
        Ok(Section { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.sections.delete(id).await?;
        tracing::info!(id, "section deleted");
        Ok(())
    }

    pub async fn report_products(&self, id: Option<i64>) -> Result<Vec<SectionProductsReport>, AppError> {
        let rows = self.sections.report_products(id).await?;
        report_rows(rows, id, "section")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockSectionRepository, MockWarehouseRepository};
    use mockall::predicate::*;

    fn data() -> SectionData {
        SectionData {
            section_number: 1,
            current_temperature: 2.0,
            minimum_temperature: -4.0,
            current_capacity: 50,
            minimum_capacity: 10,
            maximum_capacity: 100,
            warehouse_id: 1,
            product_type_id: 3,
        }
    }

    fn service(sections: MockSectionRepository, warehouses: MockWarehouseRepository) -> SectionService {
        SectionService::new(Arc::new(sections), Arc::new(warehouses))
    }

    #[test]
    fn capacity_invariants() {
        assert!(validate(&data()).is_ok());
        let over = SectionData {
            current_capacity: 101,
            ..data()
        };
        assert!(validate(&over).is_err());
        let inverted = SectionData {
            minimum_capacity: 200,
            ..data()
        };
        assert!(validate(&inverted).is_err());
        let too_cold = SectionData {
            current_temperature: -10.0,
            ..data()
        };
        assert!(validate(&too_cold).is_err());
    }

    #[tokio::test]
    async fn update_revalidates_merged_record() {
        let mut sections = MockSectionRepository::new();
        sections
            .expect_get()
            .returning(|id| Ok(Some(Section { id, data: data() })));
        sections.expect_update().never();

        let req = SectionRequest {
            maximum_capacity: Some(20),
            ..Default::default()
        };
        let err = service(sections, MockWarehouseRepository::new())
            .update(1, req)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation: current_capacity must not be greater than maximum_capacity"
        );
    }

    #[tokio::test]
    async fn create_requires_warehouse() {
        let mut sections = MockSectionRepository::new();
        sections.expect_exists_section_number().with(eq(1)).returning(|_| Ok(false));
        sections.expect_create().never();
        let mut warehouses = MockWarehouseRepository::new();
        warehouses.expect_exists().with(eq(1)).returning(|_| Ok(false));

        let req = SectionRequest {
            section_number: Some(1),
            current_temperature: Some(2.0),
            minimum_temperature: Some(-4.0),
            current_capacity: Some(50),
            minimum_capacity: Some(10),
            maximum_capacity: Some(100),
            warehouse_id: Some(1),
            product_type_id: Some(3),
        };
        assert!(matches!(
            service(sections, warehouses).create(req).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn report_single_section() {
        let mut sections = MockSectionRepository::new();
        sections.expect_report_products().with(eq(Some(1))).returning(|_| {
            Ok(vec![SectionProductsReport {
                section_id: 1,
                section_number: 1,
                products_count: 4,
            }])
        });
        let rows = service(sections, MockWarehouseRepository::new())
            .report_products(Some(1))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].products_count, 4);
    }
}
