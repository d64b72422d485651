use crate::{
    db::DbPool,
    entities::part,
    errors::ServiceError,
    models::{paging, Availability, PartCategory, PartDetails},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// A part as returned by the API: the stored row plus its decoded detail
/// union and derived availability.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PartView {
    pub id: Uuid,
    pub part_number: String,
    pub name: String,
    pub category: PartCategory,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub compatibility: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub availability: Availability,
    pub vendor_id: Option<Uuid>,
    pub details: PartDetails,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl PartView {
    pub fn from_model(model: part::Model) -> Result<Self, ServiceError> {
        let details: PartDetails = serde_json::from_value(model.details.clone())
            .unwrap_or_else(|_| PartDetails::empty(model.category));
        Ok(Self {
            id: model.id,
            part_number: model.part_number,
            name: model.name,
            category: model.category,
            subcategory: model.subcategory,
            brand: model.brand,
            description: model.description,
            compatibility: model.compatibility,
            price: model.price,
            quantity: model.quantity,
            min_quantity: model.min_quantity,
            availability: Availability::derive(model.quantity, model.min_quantity),
            vendor_id: model.vendor_id,
            details,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreatePartRequest {
    #[validate(length(min = 1, max = 100))]
    pub part_number: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: PartCategory,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub compatibility: Option<String>,
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub min_quantity: i32,
    pub vendor_id: Option<Uuid>,
    /// Category-specific attributes. When omitted, an empty record of the
    /// part's category is stored.
    pub details: Option<PartDetails>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdatePartRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub compatibility: Option<String>,
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,
    pub details: Option<PartDetails>,
}

/// Filters for the catalog list endpoint. `search` matches part number,
/// name, brand, description, compatibility, and detail text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub vendor_id: Option<Uuid>,
}

/// Catalog service: part CRUD plus filtered, paginated search.
#[derive(Clone)]
pub struct CatalogService {
    db_pool: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request))]
    pub async fn create_part(
        &self,
        request: CreatePartRequest,
    ) -> Result<PartView, ServiceError> {
        request.validate()?;
        if request.price < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Part price must be non-negative".into(),
            ));
        }

        let details = match request.details {
            Some(details) if details.category() != request.category => {
                return Err(ServiceError::InvalidInput(format!(
                    "Details are tagged {} but the part is {}",
                    details.category(),
                    request.category
                )));
            }
            Some(details) => details,
            None => PartDetails::empty(request.category),
        };

        let existing = part::Entity::find()
            .filter(part::Column::PartNumber.eq(request.part_number.clone()))
            .one(&*self.db_pool)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Part number {} already exists",
                request.part_number
            )));
        }

        let now = Utc::now();
        let model = part::ActiveModel {
            id: Set(Uuid::new_v4()),
            part_number: Set(request.part_number),
            name: Set(request.name),
            category: Set(request.category),
            subcategory: Set(request.subcategory),
            brand: Set(request.brand),
            description: Set(request.description),
            compatibility: Set(request.compatibility),
            price: Set(request.price),
            quantity: Set(request.quantity),
            min_quantity: Set(request.min_quantity),
            vendor_id: Set(request.vendor_id),
            details: Set(serde_json::to_value(&details)
                .map_err(|e| ServiceError::InternalError(e.to_string()))?),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let saved = model.insert(&*self.db_pool).await?;
        info!(part_id = %saved.id, part_number = %saved.part_number, "Part created");
        PartView::from_model(saved)
    }

    #[instrument(skip(self))]
    pub async fn get_part(&self, id: Uuid) -> Result<PartView, ServiceError> {
        let model = part::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Part {} not found", id)))?;
        PartView::from_model(model)
    }

    /// Lists parts matching the filter, paginated. Category matching is
    /// loose (display or wire name, any case); an unknown category yields an
    /// empty page rather than an error.
    #[instrument(skip(self))]
    pub async fn list_parts(
        &self,
        filter: PartFilter,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<(Vec<PartView>, u64, u64), ServiceError> {
        let category = match filter.category.as_deref() {
            Some(raw) => match PartCategory::parse_loose(raw) {
                Some(cat) => Some(cat),
                None => return Ok((Vec::new(), 0, 0)),
            },
            None => None,
        };

        let mut query = part::Entity::find();
        if let Some(cat) = category {
            query = query.filter(part::Column::Category.eq(cat));
        }
        if let Some(vendor_id) = filter.vendor_id {
            query = query.filter(part::Column::VendorId.eq(vendor_id));
        }
        let rows = query
            .order_by_asc(part::Column::Name)
            .all(&*self.db_pool)
            .await?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(PartView::from_model(row)?);
        }

        // Free-text search runs over the decoded views so detail fields
        // participate.
        let views = match filter.search.as_deref() {
            Some(needle) if !needle.trim().is_empty() => {
                filter_by_search(views, needle)
            }
            _ => views,
        };

        let (page, limit) = paging::normalize(page, limit);
        let (page_rows, total, total_pages) = paging::paginate(views, page, limit);
        Ok((page_rows, total, total_pages))
    }

    #[instrument(skip(self, request))]
    pub async fn update_part(
        &self,
        id: Uuid,
        request: UpdatePartRequest,
    ) -> Result<PartView, ServiceError> {
        request.validate()?;
        let model = part::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Part {} not found", id)))?;

        if let Some(details) = &request.details {
            if details.category() != model.category {
                return Err(ServiceError::InvalidInput(format!(
                    "Details are tagged {} but the part is {}",
                    details.category(),
                    model.category
                )));
            }
        }
        if let Some(price) = request.price {
            if price < Decimal::ZERO {
                return Err(ServiceError::InvalidInput(
                    "Part price must be non-negative".into(),
                ));
            }
        }

        let mut active = model.into_active_model();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(subcategory) = request.subcategory {
            active.subcategory = Set(Some(subcategory));
        }
        if let Some(brand) = request.brand {
            active.brand = Set(Some(brand));
        }
        if let Some(description) = request.description {
            active.description = Set(Some(description));
        }
        if let Some(compatibility) = request.compatibility {
            active.compatibility = Set(Some(compatibility));
        }
        if let Some(price) = request.price {
            active.price = Set(price);
        }
        if let Some(min_quantity) = request.min_quantity {
            active.min_quantity = Set(min_quantity);
        }
        if let Some(details) = request.details {
            active.details = Set(serde_json::to_value(&details)
                .map_err(|e| ServiceError::InternalError(e.to_string()))?);
        }
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db_pool).await?;
        PartView::from_model(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_part(&self, id: Uuid) -> Result<(), ServiceError> {
        let model = part::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Part {} not found", id)))?;
        model.delete(&*self.db_pool).await?;
        info!(part_id = %id, "Part deleted");
        Ok(())
    }

    /// The category picker: wire name, display name, and the detail fields
    /// each category carries.
    pub fn categories(&self) -> Vec<CategoryInfo> {
        use sea_orm::Iterable;
        PartCategory::iter()
            .map(|cat| CategoryInfo {
                name: cat,
                display_name: cat.display_name().to_string(),
                detail_fields: crate::models::part::CATEGORY_FIELDS
                    .get(&cat)
                    .copied()
                    .unwrap_or(&[])
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CategoryInfo {
    pub name: PartCategory,
    pub display_name: String,
    pub detail_fields: Vec<String>,
}

/// Case-insensitive substring match over the textual fields of a part,
/// including its category-specific details.
fn filter_by_search(views: Vec<PartView>, needle: &str) -> Vec<PartView> {
    let needle = needle.trim().to_lowercase();
    views
        .into_iter()
        .filter(|view| {
            let mut haystacks: Vec<&str> = vec![&view.part_number, &view.name];
            if let Some(brand) = &view.brand {
                haystacks.push(brand);
            }
            if let Some(description) = &view.description {
                haystacks.push(description);
            }
            if let Some(compatibility) = &view.compatibility {
                haystacks.push(compatibility);
            }
            if let Some(subcategory) = &view.subcategory {
                haystacks.push(subcategory);
            }
            haystacks.extend(view.details.searchable_text());
            haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn view(name: &str, brand: Option<&str>, details: PartDetails) -> PartView {
        PartView {
            id: Uuid::new_v4(),
            part_number: format!("PN-{}", name.to_uppercase()),
            name: name.to_string(),
            category: details.category(),
            subcategory: None,
            brand: brand.map(String::from),
            description: None,
            compatibility: None,
            price: dec!(19.90),
            quantity: 4,
            min_quantity: 2,
            availability: Availability::derive(4, 2),
            vendor_id: None,
            details,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let views = vec![
            view("Oil Filter", Some("Bosch"), PartDetails::empty(PartCategory::EngineAndFluids)),
            view("Brake Pad Set", None, PartDetails::empty(PartCategory::Brakes)),
        ];
        let hits = filter_by_search(views, "oil");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Oil Filter");
    }

    #[test]
    fn search_matches_detail_fields() {
        let views = vec![view(
            "Engine Oil 5W-30",
            None,
            PartDetails::EngineAndFluids {
                viscosity: Some("5W-30".into()),
                volume_liters: Some(5.0),
                fluid_type: Some("synthetic".into()),
                oem_approval: None,
            },
        )];
        assert_eq!(filter_by_search(views.clone(), "synthetic").len(), 1);
        assert_eq!(filter_by_search(views, "mineral").len(), 0);
    }

    #[test]
    fn search_matches_brand() {
        let views = vec![view(
            "Wiper Blade",
            Some("Valeo"),
            PartDetails::empty(PartCategory::Accessories),
        )];
        assert_eq!(filter_by_search(views, "valeo").len(), 1);
    }
}
