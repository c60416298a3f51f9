use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub type ItemId = u32;

/// A purchasable product. Only the catalog creates items, so they never change
/// once the session has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    unit_price: Decimal,
}

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreItemRequest {
    pub id: ItemId,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    #[validate(custom = "validate_price")]
    pub price: Decimal,
}

impl StoreItemRequest {
    pub fn new(id: ItemId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("Price must not be negative"));
    }
    Ok(())
}

// custom error
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("Validation error for item {id}: {source}")]
    Validation {
        id: ItemId,
        #[source]
        source: validator::ValidationErrors,
    },
}

impl Item {
    pub fn new(request: StoreItemRequest) -> Result<Self, ItemError> {
        request.validate().map_err(|source| ItemError::Validation {
            id: request.id,
            source,
        })?;

        Ok(Self {
            id: request.id,
            name: request.name.trim().to_string(),
            unit_price: request.price,
        })
    }

    /// Builds an item from values already known to be valid.
    pub(crate) fn from_parts(id: ItemId, name: &str, unit_price: Decimal) -> Self {
        Self {
            id,
            name: name.to_string(),
            unit_price,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Product [ID: {}, Name: {}, Price: ${:.2}]",
            self.id, self.name, self.unit_price
        )
    }
}
