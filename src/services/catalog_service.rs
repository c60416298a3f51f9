use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::item::{Item, ItemError, ItemId, StoreItemRequest};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog must contain at least one item")]
    Empty,

    #[error("Duplicate item id {id} in catalog")]
    DuplicateId { id: ItemId },

    #[error("Invalid catalog item: {0}")]
    InvalidItem(#[from] ItemError),

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The fixed list of products offered for the whole session.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// The products offered when no catalog file is configured.
    pub fn builtin() -> Self {
        Self {
            items: vec![
                Item::from_parts(1, "Laptop", Decimal::new(120000, 2)),
                Item::from_parts(2, "Smartphone", Decimal::new(80000, 2)),
                Item::from_parts(3, "Headphones", Decimal::new(15000, 2)),
                Item::from_parts(4, "Keyboard", Decimal::new(10000, 2)),
            ],
        }
    }

    pub fn from_requests(requests: Vec<StoreItemRequest>) -> Result<Self, CatalogError> {
        if requests.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(requests.len());
        let mut items = Vec::with_capacity(requests.len());
        for request in requests {
            if !seen.insert(request.id) {
                return Err(CatalogError::DuplicateId { id: request.id });
            }
            let item = Item::new(request)?;
            debug!("Catalog item: {}", item);
            items.push(item);
        }

        debug!("Catalog built with {} items", items.len());
        Ok(Self { items })
    }

    /// Loads a JSON array of `{ "id", "name", "price" }` objects.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!("Loading catalog from {}", path.display());

        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let requests: Vec<StoreItemRequest> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_requests(requests)
    }

    pub fn list_all(&self) -> &[Item] {
        &self.items
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
