//! Product entity.

use crate::{Entity, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product record as held by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Unit price, always greater than zero.
    pub price: f64,

    /// Stock keeping unit.
    pub sku: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with a fresh id and both timestamps set to now.
    #[must_use]
    pub fn new(name: String, description: Option<String>, price: f64, sku: String) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name,
            description,
            price,
            sku,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial change set and stamps `updated_at`.
    ///
    /// Fields left as `None` keep their current value. A description of
    /// `Some(None)` clears it.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(sku) = changes.sku {
            self.sku = sku;
        }
        self.touch();
    }

    /// Stamps `updated_at` with the current time.
    pub fn touch(&mut self) {
        let now = Utc::now();
        // Clock skew between calls must never move updated_at backwards.
        self.updated_at = now.max(self.updated_at);
    }
}

impl Entity<ProductId> for Product {
    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// A partial update to a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub sku: Option<String>,
}

impl ProductChanges {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.sku.is_none()
    }
}
