//! Gadget inventory: records, the creation payload, and the service.

use common::RecordId;
use record_store::{Record, RecordQuery, RecordStore, StoreError, Stored};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result, ValidationError};

/// A piece of equipment in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gadget {
    pub name: String,
    #[serde(rename = "type", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub in_stock: bool,
}

impl Gadget {
    pub fn new(name: impl Into<String>, category: impl Into<String>, in_stock: bool) -> Self {
        Self {
            name: name.into(),
            category: Some(category.into()),
            description: None,
            in_stock,
        }
    }
}

impl Record for Gadget {
    const KIND: &'static str = "Gadget";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Request body for adding a gadget specification.
#[derive(Debug, Clone, Deserialize)]
pub struct GadgetSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub in_stock: bool,
}

impl GadgetSpec {
    /// Validates the request and turns it into a storable gadget.
    pub fn validate(self) -> std::result::Result<Gadget, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        Ok(Gadget {
            name: name.to_string(),
            category: self.category,
            description: self.description,
            in_stock: self.in_stock,
        })
    }
}

/// The gadgets the Batcave starts out with.
pub fn default_inventory() -> Vec<Gadget> {
    vec![
        Gadget::new("Batarang", "Standard Issue", true),
        Gadget::new("Grappling Hook", "Mobility", true),
        Gadget::new("Smoke Pellet", "Stealth", false),
        Gadget::new("Remote Hacking Device", "Tech", true),
        Gadget::new("Explosive Gel", "Demolition", true),
    ]
}

/// How many gadget types are currently in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    pub in_stock: usize,
    pub total: usize,
}

impl StockSummary {
    pub fn of(gadgets: &[Stored<Gadget>]) -> Self {
        Self {
            in_stock: gadgets.iter().filter(|g| g.record.in_stock).count(),
            total: gadgets.len(),
        }
    }
}

impl std::fmt::Display for StockSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} gadget types in stock.", self.in_stock, self.total)
    }
}

/// Lookup and creation over the gadget store.
pub struct InventoryService<S: RecordStore<Gadget>> {
    store: S,
}

impl<S: RecordStore<Gadget>> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the gadget stored under `id`.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: RecordId) -> Result<Stored<Gadget>> {
        self.store.get(id).await.map_err(|err| match err {
            StoreError::NotFound { id, .. } => DomainError::GadgetNotFound(id.to_string()),
            other => other.into(),
        })
    }

    /// Validates and adds a gadget, rejecting names already in the inventory.
    #[tracing::instrument(skip(self, spec), fields(name = %spec.name))]
    pub async fn create(&self, spec: GadgetSpec) -> Result<Stored<Gadget>> {
        let gadget = spec.validate()?;
        let stored = self.store.create(gadget).await.map_err(|err| match err {
            StoreError::Conflict { name, .. } => DomainError::DuplicateGadget(name),
            other => other.into(),
        })?;

        metrics::counter!("gadgets_created_total").increment(1);
        tracing::info!(id = %stored.id, "gadget added to inventory");
        Ok(stored)
    }

    /// Returns every gadget in identifier order.
    pub async fn all(&self) -> Result<Vec<Stored<Gadget>>> {
        Ok(self.store.list(RecordQuery::all()).await?)
    }

    /// Counts gadgets flagged as in stock.
    pub async fn stock_summary(&self) -> Result<StockSummary> {
        Ok(StockSummary::of(&self.all().await?))
    }
}

#[cfg(test)]
mod tests {
    use record_store::InMemoryRecordStore;

    use super::*;

    fn seeded() -> InventoryService<InMemoryRecordStore<Gadget>> {
        InventoryService::new(InMemoryRecordStore::with_records(default_inventory()).unwrap())
    }

    fn spec(name: &str) -> GadgetSpec {
        GadgetSpec {
            name: name.to_string(),
            category: None,
            description: Some("Disrupts listening devices".to_string()),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn get_seeded_gadget() {
        let inventory = seeded();

        let gadget = inventory.get(RecordId::new(1)).await.unwrap();
        assert_eq!(gadget.record.name, "Batarang");
        assert_eq!(gadget.record.category.as_deref(), Some("Standard Issue"));
    }

    #[tokio::test]
    async fn get_missing_gadget_names_the_id() {
        let inventory = seeded();

        let err = inventory.get(RecordId::new(99)).await.unwrap_err();
        assert!(matches!(err, DomainError::GadgetNotFound(ref id) if id == "99"));
        assert_eq!(err.to_string(), "Gadget with ID 99 not found in inventory.");
    }

    #[tokio::test]
    async fn create_gadget_assigns_next_id() {
        let inventory = seeded();

        let created = inventory.create(spec("Sonic Emitter")).await.unwrap();
        assert_eq!(created.id, RecordId::new(6));
        assert_eq!(inventory.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_duplicate_of_seeded_gadget_is_rejected() {
        let inventory = seeded();

        let err = inventory.create(spec("batarang")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gadget specification for 'batarang' already exists."
        );
        assert_eq!(inventory.all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let inventory = seeded();

        let err = inventory.create(spec("   ")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::EmptyField("name"))
        ));
    }

    #[tokio::test]
    async fn stock_summary_counts_in_stock() {
        let inventory = seeded();

        let summary = inventory.stock_summary().await.unwrap();
        assert_eq!(summary, StockSummary { in_stock: 4, total: 5 });
        assert_eq!(summary.to_string(), "4/5 gadget types in stock.");
    }

    #[tokio::test]
    async fn summary_of_a_listing_matches_that_listing() {
        let inventory = seeded();
        let mut gadgets = inventory.all().await.unwrap();
        gadgets.truncate(3);

        assert_eq!(
            StockSummary::of(&gadgets),
            StockSummary { in_stock: 2, total: 3 }
        );
        assert_eq!(StockSummary::of(&[]), StockSummary { in_stock: 0, total: 0 });
    }

    #[test]
    fn gadget_serializes_category_as_type() {
        let json = serde_json::to_value(Gadget::new("Batarang", "Standard Issue", true)).unwrap();
        assert_eq!(json["type"], "Standard Issue");
        assert_eq!(json["in_stock"], true);
    }
}
