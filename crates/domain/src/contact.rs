//! Contact registry: the people the Batcomputer keeps on file.

use common::RecordId;
use record_store::{Record, RecordQuery, RecordStore, StoreError, Stored};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result, ValidationError};
use crate::value_objects::TrustLevel;

/// A registered contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub affiliation: Option<String>,
    pub trust_level: TrustLevel,
}

impl Record for Contact {
    const KIND: &'static str = "Contact";

    fn name(&self) -> &str {
        &self.name
    }
}

fn default_trust_level() -> i64 {
    i64::from(TrustLevel::default().get())
}

/// Request body for registering a contact.
///
/// `trust_level` is kept raw here so that an out-of-range value surfaces as a
/// domain validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default = "default_trust_level")]
    pub trust_level: i64,
}

impl NewContact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: None,
            trust_level: default_trust_level(),
        }
    }

    pub fn affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn trust_level(mut self, level: i64) -> Self {
        self.trust_level = level;
        self
    }

    pub fn validate(self) -> std::result::Result<Contact, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        Ok(Contact {
            name: name.to_string(),
            affiliation: self.affiliation,
            trust_level: TrustLevel::new(self.trust_level)?,
        })
    }
}

/// Lookup, creation, listing and reset over the contact store.
pub struct ContactRegistry<S: RecordStore<Contact>> {
    store: S,
}

impl<S: RecordStore<Contact>> ContactRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the contact stored under `id`.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: RecordId) -> Result<Stored<Contact>> {
        self.store.get(id).await.map_err(|err| match err {
            StoreError::NotFound { id, .. } => DomainError::ContactNotFound(id.to_string()),
            other => other.into(),
        })
    }

    /// Validates and registers a contact.
    ///
    /// Fails with `DuplicateContact` if a contact with the same name (ignoring
    /// case) is already registered; the registry is left unchanged.
    #[tracing::instrument(skip(self, contact), fields(name = %contact.name))]
    pub async fn register(&self, contact: NewContact) -> Result<Stored<Contact>> {
        let contact = contact.validate()?;
        let stored = self.store.create(contact).await.map_err(|err| match err {
            StoreError::Conflict { name, .. } => DomainError::DuplicateContact(name),
            other => other.into(),
        })?;

        metrics::counter!("contacts_created_total").increment(1);
        tracing::info!(id = %stored.id, "contact added to registry");
        Ok(stored)
    }

    /// Returns a page of contacts in identifier order.
    pub async fn list(&self, query: RecordQuery) -> Result<Vec<Stored<Contact>>> {
        Ok(self.store.list(query).await?)
    }

    /// Removes every contact. Identifiers are not reused afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.store.clear().await?;
        tracing::info!(removed, "contact registry cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use record_store::InMemoryRecordStore;

    use super::*;

    fn registry() -> ContactRegistry<InMemoryRecordStore<Contact>> {
        ContactRegistry::new(InMemoryRecordStore::new())
    }

    #[tokio::test]
    async fn register_then_get() {
        let registry = registry();

        let created = registry
            .register(NewContact::new("Alfred Pennyworth").affiliation("Wayne Enterprises").trust_level(5))
            .await
            .unwrap();
        assert_eq!(created.id, RecordId::new(1));
        assert_eq!(created.record.trust_level.get(), 5);

        let fetched = registry.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_name_in_different_case_is_rejected() {
        let registry = registry();
        registry
            .register(NewContact::new("Selina Kyle").trust_level(3))
            .await
            .unwrap();

        let err = registry
            .register(NewContact::new("selina kyle"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateContact(ref name) if name == "selina kyle"));
        assert_eq!(err.to_string(), "Contact named 'selina kyle' already exists.");
        assert_eq!(registry.list(RecordQuery::all()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_contact_is_not_found() {
        let registry = registry();

        let err = registry.get(RecordId::new(7)).await.unwrap_err();
        assert_eq!(err.to_string(), "Contact with ID 7 not found.");
    }

    #[tokio::test]
    async fn out_of_range_trust_level_is_a_validation_error() {
        let registry = registry();

        let err = registry
            .register(NewContact::new("Harvey Dent").trust_level(9))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::TrustLevelOutOfRange(9))
        ));
    }

    #[tokio::test]
    async fn clear_then_lookup_is_not_found() {
        let registry = registry();
        let created = registry
            .register(NewContact::new("James Gordon").affiliation("GCPD"))
            .await
            .unwrap();

        assert_eq!(registry.clear().await.unwrap(), 1);
        assert!(matches!(
            registry.get(created.id).await,
            Err(DomainError::ContactNotFound(_))
        ));
    }

    #[test]
    fn new_contact_defaults_trust_level_to_three() {
        let contact: NewContact = serde_json::from_str(r#"{"name": "Lucius Fox"}"#).unwrap();
        assert_eq!(contact.trust_level, 3);
        assert_eq!(contact.validate().unwrap().trust_level.get(), 3);
    }
}
