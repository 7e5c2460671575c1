use chrono::Utc;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::db::repository::Repository;
use crate::errors::RentalError;
use crate::models::Resource;

/// Plain CRUD over one kind of master data (cars, drivers, customers, ...).
pub struct MasterDataService<S, T> {
    store: Arc<S>,
    _resource: PhantomData<T>,
}

impl<S, T> MasterDataService<S, T>
where
    S: Repository<T>,
    T: Resource,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, RentalError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<T, RentalError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| T::not_found(id))
    }

    pub async fn create(&self, input: T::Input) -> Result<T, RentalError> {
        T::validate(&input).map_err(RentalError::InvalidInput)?;
        let record = T::from_input(input, Utc::now());
        self.ensure_unique(&record, None).await?;

        let created = self.store.insert(record).await?;
        log::info!(
            "Created {} in {}",
            created.id().unwrap_or_default(),
            T::COLLECTION
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: T::Input) -> Result<T, RentalError> {
        let mut record = self.get(id).await?;
        T::validate(&input).map_err(RentalError::InvalidInput)?;
        record.apply_input(input, Utc::now());
        self.ensure_unique(&record, Some(id)).await?;

        self.save(id, record).await
    }

    /// Stores an already modified record under `id`.
    pub async fn save(&self, id: &str, record: T) -> Result<T, RentalError> {
        let saved = self
            .store
            .replace(id, record)
            .await?
            .ok_or_else(|| T::not_found(id))?;
        log::info!("Updated {} in {}", id, T::COLLECTION);
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> Result<T, RentalError> {
        let record = self.get(id).await?;
        if !self.store.delete(id).await? {
            return Err(T::not_found(id));
        }
        log::info!("Deleted {} from {}", id, T::COLLECTION);
        Ok(record)
    }

    async fn ensure_unique(&self, record: &T, own_id: Option<&str>) -> Result<(), RentalError> {
        let Some((field, value)) = record.unique_key() else {
            return Ok(());
        };

        let existing = self.store.find_by_field(field, value.clone()).await?;
        if existing.iter().any(|other| other.id() != own_id) {
            return Err(RentalError::Conflict(format!(
                "{} {} already exists",
                field, value
            )));
        }
        Ok(())
    }
}
