use chrono::Utc;
use std::sync::Arc;

use crate::db::repository::{RentalStore, Repository};
use crate::errors::RentalError;
use crate::models::{customer::Customer, membership::Membership};
use crate::services::master_data_service::MasterDataService;

/// Membership management on top of the plain customer CRUD.
pub struct CustomerService<S> {
    store: Arc<S>,
}

impl<S: RentalStore> CustomerService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn customers(&self) -> MasterDataService<S, Customer> {
        MasterDataService::new(Arc::clone(&self.store))
    }

    pub async fn assign_membership(
        &self,
        customer_id: &str,
        membership_id: &str,
    ) -> Result<Customer, RentalError> {
        let mut customer = self.customers().get(customer_id).await?;
        if <S as Repository<Membership>>::find_by_id(&self.store, membership_id)
            .await?
            .is_none()
        {
            return Err(RentalError::MembershipNotFound(membership_id.to_string()));
        }

        customer.membership_id = Some(membership_id.to_string());
        customer.updated_at = Some(Utc::now());
        self.customers().save(customer_id, customer).await
    }

    pub async fn remove_membership(&self, customer_id: &str) -> Result<Customer, RentalError> {
        let mut customer = self.customers().get(customer_id).await?;
        customer.membership_id = None;
        customer.updated_at = Some(Utc::now());
        self.customers().save(customer_id, customer).await
    }
}
