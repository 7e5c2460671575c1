#![allow(dead_code)]

use actix_web::{web, App};
use std::sync::Arc;
use std::time::Duration;

use car_rental_api::{
    config::AppConfig,
    db::{
        memory::MemoryStore,
        repository::{RentalStore, Repository},
    },
    models::{
        booking_type::{BookingKind, BookingType},
        car::Car,
        customer::Customer,
        driver::Driver,
        membership::Membership,
    },
    routes,
};

pub struct TestApp<S = MemoryStore> {
    pub store: Arc<S>,
    pub config: AppConfig,
}

impl TestApp<MemoryStore> {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl<S: RentalStore> TestApp<S> {
    pub fn with_store(store: S) -> Self {
        let mut config = AppConfig::default();
        config.request_timeout = Duration::from_secs(5);
        Self {
            store: Arc::new(store),
            config,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::from(Arc::clone(&self.store)))
            .app_data(web::Data::new(self.config.clone()))
            .configure(routes::configure::<S>)
    }

    pub async fn add_car(&self, name: &str, daily_rent: i64) -> String {
        let car = Car {
            id: None,
            name: name.to_string(),
            stock: 3,
            daily_rent,
            created_at: None,
            updated_at: None,
        };
        let saved = <S as Repository<Car>>::insert(&self.store, car)
            .await
            .expect("insert car");
        saved.id.expect("car id")
    }

    pub async fn add_membership(&self, name: &str, discount: i64) -> String {
        let membership = Membership {
            id: None,
            membership_name: name.to_string(),
            discount,
            created_at: None,
            updated_at: None,
        };
        let saved = <S as Repository<Membership>>::insert(&self.store, membership)
            .await
            .expect("insert membership");
        saved.id.expect("membership id")
    }

    pub async fn add_customer(&self, nik: &str, membership_id: Option<&str>) -> String {
        let customer = Customer {
            id: None,
            name: format!("Customer {}", nik),
            nik: nik.to_string(),
            phone: "0812000000".to_string(),
            membership_id: membership_id.map(str::to_string),
            created_at: None,
            updated_at: None,
        };
        let saved = <S as Repository<Customer>>::insert(&self.store, customer)
            .await
            .expect("insert customer");
        saved.id.expect("customer id")
    }

    pub async fn add_driver(&self, name: &str, daily_cost: i64) -> String {
        let driver = Driver {
            id: None,
            name: name.to_string(),
            nik: format!("NIK-{}", name),
            phone: "0813000000".to_string(),
            daily_cost,
            created_at: None,
            updated_at: None,
        };
        let saved = <S as Repository<Driver>>::insert(&self.store, driver)
            .await
            .expect("insert driver");
        saved.id.expect("driver id")
    }

    pub async fn add_booking_type(&self, label: &str) -> String {
        let booking_type = BookingType {
            id: None,
            booking_type: label.to_string(),
            description: format!("{} rental", label),
            kind: BookingKind::from_label(label),
            created_at: None,
            updated_at: None,
        };
        let saved = <S as Repository<BookingType>>::insert(&self.store, booking_type)
            .await
            .expect("insert booking type");
        saved.id.expect("booking type id")
    }
}
