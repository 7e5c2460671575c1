use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document as BsonDocument},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database,
};
use std::time::Duration;

use super::repository::{new_id, Document, Repository, StoreError, StoreHealth};

pub async fn create_mongo_client(uri: &str) -> Result<Client, mongodb::error::Error> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    // Stable API, MongoDB 5.0+
    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client.database("admin").run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("Successfully connected to MongoDB and verified with ping command"),
        Err(e) => {
            log::warn!("Connected to MongoDB but ping test failed: {}", e);
            log::warn!("The API may still work, but some functionality might be impaired");
        }
    }

    Ok(client)
}

/// MongoDB-backed store, one collection per document type.
#[derive(Clone, Debug)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection<T: Document>(&self) -> Collection<T> {
        self.db.collection(T::COLLECTION)
    }
}

impl<T: Document> Repository<T> for MongoStore {
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let cursor = self.collection::<T>().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.collection::<T>().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_field(&self, field: &str, value: Bson) -> Result<Vec<T>, StoreError> {
        let mut filter = BsonDocument::new();
        filter.insert(field, value);
        let cursor = self.collection::<T>().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, mut doc: T) -> Result<T, StoreError> {
        if doc.id().is_none() {
            doc.set_id(new_id());
        }
        self.collection::<T>().insert_one(&doc).await?;
        Ok(doc)
    }

    async fn replace(&self, id: &str, mut doc: T) -> Result<Option<T>, StoreError> {
        doc.set_id(id.to_string());
        let result = self
            .collection::<T>()
            .replace_one(doc! { "_id": id }, &doc)
            .await?;
        if result.matched_count == 0 {
            return Ok(None);
        }
        Ok(Some(doc))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self
            .collection::<T>()
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

impl StoreHealth for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! {"ping": 1}).await?;
        Ok(())
    }
}
