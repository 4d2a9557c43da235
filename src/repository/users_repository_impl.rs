use super::{Error, UsersRepository};
use axum::async_trait;
use bson::{doc, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::Database;

pub struct UsersRepositoryConfig {
    pub collection: String,
    pub device_token_field: String,
}

pub struct UsersRepositoryImpl {
    config: UsersRepositoryConfig,
    database: Database,
}

impl UsersRepositoryImpl {
    pub fn new(config: UsersRepositoryConfig, database: Database) -> Self {
        Self { config, database }
    }
}

#[async_trait]
impl UsersRepository for UsersRepositoryImpl {
    async fn find_device_tokens(&self) -> Result<Vec<Option<String>>, Error> {
        let field = self.config.device_token_field.as_str();

        let mut projection = doc! { "_id": 0 };
        projection.insert(field, 1);

        let documents = self
            .database
            .collection::<Document>(&self.config.collection)
            .find(doc! {})
            .projection(projection)
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        tracing::debug!(
            collection = self.config.collection,
            count = documents.len(),
            "read user records"
        );

        let tokens = documents
            .iter()
            .map(|document| device_token(document, field))
            .collect();

        Ok(tokens)
    }
}

fn device_token(document: &Document, field: &str) -> Option<String> {
    match document.get(field) {
        Some(Bson::String(token)) => Some(token.clone()),
        _ => None,
    }
}
