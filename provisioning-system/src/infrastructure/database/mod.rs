mod orm;

pub use orm::OrmRepo;

use anyhow::Context;
use database_model::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};
use tracing::info;

#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let connection = sea_orm::Database::connect(url)
            .await
            .context("Could not connect to database")?;
        Ok(Database { connection })
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Create the missing tables, referenced tables first.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        let backend = self.connection.get_database_backend();
        let schema = Schema::new(backend);
        let mut statements = [
            schema.create_table_from_entity(SecurityGroupEntity),
            schema.create_table_from_entity(ClusterEntity),
            schema.create_table_from_entity(ClusterConfigurationEntity),
        ];
        for statement in statements.iter_mut() {
            statement.if_not_exists();
            self.connection.execute(backend.build(&*statement)).await?;
        }
        info!("Database schema is ready");
        Ok(())
    }
}
