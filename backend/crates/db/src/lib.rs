pub mod growth;
pub mod metric;
pub mod project;
pub mod scaling;
pub mod schema;

use leanval_common::error::{LeanvalError, LeanvalResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use schema::ensure_schema;

/// Create a Postgres connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> LeanvalResult<PgPool> {
    tracing::info!("connecting to database");
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| LeanvalError::Database(e.to_string()))
}

pub(crate) fn db_err(e: sqlx::Error) -> LeanvalError {
    LeanvalError::Database(e.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_pool_fails_with_invalid_url() {
        let result = create_pool("postgres://invalid:5432/nonexistent").await;
        assert!(result.is_err());
    }
}
