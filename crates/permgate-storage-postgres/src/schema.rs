//! Idempotent schema setup for the permissions table.

use sqlx_core::query::query;
use sqlx_postgres::PgPool;

use crate::error::PostgresError;

const CREATE_PERMISSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS permissions (
    api_key text NOT NULL,
    module  text NOT NULL,
    action  text NOT NULL,
    UNIQUE (api_key, module, action)
)
"#;

const CREATE_API_KEY_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS permissions_api_key_idx ON permissions (api_key)
"#;

/// Creates the permissions table and its lookup index if absent.
///
/// Safe to run on every startup; concurrent instances racing here both
/// succeed because every statement is IF NOT EXISTS.
pub(crate) async fn ensure_schema(pool: &PgPool) -> Result<(), PostgresError> {
    for statement in [CREATE_PERMISSIONS_TABLE, CREATE_API_KEY_INDEX] {
        query(statement)
            .execute(pool)
            .await
            .map_err(|e| PostgresError::Migration(e.to_string()))?;
    }

    tracing::debug!("permissions schema ready");
    Ok(())
}
