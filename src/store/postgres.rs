//! PostgreSQL store: `etudiant` table DDL, database bootstrap and transactional repository.

use super::{CommitFuture, EtudiantRepository, EtudiantStore, EtudiantTransaction};
use crate::error::AppError;
use crate::model::Etudiant;
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::str::FromStr;

const TABLE: &str = "etudiant";
const COLUMNS: &str = "id, first_name, last_name, address, age";

/// Create the `etudiant` table if it does not exist.
pub async fn ensure_etudiant_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT,
            last_name TEXT,
            address TEXT,
            age INTEGER
        )
        "#,
        TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgEtudiantStore {
    pool: PgPool,
}

impl PgEtudiantStore {
    pub fn new(pool: PgPool) -> Self {
        PgEtudiantStore { pool }
    }
}

#[async_trait]
impl EtudiantStore for PgEtudiantStore {
    async fn begin(&self) -> Result<Box<dyn EtudiantTransaction>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgEtudiantTransaction { tx }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

struct PgEtudiantTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl EtudiantRepository for PgEtudiantTransaction {
    async fn save(&mut self, etudiant: Etudiant) -> Result<Etudiant, AppError> {
        match etudiant.id {
            None => {
                let sql = format!(
                    "INSERT INTO {} (first_name, last_name, address, age) VALUES ($1, $2, $3, $4) RETURNING {}",
                    TABLE, COLUMNS
                );
                tracing::debug!(sql = %sql, "query (tx)");
                let row = sqlx::query_as::<_, Etudiant>(&sql)
                    .bind(&etudiant.first_name)
                    .bind(&etudiant.last_name)
                    .bind(&etudiant.address)
                    .bind(etudiant.age)
                    .fetch_one(&mut *self.tx)
                    .await?;
                Ok(row)
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE {} SET first_name = $2, last_name = $3, address = $4, age = $5 WHERE id = $1 RETURNING {}",
                    TABLE, COLUMNS
                );
                tracing::debug!(sql = %sql, id, "query (tx)");
                sqlx::query_as::<_, Etudiant>(&sql)
                    .bind(id)
                    .bind(&etudiant.first_name)
                    .bind(&etudiant.last_name)
                    .bind(&etudiant.address)
                    .bind(etudiant.age)
                    .fetch_optional(&mut *self.tx)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("etudiant {}", id)))
            }
        }
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Etudiant>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, TABLE);
        tracing::debug!(sql = %sql, id, "query (tx)");
        let row = sqlx::query_as::<_, Etudiant>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn exists_by_id(&mut self, id: i64) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", TABLE);
        tracing::debug!(sql = %sql, id, "query (tx)");
        let exists: (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&mut *self.tx).await?;
        Ok(exists.0)
    }

    async fn find_all(&mut self) -> Result<Vec<Etudiant>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, TABLE);
        tracing::debug!(sql = %sql, "query (tx)");
        let rows = sqlx::query_as::<_, Etudiant>(&sql).fetch_all(&mut *self.tx).await?;
        Ok(rows)
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", TABLE);
        tracing::debug!(sql = %sql, id, "query (tx)");
        sqlx::query(&sql).bind(id).execute(&mut *self.tx).await?;
        Ok(())
    }
}

impl EtudiantTransaction for PgEtudiantTransaction {
    fn commit(self: Box<Self>) -> CommitFuture {
        let tx = self.tx;
        Box::pin(async move {
            tx.commit().await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_targets_postgres_database() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/etudiants?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "etudiants");
    }

    #[test]
    fn quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
