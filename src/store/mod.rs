//! Storage collaborator for `Etudiant` records.
//!
//! Handlers never touch a store directly: they [`EtudiantStore::begin`] a transaction, run the
//! repository operations they need and commit. Dropping a transaction without committing rolls it back.

mod memory;
mod postgres;

pub use memory::InMemoryEtudiantStore;
pub use postgres::{ensure_database_exists, ensure_etudiant_table, PgEtudiantStore};

use crate::error::AppError;
use crate::model::Etudiant;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// Repository operations available inside a transaction.
#[async_trait]
pub trait EtudiantRepository: Send {
    /// Insert when `id` is absent (the store assigns it), replace the stored row otherwise.
    /// Replacing a row that does not exist is `AppError::NotFound`.
    async fn save(&mut self, etudiant: Etudiant) -> Result<Etudiant, AppError>;

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Etudiant>, AppError>;

    async fn exists_by_id(&mut self, id: i64) -> Result<bool, AppError>;

    /// All rows, ascending by id.
    async fn find_all(&mut self) -> Result<Vec<Etudiant>, AppError>;

    /// No error when the row is already absent.
    async fn delete_by_id(&mut self, id: i64) -> Result<(), AppError>;
}

pub type CommitFuture = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send>>;

pub trait EtudiantTransaction: EtudiantRepository {
    fn commit(self: Box<Self>) -> CommitFuture;
}

#[async_trait]
pub trait EtudiantStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn EtudiantTransaction>, AppError>;

    /// Cheap liveness check behind `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
