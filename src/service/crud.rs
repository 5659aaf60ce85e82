//! Etudiant CRUD operations. Each call runs in its own store transaction.

use crate::error::AppError;
use crate::model::Etudiant;
use crate::service::RequestValidator;
use crate::store::{EtudiantRepository, EtudiantStore};

pub struct EtudiantService;

impl EtudiantService {
    /// Persist a new etudiant; the store assigns the id.
    pub async fn create(store: &dyn EtudiantStore, body: Etudiant) -> Result<Etudiant, AppError> {
        RequestValidator::validate_new(&body)?;
        let mut tx = store.begin().await?;
        let saved = tx.save(body).await?;
        tx.commit().await?;
        Ok(saved)
    }

    /// Replace every attribute of an existing etudiant. A missing row is a 400 `idnotfound`.
    pub async fn update(store: &dyn EtudiantStore, path_id: i64, body: Etudiant) -> Result<Etudiant, AppError> {
        let id = RequestValidator::validate_update(path_id, &body)?;
        let mut tx = store.begin().await?;
        if !tx.exists_by_id(id).await? {
            return Err(RequestValidator::not_found());
        }
        let saved = tx.save(body).await?;
        tx.commit().await?;
        Ok(saved)
    }

    /// Overlay the attributes present in `body` onto the stored etudiant.
    /// A row that vanishes between the existence check and the fetch is a 404.
    pub async fn partial_update(store: &dyn EtudiantStore, path_id: i64, body: Etudiant) -> Result<Etudiant, AppError> {
        let id = RequestValidator::validate_update(path_id, &body)?;
        let mut tx = store.begin().await?;
        if !tx.exists_by_id(id).await? {
            return Err(RequestValidator::not_found());
        }
        let mut existing = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("etudiant {}", id)))?;
        existing.merge(body);
        let saved = tx.save(existing).await?;
        tx.commit().await?;
        Ok(saved)
    }

    pub async fn list(store: &dyn EtudiantStore) -> Result<Vec<Etudiant>, AppError> {
        let mut tx = store.begin().await?;
        let rows = tx.find_all().await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn read(store: &dyn EtudiantStore, id: i64) -> Result<Option<Etudiant>, AppError> {
        let mut tx = store.begin().await?;
        let row = tx.find_by_id(id).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Delete by id; succeeds whether or not the row existed.
    pub async fn delete(store: &dyn EtudiantStore, id: i64) -> Result<(), AppError> {
        let mut tx = store.begin().await?;
        tx.delete_by_id(id).await?;
        tx.commit().await?;
        Ok(())
    }
}
