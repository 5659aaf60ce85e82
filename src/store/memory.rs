//! In-memory store for tests and local runs. Transactions are serialized: `begin` takes the
//! store lock and works on a staged copy that replaces the shared state on commit.

use super::{CommitFuture, EtudiantRepository, EtudiantStore, EtudiantTransaction};
use crate::error::AppError;
use crate::model::Etudiant;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Etudiant>,
    last_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryEtudiantStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryEtudiantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EtudiantStore for InMemoryEtudiantStore {
    async fn begin(&self) -> Result<Box<dyn EtudiantTransaction>, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, staged }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl EtudiantRepository for InMemoryTransaction {
    async fn save(&mut self, mut etudiant: Etudiant) -> Result<Etudiant, AppError> {
        let id = match etudiant.id {
            Some(id) if self.staged.rows.contains_key(&id) => id,
            Some(id) => return Err(AppError::NotFound(format!("etudiant {}", id))),
            None => {
                self.staged.last_id += 1;
                self.staged.last_id
            }
        };
        etudiant.id = Some(id);
        self.staged.rows.insert(id, etudiant.clone());
        Ok(etudiant)
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Etudiant>, AppError> {
        Ok(self.staged.rows.get(&id).cloned())
    }

    async fn exists_by_id(&mut self, id: i64) -> Result<bool, AppError> {
        Ok(self.staged.rows.contains_key(&id))
    }

    async fn find_all(&mut self) -> Result<Vec<Etudiant>, AppError> {
        Ok(self.staged.rows.values().cloned().collect())
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<(), AppError> {
        self.staged.rows.remove(&id);
        Ok(())
    }
}

impl EtudiantTransaction for InMemoryTransaction {
    fn commit(self: Box<Self>) -> CommitFuture {
        let InMemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(first_name: &str) -> Etudiant {
        Etudiant {
            first_name: Some(first_name.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn committed_inserts_get_increasing_ids() {
        let store = InMemoryEtudiantStore::new();
        let mut tx = store.begin().await.unwrap();
        let a = tx.save(named("Ana")).await.unwrap();
        let b = tx.save(named("Bruno")).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));

        let mut tx = store.begin().await.unwrap();
        let all = tx.find_all().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let store = InMemoryEtudiantStore::new();
        {
            let mut tx = store.begin().await.unwrap();
            tx.save(named("Ana")).await.unwrap();
        }
        let mut tx = store.begin().await.unwrap();
        assert!(tx.find_all().await.unwrap().is_empty());
        assert!(!tx.exists_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryEtudiantStore::new();
        let mut tx = store.begin().await.unwrap();
        let a = tx.save(named("Ana")).await.unwrap();
        tx.delete_by_id(a.id.unwrap()).await.unwrap();
        let b = tx.save(named("Bruno")).await.unwrap();
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn saving_unknown_id_is_not_found_and_delete_is_idempotent() {
        let store = InMemoryEtudiantStore::new();
        let mut tx = store.begin().await.unwrap();
        let err = tx.save(named("Ana").with_id(42)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        tx.delete_by_id(42).await.unwrap();
        assert_eq!(tx.find_by_id(42).await.unwrap(), None);
    }
}
