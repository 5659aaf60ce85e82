//! Store contract against a live PostgreSQL. Run with
//! `DATABASE_URL=postgres://... cargo test --test pg_store -- --ignored`.

use etudiant_service::store::EtudiantRepository;
use etudiant_service::{ensure_etudiant_table, AppError, Etudiant, EtudiantStore, PgEtudiantStore};

async fn store() -> Option<PgEtudiantStore> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping");
        return None;
    };
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .unwrap();
    ensure_etudiant_table(&pool).await.unwrap();
    Some(PgEtudiantStore::new(pool))
}

fn named(first_name: &str) -> Etudiant {
    Etudiant {
        first_name: Some(first_name.into()),
        age: Some(20),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore]
async fn insert_assigns_ids_and_find_all_is_ordered() {
    let Some(store) = store().await else { return };
    let mut tx = store.begin().await.unwrap();
    let a = tx.save(named("Ana")).await.unwrap();
    let b = tx.save(named("Bruno")).await.unwrap();
    let (a_id, b_id) = (a.id.unwrap(), b.id.unwrap());
    assert!(b_id > a_id);
    assert_eq!(a.first_name.as_deref(), Some("Ana"));
    assert_eq!(a.age, Some(20));

    let ids: Vec<i64> = tx.find_all().await.unwrap().into_iter().filter_map(|e| e.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert!(ids.contains(&a_id) && ids.contains(&b_id));
}

#[tokio::test]
#[ignore]
async fn replace_overwrites_and_missing_row_is_not_found() {
    let Some(store) = store().await else { return };
    let mut tx = store.begin().await.unwrap();
    let a = tx.save(named("Ana")).await.unwrap();
    let id = a.id.unwrap();

    let replacement = Etudiant {
        last_name: Some("Lopez".into()),
        ..Default::default()
    }
    .with_id(id);
    assert_eq!(tx.save(replacement.clone()).await.unwrap(), replacement);
    assert_eq!(tx.find_by_id(id).await.unwrap(), Some(replacement));

    let err = tx.save(named("Ghost").with_id(i64::MAX)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore]
async fn delete_is_idempotent_and_rollback_discards_writes() {
    let Some(store) = store().await else { return };
    let id = {
        let mut tx = store.begin().await.unwrap();
        tx.save(named("Ana")).await.unwrap().id.unwrap()
    };
    let mut tx = store.begin().await.unwrap();
    assert!(!tx.exists_by_id(id).await.unwrap());

    let id = tx.save(named("Bruno")).await.unwrap().id.unwrap();
    assert!(tx.exists_by_id(id).await.unwrap());
    tx.delete_by_id(id).await.unwrap();
    tx.delete_by_id(id).await.unwrap();
    assert_eq!(tx.find_by_id(id).await.unwrap(), None);
    tx.commit().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn ping_succeeds() {
    let Some(store) = store().await else { return };
    store.ping().await.unwrap();
}
