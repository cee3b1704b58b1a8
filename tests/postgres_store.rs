//! PostgreSQL repository tests. Need a reachable database:
//! `DATABASE_URL=postgres://localhost/memories_test cargo test -- --ignored`

use memories_api::models::{MemoryInput, UserInput};
use memories_api::{ensure_database_exists, ensure_tables, AppError, MemoryRepository, PgStore, UserRepository};

async fn store() -> PgStore {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/memories_test".into());
    ensure_database_exists(&url).await.unwrap();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    ensure_tables(&pool).await.unwrap();
    PgStore::new(pool)
}

/// Random GitHub id so reruns against the same database do not collide.
fn github_id() -> i64 {
    (uuid::Uuid::new_v4().as_u128() % 1_000_000_000) as i64
}

fn input(github_id: i64, name: &str) -> UserInput {
    UserInput {
        github_id,
        name: name.into(),
        login: name.to_lowercase(),
        avatar_url: format!("https://avatars.example/{}.png", github_id),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn user_crud_round_trip() {
    let store = store().await;
    let created = store.create_user(&input(github_id(), "Ada")).await.unwrap();

    let fetched = store.find_user(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let replacement = input(github_id(), "Grace");
    let updated = store.update_user(created.id, &replacement).await.unwrap().unwrap();
    assert_eq!(updated.name, "Grace");
    assert_eq!(updated.github_id, replacement.github_id);

    let by_github = store.find_user_by_github_id(replacement.github_id).await.unwrap().unwrap();
    assert_eq!(by_github.id, created.id);

    assert!(store.delete_user(created.id).await.unwrap().is_some());
    assert!(store.find_user(created.id).await.unwrap().is_none());
    assert!(store.delete_user(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn duplicate_github_id_is_a_conflict() {
    let store = store().await;
    let gid = github_id();
    let first = store.create_user(&input(gid, "Ada")).await.unwrap();
    let err = store.create_user(&input(gid, "Again")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "{err:?}");
    store.delete_user(first.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn memories_follow_their_owner() {
    let store = store().await;
    let owner = store.create_user(&input(github_id(), "Owner")).await.unwrap();
    let body = MemoryInput {
        content: "first".into(),
        cover_url: "c".into(),
        is_public: false,
    };
    let first = store.create_memory(owner.id, &body).await.unwrap();
    let second = store
        .create_memory(owner.id, &MemoryInput { content: "second".into(), ..body.clone() })
        .await
        .unwrap();

    let listed = store.list_memories(owner.id).await.unwrap();
    assert_eq!(listed.iter().map(|m| m.id).collect::<Vec<_>>(), vec![first.id, second.id]);

    store.delete_user(owner.id).await.unwrap();
    assert!(store.find_memory(first.id).await.unwrap().is_none());

    let err = store.create_memory(owner.id, &body).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
}
