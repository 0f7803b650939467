use study_core::StudyState;
use study_core::model::{BadgeId, Flashcard, FlashcardSet};
use study_core::time::{fixed_clock, fixed_now};
use study_storage::sqlite::SqliteRepository;
use study_storage::{DEFAULT_STATE_KEY, StateRepository, Storage, decode_state, encode_state};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_persists_encoded_state() {
    let repo = connect("memdb_state_roundtrip").await;

    let mut state = StudyState::new();
    state.add_study_time(30, fixed_clock().today());
    state.add_flashcard_set(FlashcardSet::new(
        "Spanish",
        vec![Flashcard::new("hola", "hello"), Flashcard::new("adiós", "bye")],
        fixed_now(),
    ));
    state.unlock_badge(BadgeId::FirstFlashcards, fixed_now());

    repo.save(DEFAULT_STATE_KEY, &encode_state(&state).unwrap())
        .await
        .unwrap();

    let bytes = repo.load(DEFAULT_STATE_KEY).await.unwrap().expect("stored");
    assert_eq!(decode_state(&bytes).unwrap(), state);
}

#[tokio::test]
async fn sqlite_missing_key_is_none() {
    let repo = connect("memdb_state_missing").await;
    assert!(repo.load("absent").await.unwrap().is_none());
    assert!(repo.revision("absent").await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_revision_counts_writes_and_delete_clears() {
    let repo = connect("memdb_state_revision").await;

    repo.save("k", b"one").await.unwrap();
    repo.save("k", b"two").await.unwrap();
    repo.save("k", b"three").await.unwrap();
    assert_eq!(repo.revision("k").await.unwrap(), Some(3));
    assert_eq!(repo.load("k").await.unwrap(), Some(b"three".to_vec()));

    repo.delete("k").await.unwrap();
    assert!(repo.load("k").await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_state_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.save("k", b"v").await.unwrap();
    assert_eq!(repo.load("k").await.unwrap(), Some(b"v".to_vec()));
}

#[tokio::test]
async fn storage_sqlite_wires_state_repository() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage_wiring?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.state.save("k", b"v").await.unwrap();
    assert_eq!(storage.state.load("k").await.unwrap(), Some(b"v".to_vec()));
}
