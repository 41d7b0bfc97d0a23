use super::SqliteStore;
use crate::error::Error;
use crate::traits::{DerivationStore, QuestionnaireStore};
use crate::types::*;
use chrono::{Duration, Utc};
use psyche_calc::{
    classify_axes, compute_flow, compute_persona_vectors, PersonaLayer, RawPersonaAnswers,
};

async fn test_store() -> SqliteStore {
    SqliteStore::in_memory().await.unwrap()
}

fn make_row(user: &str, layer: PersonaLayer, answer: i64) -> QuestionnaireSubmission {
    QuestionnaireSubmission::new(
        user,
        layer,
        RawPersonaAnswers::uniform(layer.question_count(), answer),
    )
}

fn make_record(user: &str, fingerprint: &str) -> DerivationRecord {
    let innate = RawPersonaAnswers::uniform(42, 4);
    let surface = RawPersonaAnswers::uniform(42, 2);
    let imposed = RawPersonaAnswers::uniform(21, 1);
    let vectors = compute_persona_vectors(&innate, &surface, &imposed);
    DerivationRecord {
        user_id: user.into(),
        flow: compute_flow(&vectors),
        axes: classify_axes(&innate, &surface),
        vectors,
        fingerprint: fingerprint.into(),
        computed_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_submit_and_get_answers() {
    let store = test_store().await;
    let row = make_row("u1", PersonaLayer::Innate, 4);
    store.submit(&row).await.unwrap();

    let got = store
        .get_raw_answers("u1", PersonaLayer::Innate)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got, row.answers);
    assert!(store
        .get_raw_answers("u1", PersonaLayer::Surface)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_answers_keep_raw_values() {
    let store = test_store().await;
    let answers = RawPersonaAnswers::new()
        .with_answer(1, "4")
        .with_answer(2, "often")
        .with_answer(3, 2.5);
    store
        .submit(&QuestionnaireSubmission::new("u1", PersonaLayer::Imposed, answers.clone()))
        .await
        .unwrap();

    let got = store
        .get_raw_answers("u1", PersonaLayer::Imposed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got, answers);
}

#[tokio::test]
async fn test_resubmission_supersedes() {
    let store = test_store().await;
    let mut old = make_row("u1", PersonaLayer::Surface, 1);
    old.submitted_at = Utc::now() - Duration::hours(1);
    let new = make_row("u1", PersonaLayer::Surface, 5);
    store.submit(&new).await.unwrap();
    store.submit(&old).await.unwrap();

    let got = store
        .get_raw_answers("u1", PersonaLayer::Surface)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got, new.answers);

    let history = store
        .submission_history("u1", PersonaLayer::Surface)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, new.id);
    assert_eq!(history[1].id, old.id);
}

#[tokio::test]
async fn test_submitted_layers() {
    let store = test_store().await;
    store
        .submit(&make_row("u1", PersonaLayer::Imposed, 3))
        .await
        .unwrap();
    store
        .submit(&make_row("u1", PersonaLayer::Innate, 3))
        .await
        .unwrap();
    store
        .submit(&make_row("u1", PersonaLayer::Innate, 4))
        .await
        .unwrap();
    store
        .submit(&make_row("u2", PersonaLayer::Surface, 3))
        .await
        .unwrap();

    assert_eq!(
        store.submitted_layers("u1").await.unwrap(),
        vec![PersonaLayer::Innate, PersonaLayer::Imposed]
    );
}

#[tokio::test]
async fn test_record_roundtrip() {
    let store = test_store().await;
    assert!(store.get_derivation_record("u1").await.unwrap().is_none());

    let record = make_record("u1", "abc");
    store.put_derivation_record(&record).await.unwrap();

    let got = store.get_derivation_record("u1").await.unwrap().unwrap();
    assert_eq!(got.fingerprint, "abc");
    // floats come back bit for bit
    assert_eq!(got.vectors, record.vectors);
    assert_eq!(got.flow, record.flow);
    assert_eq!(got.axes, record.axes);
}

#[tokio::test]
async fn test_record_upsert_replaces() {
    let store = test_store().await;
    store
        .put_derivation_record(&make_record("u1", "first"))
        .await
        .unwrap();
    store
        .put_derivation_record(&make_record("u1", "second"))
        .await
        .unwrap();

    assert_eq!(store.derivation_count().await.unwrap(), 1);
    let got = store.get_derivation_record("u1").await.unwrap().unwrap();
    assert_eq!(got.fingerprint, "second");
}

#[tokio::test]
async fn test_corrupt_record_is_reported() {
    let store = test_store().await;
    store
        .put_derivation_record(&make_record("u1", "abc"))
        .await
        .unwrap();
    sqlx::query("UPDATE derivation_records SET flow = 'not json' WHERE user_id = 'u1'")
        .execute(&store.pool)
        .await
        .unwrap();

    let err = store.get_derivation_record("u1").await.unwrap_err();
    assert!(matches!(err, Error::CorruptRecord { ref user_id, .. } if user_id == "u1"));
}

#[tokio::test]
async fn test_bad_computed_at_is_corrupt() {
    let store = test_store().await;
    store
        .put_derivation_record(&make_record("u1", "abc"))
        .await
        .unwrap();
    sqlx::query("UPDATE derivation_records SET computed_at = 'yesterday' WHERE user_id = 'u1'")
        .execute(&store.pool)
        .await
        .unwrap();

    let err = store.get_derivation_record("u1").await.unwrap_err();
    assert!(matches!(err, Error::CorruptRecord { ref user_id, .. } if user_id == "u1"));
}

#[tokio::test]
async fn test_bad_submitted_at_is_an_error() {
    let store = test_store().await;
    store
        .submit(&make_row("u1", PersonaLayer::Innate, 3))
        .await
        .unwrap();
    sqlx::query("UPDATE questionnaire_rows SET submitted_at = 'not a time'")
        .execute(&store.pool)
        .await
        .unwrap();

    let err = store
        .submission_history("u1", PersonaLayer::Innate)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Internal(ref msg) if msg.contains("submitted_at")));
}

#[tokio::test]
async fn test_delete_record() {
    let store = test_store().await;
    store
        .put_derivation_record(&make_record("u1", "abc"))
        .await
        .unwrap();
    assert!(store.delete_derivation_record("u1").await.unwrap());
    assert!(!store.delete_derivation_record("u1").await.unwrap());
}

#[tokio::test]
async fn test_from_path_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("psyche.db");

    {
        let store = SqliteStore::from_path(&path).await.unwrap();
        store
            .submit(&make_row("u1", PersonaLayer::Innate, 2))
            .await
            .unwrap();
        store.pool.close().await;
    }

    let reopened = SqliteStore::from_path(&path).await.unwrap();
    assert!(reopened
        .get_raw_answers("u1", PersonaLayer::Innate)
        .await
        .unwrap()
        .is_some());
}
