//! Integration tests for the derivation cache manager.

use mockall::mock;
use psyche_calc::tables::items::drive_items;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use psyche_calc::{Axis, Drive, PersonaLayer, Polarity, Pole, RawPersonaAnswers};
use psyche_core::{
    DerivationManager, DeriveOutcome, EngineConfig, Error, UserFriendlyError,
};
use psyche_store::{
    DerivationRecord, DerivationStore, MemoryStore, QuestionnaireStore, QuestionnaireSubmission,
    SqliteStore,
};
use std::sync::Arc;

mock! {
    pub Derivations {}

    #[async_trait::async_trait]
    impl DerivationStore for Derivations {
        async fn get_derivation_record(
            &self,
            user_id: &str,
        ) -> psyche_store::Result<Option<DerivationRecord>>;
        async fn put_derivation_record(&self, record: &DerivationRecord) -> psyche_store::Result<()>;
        async fn delete_derivation_record(&self, user_id: &str) -> psyche_store::Result<bool>;
        fn name(&self) -> &str;
    }
}

/// Row whose items answer each drive at the given level.
fn row_for(layer: PersonaLayer, levels: [i64; 7]) -> RawPersonaAnswers {
    let mut row = RawPersonaAnswers::new();
    for drive in Drive::ALL {
        let level = levels[drive.index()];
        for item in drive_items(layer, drive) {
            let answer = match item.polarity {
                Polarity::Direct => level,
                Polarity::Inverse => 6 - level,
            };
            row.insert(item.question, answer);
        }
    }
    row
}

async fn submit(store: &MemoryStore, user: &str, layer: PersonaLayer, row: RawPersonaAnswers) {
    store
        .submit(&QuestionnaireSubmission::new(user, layer, row))
        .await
        .unwrap();
}

async fn complete_user(store: &MemoryStore, user: &str) {
    submit(store, user, PersonaLayer::Innate, row_for(PersonaLayer::Innate, [5, 1, 1, 1, 5, 1, 1])).await;
    submit(store, user, PersonaLayer::Surface, row_for(PersonaLayer::Surface, [1, 1, 5, 1, 1, 5, 1])).await;
    submit(store, user, PersonaLayer::Imposed, row_for(PersonaLayer::Imposed, [3, 3, 4, 3, 3, 1, 3])).await;
}

fn manager(store: &MemoryStore) -> DerivationManager {
    DerivationManager::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        EngineConfig::default(),
    )
}

#[tokio::test]
async fn test_second_call_is_cached() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;
    let manager = manager(&store);

    let first = manager.ensure_derived("u1").await.unwrap();
    assert_eq!(first.as_str(), "recomputed");
    let second = manager.ensure_derived("u1").await.unwrap();
    assert_eq!(second.as_str(), "cached");

    let (a, b) = (first.record().unwrap(), second.record().unwrap());
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_eq!(a.vectors, b.vectors);
    assert_eq!(a.flow, b.flow);
    assert_eq!(store.derivation_count().await, 1);
}

#[tokio::test]
async fn test_changed_row_recomputes() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;
    let manager = manager(&store);

    let before = manager.ensure_derived("u1").await.unwrap().into_record().unwrap();

    submit(&store, "u1", PersonaLayer::Imposed, row_for(PersonaLayer::Imposed, [3, 3, 4, 3, 3, 4, 3])).await;
    let after = manager.ensure_derived("u1").await.unwrap();
    assert!(matches!(after, DeriveOutcome::Recomputed { .. }));
    let after = after.into_record().unwrap();
    assert_ne!(after.fingerprint, before.fingerprint);
    // Affiliation is now satisfied, so its diversion no longer drains
    assert_eq!(after.flow.drain_total(Drive::Affiliation), 0.0);
    assert!(before.flow.drain_total(Drive::Affiliation) > 0.0);
}

#[tokio::test]
async fn test_any_changed_layer_recomputes() {
    for layer in PersonaLayer::ALL {
        let store = MemoryStore::new();
        complete_user(&store, "u1").await;
        let manager = manager(&store);
        let before = manager.ensure_derived("u1").await.unwrap().into_record().unwrap();

        submit(&store, "u1", layer, row_for(layer, [2; 7])).await;
        let after = manager.ensure_derived("u1").await.unwrap();
        assert_eq!(after.as_str(), "recomputed", "{layer} change not detected");
        assert_ne!(after.record().unwrap().fingerprint, before.fingerprint);

        assert_eq!(manager.ensure_derived("u1").await.unwrap().as_str(), "cached");
    }
}

#[tokio::test]
async fn test_missing_layers_are_reported() {
    let store = MemoryStore::new();
    submit(&store, "u1", PersonaLayer::Innate, RawPersonaAnswers::uniform(42, 3)).await;
    let manager = manager(&store);

    let outcome = manager.ensure_derived("u1").await.unwrap();
    assert_eq!(
        outcome,
        DeriveOutcome::MissingTests {
            missing: vec![PersonaLayer::Surface, PersonaLayer::Imposed]
        }
    );
    assert!(outcome.record().is_none());
    assert!(outcome.user_message().contains("surface, imposed"));
    assert_eq!(store.derivation_count().await, 0);
}

#[tokio::test]
async fn test_unknown_user_misses_everything() {
    let store = MemoryStore::new();
    let outcome = manager(&store).ensure_derived("nobody").await.unwrap();
    assert_eq!(
        outcome,
        DeriveOutcome::MissingTests {
            missing: PersonaLayer::ALL.to_vec()
        }
    );
}

#[tokio::test]
async fn test_energy_axis_scenario() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;
    let record = manager(&store)
        .ensure_derived("u1")
        .await
        .unwrap()
        .into_record()
        .unwrap();

    let energy = record.axes.iter().find(|a| a.axis == Axis::Energy).unwrap();
    assert_eq!(energy.surface.pole, Pole::Extrovert);
    assert_eq!(energy.innate.pole, Pole::Introvert);
    assert!(!energy.aligned);
}

#[tokio::test]
async fn test_failed_write_still_returns_record() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;

    let mut derivations = MockDerivations::new();
    derivations
        .expect_get_derivation_record()
        .returning(|_| Ok(None));
    derivations
        .expect_put_derivation_record()
        .times(1)
        .returning(|_| Err(psyche_store::Error::Internal("disk full".into())));

    let manager = DerivationManager::new(
        Arc::new(store.clone()),
        Arc::new(derivations),
        EngineConfig::default(),
    );
    match manager.ensure_derived("u1").await.unwrap() {
        DeriveOutcome::UpsertFailed { record, message } => {
            assert!(message.contains("disk full"));
            assert_eq!(record.user_id, "u1");
            assert_eq!(record.vectors.surface.get(Drive::Dominance), 5.0);
        }
        other => panic!("expected upsert_failed, got {}", other.as_str()),
    }
}

#[tokio::test]
async fn test_read_failure_is_an_error() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;

    let mut derivations = MockDerivations::new();
    derivations
        .expect_get_derivation_record()
        .returning(|_| Err(psyche_store::Error::Internal("connection reset".into())));
    derivations.expect_put_derivation_record().never();

    let manager = DerivationManager::new(
        Arc::new(store.clone()),
        Arc::new(derivations),
        EngineConfig::default(),
    );
    let err = manager.ensure_derived("u1").await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(!err.user_message().contains("connection"));
}

#[tokio::test]
async fn test_corrupt_record_is_recomputed() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;

    let mut derivations = MockDerivations::new();
    derivations.expect_get_derivation_record().returning(|user| {
        Err(psyche_store::Error::CorruptRecord {
            user_id: user.to_string(),
            message: "expected value".into(),
        })
    });
    derivations
        .expect_put_derivation_record()
        .times(1)
        .returning(|_| Ok(()));

    let manager = DerivationManager::new(
        Arc::new(store.clone()),
        Arc::new(derivations),
        EngineConfig::default(),
    );
    let outcome = manager.ensure_derived("u1").await.unwrap();
    assert_eq!(outcome.as_str(), "recomputed");
}

#[tokio::test]
async fn test_strict_mode_rejects_malformed_rows() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;
    submit(
        &store,
        "u1",
        PersonaLayer::Surface,
        row_for(PersonaLayer::Surface, [3; 7]).with_answer(5, "rarely"),
    )
    .await;

    let lenient = manager(&store).ensure_derived("u1").await.unwrap();
    assert!(lenient.record().is_some());

    let strict = DerivationManager::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        EngineConfig {
            strict_answers: true,
            ..Default::default()
        },
    );
    let err = strict.ensure_derived("u1").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Calc(psyche_calc::Error::MalformedAnswer {
            layer: PersonaLayer::Surface,
            question: 5,
            ..
        })
    ));
}

#[tokio::test]
async fn test_invalidate_forces_recompute() {
    let store = MemoryStore::new();
    complete_user(&store, "u1").await;
    let manager = manager(&store);

    manager.ensure_derived("u1").await.unwrap();
    assert!(manager.invalidate("u1").await.unwrap());
    let outcome = manager.ensure_derived("u1").await.unwrap();
    assert!(outcome.recomputed());
}

#[tokio::test]
async fn test_sqlite_backend_end_to_end() {
    let sqlite = Arc::new(SqliteStore::in_memory().await.unwrap());
    for (layer, levels) in [
        (PersonaLayer::Innate, [5, 1, 1, 1, 5, 1, 1]),
        (PersonaLayer::Surface, [1, 1, 5, 1, 1, 5, 1]),
        (PersonaLayer::Imposed, [3, 3, 4, 3, 3, 1, 3]),
    ] {
        sqlite
            .submit(&QuestionnaireSubmission::new("u1", layer, row_for(layer, levels)))
            .await
            .unwrap();
    }

    let manager = DerivationManager::new(sqlite.clone(), sqlite.clone(), EngineConfig::default());
    assert_eq!(manager.ensure_derived("u1").await.unwrap().as_str(), "recomputed");
    assert_eq!(manager.ensure_derived("u1").await.unwrap().as_str(), "cached");
}

#[tokio::test]
async fn test_sqlite_cached_record_matches_recomputed() {
    let sqlite = Arc::new(SqliteStore::in_memory().await.unwrap());
    let manager = DerivationManager::new(sqlite.clone(), sqlite.clone(), EngineConfig::default());
    let mut rng = StdRng::seed_from_u64(2024);

    for n in 0..50 {
        let user = format!("user-{n}");
        for layer in PersonaLayer::ALL {
            let row = RawPersonaAnswers::from_pairs(
                (1..=layer.question_count()).map(|q| (q, rng.gen_range(1..=5i64))),
            );
            sqlite
                .submit(&QuestionnaireSubmission::new(&user, layer, row))
                .await
                .unwrap();
        }

        let first = manager.ensure_derived(&user).await.unwrap();
        assert_eq!(first.as_str(), "recomputed");
        let second = manager.ensure_derived(&user).await.unwrap();
        assert_eq!(second.as_str(), "cached");

        let (a, b) = (first.into_record().unwrap(), second.into_record().unwrap());
        assert_eq!(a.vectors, b.vectors, "{user}");
        assert_eq!(a.flow, b.flow, "{user}");
        assert_eq!(a.axes, b.axes, "{user}");
        assert_eq!(a.fingerprint, b.fingerprint);
    }
}
