use lendr::config::SecurityConfig;
use lendr::db::Store;
use lendr::domain::{DecisionId, FeatureVector, Page, UserId, Verdicts};

fn cheap_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

async fn memory_store() -> Store {
    Store::new("sqlite::memory:").await.unwrap()
}

fn features(income: f64) -> FeatureVector {
    FeatureVector::new([income, 700.9, -3.5, 2.0]).unwrap()
}

#[tokio::test]
async fn test_insert_then_get_round_trips_truncated_features() {
    let store = memory_store().await;

    let id = store
        .insert_decision(
            Some(UserId::new(4)),
            &features(1234.99),
            Verdicts::new(true, false, true),
        )
        .await
        .unwrap();

    let record = store.get_decision(id).await.unwrap().unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.user_id, Some(UserId::new(4)));
    assert_eq!(record.income, 1234);
    assert_eq!(record.credit_score, 700);
    assert_eq!(record.loan_amount, -3);
    assert_eq!(record.verdicts(), Verdicts::new(true, false, true));

    assert!(store.get_decision(DecisionId::new(999)).await.unwrap().is_none());
    assert_eq!(store.decision_stats().await.unwrap().total, 1);
}

#[tokio::test]
async fn test_created_at_never_decreases() {
    let store = memory_store().await;

    for i in 0..10 {
        store
            .insert_decision(None, &features(f64::from(i)), Verdicts::new(false, false, false))
            .await
            .unwrap();
    }

    let records = store.list_decisions(Page::new(100, 0)).await.unwrap();
    assert_eq!(records.len(), 10);
    assert!(records.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert!(records.windows(2).all(|w| w[0].id > w[1].id));
}

#[tokio::test]
async fn test_stats_snapshot_is_consistent() {
    let store = memory_store().await;

    let empty = store.decision_stats().await.unwrap();
    assert_eq!(empty.total, 0);
    assert!(empty.is_consistent());

    for bits in 0u8..8 {
        let verdicts = Verdicts::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
        store
            .insert_decision(None, &features(f64::from(bits)), verdicts)
            .await
            .unwrap();
    }

    let stats = store.decision_stats().await.unwrap();
    assert!(stats.is_consistent());
    assert_eq!(stats.total, 8);
    assert_eq!(stats.all_approved, 1);
    assert_eq!(stats.all_rejected, 1);
    assert_eq!(stats.model_b.approved, 4);
    assert_eq!(stats.agreement.a_c, 4);
    assert_eq!(stats.approved_total, 7);
}

#[tokio::test]
async fn test_users_store_hashes_and_resolve_lowest_id() {
    let store = memory_store().await;

    let first = store
        .create_user("carol", "pw-one", &cheap_security())
        .await
        .unwrap();
    let second = store
        .create_user("carol", "pw-two", &cheap_security())
        .await
        .unwrap();
    assert!(first < second);

    let (resolved, valid) = store
        .verify_user_password("carol", "pw-one")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, first);
    assert_eq!(resolved.name, "carol");
    assert!(valid);

    let (resolved, valid) = store
        .verify_user_password("carol", "pw-two")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, first);
    assert!(!valid);

    assert!(store.verify_user_password("nobody", "x").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ping() {
    let store = memory_store().await;
    store.ping().await.unwrap();
}
