//! `StorageEngine` against a real file-backed database.
//!
//! File-backed temp directories are used so the writer and read pool share
//! one database; in-memory SQLite would isolate each connection.

use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use subtrack_core::config::StorageConfig;
use subtrack_core::errors::StorageError;
use subtrack_core::models::{
    AccessLevel, Category, DurationLabel, Role, Subscription, SubscriptionStatus,
    SubscriptionType, User, UserRecord,
};
use subtrack_core::traits::{ISubscriptionStorage, IUserStorage};
use subtrack_storage::migrations::LATEST_VERSION;
use subtrack_storage::StorageEngine;

fn temp_engine() -> (TempDir, StorageEngine) {
    let dir = TempDir::new().unwrap();
    let engine = StorageEngine::open(&dir.path().join("test.db"), &StorageConfig::default()).unwrap();
    (dir, engine)
}

fn user(id: &str, email: &str, role: Role) -> UserRecord {
    UserRecord {
        user: User {
            id: id.into(),
            name: format!("User {id}"),
            email: email.into(),
            phone: "555-0100".into(),
            role,
            access_level: AccessLevel::Full,
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        },
        password_hash: "$2b$04$hash".into(),
    }
}

fn subscription(id: &str, renewal: &str) -> Subscription {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    Subscription {
        id: id.into(),
        client_name: "Acme".into(),
        business_name: "Acme Ltd".into(),
        client_email: None,
        client_phone: Some("555-0199".into()),
        price: 120.5,
        paid_date: "2025-06-01".into(),
        renewal_date: renewal.into(),
        duration: DurationLabel::ThreeMonths,
        subscription_type: SubscriptionType::Client,
        category: Category::WhatsAppApi,
        notes: Some("primary number".into()),
        status: SubscriptionStatus::Active,
        created_by: "admin-1".into(),
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn fresh_database_is_migrated() {
    let (_dir, engine) = temp_engine();
    assert_eq!(engine.schema_version().unwrap(), LATEST_VERSION);
    assert_eq!(engine.user_count().unwrap(), 0);
    assert!(engine.list_subscriptions().unwrap().is_empty());
}

#[test]
fn reopening_keeps_data_and_skips_migrations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("subtrack.db");
    {
        let engine = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
        engine.insert_user(&user("u1", "a@example.com", Role::Admin)).unwrap();
    }

    let engine = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
    assert_eq!(engine.schema_version().unwrap(), LATEST_VERSION);
    assert!(engine.get_user("u1").unwrap().is_some());
    assert_eq!(engine.path(), Some(path.as_path()));
}

#[test]
fn user_round_trip_through_reader() {
    let (_dir, engine) = temp_engine();
    let record = user("u1", "pat@example.com", Role::Staff);
    engine.insert_user(&record).unwrap();

    let by_id = engine.get_user("u1").unwrap().unwrap();
    assert_eq!(by_id.user, record.user);
    assert_eq!(by_id.password_hash, record.password_hash);

    let by_email = engine.find_user_by_email("pat@example.com").unwrap().unwrap();
    assert_eq!(by_email.user.id, "u1");
    assert!(engine.find_user_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn duplicate_email_is_unique_violation() {
    let (_dir, engine) = temp_engine();
    engine.insert_user(&user("u1", "dup@example.com", Role::Staff)).unwrap();

    let err = engine
        .insert_user(&user("u2", "dup@example.com", Role::Staff))
        .unwrap_err();
    assert!(
        matches!(&err, StorageError::UniqueViolation { field } if field == "email"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn list_by_role_preserves_insertion_order() {
    let (_dir, engine) = temp_engine();
    engine.insert_user(&user("s2", "s2@example.com", Role::Staff)).unwrap();
    engine.insert_user(&user("a1", "a1@example.com", Role::Admin)).unwrap();
    engine.insert_user(&user("s1", "s1@example.com", Role::Staff)).unwrap();

    let ids: Vec<_> = engine
        .list_users_by_role(Role::Staff)
        .unwrap()
        .into_iter()
        .map(|r| r.user.id)
        .collect();
    assert_eq!(ids, ["s2", "s1"]);
}

#[test]
fn update_and_delete_report_missing_rows() {
    let (_dir, engine) = temp_engine();
    let mut record = user("u1", "u1@example.com", Role::Staff);
    engine.insert_user(&record).unwrap();

    record.user.access_level = AccessLevel::ViewOnly;
    record.password_hash = "$2b$04$other".into();
    assert!(engine.update_user(&record).unwrap());
    let stored = engine.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.user.access_level, AccessLevel::ViewOnly);
    assert_eq!(stored.password_hash, "$2b$04$other");

    assert!(!engine.update_user(&user("ghost", "g@example.com", Role::Staff)).unwrap());
    assert!(engine.delete_user("u1").unwrap());
    assert!(!engine.delete_user("u1").unwrap());
}

#[test]
fn subscription_round_trip_keeps_labels_and_optionals() {
    let (_dir, engine) = temp_engine();
    let sub = subscription("s1", "2025-09-01");
    engine.insert_subscription(&sub).unwrap();

    let stored = engine.get_subscription("s1").unwrap().unwrap();
    assert_eq!(stored.category, Category::WhatsAppApi);
    assert_eq!(stored.duration, DurationLabel::ThreeMonths);
    assert_eq!(stored.client_email, None);
    assert_eq!(stored.client_phone.as_deref(), Some("555-0199"));
    assert_eq!(stored.price, 120.5);
    assert_eq!(stored.created_at, sub.created_at);
    assert!(engine.get_subscription("missing").unwrap().is_none());
}

#[test]
fn subscription_update_leaves_creation_fields() {
    let (_dir, engine) = temp_engine();
    let sub = subscription("s1", "2025-09-01");
    engine.insert_subscription(&sub).unwrap();

    let mut changed = sub.clone();
    changed.renewal_date = "2025-06-10".into();
    changed.status = SubscriptionStatus::ExpiringSoon;
    changed.created_by = "someone-else".into();
    changed.updated_at = Utc.with_ymd_and_hms(2025, 6, 5, 8, 0, 0).unwrap();
    assert!(engine.update_subscription(&changed).unwrap());

    let stored = engine.get_subscription("s1").unwrap().unwrap();
    assert_eq!(stored.renewal_date, "2025-06-10");
    assert_eq!(stored.status, SubscriptionStatus::ExpiringSoon);
    assert_eq!(stored.created_by, "admin-1");
    assert_eq!(stored.updated_at, changed.updated_at);
}

#[test]
fn renewal_dates_include_unparsable_values() {
    let (_dir, engine) = temp_engine();
    engine.insert_subscription(&subscription("s1", "2025-09-01")).unwrap();
    engine.insert_subscription(&subscription("s2", "next spring")).unwrap();

    assert_eq!(
        engine.list_renewal_dates().unwrap(),
        ["2025-09-01", "next spring"]
    );
    assert!(engine.delete_subscription("s2").unwrap());
    assert_eq!(engine.list_subscriptions().unwrap().len(), 1);
}

#[test]
fn corrupt_label_surfaces_as_corrupt_record() {
    let (_dir, engine) = temp_engine();
    engine.insert_subscription(&subscription("s1", "2025-09-01")).unwrap();
    engine
        .with_writer(|conn| {
            conn.execute("UPDATE subscriptions SET category = 'Carrier Pigeon'", [])
                .map_err(subtrack_storage::to_storage_err)?;
            Ok(())
        })
        .unwrap();

    let err = engine.get_subscription("s1").unwrap_err();
    assert!(matches!(
        err,
        StorageError::CorruptRecord { collection: "subscriptions", .. }
    ));
}

#[test]
fn in_memory_engine_from_config() {
    let config = StorageConfig {
        path: ":memory:".into(),
        ..Default::default()
    };
    let engine = StorageEngine::from_config(&config).unwrap();
    assert!(engine.path().is_none());
    engine.insert_user(&user("u1", "m@example.com", Role::Admin)).unwrap();
    assert_eq!(engine.user_count().unwrap(), 1);
}

#[test]
fn concurrent_writers_and_readers() {
    let (_dir, engine) = temp_engine();
    let engine = Arc::new(engine);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .insert_subscription(&subscription(&format!("s{i}"), "2025-09-01"))
                    .unwrap();
                engine.list_subscriptions().unwrap().len()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap() >= 1);
    }
    assert_eq!(engine.list_subscriptions().unwrap().len(), 8);
}
