mod common;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use perevod_core::keys;
use perevod_core::languages::LanguageCode;
use perevod_history::{HistoryError, HistoryEvent, HistoryStore};
use perevod_storage::{FileAdapter, MemoryAdapter};
use uuid::Uuid;

use common::memory_store;

const RU: LanguageCode = LanguageCode::RUSSIAN;
const EN: LanguageCode = LanguageCode::ENGLISH;

#[tokio::test]
async fn load_on_empty_adapter_yields_empty_history() {
    let (_adapter, store) = memory_store();
    store.load().await.unwrap();

    assert!(store.is_loaded());
    assert!(store.list_all().is_empty());
    assert!(store.list_favorites().is_empty());
}

#[tokio::test]
async fn records_list_most_recent_first_with_unique_ids() {
    let (_adapter, store) = memory_store();
    store.load().await.unwrap();

    let words = [("один", "one"), ("два", "two"), ("три", "three"), ("четыре", "four")];
    let mut created = Vec::new();
    for (source, translated) in words {
        created.push(store.record_translation(RU, EN, source, translated).await.unwrap());
    }

    let listed = store.list_all();
    let expected: Vec<_> = created.iter().rev().cloned().collect();
    assert_eq!(listed, expected);

    let ids: HashSet<Uuid> = listed.iter().map(|r| r.id()).collect();
    assert_eq!(ids.len(), words.len());

    for pair in listed.windows(2) {
        assert!(pair[0].created_at() >= pair[1].created_at());
    }
}

#[tokio::test]
async fn failed_write_rolls_back_record() {
    let (adapter, store) = memory_store();
    store.record_translation(RU, EN, "кот", "cat").await.unwrap();

    adapter.fail_writes(true);
    let err = store
        .record_translation(RU, EN, "пёс", "dog")
        .await
        .unwrap_err();
    assert!(matches!(err, HistoryError::Persistence(_)));

    let listed = store.list_all();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].source_text(), "кот");
    assert!(listed.iter().all(|r| r.source_text() != "пёс"));
}

#[tokio::test]
async fn toggle_favorite_is_its_own_inverse() {
    let (_adapter, store) = memory_store();
    let record = store.record_translation(RU, EN, "да", "yes").await.unwrap();
    assert!(!record.is_favorite());

    let on = store.toggle_favorite(record.id()).await.unwrap();
    assert!(on.is_favorite());
    assert_eq!(store.list_favorites(), vec![on.clone()]);

    let off = store.toggle_favorite(record.id()).await.unwrap();
    assert!(!off.is_favorite());
    assert!(store.list_favorites().is_empty());
    assert_eq!(off, record);
}

#[tokio::test]
async fn toggle_keeps_write_once_fields() {
    let (_adapter, store) = memory_store();
    let record = store.record_translation(RU, EN, "мир", "peace").await.unwrap();

    let toggled = store.toggle_favorite(record.id()).await.unwrap();
    assert_eq!(toggled.id(), record.id());
    assert_eq!(toggled.source_text(), record.source_text());
    assert_eq!(toggled.translated_text(), record.translated_text());
    assert_eq!(toggled.created_at(), record.created_at());
}

#[tokio::test]
async fn failed_toggle_rolls_back() {
    let (adapter, store) = memory_store();
    let record = store.record_translation(RU, EN, "нет", "no").await.unwrap();

    adapter.fail_writes(true);
    let err = store.toggle_favorite(record.id()).await.unwrap_err();
    assert!(matches!(err, HistoryError::Persistence(_)));
    assert!(!store.find(record.id()).unwrap().is_favorite());
    assert!(store.list_favorites().is_empty());
}

#[tokio::test]
async fn toggle_unknown_id_is_not_found() {
    let (_adapter, store) = memory_store();
    let id = Uuid::new_v4();

    let err = store.toggle_favorite(id).await.unwrap_err();
    assert!(matches!(err, HistoryError::NotFound { id: missing } if missing == id));
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let (_adapter, store) = memory_store();
    let record = store.record_translation(RU, EN, "снег", "snow").await.unwrap();

    store.delete_record(record.id()).await.unwrap();
    assert!(store.list_all().is_empty());
    assert!(store.find(record.id()).is_none());

    let err = store.delete_record(record.id()).await.unwrap_err();
    assert!(matches!(err, HistoryError::NotFound { .. }));
}

#[tokio::test]
async fn failed_delete_rolls_back() {
    let (adapter, store) = memory_store();
    let record = store.record_translation(RU, EN, "лес", "forest").await.unwrap();

    adapter.fail_writes(true);
    assert!(store.delete_record(record.id()).await.is_err());
    assert_eq!(store.list_all(), vec![record]);
}

#[tokio::test]
async fn favorites_keep_recency_order() {
    let (_adapter, store) = memory_store();
    let a = store.record_translation(RU, EN, "а", "a").await.unwrap();
    let b = store.record_translation(RU, EN, "б", "b").await.unwrap();
    let c = store.record_translation(RU, EN, "в", "v").await.unwrap();

    store.toggle_favorite(a.id()).await.unwrap();
    store.toggle_favorite(c.id()).await.unwrap();

    let favorite_ids: Vec<Uuid> = store.list_favorites().iter().map(|r| r.id()).collect();
    assert_eq!(favorite_ids, vec![c.id(), a.id()]);
    assert!(store.find(b.id()).is_some_and(|r| !r.is_favorite()));
}

#[tokio::test]
async fn reload_restores_records_field_for_field() {
    let (adapter, store) = memory_store();
    store.record_translation(RU, EN, "утро", "morning").await.unwrap();
    let fav = store.record_translation(RU, EN, "вечер", "evening").await.unwrap();
    store.toggle_favorite(fav.id()).await.unwrap();
    let before = store.list_all();

    let reloaded = HistoryStore::new(adapter.clone());
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.list_all(), before);
    assert_eq!(reloaded.list_favorites().len(), 1);
}

#[tokio::test]
async fn reload_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(Arc::new(FileAdapter::new(dir.path())));
    let record = store.record_translation(RU, EN, "книга", "book").await.unwrap();

    let (reopened, problem) = HistoryStore::open(Arc::new(FileAdapter::new(dir.path())))
        .await
        .unwrap();
    assert!(problem.is_none());
    assert_eq!(reopened.list_all(), vec![record]);
}

#[tokio::test]
async fn scenario_privet_hello() {
    let (_adapter, store) = memory_store();
    store.load().await.unwrap();

    let ru = LanguageCode::parse("ru").unwrap();
    let en = LanguageCode::parse("en").unwrap();
    let record = store.record_translation(ru, en, "привет", "hello").await.unwrap();

    let all = store.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].source_text(), "привет");
    assert_eq!(all[0].translated_text(), "hello");
    assert!(!all[0].is_favorite());

    store.toggle_favorite(record.id()).await.unwrap();
    let favorites = store.list_favorites();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id(), record.id());
}

#[tokio::test]
async fn corrupt_state_is_reported_and_store_stays_usable() {
    let (adapter, store) = memory_store();
    adapter.put_raw(keys::HISTORY, "{ definitely not json");

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, HistoryError::CorruptState(_)));
    assert!(store.is_loaded());
    assert!(store.list_all().is_empty());

    store.record_translation(RU, EN, "снова", "again").await.unwrap();
    let reloaded = HistoryStore::new(adapter.clone());
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.len(), 1);
}

#[tokio::test]
async fn open_returns_corrupt_state_alongside_store() {
    let adapter = Arc::new(MemoryAdapter::new());
    adapter.put_raw(keys::HISTORY, r#"{"version": 1, "records": [{"id": 7}]}"#);

    let (store, problem) = HistoryStore::open(adapter).await.unwrap();
    assert!(matches!(problem, Some(HistoryError::CorruptState(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn read_failure_is_persistence_error() {
    let (adapter, store) = memory_store();
    adapter.fail_reads(true);

    assert!(matches!(
        store.load().await.unwrap_err(),
        HistoryError::Persistence(_)
    ));
    assert!(!store.is_loaded());
}

#[tokio::test]
async fn first_mutation_loads_lazily() {
    let (adapter, seed) = memory_store();
    let existing = seed.record_translation(RU, EN, "дом", "house").await.unwrap();

    let store = HistoryStore::new(adapter.clone());
    assert!(!store.is_loaded());
    store.record_translation(RU, EN, "сад", "garden").await.unwrap();

    let listed = store.list_all();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1], existing);
}

#[tokio::test]
async fn reads_do_not_touch_the_adapter() {
    let (adapter, store) = memory_store();
    store.record_translation(RU, EN, "вода", "water").await.unwrap();

    adapter.fail_reads(true);
    assert_eq!(store.list_all().len(), 1);
    assert!(store.list_favorites().is_empty());
}

#[tokio::test]
async fn empty_text_is_rejected_without_writing() {
    let (adapter, store) = memory_store();

    let err = store.record_translation(RU, EN, "   ", "x").await.unwrap_err();
    assert!(matches!(err, HistoryError::EmptyText));
    assert_eq!(adapter.write_count(), 0);
}

#[tokio::test]
async fn identity_language_pair_is_accepted() {
    let (_adapter, store) = memory_store();
    let record = store.record_translation(EN, EN, "hello", "hello").await.unwrap();
    assert_eq!(record.source_lang(), record.target_lang());
}

#[tokio::test]
async fn clear_empties_history_and_persists() {
    let (adapter, store) = memory_store();
    store.record_translation(RU, EN, "раз", "one").await.unwrap();
    store.record_translation(RU, EN, "два", "two").await.unwrap();

    store.clear().await.unwrap();
    assert!(store.is_empty());

    let reloaded = HistoryStore::new(adapter.clone());
    reloaded.load().await.unwrap();
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn failed_clear_rolls_back() {
    let (adapter, store) = memory_store();
    store.record_translation(RU, EN, "раз", "one").await.unwrap();

    adapter.fail_writes(true);
    assert!(store.clear().await.is_err());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn concurrent_mutations_do_not_lose_updates() {
    let adapter = Arc::new(MemoryAdapter::with_write_delay(Duration::from_millis(5)));
    let store = Arc::new(HistoryStore::new(adapter.clone()));

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .record_translation(RU, EN, format!("слово {i}"), format!("word {i}"))
                    .await
            })
        })
        .collect();

    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    assert_eq!(store.len(), 8);
    let reloaded = HistoryStore::new(adapter.clone());
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.list_all(), store.list_all());
}

#[tokio::test]
async fn subscribers_see_successful_mutations_only() {
    let (adapter, store) = memory_store();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    store.load().await.unwrap();
    let record = store.record_translation(RU, EN, "чай", "tea").await.unwrap();
    let toggled = store.toggle_favorite(record.id()).await.unwrap();

    adapter.fail_writes(true);
    assert!(store.delete_record(record.id()).await.is_err());
    adapter.fail_writes(false);

    store.delete_record(record.id()).await.unwrap();
    store.clear().await.unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            HistoryEvent::Loaded { count: 0 },
            HistoryEvent::Recorded(record.clone()),
            HistoryEvent::FavoriteToggled(toggled),
            HistoryEvent::Deleted { id: record.id() },
            HistoryEvent::Cleared,
        ]
    );

    assert!(subscription.unsubscribe());
    store.record_translation(RU, EN, "кофе", "coffee").await.unwrap();
    assert_eq!(events.lock().unwrap().len(), 5);
    assert_eq!(store.subscriber_count(), 0);
}

#[tokio::test]
async fn listener_may_read_the_store() {
    let (_adapter, store) = memory_store();
    let store = Arc::new(store);
    let counts = Arc::new(Mutex::new(Vec::new()));

    let weak = Arc::downgrade(&store);
    let sink = Arc::clone(&counts);
    let _subscription = store.subscribe(move |_| {
        if let Some(store) = weak.upgrade() {
            sink.lock().unwrap().push(store.len());
        }
    });

    store.record_translation(RU, EN, "луна", "moon").await.unwrap();
    store.record_translation(RU, EN, "солнце", "sun").await.unwrap();

    // Lazy load fires first, then each record is visible to its own event.
    assert_eq!(*counts.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test]
async fn repeated_ids_in_stored_history_are_corrupt() {
    let record = perevod_core::models::record::TranslationRecord::new(RU, EN, "эхо", "echo").unwrap();
    let blob = serde_json::json!({ "version": 1, "records": [record.clone(), record.clone()] });
    let adapter = Arc::new(MemoryAdapter::new());
    adapter.put_raw(keys::HISTORY, serde_json::to_vec(&blob).unwrap());

    let (store, problem) = HistoryStore::open(adapter).await.unwrap();
    assert!(matches!(problem, Some(HistoryError::CorruptState(_))));
    assert!(store.is_empty());

    let err = store.delete_record(record.id()).await.unwrap_err();
    assert!(matches!(err, HistoryError::NotFound { .. }));
}

#[tokio::test]
async fn lazy_load_over_corrupt_history_fails_first_mutation_only() {
    let (adapter, store) = memory_store();
    adapter.put_raw(keys::HISTORY, "{ broken");

    let err = store
        .record_translation(RU, EN, "первый", "first")
        .await
        .unwrap_err();
    assert!(matches!(err, HistoryError::CorruptState(_)));
    assert_eq!(adapter.write_count(), 0);
    assert!(store.is_loaded());
    assert!(store.is_empty());

    let record = store
        .record_translation(RU, EN, "второй", "second")
        .await
        .unwrap();
    assert_eq!(store.list_all(), vec![record]);
    assert_eq!(adapter.write_count(), 1);
}
