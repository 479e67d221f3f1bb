//! Integration tests for the session lifecycle against an on-disk store
//!
//! Each test opens a SQLite store in a temp dir, drives the controller, then
//! reopens the store to check what actually landed on disk.

use buddy_core::clock::ManualClock;
use buddy_core::config::AssistantConfig;
use buddy_core::preferences;
use buddy_core::storage::{KeyValueStore, LEGACY_SESSIONS_KEY, SESSIONS_KEY};
use buddy_core::{
    Controller, Error, Event, SavedSession, Screen, SessionRepository, SqliteStore,
    TemplateAssistant,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup() -> TempDir {
    buddy_core::logging::init_test();
    TempDir::new().unwrap()
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data/store.db")
}

fn open_store(path: &Path) -> SqliteStore {
    let store = SqliteStore::open(path).expect("open store");
    store.migrate().expect("migrate store");
    store
}

fn open_controller(path: &Path) -> Controller<SqliteStore, TemplateAssistant> {
    let repo = SessionRepository::open(open_store(path)).expect("open repository");
    Controller::new(repo, TemplateAssistant, &AssistantConfig::default())
        .with_clock(ManualClock::at(1_700_000_000_000))
}

fn answer_all(controller: &mut Controller<SqliteStore, TemplateAssistant>) {
    controller.dispatch(Event::Start).unwrap();
    for question in buddy_core::questions::QUESTIONS {
        controller
            .dispatch(Event::Next {
                id: question.id.to_string(),
                answer: format!("my {}", question.id),
            })
            .unwrap();
    }
}

// ============================================
// Persistence
// ============================================

#[test]
fn test_saved_session_survives_reopen() {
    let dir = setup();
    let path = store_path(&dir);

    let id = {
        let mut controller = open_controller(&path);
        answer_all(&mut controller);
        assert_eq!(controller.screen(), Screen::Summary);
        controller
            .dispatch(Event::Save {
                title: "Everything answered".to_string(),
            })
            .unwrap();
        controller.state().active_session.clone().unwrap()
    };

    let repo = SessionRepository::open(open_store(&path)).unwrap();
    let session = repo.find_by_id(&id).expect("session persisted");
    assert_eq!(session.title, "Everything answered");
    assert_eq!(session.timestamp, 1_700_000_000_000);
    assert_eq!(session.app_idea.len(), 8);
    assert_eq!(session.app_idea.get("challenges"), Some("my challenges"));
}

#[test]
fn test_persisted_value_is_full_json_list() {
    let dir = setup();
    let path = store_path(&dir);

    let mut controller = open_controller(&path);
    answer_all(&mut controller);
    controller
        .dispatch(Event::Save {
            title: "First".to_string(),
        })
        .unwrap();
    controller.dispatch(Event::Restart).unwrap();
    answer_all(&mut controller);
    controller
        .dispatch(Event::Save {
            title: "Second".to_string(),
        })
        .unwrap();

    let raw = open_store(&path).get(SESSIONS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let list = value.as_array().expect("sessions stored as a JSON array");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["title"], "First");
    assert_eq!(list[1]["title"], "Second");
    assert!(list[1]["appIdea"].is_object());
}

#[test]
fn test_delete_persists() {
    let dir = setup();
    let path = store_path(&dir);

    {
        let mut controller = open_controller(&path);
        answer_all(&mut controller);
        controller
            .dispatch(Event::Save {
                title: "Doomed".to_string(),
            })
            .unwrap();
        let id = controller.state().active_session.clone().unwrap();
        controller.dispatch(Event::ViewSaved).unwrap();
        controller.dispatch(Event::Delete(id)).unwrap();
    }

    let repo = SessionRepository::open(open_store(&path)).unwrap();
    assert!(repo.is_empty());
}

// ============================================
// Legacy migration
// ============================================

#[test]
fn test_legacy_key_migrated_once_and_left_alone() {
    let dir = setup();
    let path = store_path(&dir);

    let legacy = vec![SavedSession {
        id: "session-1690000000000".to_string(),
        title: "From the old days".to_string(),
        timestamp: 1_690_000_000_000,
        app_idea: [("problem", "old problem")].into_iter().collect(),
    }];
    let legacy_raw = serde_json::to_string(&legacy).unwrap();
    open_store(&path)
        .set(LEGACY_SESSIONS_KEY, &legacy_raw)
        .unwrap();

    let repo = SessionRepository::open(open_store(&path)).unwrap();
    assert_eq!(repo.list(), legacy.as_slice());

    let store = open_store(&path);
    let current: Vec<SavedSession> =
        serde_json::from_str(&store.get(SESSIONS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(current, legacy);
    assert_eq!(
        store.get(LEGACY_SESSIONS_KEY).unwrap().as_deref(),
        Some(legacy_raw.as_str())
    );

    // Running again changes nothing
    let again = SessionRepository::open(open_store(&path)).unwrap();
    assert_eq!(again.list(), legacy.as_slice());
}

#[test]
fn test_legacy_json_from_browser_shape_loads() {
    let dir = setup();
    let path = store_path(&dir);
    let raw = r#"[{"id":"session-1","title":"Plants","timestamp":1700000000000,"appIdea":{"problem":"dry plants","audience":"busy people","extra":"kept"}}]"#;
    open_store(&path).set(LEGACY_SESSIONS_KEY, raw).unwrap();

    let repo = SessionRepository::open(open_store(&path)).unwrap();

    let session = repo.find_by_id("session-1").unwrap();
    assert_eq!(session.app_idea.get("extra"), Some("kept"));
}

// ============================================
// Errors and preferences
// ============================================

#[test]
fn test_corrupt_session_list_surfaces_parse_error() {
    let dir = setup();
    let path = store_path(&dir);
    open_store(&path).set(SESSIONS_KEY, "[{\"id\":").unwrap();

    let result = SessionRepository::open(open_store(&path));

    assert!(matches!(result, Err(Error::Json(_))));
    assert_eq!(
        open_store(&path).get(SESSIONS_KEY).unwrap().as_deref(),
        Some("[{\"id\":")
    );
}

#[test]
fn test_dark_mode_flag_round_trips_through_store() {
    let dir = setup();
    let path = store_path(&dir);

    assert!(preferences::dark_mode(&open_store(&path), true).unwrap());
    preferences::set_dark_mode(&open_store(&path), false).unwrap();
    assert!(!preferences::dark_mode(&open_store(&path), true).unwrap());
}
