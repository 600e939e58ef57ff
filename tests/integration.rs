use chrono::DateTime;
use serde_json::json;
use tokio::io::BufReader;

use liquiddoc::catalog::{FileCatalog, NewFile, Privacy, RECENT_LIMIT};
use liquiddoc::console::{Console, run_console};
use liquiddoc::session::{Navigation, Role, SessionRegistry, UserProfile};
use liquiddoc::storage::{FileBackend, KeyValueStore, keys};

// Helper to drive a console session and collect its replies
async fn run_lines(console: &mut Console, input: &str) -> Vec<String> {
    let mut out = Vec::new();
    run_console(console, BufReader::new(input.as_bytes()), &mut out, 512)
        .await
        .unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn add_report_pdf() {
    let mut catalog = FileCatalog::new(KeyValueStore::in_memory());
    let existing = catalog.add(NewFile::new("old.txt", 1));

    let record = catalog.add(NewFile::new("report.pdf", 1024).with_type("application/pdf"));

    assert_eq!(record.privacy, Privacy::Public);
    assert_ne!(record.id, existing.id);
    let stored = serde_json::to_value(&record).unwrap();
    assert!(DateTime::parse_from_rfc3339(stored["uploadDate"].as_str().unwrap()).is_ok());
    assert_eq!(stored["type"], "application/pdf");
    assert_eq!(catalog.get(&record.id), Some(&record));
}

#[test]
fn update_privacy_moves_between_filters() {
    let mut catalog = FileCatalog::new(KeyValueStore::in_memory());
    let id = catalog.add(NewFile::new("report.pdf", 1024)).id;

    assert!(catalog.update_privacy(&id, Privacy::Private));

    assert!(catalog.filter("public").iter().all(|f| f.id != id));
    assert!(catalog.filter("private").iter().any(|f| f.id == id));
}

#[test]
fn insertion_order_and_removal() {
    let mut catalog = FileCatalog::new(KeyValueStore::in_memory());
    let first = catalog.add(NewFile::new("a.txt", 1));
    let second = catalog.add(NewFile::new("b.txt", 2));

    let ids: Vec<&str> = catalog.get_all().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, [first.id.as_str(), second.id.as_str()]);

    assert!(catalog.remove(&first.id));
    assert_eq!(catalog.get(&first.id), None);
    assert!(!catalog.remove(&first.id));
}

#[test]
fn recent_is_capped_and_newest_first() {
    let store = KeyValueStore::in_memory();
    let planted: Vec<_> = (0..15)
        .map(|i| {
            json!({
                "id": format!("id{i}"),
                "name": format!("f{i}.txt"),
                "size": i,
                "privacy": "public",
                "uploadDate": format!("2024-01-{:02}T00:00:00.000Z", (i * 7) % 15 + 1),
            })
        })
        .collect();
    assert!(store.set(keys::FILES, &planted));

    let mut catalog = FileCatalog::new(store);
    let recent = catalog.filter("recent");
    assert_eq!(recent.len(), RECENT_LIMIT);
    assert!(recent.windows(2).all(|w| w[0].upload_date >= w[1].upload_date));

    // Storage order is untouched
    assert_eq!(catalog.get_all()[0].id, "id0");
}

#[test]
fn search_is_case_insensitive_subset() {
    let mut catalog = FileCatalog::new(KeyValueStore::in_memory());
    for name in ["Report.PDF", "notes.txt", "q3-report.xlsx"] {
        catalog.add(NewFile::new(name, 10));
    }

    let names: Vec<&str> = catalog.search("REPORT").iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Report.PDF", "q3-report.xlsx"]);
    assert_eq!(catalog.search("").len(), 3);
}

#[test]
fn catalogs_over_one_store_see_each_other() {
    let store = KeyValueStore::in_memory();
    let mut first = FileCatalog::new(store.clone());
    let mut second = FileCatalog::new(store);

    let record = first.add(NewFile::new("shared.txt", 5));
    assert_eq!(second.get(&record.id), Some(&record));

    second.remove(&record.id);
    assert!(first.get_all().is_empty());
}

#[test]
fn file_backend_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let store = KeyValueStore::new(FileBackend::open(dir.path()).unwrap());
        let mut catalog = FileCatalog::new(store.clone());
        let mut session = SessionRegistry::new(store);
        session.login(UserProfile::new("ada@demo.com", None, Role::Admin));
        catalog
            .add(NewFile::new("kept.txt", 3).with_privacy(Privacy::Private))
            .id
    };

    let store = KeyValueStore::new(FileBackend::open(dir.path()).unwrap());
    let mut catalog = FileCatalog::new(store.clone());
    let mut session = SessionRegistry::new(store);

    assert_eq!(catalog.get(&id).map(|f| f.privacy), Some(Privacy::Private));
    assert_eq!(session.get_user().map(|u| u.name.as_str()), Some("ada"));
    assert_eq!(session.require_role(Role::Admin), Navigation::Stay);
}

#[test]
fn session_flag_lifecycle() {
    let mut session = SessionRegistry::new(KeyValueStore::in_memory());
    assert!(!session.is_logged_in());

    session.login(UserProfile::new("ada@demo.com", Some("Ada".into()), Role::User));
    assert!(session.is_logged_in());

    assert_eq!(session.logout(), Navigation::Login);
    assert!(!session.is_logged_in());
}

#[test]
fn store_round_trip_and_missing_key() {
    let store = KeyValueStore::in_memory();
    let value = json!({"nested": [1, "two", null, {"x": true}], "n": 1.5});

    assert!(store.set("blob", &value));
    assert_eq!(store.get::<serde_json::Value>("blob"), Some(value));
    assert_eq!(store.get::<serde_json::Value>("absent"), None);
}

#[tokio::test]
async fn console_requires_login_for_catalog() {
    let mut console = Console::new(KeyValueStore::in_memory());
    let replies = run_lines(
        &mut console,
        "ADD report.pdf 1024 application/pdf\n\
         LOGIN ada@demo.com admin Ada Lovelace\n\
         ADD report.pdf 1024 application/pdf\n\
         STATS\n\
         LOGOUT\n\
         LIST\n\
         QUIT\n",
    )
    .await;

    let codes: Vec<&str> = replies
        .iter()
        .filter(|l| l.as_bytes().get(3) == Some(&b' '))
        .map(|l| &l[..3])
        .collect();
    assert_eq!(codes, ["220", "530", "230", "250", "211", "200", "530", "221"]);
    assert!(replies.iter().any(|l| l == " Total files: 1"));
}
