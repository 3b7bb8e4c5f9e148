use std::fs;
use std::path::PathBuf;
use userline_core::{FileRecordStore, RecordStore, StoreError};

const ID_A: &str = "11111111-2222-4333-8444-555555555555";
const ID_B: &str = "66666666-7777-4888-9999-aaaaaaaaaaaa";
const ID_C: &str = "bbbbbbbb-cccc-4ddd-8eee-ffffffffffff";

fn record(id: &str, name: &str) -> String {
    format!(r#"{{"id":"{id}","first_name":"{name}"}}"#)
}

fn store_in(dir: &tempfile::TempDir) -> (FileRecordStore, PathBuf) {
    let path = dir.path().join("users.txt");
    (FileRecordStore::new(&path), path)
}

#[test]
fn find_all_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);

    assert!(store.find_all().unwrap().is_empty());
    assert!(path.exists());
}

#[test]
fn missing_parent_directory_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileRecordStore::new(dir.path().join("missing").join("users.txt"));

    assert!(matches!(
        store.find_all().unwrap_err(),
        StoreError::Unavailable { .. }
    ));
    assert!(matches!(
        store.insert(&record(ID_A, "Ada")).unwrap_err(),
        StoreError::Unavailable { .. }
    ));
    assert!(matches!(
        store.update(ID_A, &record(ID_A, "Ada")).unwrap_err(),
        StoreError::Unavailable { .. }
    ));
}

#[test]
fn insert_appends_one_record_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    // No trailing newline in the existing file.
    fs::write(&path, record(ID_A, "Ada")).unwrap();

    store.insert(&record(ID_B, "Grace")).unwrap();
    store.insert(&record(ID_C, "Alan")).unwrap();

    assert_eq!(
        store.find_all().unwrap(),
        vec![record(ID_A, "Ada"), record(ID_B, "Grace"), record(ID_C, "Alan")]
    );
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);
}

#[test]
fn blank_lines_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    fs::write(
        &path,
        format!("\n{}\n\n   \n{}\r\n\n", record(ID_A, "Ada"), record(ID_B, "Grace")),
    )
    .unwrap();

    assert_eq!(
        store.find_all().unwrap(),
        vec![record(ID_A, "Ada"), record(ID_B, "Grace")]
    );
}

#[test]
fn find_by_id_scans_for_extracted_id() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _path) = store_in(&dir);
    store.insert(r#"{"note":"no id here"}"#).unwrap();
    store.insert(&record(ID_A, "Ada")).unwrap();
    store.insert(&record(ID_B, "Grace")).unwrap();

    assert_eq!(store.find_by_id(ID_B).unwrap(), record(ID_B, "Grace"));

    let err = store.find_by_id(ID_C).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == ID_C));

    // Records without an id never match the empty identifier.
    assert!(store.find_by_id("").unwrap_err().is_not_found());
}

#[test]
fn update_rewrites_in_place_preserving_order() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    for (id, name) in [(ID_A, "Ada"), (ID_B, "Grace"), (ID_C, "Alan")] {
        store.insert(&record(id, name)).unwrap();
    }

    store.update(ID_B, &record(ID_B, "Grace Hopper")).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!(
            "{}\n{}\n{}\n",
            record(ID_A, "Ada"),
            record(ID_B, "Grace Hopper"),
            record(ID_C, "Alan")
        )
    );
}

#[test]
fn update_of_unknown_id_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    store.insert(&record(ID_A, "Ada")).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = store.update(ID_B, &record(ID_B, "Grace")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn delete_drops_record_and_reports_second_delete() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _path) = store_in(&dir);
    for (id, name) in [(ID_A, "Ada"), (ID_B, "Grace"), (ID_C, "Alan")] {
        store.insert(&record(id, name)).unwrap();
    }

    store.delete(ID_B).unwrap();
    assert_eq!(
        store.find_all().unwrap(),
        vec![record(ID_A, "Ada"), record(ID_C, "Alan")]
    );

    assert!(store.delete(ID_B).unwrap_err().is_not_found());
    assert_eq!(store.find_all().unwrap().len(), 2);
}

#[test]
fn clear_truncates_file() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    store.insert(&record(ID_A, "Ada")).unwrap();

    store.clear().unwrap();

    assert!(store.find_all().unwrap().is_empty());
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn read_only_file_still_serves_reads() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    store.insert(&record(ID_A, "Ada")).unwrap();

    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions.clone()).unwrap();

    let all = store.find_all();
    let one = store.find_by_id(ID_A);

    permissions.set_readonly(false);
    fs::set_permissions(&path, permissions).unwrap();

    assert_eq!(all.unwrap(), vec![record(ID_A, "Ada")]);
    assert_eq!(one.unwrap(), record(ID_A, "Ada"));
}

#[test]
fn invalid_utf8_line_does_not_hide_other_records() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = store_in(&dir);
    let mut corrupt = format!(r#"{{"id":"{ID_B}","first_name":""#).into_bytes();
    corrupt.extend_from_slice(b"\xff\"}");
    let mut contents = record(ID_A, "Ada").into_bytes();
    contents.push(b'\n');
    contents.extend_from_slice(&corrupt);
    contents.push(b'\n');
    fs::write(&path, &contents).unwrap();

    assert_eq!(store.find_all().unwrap().len(), 2);
    assert_eq!(store.find_by_id(ID_A).unwrap(), record(ID_A, "Ada"));

    store.update(ID_A, &record(ID_A, "Ada King")).unwrap();
    assert_eq!(store.find_by_id(ID_A).unwrap(), record(ID_A, "Ada King"));

    store.delete(ID_A).unwrap();
    assert!(store.find_by_id(ID_A).unwrap_err().is_not_found());

    // The unrelated line survives the rewrites byte for byte.
    let mut expected = corrupt;
    expected.push(b'\n');
    assert_eq!(fs::read(&path).unwrap(), expected);
}
