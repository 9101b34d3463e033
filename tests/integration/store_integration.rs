//! Node store behavior through the public API

use talos::error::StorageError;
use talos::store::seed::{DOCUMENTS_FOLDER_ID, README_FILE_ID, TODO_FILE_ID};
use talos::store::{NodeStore, StoreHandle};

#[test]
fn test_created_file_reads_back_unchanged() {
    let mut store = NodeStore::in_memory();
    let created = store
        .create_file("notes.md", "# Notes", "md", Some(DOCUMENTS_FOLDER_ID))
        .unwrap();

    let fetched = store.file_by_id(&created.id).unwrap();
    assert_eq!(fetched, &created);
    assert_eq!(fetched.parent_id.as_deref(), Some(DOCUMENTS_FOLDER_ID));
    assert!(fetched.created_at <= fetched.updated_at);
    assert!(created.id.starts_with("file-"));
}

#[test]
fn test_update_bumps_updated_at_only() {
    let mut store = NodeStore::in_memory();
    let before = store.file_by_id(README_FILE_ID).unwrap().clone();
    store.update_file_content(README_FILE_ID, "changed").unwrap();

    let after = store.file_by_id(README_FILE_ID).unwrap();
    assert_eq!(after.content, "changed");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[test]
fn test_cascading_delete_leaves_no_orphans() {
    let mut store = NodeStore::in_memory();
    let a = store.create_folder("a", None).unwrap();
    let b = store.create_folder("b", Some(&a.id)).unwrap();
    let c = store.create_folder("c", Some(&b.id)).unwrap();
    store.create_file("x.txt", "", "txt", Some(&a.id)).unwrap();
    store.create_file("y.txt", "", "txt", Some(&c.id)).unwrap();

    let summary = store.delete_folder(&a.id).unwrap();
    assert_eq!(summary.folders, 3);
    assert_eq!(summary.files, 2);

    for id in [&a.id, &b.id, &c.id] {
        assert!(store.folder_by_id(id).is_none());
        assert!(store.files_in_folder(Some(id)).is_empty());
        assert!(store.folders_in_folder(Some(id)).is_empty());
    }
    assert!(store.file_by_id(TODO_FILE_ID).is_some());
}

#[test]
fn test_delete_moves_cursor_out_of_subtree() {
    let mut store = NodeStore::in_memory();
    let a = store.create_folder("a", Some(DOCUMENTS_FOLDER_ID)).unwrap();
    let b = store.create_folder("b", Some(&a.id)).unwrap();
    store.navigate_to_folder(Some(b.id.clone()));

    store.delete_folder(&a.id).unwrap();
    assert_eq!(store.current_folder(), Some(DOCUMENTS_FOLDER_ID));
}

#[test]
fn test_sibling_names_are_unique_across_kinds() {
    let mut store = NodeStore::in_memory();
    let err = store
        .create_file("Documents", "", "txt", None)
        .unwrap_err();
    assert!(matches!(err, StorageError::NameConflict { .. }));

    // Same name under a different parent is fine
    store
        .create_folder("Documents", Some(DOCUMENTS_FOLDER_ID))
        .unwrap();
}

#[test]
fn test_missing_parent_rejected() {
    let mut store = NodeStore::in_memory();
    let err = store
        .create_folder("orphan", Some("folder-missing"))
        .unwrap_err();
    assert_eq!(err, StorageError::ParentNotFound("folder-missing".to_string()));
}

#[test]
fn test_handle_shares_one_store() {
    let handle = StoreHandle::new(NodeStore::in_memory());
    let other = handle.clone();
    handle.write().create_folder("shared", None).unwrap();
    assert!(other
        .read()
        .folders_in_folder(None)
        .iter()
        .any(|f| f.name == "shared"));
}
