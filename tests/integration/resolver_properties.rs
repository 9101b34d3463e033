//! Property tests for path resolution

use proptest::prelude::*;
use talos::store::NodeStore;
use talos::tree::resolver::{display_path, resolve_path, Resolved};

const ROOT: &str = "C:";

/// Build a random folder tree; returns the ids of the folders created.
fn build_tree(store: &mut NodeStore, specs: &[(String, usize)]) -> Vec<String> {
    let mut created: Vec<String> = Vec::new();
    for (name, pick) in specs {
        let slot = pick % (created.len() + 1);
        let parent = if slot == 0 {
            None
        } else {
            Some(created[slot - 1].clone())
        };
        if let Ok(folder) = store.create_folder(name, parent.as_deref()) {
            created.push(folder.id);
        }
    }
    created
}

fn tree_specs() -> impl Strategy<Value = Vec<(String, usize)>> {
    prop::collection::vec(("[A-Za-z][A-Za-z0-9_ ]{0,7}", 0usize..64), 1..16)
}

proptest! {
    #[test]
    fn display_path_resolves_back_to_folder(specs in tree_specs()) {
        let mut store = NodeStore::in_memory();
        let created = build_tree(&mut store, &specs);
        for id in &created {
            let path = display_path(&store, Some(id), ROOT);
            prop_assert_eq!(
                resolve_path(&store, None, &path, ROOT),
                Resolved::Folder(Some(id.clone()))
            );
        }
    }

    #[test]
    fn resolution_is_idempotent(specs in tree_specs(), path in "[A-Za-z./\\\\]{0,16}") {
        let mut store = NodeStore::in_memory();
        let created = build_tree(&mut store, &specs);
        let current = created.first().map(String::as_str);
        let first = resolve_path(&store, current, &path, ROOT);
        let second = resolve_path(&store, current, &path, ROOT);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn absolute_paths_ignore_current_folder(specs in tree_specs()) {
        let mut store = NodeStore::in_memory();
        let created = build_tree(&mut store, &specs);
        for id in &created {
            let path = display_path(&store, Some(id), ROOT);
            for current in &created {
                prop_assert_eq!(
                    resolve_path(&store, Some(current), &path, ROOT),
                    Resolved::Folder(Some(id.clone()))
                );
            }
        }
    }

    #[test]
    fn parent_segment_from_any_folder_reaches_its_parent(specs in tree_specs()) {
        let mut store = NodeStore::in_memory();
        let created = build_tree(&mut store, &specs);
        for id in &created {
            let parent = store.folder_by_id(id).and_then(|f| f.parent_id.clone());
            prop_assert_eq!(
                resolve_path(&store, Some(id), "..", ROOT),
                Resolved::Folder(parent)
            );
        }
    }
}

#[test]
fn root_markers_all_resolve_to_root() {
    let store = NodeStore::in_memory();
    for path in ["/", "\\", "~", "C:", "C:\\", "C:/", "D:\\"] {
        assert_eq!(
            resolve_path(&store, Some("folder-documents"), path, ROOT),
            Resolved::Folder(None),
            "path {path:?}"
        );
    }
}
