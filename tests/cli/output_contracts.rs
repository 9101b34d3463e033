use talos::config::{BackendKind, TalosConfig};
use talos::tooling::cli::{CliContext, Commands, ConfigCommands};
use tempfile::TempDir;

fn memory_context() -> CliContext {
    let mut config = TalosConfig::default();
    config.storage.backend = BackendKind::Memory;
    CliContext::new(config).unwrap()
}

fn file_context(dir: &TempDir) -> CliContext {
    let mut config = TalosConfig::default();
    config.storage.backend = BackendKind::File;
    config.storage.data_dir = Some(dir.path().to_path_buf());
    CliContext::new(config).unwrap()
}

fn exec(lines: &[&str], format: &str) -> Commands {
    Commands::Exec {
        lines: lines.iter().map(|l| l.to_string()).collect(),
        format: format.to_string(),
    }
}

#[test]
fn status_json_contract_has_required_fields() {
    let output = memory_context()
        .execute(&Commands::Status {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("backend").and_then(|v| v.as_str()), Some("memory"));
    assert_eq!(parsed.get("folders").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(parsed.get("files").and_then(|v| v.as_u64()), Some(2));
    assert!(parsed.get("content_bytes").and_then(|v| v.as_u64()).is_some());
    assert!(parsed.pointer("/root/folders").is_some());
}

#[test]
fn status_text_contains_table() {
    let output = memory_context()
        .execute(&Commands::Status {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("Filesystem Status"));
    assert!(output.contains("Backend"));
    assert!(output.contains("memory"));
}

#[test]
fn exec_json_contract_tags_each_line() {
    let output = memory_context()
        .execute(&exec(&["ls", "cat missing.txt"], "json"))
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let lines = parsed.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["kind"], "markup");
    assert_eq!(lines[0]["body"][0]["name"], "Documents");
    assert_eq!(lines[0]["body"][0]["kind"], "folder");
    assert_eq!(lines[1]["kind"], "error");
}

#[test]
fn export_contains_both_collections() {
    let output = memory_context().execute(&Commands::Export).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["folders"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["files"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["files"][0]["id"], "file-readme");
}

#[test]
fn exec_changes_survive_a_new_context() {
    let temp = TempDir::new().unwrap();
    file_context(&temp)
        .execute(&exec(&["mkdir projects", "touch projects/plan.txt"], "text"))
        .unwrap();

    let output = file_context(&temp)
        .execute(&exec(&["ls projects"], "text"))
        .unwrap();
    assert_eq!(output, "plan.txt");
}

#[test]
fn reset_discards_persisted_changes() {
    let temp = TempDir::new().unwrap();
    file_context(&temp)
        .execute(&exec(&["rm -r Documents"], "text"))
        .unwrap();
    file_context(&temp).execute(&Commands::Reset).unwrap();

    let output = file_context(&temp)
        .execute(&exec(&["cat Documents/todo.txt"], "text"))
        .unwrap();
    assert!(output.starts_with("1. Learn Rust"));
}

#[test]
fn config_show_renders_parseable_toml() {
    let output = memory_context()
        .execute(&Commands::Config {
            command: ConfigCommands::Show,
        })
        .unwrap();
    let parsed: TalosConfig = toml::from_str(&output).unwrap();
    assert_eq!(parsed.session.user, "admin");
    assert_eq!(parsed.storage.backend, BackendKind::Memory);
}
