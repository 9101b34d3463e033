use clap::{CommandFactory, Parser};
use talos::tooling::cli::{Cli, Commands, ConfigCommands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["talos"],
        vec!["talos", "shell"],
        vec!["talos", "exec", "ls"],
        vec!["talos", "exec", "cd Documents", "cat todo.txt", "--format", "json"],
        vec!["talos", "status"],
        vec!["talos", "status", "--format", "json"],
        vec!["talos", "export"],
        vec!["talos", "reset"],
        vec!["talos", "config", "show"],
        vec!["talos", "--memory", "--log-level", "debug", "status"],
        vec!["talos", "status", "--data-dir", "/tmp/talos", "--log-output", "stderr"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_exec_without_lines() {
    assert!(Cli::try_parse_from(["talos", "exec"]).is_err());
}

#[test]
fn parse_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["talos", "format-disk"]).is_err());
    assert!(Cli::try_parse_from(["talos", "config", "edit"]).is_err());
}

#[test]
fn exec_collects_lines_in_order() {
    let cli = Cli::try_parse_from(["talos", "exec", "mkdir a", "cd a", "pwd"]).unwrap();
    assert_eq!(
        cli.resolved_command(),
        Commands::Exec {
            lines: vec!["mkdir a".to_string(), "cd a".to_string(), "pwd".to_string()],
            format: "text".to_string(),
        }
    );
}

#[test]
fn config_show_parses_nested_subcommand() {
    let cli = Cli::try_parse_from(["talos", "config", "show"]).unwrap();
    assert_eq!(
        cli.resolved_command(),
        Commands::Config {
            command: ConfigCommands::Show
        }
    );
}

#[test]
fn top_level_help_lists_every_subcommand() {
    let mut command = Cli::command();
    let mut output = Vec::new();
    command.write_long_help(&mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    for token in ["shell", "exec", "status", "export", "reset", "config", "--memory", "--data-dir"] {
        assert!(output.contains(token), "help is missing {token}");
    }
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
