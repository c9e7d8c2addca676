use std::path::PathBuf;

use twinmark::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".twinmarkrc");
    let content = r"
# comment
--markdown

--no-preview

--debug-log=debug.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.markdown);
    assert!(flags.no_preview);
    assert_eq!(flags.debug_log, Some(PathBuf::from("debug.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".twinmarkrc");
    std::fs::write(&path, "--markdown\n--debug-log file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "twinmark".to_string(),
        "--no-preview".to_string(),
        "notes.html".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.markdown, "file flags should remain enabled");
    assert!(effective.no_preview, "cli flags should be applied");
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_global_then_local_union() {
    let global = ConfigFlags {
        debug_log: Some(PathBuf::from("global.log")),
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        markdown: true,
        debug_log: Some(PathBuf::from("local.log")),
        ..ConfigFlags::default()
    };
    let merged = global.union(&local);
    assert!(merged.markdown);
    assert!(!merged.no_preview);
    assert_eq!(merged.debug_log, Some(PathBuf::from("local.log")));
}
