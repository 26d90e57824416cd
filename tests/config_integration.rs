use std::path::PathBuf;

use caretpad::config::{
    ConfigFlags, clear_config_flags, load_config_flags, parse_flag_tokens, save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".caretpadrc");
    let content = r"
# comment
--watch

--no-gutter
   
--render-debug-log=render.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert!(flags.no_gutter);
    assert!(!flags.perf);
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_extend_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".caretpadrc");
    std::fs::write(&path, "--watch\n--render-debug-log file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "caretpad".to_string(),
        "--perf".to_string(),
        "notes.txt".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_cli_debug_log_overrides_file() {
    let file = ConfigFlags {
        render_debug_log: Some(PathBuf::from("file.log")),
        ..ConfigFlags::default()
    };
    let cli = parse_flag_tokens(&[
        "caretpad".to_string(),
        "--render-debug-log".to_string(),
        "cli.log".to_string(),
    ]);
    let merged = file.union(&cli);
    assert_eq!(merged.render_debug_log, Some(PathBuf::from("cli.log")));
}

#[test]
fn test_save_then_load_then_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caretpad").join("config");
    let flags = ConfigFlags {
        watch: true,
        no_gutter: true,
        ..ConfigFlags::default()
    };

    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);

    clear_config_flags(&path).unwrap();
    assert!(!path.exists());
    assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
}
