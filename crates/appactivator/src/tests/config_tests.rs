use std::path::PathBuf;

use super::{ActivatorConfig, parse_extensions};
use crate::discovery::dynamic_library_ext;
use crate::error::Error;
use appactivator_api::APPACTIVATOR_ENTRY_SYMBOL;

#[test]
fn defaults_follow_the_platform() {
    let config = ActivatorConfig::default();
    assert_eq!(config.entry_symbol(), APPACTIVATOR_ENTRY_SYMBOL);
    let ext = dynamic_library_ext();
    if ext.is_empty() {
        assert!(config.resolved_extensions().is_empty());
    } else {
        assert_eq!(config.resolved_extensions(), vec![ext.to_string()]);
    }
    let dir = config.resolved_module_dir().expect("host base directory");
    let exe = std::env::current_exe().expect("current exe");
    assert_eq!(Some(dir.as_path()), exe.parent());
}

#[test]
fn json_file_overrides_defaults() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("activator.json");
    std::fs::write(
        &path,
        r#"{ "module_dir": "/srv/app/bin", "extensions": ["dll", "so"] }"#,
    )
    .expect("write config");

    let config = ActivatorConfig::from_json_file(&path).expect("parse config");
    assert_eq!(config.module_dir, Some(PathBuf::from("/srv/app/bin")));
    assert_eq!(config.resolved_extensions(), ["dll", "so"]);
    assert_eq!(config.entry_symbol(), APPACTIVATOR_ENTRY_SYMBOL);
    assert_eq!(
        config.resolved_module_dir().expect("configured dir"),
        PathBuf::from("/srv/app/bin")
    );
}

#[test]
fn invalid_json_reports_path() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write config");

    match ActivatorConfig::from_json_file(&path) {
        Err(Error::JsonAt { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn blank_entry_symbol_is_rejected() {
    let config = ActivatorConfig {
        entry_symbol: Some("  ".to_string()),
        ..ActivatorConfig::default()
    };
    assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
}

#[test]
fn extension_list_parsing_trims_and_drops_empties() {
    assert_eq!(parse_extensions(" .dll, so ,,dylib"), ["dll", "so", "dylib"]);
    assert!(parse_extensions("").is_empty());
}
