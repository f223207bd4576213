use std::io;

use super::{DirectoryModuleSource, ModuleCandidate, ModuleSource, classify_io_error};
use crate::discovery::dynamic_library_ext;
use crate::error::{LoadError, UnsuitableReason};

fn library_name(stem: &str) -> String {
    format!("{stem}.{}", dynamic_library_ext())
}

#[test]
fn junk_file_is_unsuitable_not_fatal() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let junk = temp.path().join(library_name("native_tool"));
    std::fs::write(&junk, b"definitely not a shared object").expect("write junk");

    let source = DirectoryModuleSource::new(temp.path());
    let candidates = source.enumerate().expect("enumerate");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].path(), Some(junk.as_path()));

    match source.load(&candidates[0]) {
        Err(LoadError::Unsuitable {
            reason: UnsuitableReason::NotLoadable(_),
            ..
        }) => {}
        Err(other) => panic!("unexpected load error: {other}"),
        Ok(module) => panic!("junk file loaded as {module:?}"),
    }
}

#[test]
fn vanished_candidate_is_not_found() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let gone = temp.path().join(library_name("gone"));
    let source = DirectoryModuleSource::new(temp.path());

    let err = source
        .load(&ModuleCandidate::from_path(gone, 0))
        .expect_err("missing file must not load");
    assert!(err.is_recoverable());
    assert!(matches!(
        err,
        LoadError::Unsuitable {
            reason: UnsuitableReason::NotFound,
            ..
        }
    ));
}

#[test]
fn candidate_without_path_is_invalid() {
    let source = DirectoryModuleSource::new(".");
    let err = source
        .load(&ModuleCandidate::new("static:nothing", None, 0))
        .expect_err("pathless candidate");
    assert!(matches!(
        err,
        LoadError::Unsuitable {
            reason: UnsuitableReason::InvalidPath,
            ..
        }
    ));
}

#[test]
fn io_errors_are_classified() {
    let cases = [
        (io::ErrorKind::NotFound, Some(UnsuitableReason::NotFound)),
        (
            io::ErrorKind::PermissionDenied,
            Some(UnsuitableReason::AccessDenied),
        ),
        (io::ErrorKind::InvalidInput, Some(UnsuitableReason::InvalidPath)),
        (io::ErrorKind::Other, None),
    ];
    for (kind, expected) in cases {
        let err = classify_io_error("x", io::Error::new(kind, "boom"));
        match (err, expected) {
            (LoadError::Unsuitable { reason, .. }, Some(expected)) => assert_eq!(reason, expected),
            (LoadError::Fatal { details, .. }, None) => assert!(details.contains("boom")),
            (err, expected) => panic!("{kind:?}: got {err:?}, expected {expected:?}"),
        }
    }
}

#[cfg(target_os = "linux")]
#[test]
fn name_too_long_is_unsuitable() {
    let err = classify_io_error("x", io::Error::from_raw_os_error(36));
    assert!(matches!(
        err,
        LoadError::Unsuitable {
            reason: UnsuitableReason::PathTooLong,
            ..
        }
    ));
}
