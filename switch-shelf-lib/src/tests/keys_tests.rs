use super::*;

fn origin() -> PathBuf {
    PathBuf::from("prod.keys")
}

#[test]
fn test_parse_keys() {
    let text = "\
# console keys
header_key = 00112233445566778899AABBCCDDEEFF
; comment
key_area_key_application_00 = deadbeef

";
    let keys = KeySet::parse(text, &origin()).unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys.get("key_area_key_application_00"), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
    assert!(keys.deep_scan_available());
}

#[test]
fn test_names_are_case_insensitive() {
    let keys = KeySet::parse("HEADER_KEY = 0102", &origin()).unwrap();
    assert_eq!(keys.get(HEADER_KEY), Some(&[1, 2][..]));
}

#[test]
fn test_missing_header_key() {
    let keys = KeySet::parse("titlekek_00 = 0102", &origin()).unwrap();
    assert!(!keys.deep_scan_available());
    assert!(!KeySet::default().deep_scan_available());
}

#[test]
fn test_empty_header_key_is_unusable() {
    let keys = KeySet::parse("header_key =", &origin()).unwrap();
    assert!(!keys.deep_scan_available());
}

#[test]
fn test_syntax_error_reports_line() {
    let err = KeySet::parse("# ok\nnot a key line\n", &origin()).unwrap_err();
    assert!(matches!(err, KeysError::Syntax { line: 2, .. }));
}

#[test]
fn test_invalid_hex() {
    let err = KeySet::parse("header_key = xyz", &origin()).unwrap_err();
    match err {
        KeysError::InvalidHex { line, name, .. } => {
            assert_eq!(line, 1);
            assert_eq!(name, "header_key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prod.keys");
    std::fs::write(&path, "header_key = aabb\n").unwrap();

    let keys = KeySet::load(&path).unwrap();
    assert_eq!(keys.path(), Some(path.as_path()));
    assert!(keys.deep_scan_available());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = KeySet::load(&dir.path().join("absent.keys")).unwrap_err();
    assert!(matches!(err, KeysError::Io { .. }));
}
