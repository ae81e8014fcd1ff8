use confit::{BufferStream, DataSource, Error, SourceRegistry, register_source};
use std::io::Read;

#[test]
fn string_source_round_trip() {
    let doc = confit_yaml::parse(
        r#"
name: test
foo:
  string: "hello world"
"#,
    )
    .unwrap();

    let mut source = DataSource::from_yaml(doc.get("foo").unwrap(), None).unwrap();
    let mut data = String::new();
    source.read_to_string(&mut data).unwrap();
    assert_eq!(data, "hello world");
}

#[test]
fn bytes_source_round_trip() {
    let mut source = DataSource::parse("bytes: \"raw bytes here\"", None).unwrap();
    let mut data = Vec::new();
    source.read_to_end(&mut data).unwrap();
    assert_eq!(data, b"raw bytes here");
}

#[test]
fn env_source_reads_variable() {
    // set_var is unsafe in edition 2024; the name is unique to this test.
    unsafe { std::env::set_var("CONFIT_TEST_VAL", "from env") };

    let mut source = DataSource::parse("env: CONFIT_TEST_VAL", None).unwrap();
    let mut data = String::new();
    source.read_to_string(&mut data).unwrap();
    assert_eq!(data, "from env");
}

#[test]
fn env_source_unset_variable_fails_on_read() {
    // Resolution succeeds; the lookup happens on first read.
    let mut source = DataSource::parse("env: CONFIT_TEST_DEFINITELY_UNSET", None).unwrap();
    let mut data = String::new();
    let err = source.read_to_string(&mut data).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn file_source_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.txt");
    std::fs::write(&path, "file contents").unwrap();

    let mut source =
        DataSource::parse(&format!("file: {}", path.display()), None).unwrap();
    let mut data = String::new();
    source.read_to_string(&mut data).unwrap();
    assert_eq!(data, "file contents");
}

#[test]
fn file_source_defers_filesystem_access() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.txt");

    // The file does not exist at resolution time.
    let mut source =
        DataSource::parse(&format!("file: {}", path.display()), None).unwrap();

    // Created between resolution and first read, so the read succeeds.
    std::fs::write(&path, "written later").unwrap();

    let mut data = String::new();
    source.read_to_string(&mut data).unwrap();
    assert_eq!(data, "written later");
}

#[test]
fn close_is_idempotent_after_resolution() {
    let mut source = DataSource::parse("string: abc", None).unwrap();
    let mut data = String::new();
    source.read_to_string(&mut data).unwrap();

    assert!(source.close().is_ok());
    assert!(source.close().is_ok());

    // The stream is fixed for the handle's lifetime; no re-resolution.
    let mut buf = [0u8; 4];
    assert!(source.read(&mut buf).is_err());
}

#[test]
fn close_without_read_is_ok() {
    let mut source = DataSource::parse("string: abc", None).unwrap();
    assert!(source.close().is_ok());
    assert!(source.close().is_ok());
}

#[test]
fn close_on_never_resolved_handle_is_uninitialized_both_times() {
    let mut source = DataSource::default();
    assert!(matches!(source.close(), Err(Error::Uninitialized)));
    assert!(matches!(source.close(), Err(Error::Uninitialized)));
}

#[test]
fn custom_source_on_scoped_registry() {
    let registry = SourceRegistry::with_builtins();
    register_source(Some(&registry), "upper", |value| {
        Ok(Box::new(BufferStream::new(
            value.to_uppercase().into_bytes(),
        )))
    });

    let mut source = DataSource::parse("upper: quiet please", Some(&registry)).unwrap();
    let mut data = String::new();
    source.read_to_string(&mut data).unwrap();
    assert_eq!(data, "QUIET PLEASE");

    // The scoped tag is not visible through the default registry.
    let err = DataSource::parse("upper: quiet please", None).unwrap_err();
    assert!(matches!(err, Error::UnknownSourceTag { .. }));
}

#[test]
fn unknown_tag_reports_key_and_line() {
    let err = DataSource::parse("\ncarrier-pigeon: coop", None).unwrap_err();
    match err {
        Error::UnknownSourceTag { tag, line } => {
            assert_eq!(tag, "carrier-pigeon");
            assert_eq!(line, 2);
        }
        other => panic!("expected UnknownSourceTag, got {other:?}"),
    }
}

#[test]
fn duplicate_keys_first_match_wins() {
    let mut source = DataSource::parse("string: first\nstring: second", None).unwrap();
    let mut data = String::new();
    source.read_to_string(&mut data).unwrap();
    assert_eq!(data, "first");
}
