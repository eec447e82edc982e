//! End-to-end runs over input files on disk.

use std::{fs, path::Path};

use flattener::{
    pipeline::read_blob, storage::table, Config, LoadError, Paths, Pipeline, PipelineError,
};

const INPUT: &str = r#"{
    "2001": {
        "title": "Crash on save",
        "body": "Steps:\r\n1. save\n2. crash",
        "is_pr": false,
        "created_at": "2024-01-01T10:00:00Z",
        "closed_at": "2024-01-05T10:00:00Z",
        "userlogin": "reporter",
        "comments": {
            "0": { "userlogin": "dev", "body": "a" },
            "1": { "userlogin": "reporter", "body": "b" }
        },
        "commits": {}
    },
    "2002": {
        "title": "Broken",
        "comments": 42
    },
    "2003": {
        "title": "Fix crash on save",
        "body": "fixes #2001 and closes https://github.com/o/r/issues/34",
        "is_pr": true,
        "created_at": "2024-01-02T10:00:00Z",
        "closed_at": null,
        "userlogin": "dev",
        "comments": {},
        "commits": {
            "0": { "sha": "jan", "author_name": "alice", "date": "2024-01-01T00:00:00Z", "files": ["src/save.rs"] },
            "1": { "sha": "mar", "author_name": "bob", "date": "2024-03-01T00:00:00Z", "files": ["src/io.rs"] },
            "2": { "sha": "wip", "author_name": "carol", "date": "", "files": ["src/save.rs"] }
        }
    }
}"#;

fn write_input(dir: &Path, name: &str, contents: &str) -> Paths {
    let input = dir.join(name);
    fs::write(&input, contents).unwrap();
    Paths::from_input(input, None).unwrap()
}

#[test]
fn malformed_record_is_skipped_and_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_input(tmp.path(), "issues.json", INPUT);

    let report = Pipeline::default().run(&paths).unwrap();

    assert_eq!(report.loaded, 3);
    assert_eq!(report.extracted, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].identifier, "2002");

    let rows = table::read_rows(fs::File::open(tmp.path().join("issues.csv")).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn table_rows_hold_joined_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_input(tmp.path(), "issues.json", INPUT);

    Pipeline::default().run(&paths).unwrap();

    let rows = table::read_rows(fs::File::open(&paths.table).unwrap()).unwrap();

    let issue = &rows[0];
    assert_eq!(issue[0], "1");
    assert_eq!(issue[1], "2001");
    assert_eq!(issue[2], "false");
    assert_eq!(issue[6], "Steps:  1. save 2. crash");
    assert_eq!(issue[11], "a | b");
    assert_eq!(issue[12], "");
    assert_eq!(issue[13], "");
    assert_eq!(issue[14], "");

    let pull = &rows[1];
    assert_eq!(pull[0], "3");
    assert_eq!(pull[1], "2003");
    assert_eq!(pull[3], "https://github.com/o/r/issues/34 | #2001");
    assert_eq!(pull[4], "closes | fixes");
    assert_eq!(pull[8], "");
    assert_eq!(pull[10], "bob");
    assert_eq!(pull[12], "src/save.rs | src/io.rs | src/save.rs");
    assert_eq!(pull[13], "mar | jan");
    assert_eq!(pull[14], "mar");
}

#[test]
fn blob_keeps_lists() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_input(tmp.path(), "issues.json", INPUT);

    Pipeline::default().run(&paths).unwrap();

    let records = read_blob(&paths).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].comments, vec!["a", "b"]);
    assert_eq!(records[1].commit_hashes, vec!["mar", "jan"]);
    assert_eq!(
        records[1].files_changed,
        vec!["src/save.rs", "src/io.rs", "src/save.rs"]
    );
}

#[test]
fn repeated_runs_produce_identical_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_input(tmp.path(), "issues.json", INPUT);
    let pipeline = Pipeline::default();

    pipeline.run(&paths).unwrap();
    let first_table = fs::read(&paths.table).unwrap();
    let first_blob = fs::read(&paths.blob).unwrap();

    pipeline.run(&paths).unwrap();
    assert_eq!(fs::read(&paths.table).unwrap(), first_table);
    assert_eq!(fs::read(&paths.blob).unwrap(), first_blob);
}

#[test]
fn parallel_run_matches_sequential() {
    let tmp = tempfile::tempdir().unwrap();
    let sequential = write_input(tmp.path(), "sequential.json", INPUT);
    let parallel = write_input(tmp.path(), "parallel.json", INPUT);

    let mut config = Config::default();
    config.parallel = true;

    Pipeline::default().run(&sequential).unwrap();
    Pipeline::new(&config).unwrap().run(&parallel).unwrap();

    assert_eq!(
        fs::read(&sequential.table).unwrap(),
        fs::read(&parallel.table).unwrap()
    );
    assert_eq!(
        read_blob(&sequential).unwrap(),
        read_blob(&parallel).unwrap()
    );
}

#[test]
fn yaml_input() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_input(
        tmp.path(),
        "issues.yaml",
        "\"9\":\n  title: yaml issue\n  body: \"closes #1\"\n  comments:\n    \"0\":\n      body: hi\n",
    );

    let report = Pipeline::default().run(&paths).unwrap();
    assert_eq!(report.extracted, 1);

    let records = read_blob(&paths).unwrap();
    assert_eq!(records[0].identifier, "9");
    assert_eq!(records[0].references, vec!["#1"]);
    assert_eq!(records[0].comments, vec!["hi"]);
}

#[test]
fn missing_input_is_fatal_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = Paths::from_input(tmp.path().join("missing.json"), None).unwrap();

    let error = Pipeline::default().run(&paths).unwrap_err();

    assert!(matches!(error, PipelineError::Load(LoadError::NotFound(_))));
    assert!(!paths.table.exists());
    assert!(!paths.blob.exists());
}

#[test]
fn unwritable_output_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("issues.json");
    fs::write(&input, INPUT).unwrap();

    // a regular file where the output directory should be
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let out = blocker.join("out");
    let paths = Paths::from_input(input, Some(out.as_path())).unwrap();

    let error = Pipeline::default().run(&paths).unwrap_err();
    assert!(matches!(error, PipelineError::Table(_)));
}

#[test]
fn outputs_go_to_output_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("issues.json");
    fs::write(&input, INPUT).unwrap();
    let out = tmp.path().join("out");

    let paths = Paths::from_input(input, Some(out.as_path())).unwrap();
    Pipeline::default().run(&paths).unwrap();

    assert!(out.join("issues.csv").exists());
    assert!(out.join("issues.bin").exists());
}
