//! Tests for the run command
//!
//! Runs the command against temporary directories and checks the files
//! it writes.

use super::test_helpers::{create_cli_test_services, parse_run};
use crate::common::TestRepo;
use stemdex::cli::commands::run;
use stemdex::cli::OutputFormat;

fn arg(path: &std::path::Path) -> String {
    path.display().to_string()
}

#[test]
fn test_run_writes_all_exports_in_plain_mode() {
    let repo = TestRepo::animals();
    let out = TestRepo::with_files(&[("queries.query", "cat\nthe dog\n")]);
    let services = create_cli_test_services();

    let args = parse_run(&[
        "--path",
        arg(repo.path()).as_str(),
        "--query",
        arg(&out.path().join("queries.query")).as_str(),
        "--index",
        arg(&out.path().join("index.json")).as_str(),
        "--counts",
        arg(&out.path().join("counts.json")).as_str(),
        "--results",
        arg(&out.path().join("results.json")).as_str(),
    ]);
    run::execute(args, &services, OutputFormat::Json).unwrap();

    let index: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path().join("index.json")).unwrap())
            .unwrap();
    assert!(index.get("cat").is_some());

    let counts: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path().join("counts.json")).unwrap())
            .unwrap();
    assert_eq!(counts.as_object().unwrap().len(), 4);

    let results: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path().join("results.json")).unwrap())
            .unwrap();
    let keys: Vec<&String> = results.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["cat", "dog the"]);
}

#[test]
fn test_plain_and_threaded_exports_identical() {
    let repo = TestRepo::generated(30);
    let queries = TestRepo::with_files(&[("q.query", "apple\nshared common\nch\n")]);
    let plain_out = TestRepo::with_files(&[]);
    let threaded_out = TestRepo::with_files(&[]);
    let services = create_cli_test_services();

    for (out, threads) in [(&plain_out, None), (&threaded_out, Some("4"))] {
        let index = arg(&out.path().join("index.json"));
        let counts = arg(&out.path().join("counts.json"));
        let results = arg(&out.path().join("results.json"));
        let path = arg(repo.path());
        let query = arg(&queries.path().join("q.query"));

        let mut argv = vec![
            "--path",
            path.as_str(),
            "--query",
            query.as_str(),
            "--index",
            index.as_str(),
            "--counts",
            counts.as_str(),
            "--results",
            results.as_str(),
        ];
        if let Some(threads) = threads {
            argv.extend(["--threads", threads]);
        }
        run::execute(parse_run(&argv), &services, OutputFormat::Json).unwrap();
    }

    for name in ["index.json", "counts.json", "results.json"] {
        let plain = std::fs::read_to_string(plain_out.path().join(name)).unwrap();
        let threaded = std::fs::read_to_string(threaded_out.path().join(name)).unwrap();
        assert_eq!(plain, threaded, "{name} differs");
    }
}

#[test]
fn test_exact_flag_changes_results() {
    let repo = TestRepo::animals();
    let out = TestRepo::with_files(&[("q.query", "ca\n")]);
    let services = create_cli_test_services();
    let query = arg(&out.path().join("q.query"));
    let path = arg(repo.path());

    let partial_results = arg(&out.path().join("partial.json"));
    run::execute(
        parse_run(&[
            "--path",
            path.as_str(),
            "--query",
            query.as_str(),
            "--results",
            partial_results.as_str(),
        ]),
        &services,
        OutputFormat::Json,
    )
    .unwrap();

    let exact_results = arg(&out.path().join("exact.json"));
    run::execute(
        parse_run(&[
            "--path",
            path.as_str(),
            "--query",
            query.as_str(),
            "--exact",
            "--results",
            exact_results.as_str(),
        ]),
        &services,
        OutputFormat::Json,
    )
    .unwrap();

    let partial = std::fs::read_to_string(out.path().join("partial.json")).unwrap();
    let exact = std::fs::read_to_string(out.path().join("exact.json")).unwrap();
    assert!(partial.contains("\"where\""));
    assert_eq!(exact, "{\n  \"ca\": []\n}");
}

#[test]
fn test_missing_path_reported_not_fatal() {
    let out = TestRepo::with_files(&[]);
    let services = create_cli_test_services();
    let counts = arg(&out.path().join("counts.json"));
    let missing = arg(&out.path().join("missing"));

    let args = parse_run(&["--path", missing.as_str(), "--counts", counts.as_str()]);
    run::execute(args, &services, OutputFormat::Human).unwrap();

    assert_eq!(
        std::fs::read_to_string(out.path().join("counts.json")).unwrap(),
        "{}"
    );
}

#[test]
fn test_zero_threads_is_fatal() {
    let services = create_cli_test_services();
    let args = parse_run(&["--threads", "0"]);

    assert!(run::execute(args, &services, OutputFormat::Human).is_err());
}
