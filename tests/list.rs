mod common;

use serde_json::Value;

#[test]
fn test_list_prints_projects_in_order() {
    let output = common::run(&["list"]);
    assert!(output.status.success(), "{}", common::stderr(&output));

    let stdout = common::stdout(&output);
    let titles: Vec<&str> = stdout.lines().map(|l| l.split("  ").next().unwrap().trim()).collect();
    assert_eq!(titles.first(), Some(&"Lumen Analytics"));
    assert_eq!(titles.len(), 8);
    assert!(stdout.lines().next().unwrap().contains("Live Production"));
}

#[test]
fn test_list_json_preserves_catalogue_order() {
    let output = common::run(&["list", "--json"]);
    assert!(output.status.success(), "{}", common::stderr(&output));

    let records: Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids[0], "lumen-analytics");
    assert_eq!(ids.len(), 8);

    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len(), "ids are unique");
}

#[test]
fn test_list_devops_json() {
    let output = common::run(&["list", "--devops", "--json"]);
    assert!(output.status.success(), "{}", common::stderr(&output));

    let records: Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &records[0];
    assert_eq!(first["slug"], "gitops-platform");
    assert!(first["steps"].as_array().is_some_and(|s| !s.is_empty()));
}

#[test]
fn test_malformed_theme_flag_is_rejected() {
    let output = common::run(&["--theme", "sepia", "list"]);
    assert!(!output.status.success());
}

#[test]
fn test_show_finds_devops_record_by_id() {
    let output = common::run(&["show", "devops-observability"]);
    assert!(output.status.success(), "{}", common::stderr(&output));
    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["title"], "Observability Stack");
}

#[test]
fn test_show_unknown_id_fails() {
    let output = common::run(&["show", "no-such-project"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(common::stderr(&output).contains("no-such-project"));
}
