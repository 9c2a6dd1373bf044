use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn labeler(workdir: &Path) -> Command {
  let mut cmd = Command::cargo_bin("path_labeler").expect("binary");
  cmd.current_dir(workdir).env_remove("RUST_LOG");
  cmd
}

fn write_json(path: &Path, value: &Value) {
  fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
  serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn labels_matching_points_with_default_files() {
  let temp = tempdir().unwrap();
  let root = temp.path();
  write_json(
    &root.join("data.json"),
    &json!({
      "points": [{"lat": 1.0, "lng": 2.0, "label": "Home"}],
      "paths": [{"points": [{"lat": 1.0, "lng": 2.0}]}]
    }),
  );

  labeler(root)
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "Enhanced JSON written to data_enhanced.json",
    ));

  assert_eq!(
    fs::read_to_string(root.join("data_enhanced.json")).unwrap(),
    r#"{
  "points": [
    {
      "lat": 1.0,
      "lng": 2.0,
      "label": "Home"
    }
  ],
  "paths": [
    {
      "points": [
        {
          "lat": 1.0,
          "lng": 2.0,
          "label": "Home"
        }
      ]
    }
  ]
}
"#
  );
}

#[test]
fn keeps_custom_labels_and_unmatched_points() {
  let temp = tempdir().unwrap();
  let root = temp.path();
  let input = json!({
    "points": [{"lat": 1.0, "lng": 2.0, "label": "Home"}],
    "paths": [{"points": [
      {"lat": 1.0, "lng": 2.0, "label": "Custom"},
      {"lat": 7.0, "lng": 8.0}
    ]}]
  });
  write_json(&root.join("data.json"), &input);

  labeler(root).assert().success();

  assert_eq!(read_json(&root.join("data_enhanced.json")), input);
}

#[test]
fn explicit_input_and_output_paths() {
  let temp = tempdir().unwrap();
  let root = temp.path();
  write_json(
    &root.join("routes.json"),
    &json!({
      "points": [{"lat": 49.2827, "lng": -123.1207, "label": "Downtown"}],
      "paths": [{"name": "99", "points": [{"lat": 49.28270004, "lng": -123.1207}]}]
    }),
  );

  labeler(root)
    .arg("routes.json")
    .arg("labeled.json")
    .assert()
    .success()
    .stdout(predicate::str::contains("labeled.json"));

  let output = read_json(&root.join("labeled.json"));
  assert_eq!(output["paths"][0]["points"][0]["label"], json!("Downtown"));
  assert_eq!(output["paths"][0]["name"], json!("99"));
  assert!(!root.join("data_enhanced.json").exists());
}

#[test]
fn in_place_rewrites_input() {
  let temp = tempdir().unwrap();
  let root = temp.path();
  write_json(
    &root.join("data.json"),
    &json!({
      "points": [{"lat": 1.0, "lng": 2.0, "label": "Home"}],
      "paths": [{"points": [{"lat": 1.0, "lng": 2.0}]}]
    }),
  );

  labeler(root).arg("--in-place").assert().success();

  let output = read_json(&root.join("data.json"));
  assert_eq!(output["paths"][0]["points"][0]["label"], json!("Home"));
  assert!(!root.join("data_enhanced.json").exists());
}

#[test]
fn malformed_reference_point_writes_nothing() {
  let temp = tempdir().unwrap();
  let root = temp.path();
  write_json(
    &root.join("data.json"),
    &json!({
      "points": [{"lng": 2.0}],
      "paths": [{"points": [{"lat": 1.0, "lng": 2.0}]}]
    }),
  );

  labeler(root)
    .assert()
    .failure()
    .stderr(
      predicate::str::contains("points[0]").and(predicate::str::contains("missing `lat`")),
    );

  assert!(!root.join("data_enhanced.json").exists());
}

#[test]
fn missing_input_fails() {
  let temp = tempdir().unwrap();

  labeler(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("data.json"));
}

#[test]
fn invalid_json_fails() {
  let temp = tempdir().unwrap();
  let root = temp.path();
  fs::write(root.join("data.json"), "{ not json").unwrap();

  labeler(root)
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid JSON in data.json"));

  assert!(!root.join("data_enhanced.json").exists());
}

#[test]
fn failed_in_place_run_keeps_input() {
  let temp = tempdir().unwrap();
  let root = temp.path();
  let original = r#"{"points": [{"lat": 1.0, "label": "Home"}], "paths": []}"#;
  fs::write(root.join("data.json"), original).unwrap();

  labeler(root).arg("--in-place").assert().failure();

  assert_eq!(fs::read_to_string(root.join("data.json")).unwrap(), original);
  assert_eq!(fs::read_dir(root).unwrap().count(), 1);
}
