use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, content).expect("write file");
    path
}

#[test]
fn evaluate_prints_variables() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path();
    let template = write_file(dir, "template.json", r#"{"episode": {"$var": "episode"}, "home": null}"#);
    let bindings = write_file(dir, "bindings.json", r#"{"episode": "JEDI"}"#);

    let mut cmd = cargo_bin_cmd!("inputwire");
    cmd.arg("evaluate").arg("-t").arg(template).arg("-b").arg(bindings);

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("{\"episode\":\"JEDI\"}\n"));
}

#[test]
fn evaluate_fails_on_missing_variable() {
    let temp = tempfile::tempdir().expect("tempdir");
    let template = write_file(temp.path(), "template.json", r#"{"review": {"stars": {"$var": "stars"}}}"#);

    let mut cmd = cargo_bin_cmd!("inputwire");
    cmd.arg("evaluate").arg("-t").arg(template);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("variable `stars` was not provided (path: review.stars)"));
}

#[test]
fn evaluate_strict_rejects_malformed_marker() {
    let temp = tempfile::tempdir().expect("tempdir");
    let template = write_file(temp.path(), "template.json", r#"{"ids": [1, {"$var": 2}]}"#);

    let mut lenient = cargo_bin_cmd!("inputwire");
    lenient.arg("evaluate").arg("-t").arg(&template);
    lenient
        .assert()
        .success()
        .stdout(predicate::str::diff("{\"ids\":[1]}\n"));

    let mut strict = cargo_bin_cmd!("inputwire");
    strict.arg("evaluate").arg("-t").arg(&template).arg("--strict");
    strict
        .assert()
        .failure()
        .stderr(predicate::str::contains("ids[1]"));
}

#[test]
fn request_prints_body() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path();
    let query = write_file(
        dir,
        "hero.graphql",
        "query HeroName($episode: Episode) { hero(episode: $episode) { name } }\n",
    );
    let template = write_file(dir, "template.yaml", "episode:\n  $var: episode\n");
    let bindings = write_file(dir, "bindings.json", r#"{"episode": "EMPIRE"}"#);

    let mut cmd = cargo_bin_cmd!("inputwire");
    cmd.arg("request")
        .arg("-q")
        .arg(query)
        .arg("--operation-name")
        .arg("HeroName")
        .arg("-t")
        .arg(template)
        .arg("-b")
        .arg(bindings);

    cmd.assert().success().stdout(predicate::str::diff(
        "{\"query\":\"query HeroName($episode: Episode) { hero(episode: $episode) { name } }\",\"operationName\":\"HeroName\",\"variables\":{\"episode\":\"EMPIRE\"}}\n",
    ));
}
