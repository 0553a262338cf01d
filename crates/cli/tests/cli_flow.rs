use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn mixbook(storage: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mixbook").expect("binary");
    cmd.env_remove("MIXBOOK_CATALOG")
        .env_remove("RUST_LOG")
        .arg("--storage-dir")
        .arg(storage);
    cmd
}

#[test]
fn list_shows_ingredient_counts() {
    let temp = tempdir().unwrap();
    mixbook(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mojito  (5 ingredients"))
        .stdout(predicate::str::contains("Whiskey Sour  (6 ingredients"));
}

#[test]
fn search_is_case_insensitive() {
    let temp = tempdir().unwrap();
    let upper = mixbook(temp.path()).args(["search", "RUM"]).output().unwrap();
    let lower = mixbook(temp.path()).args(["search", "rum"]).output().unwrap();
    assert!(upper.status.success());
    assert_eq!(upper.stdout, lower.stdout);
    let text = String::from_utf8(lower.stdout).unwrap();
    assert!(text.contains("Mojito"));
    assert!(text.contains("Daiquiri"));
    assert!(!text.contains("Negroni"));
}

#[test]
fn search_without_hits_prints_empty_state() {
    let temp = tempdir().unwrap();
    mixbook(temp.path())
        .args(["search", "absinthe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cocktails found for 'absinthe'"));
}

#[test]
fn show_unknown_id_falls_back_to_listing() {
    let temp = tempdir().unwrap();
    mixbook(temp.path())
        .args(["show", "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found; showing all cocktails"))
        .stdout(predicate::str::contains("Negroni"));
}

#[test]
fn coverage_for_unknown_id_falls_back_to_listing() {
    let temp = tempdir().unwrap();
    mixbook(temp.path())
        .args(["show", "--coverage", "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found; showing all cocktails"))
        .stdout(predicate::str::contains("Whiskey Sour"));
}

#[test]
fn json_output_reports_catalog_errors_as_envelope() {
    let temp = tempdir().unwrap();
    let catalog = temp.path().join("bad.json");
    std::fs::write(&catalog, "{").unwrap();

    mixbook(temp.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["list", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"catalog_error\""));
}

#[test]
fn toggle_is_case_insensitive() {
    let temp = tempdir().unwrap();
    mixbook(temp.path()).args(["toggle", "gin"]).assert().success();
    mixbook(temp.path())
        .args(["toggle", "GIN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 'Gin'"));
    let stored = std::fs::read_to_string(temp.path().join("userIngredients.json")).unwrap();
    assert_eq!(stored, "[]");
}

#[test]
fn toggle_twice_restores_pantry_file() {
    let temp = tempdir().unwrap();
    mixbook(temp.path())
        .args(["toggle", "Campari"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Campari'"));
    let after_first = std::fs::read_to_string(temp.path().join("userIngredients.json")).unwrap();
    assert_eq!(after_first, r#"["Campari"]"#);

    mixbook(temp.path())
        .args(["toggle", "Campari"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 'Campari'"));
    let after_second = std::fs::read_to_string(temp.path().join("userIngredients.json")).unwrap();
    assert_eq!(after_second, "[]");
}

#[test]
fn show_reports_coverage_from_pantry() {
    let temp = tempdir().unwrap();
    for name in ["Gin", "Campari"] {
        mixbook(temp.path()).args(["toggle", name]).assert().success();
    }
    mixbook(temp.path())
        .args(["show", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Negroni"))
        .stdout(predicate::str::contains("[x] Gin (1 oz)"))
        .stdout(predicate::str::contains("[ ] Sweet Vermouth"))
        .stdout(predicate::str::contains("You have 2 of 4 ingredients (50%)."));
}

#[test]
fn ingredients_filter_marks_owned() {
    let temp = tempdir().unwrap();
    mixbook(temp.path()).args(["toggle", "Lemon juice"]).assert().success();
    mixbook(temp.path())
        .args(["ingredients", "--filter", "lemon"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[x] Lemon juice\n[ ] Lemon slice\n"));
}

#[test]
fn memory_storage_does_not_touch_disk() {
    let temp = tempdir().unwrap();
    mixbook(temp.path())
        .args(["--storage", "memory", "toggle", "Gin"])
        .assert()
        .success();
    assert!(!temp.path().join("userIngredients.json").exists());
}

#[test]
fn alternate_catalog_is_loaded() {
    let temp = tempdir().unwrap();
    let catalog = temp.path().join("catalog.json");
    std::fs::write(
        &catalog,
        r#"[{"id":"g1","name":"Gimlet","image":"","instructions":"Shake.","ingredients":[{"name":"Gin"},{"name":"Lime juice"}]}]"#,
    )
    .unwrap();

    mixbook(temp.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["match", "gin", "LIME JUICE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gimlet"));
}

#[test]
fn invalid_catalog_fails_fast() {
    let temp = tempdir().unwrap();
    let catalog = temp.path().join("broken.json");
    std::fs::write(&catalog, r#"[{"id":"","name":"x","image":"","instructions":"","ingredients":[]}]"#)
        .unwrap();

    mixbook(temp.path())
        .arg("--catalog")
        .arg(&catalog)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}
