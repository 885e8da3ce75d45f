//! End-to-end tests for the `kiln` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

/// `kiln` isolated from the user's config files and environment.
fn kiln(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kiln").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("KILN_RESOURCES_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    kiln(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_is_printed() {
    let home = tempfile::tempdir().unwrap();
    kiln(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn list_json_contains_every_module() {
    let home = tempfile::tempdir().unwrap();
    let output = kiln(home.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let modules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let slugs: Vec<&str> = modules
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["slug"].as_str())
        .collect();
    assert_eq!(slugs.len(), 11);
    assert_eq!(slugs.first(), Some(&"init"));
    assert!(slugs.contains(&"liquibase"));
    assert!(slugs.contains(&"ehcache-xml-config"));
}

#[test]
fn list_csv_has_header() {
    let home = tempfile::tempdir().unwrap();
    kiln(home.path())
        .args(["list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("slug,description\n"))
        .stdout(predicate::str::contains("\nsonar,"));
}

#[test]
fn apply_generates_a_spring_boot_project() {
    let home = tempfile::tempdir().unwrap();
    let folder = home.path().join("shop");

    kiln(home.path())
        .args(["apply", "init", "build-tool", "springboot", "springboot-mvc"])
        .arg("--folder")
        .arg(&folder)
        .args(["--package-name", "com.acme.shop", "--base-name", "shop"])
        .args(["--set", "serverPort=9000", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 4 module(s)"));

    assert!(folder.join("README.md").is_file());
    assert!(folder.join("kiln-build.toml").is_file());
    assert!(folder.join("src/main/java/com/acme/shop/MainApp.java").is_file());

    let properties =
        std::fs::read_to_string(folder.join("src/main/resources/config/application.properties"))
            .unwrap();
    assert!(properties.contains("server.port=9000"), "{properties}");
}

#[test]
fn applying_again_leaves_files_unchanged() {
    let home = tempfile::tempdir().unwrap();
    let folder = home.path().join("shop");
    let apply = |home: &Path| {
        kiln(home)
            .args(["apply", "init", "build-tool", "springboot", "liquibase", "--yes"])
            .arg("--folder")
            .arg(&folder)
            .assert()
            .success();
    };

    apply(home.path());
    let master = folder.join("src/main/resources/config/liquibase/master.xml");
    let descriptor = folder.join("kiln-build.toml");
    let first = (
        std::fs::read_to_string(&master).unwrap(),
        std::fs::read_to_string(&descriptor).unwrap(),
    );

    apply(home.path());

    assert_eq!(std::fs::read_to_string(&master).unwrap(), first.0);
    assert_eq!(std::fs::read_to_string(&descriptor).unwrap(), first.1);
}

#[test]
fn dry_run_writes_nothing() {
    let home = tempfile::tempdir().unwrap();
    let folder = home.path().join("shop");

    kiln(home.path())
        .args(["apply", "init", "sonar", "--dry-run"])
        .arg("--folder")
        .arg(&folder)
        .assert()
        .success()
        .stdout(predicate::str::contains("sonar"))
        .stdout(predicate::str::contains("Dry run"));

    assert!(!folder.exists());
}

#[test]
fn unknown_module_exits_with_not_found() {
    let home = tempfile::tempdir().unwrap();
    let folder = home.path().join("shop");

    kiln(home.path())
        .args(["apply", "init", "spring-boot-typo", "--yes"])
        .arg("--folder")
        .arg(&folder)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("spring-boot-typo"))
        .stderr(predicate::str::contains("kiln list"));

    assert!(!folder.exists());
}

#[test]
fn module_without_build_descriptor_is_a_user_error() {
    let home = tempfile::tempdir().unwrap();

    kiln(home.path())
        .args(["apply", "springboot", "--yes", "--folder", "shop"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn malformed_setting_is_rejected_by_the_parser() {
    let home = tempfile::tempdir().unwrap();

    kiln(home.path())
        .args(["apply", "init", "--set", "serverPort"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn environment_supplies_project_defaults() {
    let home = tempfile::tempdir().unwrap();
    let folder = home.path().join("shop");

    kiln(home.path())
        .env("KILN_PROJECT__BASE_NAME", "warehouse")
        .args(["apply", "build-tool", "sonar", "--yes"])
        .arg("--folder")
        .arg(&folder)
        .assert()
        .success();

    let sonar = std::fs::read_to_string(folder.join("sonar-project.properties")).unwrap();
    assert!(sonar.contains("sonar.projectKey=warehouse"), "{sonar}");
}

#[test]
fn local_config_file_is_picked_up() {
    let home = tempfile::tempdir().unwrap();

    kiln(home.path())
        .args(["init", "--local"])
        .assert()
        .success();
    assert!(home.path().join(".kiln.toml").is_file());

    std::fs::write(
        home.path().join(".kiln.toml"),
        "[project]\npackage_name = \"com.acme.local\"\n",
    )
    .unwrap();

    kiln(home.path())
        .args(["config", "get", "project.package_name"])
        .assert()
        .success()
        .stdout(predicate::str::diff("com.acme.local\n"));
}

#[test]
fn unknown_config_key_is_a_configuration_error() {
    let home = tempfile::tempdir().unwrap();

    kiln(home.path())
        .args(["config", "get", "project.colour"])
        .assert()
        .code(4);
}

#[test]
fn missing_explicit_config_file_is_a_configuration_error() {
    let home = tempfile::tempdir().unwrap();

    kiln(home.path())
        .args(["--config", "missing.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn bash_completions_are_generated() {
    let home = tempfile::tempdir().unwrap();

    kiln(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kiln"));
}
