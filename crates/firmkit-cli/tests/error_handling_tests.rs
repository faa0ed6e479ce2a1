//! Tests for error handling, suggestions and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn firmkit(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("firmkit").unwrap();
    cmd.env_remove("FIRMKIT_TEMPLATES_DIR")
        .env_remove("FIRMKIT_PROJECT_DIR")
        .env("NO_COLOR", "1")
        .arg("-C")
        .arg(project);
    cmd
}

fn write(project: &Path, rel: &str, content: &str) {
    let path = project.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn missing_module_name_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["new", "--path", "Drivers", "--builtin-templates", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("module name required"))
        .stderr(predicate::str::contains("--module"));
}

#[test]
fn absolute_module_path_is_rejected() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--path", "/etc", "--builtin-templates", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Absolute paths not allowed"));
}

#[test]
fn module_path_outside_project_is_rejected() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir(&project).unwrap();

    firmkit(&project)
        .args(["new", "-m", "Sensor", "--path", "../outside", "--builtin-templates", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("leaves the project directory"));

    assert!(!temp.path().join("outside").exists());
}

#[test]
fn module_path_with_whitespace_is_rejected() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--path", "My Drivers/Sensor", "--builtin-templates", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("whitespace"));

    assert!(!temp.path().join("Build").exists());
}

#[test]
fn unknown_mode_is_an_argument_error() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--mode", "everything"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown generation mode"));
}

#[test]
fn declined_prompt_exits_with_cancelled_code() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--builtin-templates"])
        .write_stdin("n\n")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Operation cancelled"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn overwrite_needs_full_yes() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--builtin-templates", "--yes"])
        .assert()
        .success();
    fs::write(temp.path().join("sources/Sensor.cpp"), "// edited\n").unwrap();

    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--builtin-templates"])
        .write_stdin("y\n")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("[yes/NO]"));

    assert_eq!(
        fs::read_to_string(temp.path().join("sources/Sensor.cpp")).unwrap(),
        "// edited\n"
    );
}

#[test]
fn missing_templates_suggest_builtin() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cpptemplate.tmp"))
        .stderr(predicate::str::contains("--builtin-templates"));

    assert!(!temp.path().join("sources").exists());
}

#[test]
fn resolving_unknown_target_is_not_found() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Build/SCons_UTest/UTestTargets.scons", "Sensor Drivers/Sensor\n");

    firmkit(temp.path())
        .args(["resolve", "Gpio"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown target 'Gpio'"))
        .stderr(predicate::str::contains("firmkit list"));
}

#[test]
fn resolving_without_registry_is_not_found() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["resolve", "Sensor"])
        .assert()
        .code(3);
}

#[test]
fn missing_include_list_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Build/SCons_UTest/UTestTargets.scons", "Sensor Drivers/Sensor\n");
    write(
        temp.path(),
        "Build/SCons_UTest/UTest_Sensor_Sources.scons",
        "./Drivers/Sensor/sources/Sensor.cpp\n",
    );

    firmkit(temp.path())
        .args(["resolve", "Sensor"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Missing includes list"))
        .stderr(predicate::str::contains("UTest_Sensor_Include.scons"));
}

#[test]
fn firmware_without_release_lists_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["resolve", "ASch"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Sources.scons"));
}

#[test]
fn whitespace_in_target_name_is_invalid_input() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["resolve", "Sensor Drivers"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn unknown_config_key_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["config", "get", "layout.nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_explicit_config_file_fails_early() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["--config"])
        .arg(temp.path().join("absent.toml"))
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn empty_layout_extension_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".firmkit.toml", "[layout]\nsource_extension = \"\"\n");

    firmkit(temp.path())
        .args(["new", "-m", "Sensor", "--builtin-templates", "--yes"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("source_extension"));

    assert!(!temp.path().join("sources").exists());
}

#[test]
fn verbose_and_quiet_conflict() {
    let temp = TempDir::new().unwrap();
    firmkit(temp.path())
        .args(["-v", "-q", "list"])
        .assert()
        .code(2);
}
