//! End-to-end tests for the `jhipster-jdl` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const SHOP_JSON: &str = r#"{
  "applications": [
    { "config": { "baseName": "shop", "databaseType": "sql" }, "entities": ["Customer", "Order"] }
  ],
  "entities": [
    { "name": "Customer", "fields": [{ "name": "email", "type": "String", "validations": [{ "name": "required" }] }] },
    { "name": "Order", "fields": [{ "name": "placedAt", "type": "Instant" }] }
  ],
  "relationships": [
    { "from": "Order", "to": "Customer", "type": "ManyToOne", "injectedFieldInFrom": "customer" }
  ]
}"#;

const CATALOG_TOML: &str = r#"
[[entities]]
name = "Product"

[[entities.fields]]
name = "price"
type = "BigDecimal"
"#;

/// A binary isolated from the caller's environment and config file.
fn jhipster_jdl(temp: &TempDir) -> Command {
    let config = temp.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("jhipster-jdl").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config);
    cmd
}

fn write(temp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

fn entity<'a>(entities: &'a Value, name: &str) -> &'a Value {
    entities
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == name)
        .unwrap_or_else(|| panic!("no entity {name}"))
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    jhipster_jdl(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("entities"))
        .stdout(predicate::str::contains("prepare"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    jhipster_jdl(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_color_accepts_conventional_values() {
    let temp = TempDir::new().unwrap();
    for value in ["1", "yes", "true", "0", ""] {
        jhipster_jdl(&temp)
            .env("NO_COLOR", value)
            .args(["config", "path"])
            .assert()
            .success();
    }
}

#[test]
fn merge_prints_canonical_jdl() {
    let temp = TempDir::new().unwrap();
    let shop = write(&temp, "shop.json", SHOP_JSON);
    let catalog = write(&temp, "catalog.toml", CATALOG_TOML);

    jhipster_jdl(&temp)
        .args(["merge", "--output-format", "plain"])
        .arg(&shop)
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("entity Customer"))
        .stdout(predicate::str::contains("entity Product"))
        .stdout(predicate::str::contains("relationship ManyToOne"))
        .stderr(predicate::str::contains("Merged 2 documents: 3 entities, 1 relationship\n"));
}

#[test]
fn single_document_status_is_singular() {
    let temp = TempDir::new().unwrap();
    let catalog = write(&temp, "catalog.toml", CATALOG_TOML);
    jhipster_jdl(&temp)
        .args(["merge", "--output-format", "plain"])
        .arg(&catalog)
        .assert()
        .success()
        .stderr(predicate::str::contains("Merged 1 document: 1 entity, 0 relationships"));
}

#[test]
fn merge_summary_as_json() {
    let temp = TempDir::new().unwrap();
    let shop = write(&temp, "shop.json", SHOP_JSON);
    let catalog = write(&temp, "catalog.toml", CATALOG_TOML);

    let assert = jhipster_jdl(&temp)
        .args(["merge", "--output-format", "json"])
        .arg(&shop)
        .arg(&catalog)
        .assert()
        .success();
    let summary = stdout_json(&assert.get_output().stdout);
    assert_eq!(summary["entities"], serde_json::json!(["Customer", "Order", "Product"]));
    assert_eq!(summary["applications"], serde_json::json!(["shop"]));
    assert_eq!(summary["relationships"], 1);
}

#[test]
fn unsupported_document_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    let jdl = write(&temp, "app.jdl", "entity A");
    jhipster_jdl(&temp)
        .arg("merge")
        .arg(&jdl)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn missing_document_is_not_found() {
    let temp = TempDir::new().unwrap();
    jhipster_jdl(&temp).args(["merge", "absent.json"]).assert().code(3);
}

#[test]
fn entities_are_printed_without_out_dir() {
    let temp = TempDir::new().unwrap();
    let shop = write(&temp, "shop.json", SHOP_JSON);

    let assert = jhipster_jdl(&temp).arg("entities").arg(&shop).assert().success();
    let descriptors = stdout_json(&assert.get_output().stdout);
    let order = entity(&descriptors, "Order");
    assert_eq!(order["relationships"][0]["otherEntityName"], "customer");
    assert_eq!(order["relationships"][0]["relationshipType"], "many-to-one");
    assert!(!temp.path().join(".jhipster").exists());
}

#[test]
fn entities_are_written_to_out_dir() {
    let temp = TempDir::new().unwrap();
    let shop = write(&temp, "shop.json", SHOP_JSON);
    let out = temp.path().join("descriptors");

    jhipster_jdl(&temp)
        .arg("entities")
        .arg(&shop)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 entity descriptors"));

    let customer: Value = serde_json::from_str(&fs::read_to_string(out.join("Customer.json")).unwrap()).unwrap();
    assert_eq!(customer["fields"][0]["fieldName"], "email");
    assert!(out.join("Order.json").exists());
}

#[test]
fn prepare_from_documents() {
    let temp = TempDir::new().unwrap();
    let shop = write(&temp, "shop.json", SHOP_JSON);

    let assert = jhipster_jdl(&temp)
        .args(["prepare", "--application", "shop", "--jdl"])
        .arg(&shop)
        .assert()
        .success();
    let entities = stdout_json(&assert.get_output().stdout);

    let order = entity(&entities, "Order");
    assert_eq!(order["primaryKey"]["type"], "Long");
    assert_eq!(order["fieldsContainInstant"], true);
    assert_eq!(order["relationships"][0]["ownerSide"], true);
    assert_eq!(entity(&entities, "Customer")["fields"][0]["fieldValidationRequired"], true);
}

#[test]
fn prepare_unknown_application_is_not_found() {
    let temp = TempDir::new().unwrap();
    let shop = write(&temp, "shop.json", SHOP_JSON);
    jhipster_jdl(&temp)
        .args(["prepare", "--application", "billing", "--jdl"])
        .arg(&shop)
        .assert()
        .code(3);
}

#[test]
fn prepare_stored_descriptors_with_database_override() {
    let temp = TempDir::new().unwrap();
    let shop = write(&temp, "shop.json", SHOP_JSON);
    jhipster_jdl(&temp)
        .arg("entities")
        .arg(&shop)
        .args(["--out-dir", ".jhipster"])
        .assert()
        .success();

    let assert = jhipster_jdl(&temp)
        .args(["prepare", "--database", "cassandra"])
        .assert()
        .success();
    let entities = stdout_json(&assert.get_output().stdout);
    assert_eq!(entity(&entities, "Customer")["primaryKey"]["type"], "UUID");
}

#[test]
fn prepare_reports_fallback_warnings() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("entities");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Customer.json"), r#"{ "name": "Customer" }"#).unwrap();
    fs::write(
        dir.join("Order.json"),
        r#"{ "name": "Order", "relationships": [{ "relationshipType": "many-to-one", "otherEntityName": "customer" }] }"#,
    )
    .unwrap();

    let assert = jhipster_jdl(&temp)
        .args(["prepare", "--output-format", "json", "--entities-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("relationshipName is missing"));
    let report = stdout_json(&assert.get_output().stdout);
    let message = report["diagnostics"][0]["message"].as_str().unwrap();
    assert!(message.contains(&dir.join("Order.json").display().to_string()), "{message}");
    assert_eq!(report["diagnostics"][0]["severity"], "warning");
    assert_eq!(entity(&report["entities"], "Order")["relationships"][0]["relationshipName"], "customer");
}

#[test]
fn prepare_without_descriptors_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    jhipster_jdl(&temp)
        .args(["prepare", "--entities-dir", "nothing-here"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no entity descriptors found"));
}

#[test]
fn config_reads_file_and_environment() {
    let temp = TempDir::new().unwrap();
    write(&temp, "config.toml", "[generation]\ndatabase_type = \"mongodb\"\n");

    jhipster_jdl(&temp)
        .args(["config", "get", "generation.database_type"])
        .assert()
        .success()
        .stdout("mongodb\n");

    jhipster_jdl(&temp)
        .env("JHIPSTER_JDL__GENERATION__ENTITIES_DIR", "model")
        .args(["config", "get", "generation.entities_dir"])
        .assert()
        .success()
        .stdout("model\n");
}

#[test]
fn invalid_configuration_exits_with_four() {
    let temp = TempDir::new().unwrap();
    write(&temp, "config.toml", "[generation]\ndatabase_type = \"oracle\"\n");
    jhipster_jdl(&temp)
        .args(["config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("database_type"));
}

#[test]
fn completions_name_the_binary() {
    let temp = TempDir::new().unwrap();
    jhipster_jdl(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jhipster-jdl"));
}
