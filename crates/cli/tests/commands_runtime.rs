use std::path::PathBuf;

use bonbon_cli::commands::{catalog, demo, settings};
use serde_json::Value;
use tempfile::TempDir;

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

#[test]
fn catalog_lists_every_seeded_product() {
    let result = catalog::run("all", "");
    assert_eq!(result.exit_code, 0);

    assert!(result.output.contains("15 of 15 products"));
    assert!(result.output.contains("- [1] Cognac Truffle - 85 (Truffles)"));
    assert!(result.output.contains("[out of stock]"));
}

#[test]
fn catalog_narrows_by_category_and_search() {
    let result = catalog::run("truffles", "rum");
    assert_eq!(result.exit_code, 0);

    assert!(result.output.contains("1 of 15 products"));
    assert!(result.output.contains("Rum Truffle"));
    assert!(!result.output.contains("Cognac Truffle"));
}

#[test]
fn catalog_flags_promotional_discounts() {
    let result = catalog::run("all", "");
    assert!(result.output.contains("% off"));
}

#[test]
fn catalog_with_unknown_category_matches_nothing() {
    let result = catalog::run("pastry", "");
    assert_eq!(result.exit_code, 0);

    assert!(result.output.contains("0 of 15 products"));
    assert!(result.output.contains("no products match"));
}

#[test]
fn demo_settles_a_cash_sale_end_to_end() {
    let result = demo::run();
    assert_eq!(result.exit_code, 0, "demo flow should settle: {}", result.output);

    assert!(result.output.contains("demo session: Bonbon Artisan Chocolate"));
    assert!(result.output.contains("receipt:"));
    assert!(result.output.contains("subtotal: 498.5"));
    assert!(result.output.contains("total: 508.47"));
    assert!(result.output.contains("change due: 91.53"));
    assert!(result.output.contains("chocolates sold: 6"));
    assert!(result.output.contains("gift boxes sold: 1"));
}

#[test]
fn settings_show_falls_back_to_defaults_on_an_empty_store() {
    let dir = TempDir::new().expect("create temp dir");

    let result = settings::show(dir.path());
    assert_eq!(result.exit_code, 0);

    assert!(result.output.contains("built-in defaults"));
    assert!(result.output.contains("Bonbon Artisan Chocolate"));
    assert!(result.output.contains("gift_box.sizes.premium"));
    assert!(result.output.contains("tax_rate = 20%"));
}

#[test]
fn settings_init_writes_once_and_then_requires_force() {
    let dir = TempDir::new().expect("create temp dir");

    let first = settings::init(dir.path(), false);
    assert_eq!(first.exit_code, 0);
    let payload = parse_payload(&first.output);
    assert_eq!(payload["command"], "settings init");
    assert_eq!(payload["status"], "ok");

    let second = settings::init(dir.path(), false);
    assert_eq!(second.exit_code, 2);
    let payload = parse_payload(&second.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "already_initialized");

    let forced = settings::init(dir.path(), true);
    assert_eq!(forced.exit_code, 0);
}

#[test]
fn settings_show_reports_the_stored_blob_after_init() {
    let dir = TempDir::new().expect("create temp dir");
    settings::init(dir.path(), false);

    let result = settings::show(dir.path());
    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("stored blob"));
}

#[test]
fn data_dir_flag_wins_over_the_default() {
    let resolved = settings::resolve_data_dir(Some(PathBuf::from("/tmp/bonbon-test")));
    assert_eq!(resolved, PathBuf::from("/tmp/bonbon-test"));
}
