//! Integration tests for the batch side: snapshot import (guard and reset
//! modes), export, and the import-then-export round trip.

use secrecy::SecretString;

use partfinder_core::{ProductRecord, Snapshot};
use partfinder_integration_tests::{TestApp, spawn};
use partfinder_web::db::{ProductRepository, UserRepository};
use partfinder_web::services::export::export_snapshot;
use partfinder_web::services::import::{ImportError, ImportMode, import_snapshot};

fn record(lwc: &str, partner: Option<&str>, length: &str) -> ProductRecord {
    ProductRecord {
        product_type: "A".to_owned(),
        lwc: lwc.to_owned(),
        partner: partner.map(str::to_owned),
        insulation: "FOIL".to_owned(),
        length: length.to_owned(),
        blade_size: "1/4".to_owned(),
        layers: "2".to_owned(),
        qty_per_pallet: 10,
        box_pallet: 5,
        part_number: Some(format!("A{lwc}FOIL{length:0>3}")),
    }
}

/// Write a snapshot into the app's temp dir and return its path.
fn write_snapshot(app: &TestApp, name: &str, snapshot: &Snapshot) -> std::path::PathBuf {
    let path = app.snapshot_path.with_file_name(name);
    std::fs::write(&path, snapshot.to_row_json().unwrap()).unwrap();
    path
}

#[tokio::test]
async fn import_then_export_round_trips() {
    let app = spawn().await;

    // Items already in composite (lwc, partner, insulation, length) order.
    let original = Snapshot {
        items: vec![
            record("X1", None, "30"),
            record("X1", Some("P1"), "60"),
            record("X2", None, "90"),
        ],
    };
    let input = write_snapshot(&app, "input.json", &original);

    let report = import_snapshot(&app.pool, &input, ImportMode::SkipIfPopulated, None)
        .await
        .unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(report.skipped, 0);

    let output = app.snapshot_path.with_file_name("output.json");
    let exported = export_snapshot(&app.pool, &output).await.unwrap();
    assert_eq!(exported, 3);

    let roundtripped = Snapshot::from_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(roundtripped, original);
}

#[tokio::test]
async fn guard_mode_skips_populated_store() {
    let app = spawn().await;

    let first = Snapshot {
        items: vec![record("X1", None, "30")],
    };
    let path = write_snapshot(&app, "first.json", &first);
    import_snapshot(&app.pool, &path, ImportMode::SkipIfPopulated, None)
        .await
        .unwrap();

    // Second run must be a complete no-op, not a partial merge.
    let second = Snapshot {
        items: vec![record("X2", None, "60"), record("X3", None, "90")],
    };
    let path = write_snapshot(&app, "second.json", &second);
    let report = import_snapshot(&app.pool, &path, ImportMode::SkipIfPopulated, None)
        .await
        .unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(ProductRepository::new(&app.pool).count().await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_items_are_skipped_not_fatal() {
    let app = spawn().await;

    let path = app.snapshot_path.with_file_name("mixed.json");
    std::fs::write(
        &path,
        r#"{"items":[
            {"type":"A","lwc":"X1","insulation":"FOIL","length":"30",
             "bladeSize":"1/4","layers":"2","qtyPerPallet":10,"boxPallet":5},
            {"type":"A","lwc":"X2","qtyPerPallet":"not-a-number"},
            {"type":"A","lwc":"X3"}
        ]}"#,
    )
    .unwrap();

    let report = import_snapshot(&app.pool, &path, ImportMode::SkipIfPopulated, None)
        .await
        .unwrap();

    // X2 fails conversion; X3 imports with sentinel defaults.
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 1);

    let products = ProductRepository::new(&app.pool).list_all().await.unwrap();
    let sparse = products.iter().find(|p| p.lwc == "X3").unwrap();
    assert_eq!(sparse.insulation, "Unknown");
    assert_eq!(sparse.qty_per_pallet, 0);
}

#[tokio::test]
async fn missing_snapshot_aborts_the_run() {
    let app = spawn().await;

    let path = app.snapshot_path.with_file_name("does-not-exist.json");
    let result = import_snapshot(&app.pool, &path, ImportMode::SkipIfPopulated, None).await;
    assert!(matches!(result, Err(ImportError::Read { .. })));

    let garbled = app.snapshot_path.with_file_name("garbled.json");
    std::fs::write(&garbled, "{not json").unwrap();
    let result = import_snapshot(&app.pool, &garbled, ImportMode::SkipIfPopulated, None).await;
    assert!(matches!(result, Err(ImportError::Malformed(_))));
}

#[tokio::test]
async fn reset_mode_rebuilds_schema_and_bootstrap_admin() {
    let app = spawn().await;

    // Seed some state that the reset must wipe.
    let seed = Snapshot {
        items: vec![record("OLD", None, "10")],
    };
    let path = write_snapshot(&app, "seed.json", &seed);
    import_snapshot(&app.pool, &path, ImportMode::SkipIfPopulated, None)
        .await
        .unwrap();

    let fresh = Snapshot {
        items: vec![record("X1", None, "30"), record("X2", None, "60")],
    };
    let path = write_snapshot(&app, "fresh.json", &fresh);
    let password = SecretString::from("bootstrap-password-for-tests".to_owned());

    let report = import_snapshot(&app.pool, &path, ImportMode::Reset, Some(&password))
        .await
        .unwrap();
    assert_eq!(report.imported, 2);

    let products = ProductRepository::new(&app.pool).list_all().await.unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.lwc != "OLD"));

    // The bootstrap admin account was recreated along with the schema.
    assert_eq!(UserRepository::new(&app.pool).count().await.unwrap(), 1);
}

#[tokio::test]
async fn reset_mode_requires_bootstrap_password() {
    let app = spawn().await;

    let snapshot = Snapshot {
        items: vec![record("X1", None, "30")],
    };
    let path = write_snapshot(&app, "input.json", &snapshot);

    let result = import_snapshot(&app.pool, &path, ImportMode::Reset, None).await;
    assert!(matches!(
        result,
        Err(ImportError::MissingBootstrapPassword)
    ));
}
