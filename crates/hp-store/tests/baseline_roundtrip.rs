use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hp_solver::{DesignBaseline, DesignConditions, PerformanceSummary};
use hp_store::{BaselineStore, BlobStore, FsBlobStore, Signature, StoreError};
use serde_json::json;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn sample_baseline() -> DesignBaseline {
    DesignBaseline {
        topology_key: "simple".to_string(),
        refrigerants: vec!["R290".to_string()],
        design: DesignConditions {
            source_temp_c: 10.0,
            sink_temp_c: 35.0,
            heat_demand_w: 1.0e6,
        },
        summary: PerformanceSummary {
            cop: 4.2,
            heat_output_w: 1.0e6,
            power_input_w: 238095.0,
            epsilon: 0.45,
        },
        state: vec![5.0, 37.0, 3.33, 0.85, 1.0],
        solver_version: "0.1.0".to_string(),
        created_at: "2026-02-26T00:00:00Z".to_string(),
    }
}

#[test]
fn save_load_roundtrip() {
    let store = BaselineStore::on_dir(unique_temp_dir("hp_store_roundtrip"));
    let signature = Signature::of("simple", &json!({"T_hs_ff": 10.0}));

    let baseline = sample_baseline();
    store
        .save(&signature, &baseline)
        .expect("failed to save baseline");

    let loaded = store
        .load(&signature)
        .expect("failed to load baseline")
        .expect("baseline should exist");
    assert_eq!(loaded.topology_key, "simple");
    assert_eq!(loaded.state, baseline.state);
    assert_eq!(loaded.summary.cop, baseline.summary.cop);
}

#[test]
fn missing_baseline_is_not_found_not_a_fault() {
    let store = BaselineStore::on_dir(unique_temp_dir("hp_store_missing"));
    let signature = Signature::of("simple", &json!({}));

    let loaded = store.load(&signature).expect("missing baseline is normal");
    assert!(loaded.is_none());
}

#[test]
fn repeated_identical_save_is_idempotent() {
    let store = BaselineStore::on_dir(unique_temp_dir("hp_store_idempotent"));
    let signature = Signature::of("simple", &json!({"T_hs_ff": 10.0}));

    let baseline = sample_baseline();
    store.save(&signature, &baseline).expect("first save");
    store.save(&signature, &baseline).expect("second save");

    let loaded = store
        .load(&signature)
        .expect("load after rewrite")
        .expect("baseline present");
    assert_eq!(loaded.state, baseline.state);
}

#[test]
fn corrupt_content_escalates() {
    let root = unique_temp_dir("hp_store_corrupt");
    let store = BaselineStore::on_dir(root.clone());
    let signature = Signature::of("simple", &json!({"T_hs_ff": 10.0}));

    store
        .save(&signature, &sample_baseline())
        .expect("save baseline");
    fs::write(root.join(format!("{signature}.json")), b"{ not json")
        .expect("clobber stored baseline");

    let err = store.load(&signature).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn put_creates_intermediate_directories() {
    let root = unique_temp_dir("hp_store_nested").join("deep").join("er");
    let blobs = FsBlobStore::new(root.clone());

    blobs.put("abc123", b"payload").expect("nested put");
    let read = blobs.get("abc123").expect("get").expect("blob present");
    assert_eq!(read, b"payload");
    assert!(root.join("abc123.json").exists());
}
