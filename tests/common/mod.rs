use elo_ladder::model::db_structs::MatchHistoryRecord;
use std::{path::PathBuf, sync::Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Writes `records` to a uniquely named JSON file in the temp directory.
pub fn write_ledger(records: &[MatchHistoryRecord]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("elo-ladder-{}.json", Uuid::new_v4()));
    let contents = serde_json::to_string(records).expect("Failed to serialize ledger");
    std::fs::write(&path, contents).expect("Failed to write ledger");

    path
}
