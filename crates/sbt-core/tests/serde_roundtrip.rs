#![cfg(feature = "serde")]

use sbt_core::{TraceEvent, TraceLog, TreeConfig};

#[test]
fn tree_config_json_roundtrip() {
    let config = TreeConfig::seeded(42);
    let json = serde_json::to_string(&config).expect("serialize");
    let roundtrip: TreeConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, config);
}

#[test]
fn tree_config_fields_are_optional() {
    let config: TreeConfig = serde_json::from_str("{}").expect("deserialize");
    assert_eq!(config, TreeConfig::default());
    assert_eq!(config.seed, None);
}

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, "sbt.tick.begin"),
            TraceEvent::new(1, "sbt.node.retire").with_a(3).with_b(1),
            TraceEvent::new(1, "sbt.tick.end").with_a(2).with_b(0),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
