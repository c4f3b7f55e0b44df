//! Static wire corpora used across harnesses.
//!
//! Three corpora mirror the host app's history: `CORPUS_PRIMARY` is the
//! pre-drift regular collection (numeric ids, `dateString`, coded
//! courses), `CORPUS_MALA` is the mala collection, and `CORPUS_DRIFT` is
//! post-drift material (string ids, no `dateString`, the code-less Custom
//! course, and one undocumented future course type).

use serde_json::Value;

/// Pre-drift regular log collection.
pub const CORPUS_PRIMARY: &str = r#"[
  {
    "id": 1566101,
    "date": 1618214400000,
    "dateString": "2021-04-12 08:00:00",
    "elapsed": 1800,
    "feeling": 2,
    "place": 1,
    "notes": "W1 morning sit",
    "course": {"id": 3, "name": "Joy of Living 3", "code": "JOL3", "is_mala_course": false}
  },
  {
    "id": 1566102,
    "date": 1618300800000,
    "dateString": "2021-04-13 08:00:00",
    "elapsed": 2400,
    "feeling": 3,
    "place": 1,
    "notes": "TR - FB, dropping practice",
    "course": {"id": 5, "name": "Custom", "code": "CUSTOM", "is_mala_course": false}
  },
  {
    "id": 1566103,
    "date": 1618387200000,
    "dateString": "2021-04-14 08:00:00",
    "elapsed": 1200,
    "feeling": 2,
    "place": 2,
    "notes": "Four Thoughts 1",
    "course": {"id": 7, "name": "Nectar of the Path", "code": "NECTAR_PATH", "is_mala_course": false}
  },
  {
    "id": 1566104,
    "date": 1618473600000,
    "dateString": "2021-04-15 20:30:00",
    "elapsed": 2700,
    "feeling": 4,
    "place": 1,
    "notes": "W2 evening sit",
    "course": {"id": 3, "name": "Joy of Living 3", "code": "JOL3", "is_mala_course": false}
  }
]"#;

/// Mala (repetition-count) log collection.
pub const CORPUS_MALA: &str = r#"[
  {
    "id": 1566201,
    "date": 1618560000000,
    "dateString": "2021-04-16 07:00:00",
    "elapsed": 900,
    "feeling": 2,
    "place": 1,
    "notes": "refuge accumulation",
    "course": {"id": 9, "name": "Ngondro", "code": "NGONDRO", "is_mala_course": true}
  }
]"#;

/// Post-drift regular records: string ids, no `dateString`, symbolic
/// feeling/place, the code-less Custom course, and one unknown course type.
pub const CORPUS_DRIFT: &str = r#"[
  {
    "id": "623253d1",
    "date": 1647874609000,
    "elapsed": 2267,
    "feeling": "calm",
    "place": "home",
    "notes": "open awareness",
    "course": {"id": 6, "name": "Custom", "is_mala_course": false}
  },
  {
    "id": "6232566a",
    "date": 1647874999000,
    "elapsed": 600,
    "course": {"id": 11, "name": "SomeUnknownFutureType", "is_mala_course": false}
  }
]"#;

pub fn primary_value() -> Value {
    serde_json::from_str(CORPUS_PRIMARY).expect("primary corpus is valid JSON")
}

pub fn mala_value() -> Value {
    serde_json::from_str(CORPUS_MALA).expect("mala corpus is valid JSON")
}

pub fn drift_value() -> Value {
    serde_json::from_str(CORPUS_DRIFT).expect("drift corpus is valid JSON")
}

/// Primary collection with the drift records appended, as one persisted
/// value — the shape of a snapshot taken after the format change.
pub fn primary_with_drift_value() -> Value {
    let mut items = as_array(primary_value());
    items.extend(as_array(drift_value()));
    Value::Array(items)
}

/// A full persisted-state snapshot document holding both collections,
/// plus an unrelated key the reader must leave alone.
pub fn snapshot_text(primary_key: &str, mala_key: &str) -> String {
    let mut snapshot = serde_json::Map::new();
    snapshot.insert(primary_key.to_string(), primary_with_drift_value());
    snapshot.insert(mala_key.to_string(), mala_value());
    snapshot.insert("uiTheme".to_string(), Value::String("dark".to_string()));
    serde_json::to_string_pretty(&Value::Object(snapshot)).expect("snapshot fixture serializes")
}

fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => panic!("corpus fixture must be an array, got {other:?}"),
    }
}
