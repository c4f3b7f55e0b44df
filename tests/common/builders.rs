//! Test builders — ergonomic constructors for wire records and courses.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning
//! `Result`. `build` routes through [`SessionEntry::from_map`], the same
//! extraction path real snapshots take.

use serde_json::{json, Map, Value};
use sitlog_core::{LogRecord, SessionEntry};

// ---------------------------------------------------------------------------
// Course constructors
// ---------------------------------------------------------------------------

/// A pre-drift course object: `code` always present.
pub fn legacy_course(code: &str, name: &str) -> Value {
    json!({"id": 3, "name": name, "code": code, "is_mala_course": false})
}

/// A post-drift course object: no `code` field.
pub fn current_course(name: &str) -> Value {
    json!({"id": 6, "name": name, "is_mala_course": false})
}

/// A mala-course object.
pub fn mala_course(code: &str, name: &str) -> Value {
    json!({"id": 9, "name": name, "code": code, "is_mala_course": true})
}

// ---------------------------------------------------------------------------
// SessionEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for wire-shaped session entries.
///
/// # Example
///
/// ```rust
/// let record = SessionEntryBuilder::new(1566101)
///     .elapsed(1800)
///     .notes("W1 morning sit")
///     .course(legacy_course("JOL3", "Joy of Living 3"))
///     .regular();
/// ```
pub struct SessionEntryBuilder {
    map: Map<String, Value>,
}

impl SessionEntryBuilder {
    pub fn new(id: impl Into<Value>) -> Self {
        let mut map = Map::new();
        map.insert("id".to_string(), id.into());
        map.insert("date".to_string(), json!(1647648000000i64));
        map.insert("elapsed".to_string(), json!(1800));
        Self { map }
    }

    pub fn date(mut self, epoch_ms: i64) -> Self {
        self.map.insert("date".to_string(), json!(epoch_ms));
        self
    }

    pub fn date_string(mut self, date_string: &str) -> Self {
        self.map
            .insert("dateString".to_string(), json!(date_string));
        self
    }

    pub fn elapsed(mut self, secs: i64) -> Self {
        self.map.insert("elapsed".to_string(), json!(secs));
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.map.insert("notes".to_string(), json!(notes));
        self
    }

    pub fn course(mut self, course: Value) -> Self {
        self.map.insert("course".to_string(), course);
        self
    }

    pub fn no_course(mut self) -> Self {
        self.map.remove("course");
        self
    }

    /// Set an arbitrary wire field, modeled or not.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    /// The raw wire object this builder would parse.
    pub fn wire(&self) -> Value {
        Value::Object(self.map.clone())
    }

    pub fn build(self) -> SessionEntry {
        SessionEntry::from_map(self.map)
    }

    /// Build and tag as a primary-collection record.
    pub fn regular(self) -> LogRecord {
        LogRecord::Regular(self.build())
    }

    /// Build and tag as a mala-collection record.
    pub fn mala(self) -> LogRecord {
        LogRecord::Mala(self.build())
    }
}

// ---------------------------------------------------------------------------
// Collection helpers
// ---------------------------------------------------------------------------

/// Wrap wire objects into the persisted-collection shape `merge` consumes.
pub fn collection(entries: &[Value]) -> Value {
    Value::Array(entries.to_vec())
}

/// Build `n` regular records cycling over the given course codes.
pub fn build_corpus(n: usize, codes: &[&str]) -> Vec<LogRecord> {
    (0..n)
        .map(|i| {
            let code = codes[i % codes.len()];
            SessionEntryBuilder::new(i as i64)
                .elapsed(60 * (i as i64 % 90))
                .notes(&format!("session {i}"))
                .course(legacy_course(code, "Some Course"))
                .regular()
        })
        .collect()
}
