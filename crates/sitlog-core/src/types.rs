//! Core types for sitlog-core.
//!
//! This module defines the fundamental data structures shared across all
//! engine layers: the raw [`SessionEntry`], its course reference
//! [`CourseRef`], and the provenance-tagged [`LogRecord`].
//!
//! The host app has shipped two generations of the persisted record shape.
//! Everything here deserializes *any* JSON object without failing: fields
//! whose value does not match the expected shape are left untouched in the
//! entry's `extra` map, so re-serialization reproduces the original wire
//! bytes field-for-field. Structural tolerance lives here; the decision of
//! what to *do* with an odd record belongs to [`crate::bucket`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which persisted collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// The regular course log collection.
    Primary,
    /// The mala (repetition-count) log collection.
    Mala,
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Primary => write!(f, "primary"),
            SourceId::Mala => write!(f, "mala"),
        }
    }
}

/// A record identifier as it appears on the wire.
///
/// Older records carry a numeric sequence value, newer ones an opaque hex
/// token. Equality and hashing go through the string rendering so the two
/// origins compare uniformly; serialization keeps the original shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Seq(serde_json::Number),
    Token(String),
}

impl RecordId {
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Seq(n) => Value::Number(n.clone()),
            RecordId::Token(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Seq(n) => write!(f, "{n}"),
            RecordId::Token(s) => write!(f, "{s}"),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// A category value with two wire representations: an integer code in the
/// older schema, a symbolic string in the newer one. Used for `feeling` and
/// `place`. Passed through as-is, never normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Code(i64),
    Symbol(String),
}

impl CategoryValue {
    pub fn to_value(&self) -> Value {
        match self {
            CategoryValue::Code(n) => Value::from(*n),
            CategoryValue::Symbol(s) => Value::String(s.clone()),
        }
    }
}

/// Course reference embedded in every log entry, classified by schema
/// generation.
///
/// The only documented drift between the two generations: the newer schema
/// dropped `code` for the "Custom" course type. A present `code` classifies
/// the value as [`CourseRef::Legacy`]; an absent (or non-string) `code`
/// classifies it as [`CourseRef::Current`].
#[derive(Debug, Clone, PartialEq)]
pub enum CourseRef {
    Legacy(LegacyCourseRef),
    Current(CurrentCourseRef),
}

/// Pre-drift course shape: `code` is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyCourseRef {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub code: String,
    pub is_mala_course: Option<bool>,
    /// Wire fields this crate does not model, preserved verbatim.
    pub extra: Map<String, Value>,
}

/// Post-drift course shape: no `code` field.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentCourseRef {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub is_mala_course: Option<bool>,
    /// Wire fields this crate does not model, preserved verbatim.
    pub extra: Map<String, Value>,
}

impl CourseRef {
    pub fn id(&self) -> Option<i64> {
        match self {
            CourseRef::Legacy(c) => c.id,
            CourseRef::Current(c) => c.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CourseRef::Legacy(c) => c.name.as_deref(),
            CourseRef::Current(c) => c.name.as_deref(),
        }
    }

    /// The categorical course code. `None` for the post-drift shape.
    pub fn code(&self) -> Option<&str> {
        match self {
            CourseRef::Legacy(c) => Some(&c.code),
            CourseRef::Current(_) => None,
        }
    }

    pub fn is_mala_course(&self) -> bool {
        let (field, extra) = match self {
            CourseRef::Legacy(c) => (c.is_mala_course, &c.extra),
            CourseRef::Current(c) => (c.is_mala_course, &c.extra),
        };
        // Some snapshots spell the flag in camelCase; those stay in `extra`
        // so round-trips keep the original key.
        field
            .or_else(|| extra.get("isMalaCourse").and_then(Value::as_bool))
            .unwrap_or(false)
    }

    pub fn to_value(&self) -> Value {
        let (id, name, is_mala_course, extra) = match self {
            CourseRef::Legacy(c) => (c.id, &c.name, c.is_mala_course, &c.extra),
            CourseRef::Current(c) => (c.id, &c.name, c.is_mala_course, &c.extra),
        };
        let mut out = extra.clone();
        if let Some(id) = id {
            out.insert("id".to_string(), Value::from(id));
        }
        if let Some(name) = name {
            out.insert("name".to_string(), Value::String(name.clone()));
        }
        if let CourseRef::Legacy(c) = self {
            out.insert("code".to_string(), Value::String(c.code.clone()));
        }
        if let Some(mala) = is_mala_course {
            out.insert("is_mala_course".to_string(), Value::Bool(mala));
        }
        Value::Object(out)
    }

    fn from_map(mut raw: Map<String, Value>) -> Self {
        let code: Option<String> = take_field(&mut raw, "code");
        let id = take_field(&mut raw, "id");
        let name = take_field(&mut raw, "name");
        let is_mala_course = take_field(&mut raw, "is_mala_course");
        match code {
            Some(code) => CourseRef::Legacy(LegacyCourseRef {
                id,
                name,
                code,
                is_mala_course,
                extra: raw,
            }),
            None => CourseRef::Current(CurrentCourseRef {
                id,
                name,
                is_mala_course,
                extra: raw,
            }),
        }
    }
}

impl Serialize for CourseRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CourseRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(CourseRef::from_map(raw))
    }
}

/// One raw session log entry, as persisted by the host app.
///
/// Every modeled field is optional: a field that is absent, null, or of an
/// unexpected shape stays in `extra` and the typed slot is `None`. The
/// entry is a read-only snapshot; the engine never rewrites a value.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub id: Option<RecordId>,
    /// Epoch-millisecond session timestamp.
    pub date: Option<i64>,
    /// Human-readable date string. Older schema only.
    pub date_string: Option<String>,
    /// Session duration in seconds.
    pub elapsed: Option<i64>,
    pub feeling: Option<CategoryValue>,
    pub place: Option<CategoryValue>,
    pub notes: Option<String>,
    pub course: Option<CourseRef>,
    /// Wire fields this crate does not model, preserved verbatim. Also
    /// holds the original value of any modeled field that failed tolerant
    /// extraction, so round-trips lose nothing.
    pub extra: Map<String, Value>,
}

impl SessionEntry {
    /// Tolerantly extract the modeled fields from a raw wire object.
    /// Never fails: unextractable values stay in `extra`.
    pub fn from_map(mut raw: Map<String, Value>) -> Self {
        let id = take_field(&mut raw, "id");
        let date = take_field(&mut raw, "date");
        let date_string = take_field(&mut raw, "dateString");
        let elapsed = take_field(&mut raw, "elapsed");
        let feeling = take_field(&mut raw, "feeling");
        let place = take_field(&mut raw, "place");
        let notes = take_field(&mut raw, "notes");
        let course = take_field(&mut raw, "course");
        Self {
            id,
            date,
            date_string,
            elapsed,
            feeling,
            place,
            notes,
            course,
            extra: raw,
        }
    }

    /// Rebuild the wire object: `extra` plus every extracted field under
    /// its original key.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut out = self.extra.clone();
        if let Some(id) = &self.id {
            out.insert("id".to_string(), id.to_value());
        }
        if let Some(date) = self.date {
            out.insert("date".to_string(), Value::from(date));
        }
        if let Some(ds) = &self.date_string {
            out.insert("dateString".to_string(), Value::String(ds.clone()));
        }
        if let Some(elapsed) = self.elapsed {
            out.insert("elapsed".to_string(), Value::from(elapsed));
        }
        if let Some(feeling) = &self.feeling {
            out.insert("feeling".to_string(), feeling.to_value());
        }
        if let Some(place) = &self.place {
            out.insert("place".to_string(), place.to_value());
        }
        if let Some(notes) = &self.notes {
            out.insert("notes".to_string(), Value::String(notes.clone()));
        }
        if let Some(course) = &self.course {
            out.insert("course".to_string(), course.to_value());
        }
        out
    }

    /// Session duration clamped to zero, for aggregation.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.map(|e| e.max(0) as u64).unwrap_or(0)
    }

    /// Non-empty notes text, if any.
    pub fn notes_text(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }

    /// The calendar date of the session.
    ///
    /// Prefers `dateString`: the epoch-ms `date` is known to drift around
    /// midnight when the host app applies a timezone. Falls back to `date`
    /// for newer records that no longer carry `dateString`.
    pub fn calendar_date(&self) -> Option<chrono::NaiveDate> {
        if let Some(ds) = &self.date_string {
            if let Some(prefix) = ds.get(..10) {
                if let Ok(date) = chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                    return Some(date);
                }
            }
        }
        self.date
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive())
    }

    /// The record id rendered for logs and error reports.
    pub fn display_id(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => "<no id>".to_string(),
        }
    }
}

impl Serialize for SessionEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SessionEntry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(SessionEntry::from_map(raw))
    }
}

/// A merged log record tagged with the collection it came from.
///
/// The discriminant is set explicitly by [`crate::merge::merge`]; nothing
/// downstream ever infers provenance from position. Serializes as the
/// entry's wire fields plus an `isMalaRecord` flag.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    Regular(SessionEntry),
    Mala(SessionEntry),
}

impl LogRecord {
    pub fn entry(&self) -> &SessionEntry {
        match self {
            LogRecord::Regular(e) | LogRecord::Mala(e) => e,
        }
    }

    pub fn is_mala(&self) -> bool {
        matches!(self, LogRecord::Mala(_))
    }

    pub fn source(&self) -> SourceId {
        match self {
            LogRecord::Regular(_) => SourceId::Primary,
            LogRecord::Mala(_) => SourceId::Mala,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut map = self.entry().to_map();
        map.insert("isMalaRecord".to_string(), Value::Bool(self.is_mala()));
        Value::Object(map)
    }
}

impl Serialize for LogRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Remove `key` from `raw` and parse it as `T`. A null, absent, or
/// shape-mismatched value is left in place and yields `None`.
fn take_field<T: DeserializeOwned>(raw: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = raw.remove(key)?;
    if value.is_null() {
        raw.insert(key.to_string(), value);
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            raw.insert(key.to_string(), value);
            None
        }
    }
}

/// Short JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
