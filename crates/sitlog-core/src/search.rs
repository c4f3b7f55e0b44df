//! Notes search over merged records.
//!
//! Queries are case-insensitive regexes with `.` matching newlines, run
//! against each record's `notes` text; records without notes never match.
//! An optional inclusive [`DateRange`] narrows results by calendar date.
//! Results borrow from the searched sequence — searching never clones or
//! mutates a record.

use crate::error::SearchError;
use crate::types::LogRecord;
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Parse a comma-delimited `"from,to"` range.
    ///
    /// Each element is either an integer meaning that many days before
    /// `today`, or a date in `%Y-%m-%d` form (a longer datetime string is
    /// accepted; only the date prefix is read). An empty element leaves
    /// that end open: the epoch for `from`, `today` for `to`.
    ///
    /// `"7,3"` is between seven and three days ago, `"3,"` is from three
    /// days ago until today, `",2019-01-01"` is everything up to 2019.
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, SearchError> {
        let Some((from, to)) = input.split_once(',') else {
            return Err(SearchError::DateRange {
                input: input.to_string(),
                reason: "expected two comma-delimited elements".to_string(),
            });
        };
        let from = match parse_element(from.trim(), today)? {
            Some(date) => date,
            None => NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date is valid"),
        };
        let to = parse_element(to.trim(), today)?.unwrap_or(today);
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

fn parse_element(element: &str, today: NaiveDate) -> Result<Option<NaiveDate>, SearchError> {
    if element.is_empty() {
        return Ok(None);
    }
    if let Ok(days_ago) = element.parse::<i64>() {
        return Ok(Some(today - chrono::Duration::days(days_ago)));
    }
    element
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(Some)
        .ok_or_else(|| SearchError::DateRange {
            input: element.to_string(),
            reason: "not an integer day count or a %Y-%m-%d date".to_string(),
        })
}

/// A compiled notes query.
#[derive(Debug)]
pub struct SearchQuery {
    pattern: Regex,
    range: Option<DateRange>,
}

impl SearchQuery {
    pub fn new(pattern: &str) -> Result<Self, SearchError> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self {
            pattern,
            range: None,
        })
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Whether one record matches: it must have non-empty notes, fall in
    /// the range (when one is set), and match the pattern. A record whose
    /// date cannot be determined never matches a ranged query.
    pub fn matches(&self, record: &LogRecord) -> bool {
        let entry = record.entry();
        let Some(notes) = entry.notes_text() else {
            return false;
        };
        if let Some(range) = &self.range {
            match entry.calendar_date() {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }
        self.pattern.is_match(notes)
    }

    /// Matching records, in input order.
    pub fn filter<'r, I>(&self, records: I) -> Vec<&'r LogRecord>
    where
        I: IntoIterator<Item = &'r LogRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
