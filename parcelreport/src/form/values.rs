use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ReportError;

pub const TRACKING_NUMBER_FIELD: &str = "trackingNumber";
pub const ISSUE_FIELD: &str = "issue";
pub const DETAILS_FIELD: &str = "details";

/// Field values of a single form, kept in insertion order so the JSON body
/// lists keys in the order the fields were first filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K: Into<String>, V: Into<String>>(
        mut self,
        name: K,
        value: V,
    ) -> Self {
        self.set(name, value);
        self
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_bytes(&self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(Bytes::from)
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    NotDelivered,
    MissingPart,
    Damaged,
    Other,
}

impl Issue {
    pub const ALL: [Issue; 4] = [
        Issue::NotDelivered,
        Issue::MissingPart,
        Issue::Damaged,
        Issue::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Issue::NotDelivered => "not-delivered",
            Issue::MissingPart => "missing-part",
            Issue::Damaged => "damaged",
            Issue::Other => "other",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Issue::ALL.iter().map(Issue::as_str).collect()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Issue {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Issue::ALL
            .iter()
            .find(|issue| issue.as_str() == s)
            .copied()
            .ok_or_else(|| ReportError::InvalidValue {
                field: ISSUE_FIELD.to_string(),
                details: format!(
                    "'{}' is not one of {}",
                    s,
                    Issue::names().join(", ")
                ),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub tracking_number: String,
    pub issue: Issue,
    pub details: Option<String>,
}

impl DeliveryReport {
    pub fn new<S: Into<String>>(tracking_number: S, issue: Issue) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            issue,
            details: None,
        }
    }

    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<DeliveryReport> for FormValues {
    fn from(report: DeliveryReport) -> Self {
        let values = FormValues::new()
            .with(TRACKING_NUMBER_FIELD, report.tracking_number)
            .with(ISSUE_FIELD, report.issue.as_str());
        match report.details {
            Some(details) => values.with(DETAILS_FIELD, details),
            None => values,
        }
    }
}
