use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

use super::catalog::StatusCatalog;

const HOMEWORKS_KEY: &str = "homeworks";
const DATE_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One reviewed-work entry from the status API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub name: Option<String>,
    pub status: Option<String>,
    pub last_updated: Option<String>,
}

impl SubmissionRecord {
    /// Reads the consumed fields from one list entry. Fields that are absent or
    /// not strings come back as `None`; nothing else is checked.
    pub fn from_value(item: &Value) -> Self {
        let text = |key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            name: text("homework_name"),
            status: text("status"),
            last_updated: text("date_updated"),
        }
    }

    /// Parses `date_updated`, accepting the API's `Z`-suffixed form and RFC 3339.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_updated.as_deref()?.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, DATE_UPDATED_FORMAT) {
            return Some(naive.and_utc());
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Ответ API не является JSON-объектом")]
    NotAnObject,
    #[error("В ответе API отсутствует ключ homeworks")]
    MissingHomeworks,
    #[error("Ключ homeworks в ответе API не является списком")]
    HomeworksNotAList,
}

/// Extracts submission records from a raw API payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator {
    catalog: StatusCatalog,
}

impl ResponseValidator {
    pub fn new(catalog: StatusCatalog) -> Self {
        Self { catalog }
    }

    /// Returns records in API order (newest first). Only the `homeworks` list
    /// itself is required; records with a missing or undocumented status are
    /// logged and kept.
    pub fn validate(&self, payload: &Value) -> Result<Vec<SubmissionRecord>, SchemaError> {
        let object = payload.as_object().ok_or(SchemaError::NotAnObject)?;
        let homeworks = object
            .get(HOMEWORKS_KEY)
            .ok_or(SchemaError::MissingHomeworks)?
            .as_array()
            .ok_or(SchemaError::HomeworksNotAList)?;

        let records = homeworks
            .iter()
            .map(SubmissionRecord::from_value)
            .collect::<Vec<_>>();

        for (index, record) in records.iter().enumerate() {
            match record.status.as_deref() {
                Some(status) if self.catalog.is_documented(status) => {}
                Some(status) => warn!(index, status, "undocumented homework status"),
                None => warn!(index, "homework record has no status"),
            }
        }

        Ok(records)
    }
}
