use super::catalog::StatusCatalog;
use super::response::SubmissionRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Недокументированный статус домашней работы: {}",
    .status.as_deref().unwrap_or("статус отсутствует")
)]
pub struct UnknownStatusError {
    pub status: Option<String>,
}

/// Renders a submission record as the chat notification text.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictFormatter {
    catalog: StatusCatalog,
}

impl VerdictFormatter {
    pub fn new(catalog: StatusCatalog) -> Self {
        Self { catalog }
    }

    pub fn format(&self, record: &SubmissionRecord) -> Result<String, UnknownStatusError> {
        let verdict = record
            .status
            .as_deref()
            .and_then(|status| self.catalog.verdict(status))
            .ok_or_else(|| UnknownStatusError {
                status: record.status.clone(),
            })?;

        Ok(match record.name.as_deref() {
            Some(name) => format!("Изменился статус проверки работы \"{name}\". {verdict}"),
            None => format!("Изменился статус проверки работы. {verdict}"),
        })
    }
}
