//! Public types for the timesheet API
use axum::extract::Multipart;

use crate::core::TimesheetError;
pub use crate::timesheet::{PendingCandidate, TimesheetResponse};

/// Fields of a timesheet multipart form. Blank values count as missing.
#[derive(Debug, Default)]
pub struct TimesheetForm {
    pub week_sunday: Option<String>,
    pub file: Option<Vec<u8>>,
    pub ics_url: Option<String>,
    /// `||` separated UIDs to apply
    pub include_recurring_uids: String,
    /// `||` separated summaries to apply on the legacy endpoint
    pub include_recurring: String,
    pub finalize: String,
}

impl TimesheetForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, TimesheetError> {
        let mut form = TimesheetForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| TimesheetError::InvalidForm(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "file" {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| TimesheetError::InvalidForm(e.body_text()))?;
                form.file = (!bytes.is_empty()).then(|| bytes.to_vec());
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| TimesheetError::InvalidForm(e.body_text()))?;
            match name.as_str() {
                "week_sunday" => form.week_sunday = non_blank(text),
                "ics_url" => form.ics_url = non_blank(text),
                "include_recurring_uids" => form.include_recurring_uids = text,
                "include_recurring" => form.include_recurring = text,
                "finalize" => form.finalize = text,
                other => tracing::debug!("Ignoring unexpected form field {}", other),
            }
        }

        Ok(form)
    }

    pub fn week_sunday(&self) -> Result<&str, TimesheetError> {
        self.week_sunday
            .as_deref()
            .ok_or_else(|| TimesheetError::InvalidForm(String::from("week_sunday is required")))
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
