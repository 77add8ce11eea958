use crate::entity::Entity;
use crate::enums::ReportStatus;
use crate::error::CoreError;
use crate::period::{Period, PeriodId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Produces the receipt number handed back to the author of a report.
pub trait ReceiptGenerator {
    fn generate(&self, report: &Report) -> String;
}

impl<F> ReceiptGenerator for F
where
    F: Fn(&Report) -> String,
{
    fn generate(&self, report: &Report) -> String {
        self(report)
    }
}

/// One submission of data for an `(entity, period)` pair.
///
/// Creation happens in two explicit steps: `create` builds an `Unsaved` report
/// and `finalize` moves it to `Created` while attaching a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period: PeriodId,
    pub entity: Uuid,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: DateTime<Utc>,
    status: ReportStatus,
    receipt: Option<String>,
}

impl Report {
    pub fn create(period: &Period, entity: &Entity, author: &str) -> Self {
        let now = Utc::now();
        Self {
            period: period.id(),
            entity: entity.id,
            created_by: author.to_string(),
            created_on: now,
            modified_by: Some(author.to_string()),
            modified_on: now,
            status: ReportStatus::Unsaved,
            receipt: None,
        }
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn receipt(&self) -> Option<&str> {
        self.receipt.as_deref()
    }

    /// Second creation step: marks the report `Created` and stores its receipt.
    pub fn finalize<G>(&mut self, generator: &G) -> Result<&str, CoreError>
    where
        G: ReceiptGenerator + ?Sized,
    {
        self.transition(ReportStatus::Unsaved, ReportStatus::Created)?;
        let receipt = generator.generate(self);
        tracing::debug!(period = %self.period, entity = %self.entity, %receipt, "Report finalized.");
        Ok(self.receipt.insert(receipt).as_str())
    }

    /// Records the outcome of a validation pass.
    ///
    /// A report with no errors becomes `Complete`, otherwise `Erroneous`.
    pub fn apply_validation(&mut self, error_count: usize) -> Result<ReportStatus, CoreError> {
        let target = if error_count == 0 {
            ReportStatus::Complete
        } else {
            ReportStatus::Erroneous
        };
        match self.status {
            ReportStatus::Unsaved | ReportStatus::Closed => Err(CoreError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            }),
            _ => {
                self.status = target;
                self.modified_on = Utc::now();
                Ok(target)
            }
        }
    }

    pub fn mark_incomplete(&mut self) -> Result<(), CoreError> {
        match self.status {
            ReportStatus::Created | ReportStatus::Erroneous | ReportStatus::Complete => {
                self.status = ReportStatus::Incomplete;
                self.modified_on = Utc::now();
                Ok(())
            }
            other => Err(CoreError::InvalidTransition {
                from: other.to_string(),
                to: ReportStatus::Incomplete.to_string(),
            }),
        }
    }

    pub fn close(&mut self) -> Result<(), CoreError> {
        self.transition(ReportStatus::Complete, ReportStatus::Closed)
    }

    /// Notes a modification by `author`.
    pub fn touch(&mut self, author: &str) {
        self.modified_by = Some(author.to_string());
        self.modified_on = Utc::now();
    }

    fn transition(&mut self, from: ReportStatus, to: ReportStatus) -> Result<(), CoreError> {
        if self.status != from {
            return Err(CoreError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.modified_on = Utc::now();
        Ok(())
    }
}
