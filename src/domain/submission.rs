//! Per-step write log for order submissions.
//!
//! An order submission is several independent storage commits. Each commit is
//! followed by a log entry so that a submission which stopped half-way can be
//! found afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SubmissionStep {
    Started,
    CustomerResolved,
    OrderInserted,
    ItemInserted,
    Completed,
}

impl SubmissionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStep::Started => "started",
            SubmissionStep::CustomerResolved => "customer_resolved",
            SubmissionStep::OrderInserted => "order_inserted",
            SubmissionStep::ItemInserted => "item_inserted",
            SubmissionStep::Completed => "completed",
        }
    }
}

impl fmt::Display for SubmissionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(SubmissionStep::Started),
            "customer_resolved" => Ok(SubmissionStep::CustomerResolved),
            "order_inserted" => Ok(SubmissionStep::OrderInserted),
            "item_inserted" => Ok(SubmissionStep::ItemInserted),
            "completed" => Ok(SubmissionStep::Completed),
            other => Err(DomainError::Internal(format!(
                "unknown submission step '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmissionEntry {
    pub submission_id: Uuid,
    pub step: SubmissionStep,
    pub customer_id: Option<i32>,
    pub order_id: Option<i32>,
    pub item_id: Option<i32>,
    pub quantity: Option<i32>,
    pub expected_items: Option<i32>,
}

impl NewSubmissionEntry {
    pub fn new(submission_id: Uuid, step: SubmissionStep) -> Self {
        Self {
            submission_id,
            step,
            customer_id: None,
            order_id: None,
            item_id: None,
            quantity: None,
            expected_items: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEntry {
    pub id: i32,
    pub entry: NewSubmissionEntry,
    pub recorded_at: DateTime<Utc>,
}

/// What a submission without a `completed` entry managed to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSubmission {
    pub submission_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub last_step: SubmissionStep,
    pub customer_id: Option<i32>,
    pub order_id: Option<i32>,
    pub expected_items: Option<i32>,
    pub inserted_items: i32,
}

/// Fold log entries (in insertion order) into the submissions that never
/// reached `completed`, oldest first.
pub fn incomplete_submissions(entries: &[SubmissionEntry]) -> Vec<PartialSubmission> {
    let mut by_id: BTreeMap<Uuid, (i32, PartialSubmission, bool)> = BTreeMap::new();

    for e in entries {
        let (_, partial, completed) = by_id.entry(e.entry.submission_id).or_insert_with(|| {
            (
                e.id,
                PartialSubmission {
                    submission_id: e.entry.submission_id,
                    started_at: e.recorded_at,
                    last_step: e.entry.step,
                    customer_id: None,
                    order_id: None,
                    expected_items: None,
                    inserted_items: 0,
                },
                false,
            )
        });

        partial.last_step = e.entry.step;
        match e.entry.step {
            SubmissionStep::Started => partial.expected_items = e.entry.expected_items,
            SubmissionStep::CustomerResolved => partial.customer_id = e.entry.customer_id,
            SubmissionStep::OrderInserted => partial.order_id = e.entry.order_id,
            SubmissionStep::ItemInserted => partial.inserted_items += 1,
            SubmissionStep::Completed => *completed = true,
        }
    }

    let mut pending: Vec<(i32, PartialSubmission)> = by_id
        .into_values()
        .filter(|(_, _, completed)| !completed)
        .map(|(first_id, partial, _)| (first_id, partial))
        .collect();
    pending.sort_by_key(|(first_id, _)| *first_id);
    pending.into_iter().map(|(_, partial)| partial).collect()
}
