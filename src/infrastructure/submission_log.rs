use diesel::prelude::*;
use uuid::Uuid;

use crate::db::Storage;
use crate::domain::errors::DomainError;
use crate::domain::ports::SubmissionLog;
use crate::domain::submission::{NewSubmissionEntry, SubmissionEntry};
use crate::schema::submission_log;

use super::models::{NewSubmissionLogRow, SubmissionLogRow};

pub struct DieselSubmissionLog {
    storage: Storage,
}

impl DieselSubmissionLog {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl SubmissionLog for DieselSubmissionLog {
    fn record(&self, entry: &NewSubmissionEntry) -> Result<(), DomainError> {
        let mut conn = self.storage.connection()?;

        diesel::insert_into(submission_log::table)
            .values(&NewSubmissionLogRow::from(entry))
            .execute(&mut conn)?;

        Ok(())
    }

    fn entries(&self) -> Result<Vec<SubmissionEntry>, DomainError> {
        let mut conn = self.storage.connection()?;

        submission_log::table
            .order(submission_log::entry_id.asc())
            .select(SubmissionLogRow::as_select())
            .load::<SubmissionLogRow>(&mut conn)?
            .into_iter()
            .map(SubmissionEntry::try_from)
            .collect()
    }

    fn entries_for(&self, submission_id: Uuid) -> Result<Vec<SubmissionEntry>, DomainError> {
        let mut conn = self.storage.connection()?;

        submission_log::table
            .filter(submission_log::submission_id.eq(submission_id))
            .order(submission_log::entry_id.asc())
            .select(SubmissionLogRow::as_select())
            .load::<SubmissionLogRow>(&mut conn)?
            .into_iter()
            .map(SubmissionEntry::try_from)
            .collect()
    }
}
