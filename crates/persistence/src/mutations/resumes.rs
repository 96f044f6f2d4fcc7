// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resume mutations.
//!
//! `updated_at` is reassigned by every update statement rather than by
//! a database trigger, so direct-SQL writers bypassing this module
//! would not refresh it.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::info;
use vitae_domain::{NewResume, Resume, ResumePatch};

use crate::backend;
use crate::diesel_schema::resumes;
use crate::error::PersistenceError;
use crate::queries;

/// Changeset for a resume patch. `None` fields are skipped.
#[derive(AsChangeset)]
#[diesel(table_name = resumes)]
struct ResumeChangeset<'a> {
    title: Option<&'a str>,
    compensation: Option<i64>,
    workload: Option<&'a str>,
    updated_at: &'a str,
}

/// Formats the current UTC instant the way `CURRENT_TIMESTAMP` does.
fn utc_now() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .map_err(|e| PersistenceError::QueryFailed(format!("Timestamp formatting failed: {e}")))
}

/// Inserts a new resume for an existing worker.
///
/// The timestamps are server-assigned; the compensation CHECK and the
/// `worker_id` foreign key are enforced by the storage engine and
/// surface as [`PersistenceError::ConstraintViolation`].
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `resume` - The validated input record
///
/// # Errors
///
/// Returns an error if a constraint rejects the row or the insert
/// fails.
pub fn insert_resume(
    conn: &mut SqliteConnection,
    resume: &NewResume,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(resumes::table)
        .values((
            resumes::title.eq(resume.title()),
            resumes::compensation.eq(resume.compensation()),
            resumes::workload.eq(resume.workload().as_str()),
            resumes::worker_id.eq(resume.worker_id()),
        ))
        .execute(conn)?;

    let resume_id = backend::get_last_insert_rowid(conn)?;

    info!(resume_id, worker_id = resume.worker_id(), "Resume created");
    Ok(resume_id)
}

/// Inserts a batch of resumes, preserving input order.
///
/// # Errors
///
/// Returns an error if any insert fails; the surrounding unit of work
/// rolls the whole batch back.
pub fn insert_resumes(
    conn: &mut SqliteConnection,
    batch: &[NewResume],
) -> Result<Vec<i64>, PersistenceError> {
    let mut ids = Vec::with_capacity(batch.len());
    for resume in batch {
        ids.push(insert_resume(conn, resume)?);
    }
    Ok(ids)
}

/// Applies a partial update to a resume and returns the updated row.
///
/// Every patch, including an all-`None` one, reassigns `updated_at`.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no resume has the given
/// id, [`PersistenceError::ConstraintViolation`] if the patched
/// compensation fails the CHECK, or an error if the update fails.
pub fn update_resume(
    conn: &mut SqliteConnection,
    resume_id: i64,
    patch: &ResumePatch,
) -> Result<Resume, PersistenceError> {
    let now = utc_now()?;
    let changeset = ResumeChangeset {
        title: patch.title.as_deref(),
        compensation: patch.compensation,
        workload: patch.workload.map(|w| w.as_str()),
        updated_at: &now,
    };

    let affected = diesel::update(resumes::table.filter(resumes::id.eq(resume_id)))
        .set(changeset)
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound {
            entity: "resume",
            id: resume_id,
        });
    }

    info!(resume_id, "Resume updated");
    queries::resumes::get_resume(conn, resume_id)
}

/// Deletes a resume. Its vacancy replies cascade; the owning worker is
/// untouched.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no resume has the given
/// id, or an error if the delete fails.
pub fn delete_resume(conn: &mut SqliteConnection, resume_id: i64) -> Result<(), PersistenceError> {
    let affected =
        diesel::delete(resumes::table.filter(resumes::id.eq(resume_id))).execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound {
            entity: "resume",
            id: resume_id,
        });
    }

    info!(resume_id, "Resume deleted");
    Ok(())
}
