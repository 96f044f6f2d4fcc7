// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-level helpers shared by queries, mutations and the loader.
//!
//! Rows are loaded as plain tuples and converted into domain entities
//! here, so the stored-string→enum translation for `workload` happens
//! in exactly one place.

use std::str::FromStr;

use vitae_domain::{Resume, Vacancy, Worker, Workload};

use crate::diesel_schema::{resumes, vacancies, workers};
use crate::error::PersistenceError;

/// Tuple shape of a `workers` row.
pub type WorkerRow = (i64, String);

/// Tuple shape of a `resumes` row.
pub type ResumeRow = (i64, String, i64, String, i64, String, String);

/// Tuple shape of a `vacancies` row.
pub type VacancyRow = (i64, String, Option<i64>);

/// The full `workers` column tuple, in `WorkerRow` order.
pub const fn worker_columns() -> (workers::id, workers::username) {
    (workers::id, workers::username)
}

/// The full `resumes` column tuple, in `ResumeRow` order.
pub const fn resume_columns() -> (
    resumes::id,
    resumes::title,
    resumes::compensation,
    resumes::workload,
    resumes::worker_id,
    resumes::created_at,
    resumes::updated_at,
) {
    (
        resumes::id,
        resumes::title,
        resumes::compensation,
        resumes::workload,
        resumes::worker_id,
        resumes::created_at,
        resumes::updated_at,
    )
}

/// The full `vacancies` column tuple, in `VacancyRow` order.
pub const fn vacancy_columns() -> (vacancies::id, vacancies::title, vacancies::compensation) {
    (vacancies::id, vacancies::title, vacancies::compensation)
}

/// Converts a loaded worker row into the domain entity.
pub fn worker_from_row(row: WorkerRow) -> Worker {
    let (id, username) = row;
    Worker::with_id(id, username)
}

/// Converts a loaded resume row into the domain entity.
///
/// # Errors
///
/// Returns an error if the stored workload literal is not a known
/// variant; the CHECK constraint makes that unreachable for rows this
/// layer wrote.
pub fn resume_from_row(row: ResumeRow) -> Result<Resume, PersistenceError> {
    let (id, title, compensation, workload, worker_id, created_at, updated_at) = row;
    let workload = Workload::from_str(&workload).map_err(|_| {
        PersistenceError::DatabaseError(format!(
            "Unknown workload literal '{workload}' in resume {id}"
        ))
    })?;
    Ok(Resume::with_id(
        id,
        title,
        compensation,
        workload,
        worker_id,
        created_at,
        updated_at,
    ))
}

/// Converts a loaded vacancy row into the domain entity.
pub fn vacancy_from_row(row: VacancyRow) -> Vacancy {
    let (id, title, compensation) = row;
    Vacancy::with_id(id, title, compensation)
}
