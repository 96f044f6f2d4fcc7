// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacancy and vacancy-reply mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use vitae_domain::{NewVacancy, VacancyReply};

use crate::backend;
use crate::diesel_schema::{vacancies, vacancies_replies};
use crate::error::PersistenceError;

/// Inserts a new vacancy.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `vacancy` - The validated input record
///
/// # Errors
///
/// Returns an error if a constraint rejects the row or the insert
/// fails.
pub fn insert_vacancy(
    conn: &mut SqliteConnection,
    vacancy: &NewVacancy,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(vacancies::table)
        .values((
            vacancies::title.eq(vacancy.title()),
            vacancies::compensation.eq(vacancy.compensation()),
        ))
        .execute(conn)?;

    let vacancy_id = backend::get_last_insert_rowid(conn)?;

    info!(vacancy_id, "Vacancy created");
    Ok(vacancy_id)
}

/// Deletes a vacancy. Replies to it cascade; replying resumes are
/// untouched.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no vacancy has the given
/// id, or an error if the delete fails.
pub fn delete_vacancy(
    conn: &mut SqliteConnection,
    vacancy_id: i64,
) -> Result<(), PersistenceError> {
    let affected =
        diesel::delete(vacancies::table.filter(vacancies::id.eq(vacancy_id))).execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound {
            entity: "vacancy",
            id: vacancy_id,
        });
    }

    info!(vacancy_id, "Vacancy deleted");
    Ok(())
}

/// Records that a resume replied to a vacancy, with an optional cover
/// letter, and returns the created reply.
///
/// The pair is the primary key, so replying twice surfaces as a
/// [`PersistenceError::ConstraintViolation`] rather than a duplicate
/// row. Dangling ids are rejected by the foreign keys.
///
/// # Errors
///
/// Returns an error if a constraint rejects the reply or the insert
/// fails.
pub fn reply_to_vacancy(
    conn: &mut SqliteConnection,
    resume_id: i64,
    vacancy_id: i64,
    cover_letter: Option<&str>,
) -> Result<VacancyReply, PersistenceError> {
    diesel::insert_into(vacancies_replies::table)
        .values((
            vacancies_replies::resume_id.eq(resume_id),
            vacancies_replies::vacancy_id.eq(vacancy_id),
            vacancies_replies::cover_letter.eq(cover_letter),
        ))
        .execute(conn)?;

    info!(resume_id, vacancy_id, "Vacancy reply recorded");
    Ok(VacancyReply::new(
        resume_id,
        vacancy_id,
        cover_letter.map(String::from),
    ))
}
