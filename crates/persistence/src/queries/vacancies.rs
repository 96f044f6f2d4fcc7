// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacancy queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use vitae_domain::Vacancy;

use crate::data_models::{VacancyRow, vacancy_columns, vacancy_from_row};
use crate::diesel_schema::vacancies;
use crate::error::PersistenceError;

/// Selects all vacancies, ordered by ascending id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn select_vacancies(conn: &mut SqliteConnection) -> Result<Vec<Vacancy>, PersistenceError> {
    let rows = vacancies::table
        .order(vacancies::id.asc())
        .select(vacancy_columns())
        .load::<VacancyRow>(conn)?;

    Ok(rows.into_iter().map(vacancy_from_row).collect())
}

/// Gets a single vacancy by id.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the vacancy does not
/// exist, or an error if the query fails.
pub fn get_vacancy(
    conn: &mut SqliteConnection,
    vacancy_id: i64,
) -> Result<Vacancy, PersistenceError> {
    let row = vacancies::table
        .filter(vacancies::id.eq(vacancy_id))
        .select(vacancy_columns())
        .first::<VacancyRow>(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: "vacancy",
            id: vacancy_id,
        })?;

    Ok(vacancy_from_row(row))
}
