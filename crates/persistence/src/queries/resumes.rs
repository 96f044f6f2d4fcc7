// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resume queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use vitae_domain::{OrderDirection, Resume, ResumeFilter};

use crate::data_models::{ResumeRow, resume_columns, resume_from_row};
use crate::diesel_schema::resumes;
use crate::error::PersistenceError;

/// Selects resumes matching the filter.
///
/// `title_contains` compiles to a `LIKE` lookup over the indexed title
/// column. Unordered selects default to ascending id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - Predicates, ordering and limit
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidQuery`] if the order key does not
/// name a resume column, or an error if the query fails.
pub fn select_resumes(
    conn: &mut SqliteConnection,
    filter: &ResumeFilter,
) -> Result<Vec<Resume>, PersistenceError> {
    let mut query = resumes::table.select(resume_columns()).into_boxed();

    if let Some(ref fragment) = filter.title_contains {
        query = query.filter(resumes::title.like(format!("%{fragment}%")));
    }
    if let Some(workload) = filter.workload {
        query = query.filter(resumes::workload.eq(workload.as_str()));
    }
    if let Some(min) = filter.min_compensation {
        query = query.filter(resumes::compensation.ge(min));
    }
    if let Some(worker_id) = filter.worker_id {
        query = query.filter(resumes::worker_id.eq(worker_id));
    }

    let descending = filter.direction == OrderDirection::Descending;
    query = match filter.order_by.as_deref() {
        None => query.order(resumes::id.asc()),
        Some("id") => {
            if descending {
                query.order(resumes::id.desc())
            } else {
                query.order(resumes::id.asc())
            }
        }
        Some("title") => {
            if descending {
                query.order(resumes::title.desc())
            } else {
                query.order(resumes::title.asc())
            }
        }
        Some("compensation") => {
            if descending {
                query.order(resumes::compensation.desc())
            } else {
                query.order(resumes::compensation.asc())
            }
        }
        Some("created_at") => {
            if descending {
                query.order(resumes::created_at.desc())
            } else {
                query.order(resumes::created_at.asc())
            }
        }
        Some("updated_at") => {
            if descending {
                query.order(resumes::updated_at.desc())
            } else {
                query.order(resumes::updated_at.asc())
            }
        }
        Some(unknown) => {
            return Err(PersistenceError::InvalidQuery {
                entity: "resumes",
                key: unknown.to_string(),
            });
        }
    };

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    let rows = query.load::<ResumeRow>(conn)?;
    rows.into_iter().map(resume_from_row).collect()
}

/// Gets a single resume by id.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the resume does not exist,
/// or an error if the query fails.
pub fn get_resume(conn: &mut SqliteConnection, resume_id: i64) -> Result<Resume, PersistenceError> {
    let row = resumes::table
        .filter(resumes::id.eq(resume_id))
        .select(resume_columns())
        .first::<ResumeRow>(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: "resume",
            id: resume_id,
        })?;

    resume_from_row(row)
}

/// Counts all persisted resumes.
///
/// # Errors
///
/// Returns an error if the query fails or the count does not fit.
pub fn count_resumes(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count = resumes::table.count().get_result::<i64>(conn)?;
    count
        .to_usize()
        .ok_or_else(|| PersistenceError::DatabaseError(String::from("Count conversion failed")))
}
