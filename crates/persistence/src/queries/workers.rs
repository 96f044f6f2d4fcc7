// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use vitae_domain::{OrderDirection, Worker, WorkerFilter};

use crate::data_models::{WorkerRow, worker_columns, worker_from_row};
use crate::diesel_schema::workers;
use crate::error::PersistenceError;

/// Selects workers matching the filter.
///
/// Unordered selects default to ascending id so results are stable.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - Predicates and ordering
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidQuery`] if the order key does not
/// name a worker column, or an error if the query fails.
pub fn select_workers(
    conn: &mut SqliteConnection,
    filter: &WorkerFilter,
) -> Result<Vec<Worker>, PersistenceError> {
    let mut query = workers::table.select(worker_columns()).into_boxed();

    if let Some(ref username) = filter.username_eq {
        query = query.filter(workers::username.eq(username));
    }

    let descending = filter.direction == OrderDirection::Descending;
    query = match filter.order_by.as_deref() {
        None => query.order(workers::id.asc()),
        Some("id") => {
            if descending {
                query.order(workers::id.desc())
            } else {
                query.order(workers::id.asc())
            }
        }
        Some("username") => {
            if descending {
                query.order(workers::username.desc())
            } else {
                query.order(workers::username.asc())
            }
        }
        Some(unknown) => {
            return Err(PersistenceError::InvalidQuery {
                entity: "workers",
                key: unknown.to_string(),
            });
        }
    };

    let rows = query.load::<WorkerRow>(conn)?;
    Ok(rows.into_iter().map(worker_from_row).collect())
}

/// Gets a single worker by id.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the worker does not exist,
/// or an error if the query fails.
pub fn get_worker(conn: &mut SqliteConnection, worker_id: i64) -> Result<Worker, PersistenceError> {
    let row = workers::table
        .filter(workers::id.eq(worker_id))
        .select(worker_columns())
        .first::<WorkerRow>(conn)
        .optional()?
        .ok_or(PersistenceError::NotFound {
            entity: "worker",
            id: worker_id,
        })?;

    Ok(worker_from_row(row))
}
