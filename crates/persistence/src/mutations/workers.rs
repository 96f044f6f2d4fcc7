// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use vitae_domain::{Worker, WorkerPatch};

use crate::backend;
use crate::diesel_schema::workers;
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a new worker.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The worker's username
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_worker(conn: &mut SqliteConnection, username: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(workers::table)
        .values(workers::username.eq(username))
        .execute(conn)?;

    let worker_id = backend::get_last_insert_rowid(conn)?;

    info!(worker_id, "Worker created");
    Ok(worker_id)
}

/// Inserts a batch of workers, preserving input order.
///
/// # Errors
///
/// Returns an error if any insert fails; the surrounding unit of work
/// rolls the whole batch back.
pub fn insert_workers(
    conn: &mut SqliteConnection,
    usernames: &[&str],
) -> Result<Vec<i64>, PersistenceError> {
    let mut ids = Vec::with_capacity(usernames.len());
    for username in usernames {
        ids.push(insert_worker(conn, username)?);
    }
    Ok(ids)
}

/// Applies a partial update to a worker and returns the updated row.
///
/// An empty patch is a no-op read of the current row.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no worker has the given
/// id, or an error if the update fails.
pub fn update_worker(
    conn: &mut SqliteConnection,
    worker_id: i64,
    patch: &WorkerPatch,
) -> Result<Worker, PersistenceError> {
    if let Some(ref username) = patch.username {
        let affected = diesel::update(workers::table.filter(workers::id.eq(worker_id)))
            .set(workers::username.eq(username))
            .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound {
                entity: "worker",
                id: worker_id,
            });
        }
        info!(worker_id, "Worker updated");
    }

    queries::workers::get_worker(conn, worker_id)
}

/// Deletes a worker. The storage engine cascades the delete to the
/// worker's resumes and, through them, to their vacancy replies.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no worker has the given
/// id, or an error if the delete fails.
pub fn delete_worker(conn: &mut SqliteConnection, worker_id: i64) -> Result<(), PersistenceError> {
    let affected =
        diesel::delete(workers::table.filter(workers::id.eq(worker_id))).execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound {
            entity: "worker",
            id: worker_id,
        });
    }

    info!(worker_id, "Worker deleted");
    Ok(())
}
