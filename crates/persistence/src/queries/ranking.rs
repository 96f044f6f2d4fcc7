// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CTE-based window-function ranking.
//!
//! Composes a common-table-expression that ranks resumes within a
//! partition and joins it back to the base rows. Diesel has no DSL for
//! window functions or CTEs, so the statement is raw SQL; both keys are
//! resolved against closed column lists before the string is built, so
//! nothing caller-controlled is ever interpolated.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use vitae_domain::{Resume, Workload};

use crate::error::PersistenceError;

/// Columns a ranking may partition by.
const PARTITION_KEYS: &[&str] = &["workload", "worker_id"];

/// Columns a ranking may order by within a partition.
const ORDER_KEYS: &[&str] = &["compensation", "id", "created_at"];

/// Parameters for [`ranked_resumes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingSpec {
    /// Column partitioning the window.
    pub partition_by: String,
    /// Column ordering rows within each partition. Rank 1 is the
    /// highest value of this column.
    pub order_by: String,
    /// Reverses the output ordering, which is otherwise
    /// partition-then-rank ascending.
    pub reverse: bool,
}

impl RankingSpec {
    /// Checks both keys against the closed column lists.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidQuery`] naming the offending
    /// key.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        if !PARTITION_KEYS.contains(&self.partition_by.as_str()) {
            return Err(PersistenceError::InvalidQuery {
                entity: "resumes",
                key: self.partition_by.clone(),
            });
        }
        if !ORDER_KEYS.contains(&self.order_by.as_str()) {
            return Err(PersistenceError::InvalidQuery {
                entity: "resumes",
                key: self.order_by.clone(),
            });
        }
        Ok(())
    }
}

/// Row shape returned by the ranking statement.
#[derive(QueryableByName)]
struct RankedResumeRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = Text)]
    title: String,
    #[diesel(sql_type = BigInt)]
    compensation: i64,
    #[diesel(sql_type = Text)]
    workload: String,
    #[diesel(sql_type = BigInt)]
    worker_id: i64,
    #[diesel(sql_type = Text)]
    created_at: String,
    #[diesel(sql_type = Text)]
    updated_at: String,
    #[diesel(sql_type = BigInt)]
    rank: i64,
}

/// Ranks resumes within partitions of `spec.partition_by`, ordered by
/// `spec.order_by` descending (rank 1 is the top row, ties broken by
/// ascending id), and joins the ranks back onto the base rows.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `spec` - Partition and order keys, validated eagerly
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidQuery`] for an unknown key, or an
/// error if the query fails.
pub fn ranked_resumes(
    conn: &mut SqliteConnection,
    spec: &RankingSpec,
) -> Result<Vec<(Resume, i64)>, PersistenceError> {
    spec.validate()?;

    let direction = if spec.reverse { "DESC" } else { "ASC" };
    // NOTE: raw SQL (justified - Diesel has no window-function/CTE DSL).
    // Interpolated tokens all come from the closed lists above.
    let statement = format!(
        "WITH ranked AS ( \
             SELECT id, ROW_NUMBER() OVER ( \
                 PARTITION BY {partition} ORDER BY {order} DESC, id ASC \
             ) AS rank \
             FROM resumes \
         ) \
         SELECT r.id, r.title, r.compensation, r.workload, r.worker_id, \
                r.created_at, r.updated_at, ranked.rank \
         FROM resumes AS r \
         INNER JOIN ranked ON ranked.id = r.id \
         ORDER BY r.{partition} {direction}, ranked.rank {direction}",
        partition = spec.partition_by,
        order = spec.order_by,
    );

    let rows = diesel::sql_query(statement).load::<RankedResumeRow>(conn)?;

    rows.into_iter()
        .map(|row| {
            let workload = Workload::from_str(&row.workload).map_err(|_| {
                PersistenceError::DatabaseError(format!(
                    "Unknown workload literal '{}' in resume {}",
                    row.workload, row.id
                ))
            })?;
            let resume = Resume::with_id(
                row.id,
                row.title,
                row.compensation,
                workload,
                row.worker_id,
                row.created_at,
                row.updated_at,
            );
            Ok((resume, row.rank))
        })
        .collect()
}
