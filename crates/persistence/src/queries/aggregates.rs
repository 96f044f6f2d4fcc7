// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! GROUP BY aggregation queries.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use vitae_domain::Workload;

use crate::diesel_schema::resumes;
use crate::error::PersistenceError;

/// Averages resume compensation per workload.
///
/// Plain SQL `GROUP BY` semantics: a workload with no resumes yields no
/// row. Results are ordered by the workload literal ascending.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn avg_compensation_by_workload(
    conn: &mut SqliteConnection,
) -> Result<Vec<(Workload, f64)>, PersistenceError> {
    // NOTE: avg() is raw SQL (justified - Diesel's avg maps to an
    // arbitrary-precision numeric type the SQLite backend cannot load)
    let rows = resumes::table
        .group_by(resumes::workload)
        .order(resumes::workload.asc())
        .select((
            resumes::workload,
            diesel::dsl::sql::<diesel::sql_types::Nullable<diesel::sql_types::Double>>(
                "avg(compensation)",
            ),
        ))
        .load::<(String, Option<f64>)>(conn)?;

    rows.into_iter()
        .map(|(workload, average)| {
            let workload = Workload::from_str(&workload).map_err(|_| {
                PersistenceError::DatabaseError(format!("Unknown workload literal '{workload}'"))
            })?;
            // A group only exists if at least one row fed it, and
            // compensation is NOT NULL, so the average is never NULL.
            let average = average.ok_or_else(|| {
                PersistenceError::DatabaseError(String::from("NULL average for non-empty group"))
            })?;
            Ok((workload, average))
        })
        .collect()
}
