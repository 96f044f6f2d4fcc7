// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Eager loading of workers with their resumes.
//!
//! The three eager strategies produce identical graphs for the same
//! request; they differ only in statement shape. Child collections are
//! ordered in one place, after regrouping, so the SQL-level row order
//! never leaks into the result.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text};
use vitae_domain::{OrderDirection, Resume};

use crate::data_models::{
    ResumeRow, WorkerRow, resume_columns, resume_from_row, worker_columns, worker_from_row,
};
use crate::diesel_schema::{resumes, workers};
use crate::error::PersistenceError;
use crate::loader::{LoadStrategy, ResumesLoad, WorkerGraph, regroup};

/// Loads all workers with their resumes under an eager strategy.
///
/// Workers are ordered by id; each child collection is ordered by
/// resume id in the requested direction. Workers without matching
/// resumes appear with an empty collection.
///
/// # Errors
///
/// Returns [`PersistenceError::UnsupportedLoadStrategy`] for an
/// inexpressible request or for the `Lazy` strategy, which produces
/// handles rather than graphs, or an error if a statement fails.
pub fn load_worker_graphs(
    conn: &mut SqliteConnection,
    load: &ResumesLoad,
) -> Result<Vec<WorkerGraph>, PersistenceError> {
    load.validate()?;
    let mut graphs = match load.strategy {
        LoadStrategy::Lazy => {
            return Err(PersistenceError::UnsupportedLoadStrategy {
                reason: String::from(
                    "lazy loading produces handles, not graphs; use the lazy worker load",
                ),
            });
        }
        LoadStrategy::Joined => joined(conn, load)?,
        LoadStrategy::SelectIn => select_in(conn, load)?,
        LoadStrategy::FilteredJoin => filtered_join(conn, load)?,
    };
    for graph in &mut graphs {
        sort_resumes(&mut graph.resumes, load.direction);
    }
    Ok(graphs)
}

/// Orders a child collection by resume id in the requested direction.
pub(crate) fn sort_resumes(children: &mut [Resume], direction: OrderDirection) {
    match direction {
        OrderDirection::Ascending => children.sort_by_key(Resume::id),
        OrderDirection::Descending => children.sort_by_key(|r| std::cmp::Reverse(r.id())),
    }
}

/// One LEFT JOIN statement. The workload restriction lives in the ON
/// clause, not the WHERE clause, so workers without matching resumes
/// still produce a row.
fn joined(
    conn: &mut SqliteConnection,
    load: &ResumesLoad,
) -> Result<Vec<WorkerGraph>, PersistenceError> {
    let rows: Vec<(WorkerRow, Option<ResumeRow>)> = if let Some(workload) = load.workload {
        workers::table
            .left_join(
                resumes::table.on(resumes::worker_id
                    .eq(workers::id)
                    .and(resumes::workload.eq(workload.as_str()))),
            )
            .select((worker_columns(), resume_columns().nullable()))
            .order(workers::id.asc())
            .load(conn)?
    } else {
        workers::table
            .left_join(resumes::table.on(resumes::worker_id.eq(workers::id)))
            .select((worker_columns(), resume_columns().nullable()))
            .order(workers::id.asc())
            .load(conn)?
    };

    rows_to_graphs(rows)
}

/// One parent statement, then one child statement batched over the
/// collected worker ids.
fn select_in(
    conn: &mut SqliteConnection,
    load: &ResumesLoad,
) -> Result<Vec<WorkerGraph>, PersistenceError> {
    let worker_rows: Vec<WorkerRow> = workers::table
        .select(worker_columns())
        .order(workers::id.asc())
        .load(conn)?;
    let worker_ids: Vec<i64> = worker_rows.iter().map(|(id, _)| *id).collect();

    let mut child_query = resumes::table
        .select(resume_columns())
        .filter(resumes::worker_id.eq_any(worker_ids))
        .order(resumes::id.asc())
        .into_boxed();
    if let Some(workload) = load.workload {
        child_query = child_query.filter(resumes::workload.eq(workload.as_str()));
    }
    let resume_rows: Vec<ResumeRow> = child_query.load(conn)?;

    let mut graphs: Vec<WorkerGraph> = worker_rows
        .into_iter()
        .map(|row| WorkerGraph {
            worker: worker_from_row(row),
            resumes: Vec::new(),
        })
        .collect();
    let index: std::collections::HashMap<i64, usize> = graphs
        .iter()
        .enumerate()
        .map(|(position, graph)| (graph.worker.id(), position))
        .collect();

    for row in resume_rows {
        let resume = resume_from_row(row)?;
        if let Some(&position) = index.get(&resume.worker_id()) {
            graphs[position].resumes.push(resume);
        }
    }
    Ok(graphs)
}

#[derive(QueryableByName)]
struct RankedJoinRow {
    #[diesel(sql_type = BigInt)]
    worker_id: i64,
    #[diesel(sql_type = Text)]
    username: String,
    #[diesel(sql_type = Nullable<BigInt>)]
    resume_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    title: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    compensation: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    workload: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    created_at: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    updated_at: Option<String>,
}

/// One statement joining workers to a window-ranked resume set, keeping
/// the first K resumes per worker under the requested ordering.
///
/// NOTE: raw SQL (justified - Diesel has no DSL for window functions).
/// The window ORDER BY picks which K rows survive, so it follows the
/// requested direction; identifiers are fixed strings and the variable
/// inputs are bound parameters.
fn filtered_join(
    conn: &mut SqliteConnection,
    load: &ResumesLoad,
) -> Result<Vec<WorkerGraph>, PersistenceError> {
    let direction = match load.direction {
        OrderDirection::Ascending => "ASC",
        OrderDirection::Descending => "DESC",
    };
    let workload_clause = if load.workload.is_some() {
        "WHERE workload = ?"
    } else {
        ""
    };
    let statement = format!(
        "SELECT w.id AS worker_id, w.username AS username, \
                r.id AS resume_id, r.title AS title, \
                r.compensation AS compensation, r.workload AS workload, \
                r.created_at AS created_at, r.updated_at AS updated_at \
         FROM workers AS w \
         LEFT JOIN ( \
             SELECT id, title, compensation, workload, worker_id, \
                    created_at, updated_at, \
                    ROW_NUMBER() OVER ( \
                        PARTITION BY worker_id ORDER BY id {direction} \
                    ) AS rn \
             FROM resumes {workload_clause} \
         ) AS r ON r.worker_id = w.id AND r.rn <= ? \
         ORDER BY w.id ASC, r.id {direction}"
    );

    let per_parent_limit = load.per_parent_limit.map_or(i64::MAX, i64::from);
    let rows: Vec<RankedJoinRow> = if let Some(workload) = load.workload {
        diesel::sql_query(statement)
            .bind::<Text, _>(workload.as_str())
            .bind::<BigInt, _>(per_parent_limit)
            .load(conn)?
    } else {
        diesel::sql_query(statement)
            .bind::<BigInt, _>(per_parent_limit)
            .load(conn)?
    };

    let pairs: Vec<(WorkerRow, Option<ResumeRow>)> = rows
        .into_iter()
        .map(|row| {
            let worker = (row.worker_id, row.username);
            let resume = match (
                row.resume_id,
                row.title,
                row.compensation,
                row.workload,
                row.created_at,
                row.updated_at,
            ) {
                (Some(id), Some(title), Some(compensation), Some(workload), Some(c), Some(u)) => {
                    Some((id, title, compensation, workload, row.worker_id, c, u))
                }
                _ => None,
            };
            (worker, resume)
        })
        .collect();

    rows_to_graphs(pairs)
}

fn rows_to_graphs(
    rows: Vec<(WorkerRow, Option<ResumeRow>)>,
) -> Result<Vec<WorkerGraph>, PersistenceError> {
    regroup(rows, |(id, _)| *id)
        .into_iter()
        .map(|(worker_row, resume_rows)| {
            let resumes = resume_rows
                .into_iter()
                .map(resume_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(WorkerGraph {
                worker: worker_from_row(worker_row),
                resumes,
            })
        })
        .collect()
}
