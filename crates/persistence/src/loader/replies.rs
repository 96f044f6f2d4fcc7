// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Eager loading across the resume/vacancy reply relationship.
//!
//! The relationship is many-to-many through `vacancies_replies`, and
//! each edge carries its cover letter, so children are `(entity, cover
//! letter)` pairs rather than bare rows. Both directions are supported;
//! a per-parent limit is not, because ranking edges of a many-to-many
//! has no single defensible ordering.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{
    ResumeRow, VacancyRow, resume_columns, resume_from_row, vacancy_columns, vacancy_from_row,
};
use crate::diesel_schema::{resumes, vacancies, vacancies_replies};
use crate::error::PersistenceError;
use crate::loader::{
    LoadStrategy, RepliedResume, RepliedVacancy, ResumeGraph, VacancyGraph, regroup,
};

type ReplyEdge<E> = (E, Option<String>);

/// Loads all resumes with the vacancies they replied to.
///
/// Resumes are ordered by id; each reply collection is ordered by
/// vacancy id. Resumes without replies appear with an empty collection.
///
/// # Errors
///
/// Returns [`PersistenceError::UnsupportedLoadStrategy`] for the
/// `Lazy` and `FilteredJoin` strategies, or an error if a statement
/// fails.
pub fn load_resume_graphs(
    conn: &mut SqliteConnection,
    strategy: LoadStrategy,
) -> Result<Vec<ResumeGraph>, PersistenceError> {
    let mut graphs = match strategy {
        LoadStrategy::Joined => resumes_joined(conn)?,
        LoadStrategy::SelectIn => resumes_select_in(conn)?,
        LoadStrategy::Lazy => {
            return Err(PersistenceError::UnsupportedLoadStrategy {
                reason: String::from(
                    "lazy loading produces handles, not graphs; use the lazy resume load",
                ),
            });
        }
        LoadStrategy::FilteredJoin => {
            return Err(PersistenceError::UnsupportedLoadStrategy {
                reason: String::from(
                    "per-parent ranking is not defined for the reply relationship",
                ),
            });
        }
    };
    for graph in &mut graphs {
        graph
            .vacancies_replied
            .sort_by_key(|reply| reply.vacancy.id());
    }
    Ok(graphs)
}

/// Loads all vacancies with the resumes that replied to them.
///
/// The mirror of [`load_resume_graphs`], with the same strategy rules.
///
/// # Errors
///
/// Returns [`PersistenceError::UnsupportedLoadStrategy`] for the
/// `Lazy` and `FilteredJoin` strategies, or an error if a statement
/// fails.
pub fn load_vacancy_graphs(
    conn: &mut SqliteConnection,
    strategy: LoadStrategy,
) -> Result<Vec<VacancyGraph>, PersistenceError> {
    let mut graphs = match strategy {
        LoadStrategy::Joined => vacancies_joined(conn)?,
        LoadStrategy::SelectIn => vacancies_select_in(conn)?,
        LoadStrategy::Lazy | LoadStrategy::FilteredJoin => {
            return Err(PersistenceError::UnsupportedLoadStrategy {
                reason: String::from(
                    "the vacancy side of the reply relationship is eager-only (joined or select-in)",
                ),
            });
        }
    };
    for graph in &mut graphs {
        graph.resumes_replied.sort_by_key(|reply| reply.resume.id());
    }
    Ok(graphs)
}

/// Replies for one resume, ordered by vacancy id. Backs the lazy
/// handle.
pub(crate) fn vacancies_for_resume(
    conn: &mut SqliteConnection,
    resume_id: i64,
) -> Result<Vec<RepliedVacancy>, PersistenceError> {
    let rows: Vec<(VacancyRow, Option<String>)> = vacancies_replies::table
        .inner_join(vacancies::table)
        .filter(vacancies_replies::resume_id.eq(resume_id))
        .select((vacancy_columns(), vacancies_replies::cover_letter))
        .order(vacancies::id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(row, cover_letter)| RepliedVacancy {
            vacancy: vacancy_from_row(row),
            cover_letter,
        })
        .collect())
}

fn resumes_joined(conn: &mut SqliteConnection) -> Result<Vec<ResumeGraph>, PersistenceError> {
    let rows: Vec<(ResumeRow, Option<(VacancyRow, Option<String>)>)> = resumes::table
        .left_join(vacancies_replies::table.inner_join(vacancies::table))
        .select((
            resume_columns(),
            (vacancy_columns(), vacancies_replies::cover_letter).nullable(),
        ))
        .order(resumes::id.asc())
        .load(conn)?;

    regroup(rows, |(id, ..)| *id)
        .into_iter()
        .map(|(resume_row, edges)| {
            Ok(ResumeGraph {
                resume: resume_from_row(resume_row)?,
                vacancies_replied: vacancy_edges(edges),
            })
        })
        .collect()
}

fn resumes_select_in(conn: &mut SqliteConnection) -> Result<Vec<ResumeGraph>, PersistenceError> {
    let resume_rows: Vec<ResumeRow> = resumes::table
        .select(resume_columns())
        .order(resumes::id.asc())
        .load(conn)?;
    let resume_ids: Vec<i64> = resume_rows.iter().map(|(id, ..)| *id).collect();

    let edge_rows: Vec<(i64, VacancyRow, Option<String>)> = vacancies_replies::table
        .inner_join(vacancies::table)
        .filter(vacancies_replies::resume_id.eq_any(resume_ids))
        .select((
            vacancies_replies::resume_id,
            vacancy_columns(),
            vacancies_replies::cover_letter,
        ))
        .order(vacancies::id.asc())
        .load(conn)?;

    let mut graphs: Vec<ResumeGraph> = resume_rows
        .into_iter()
        .map(|row| {
            Ok(ResumeGraph {
                resume: resume_from_row(row)?,
                vacancies_replied: Vec::new(),
            })
        })
        .collect::<Result<_, PersistenceError>>()?;
    let index: std::collections::HashMap<i64, usize> = graphs
        .iter()
        .enumerate()
        .map(|(position, graph)| (graph.resume.id(), position))
        .collect();

    for (resume_id, row, cover_letter) in edge_rows {
        if let Some(&position) = index.get(&resume_id) {
            graphs[position].vacancies_replied.push(RepliedVacancy {
                vacancy: vacancy_from_row(row),
                cover_letter,
            });
        }
    }
    Ok(graphs)
}

fn vacancies_joined(conn: &mut SqliteConnection) -> Result<Vec<VacancyGraph>, PersistenceError> {
    let rows: Vec<(VacancyRow, Option<(ResumeRow, Option<String>)>)> = vacancies::table
        .left_join(vacancies_replies::table.inner_join(resumes::table))
        .select((
            vacancy_columns(),
            (resume_columns(), vacancies_replies::cover_letter).nullable(),
        ))
        .order(vacancies::id.asc())
        .load(conn)?;

    regroup(rows, |(id, ..)| *id)
        .into_iter()
        .map(|(vacancy_row, edges)| {
            Ok(VacancyGraph {
                vacancy: vacancy_from_row(vacancy_row),
                resumes_replied: resume_edges(edges)?,
            })
        })
        .collect()
}

fn vacancies_select_in(conn: &mut SqliteConnection) -> Result<Vec<VacancyGraph>, PersistenceError> {
    let vacancy_rows: Vec<VacancyRow> = vacancies::table
        .select(vacancy_columns())
        .order(vacancies::id.asc())
        .load(conn)?;
    let vacancy_ids: Vec<i64> = vacancy_rows.iter().map(|(id, ..)| *id).collect();

    let edge_rows: Vec<(i64, ResumeRow, Option<String>)> = vacancies_replies::table
        .inner_join(resumes::table)
        .filter(vacancies_replies::vacancy_id.eq_any(vacancy_ids))
        .select((
            vacancies_replies::vacancy_id,
            resume_columns(),
            vacancies_replies::cover_letter,
        ))
        .order(resumes::id.asc())
        .load(conn)?;

    let mut graphs: Vec<VacancyGraph> = vacancy_rows
        .into_iter()
        .map(|row| VacancyGraph {
            vacancy: vacancy_from_row(row),
            resumes_replied: Vec::new(),
        })
        .collect();
    let index: std::collections::HashMap<i64, usize> = graphs
        .iter()
        .enumerate()
        .map(|(position, graph)| (graph.vacancy.id(), position))
        .collect();

    for (vacancy_id, row, cover_letter) in edge_rows {
        if let Some(&position) = index.get(&vacancy_id) {
            graphs[position].resumes_replied.push(RepliedResume {
                resume: resume_from_row(row)?,
                cover_letter,
            });
        }
    }
    Ok(graphs)
}

fn vacancy_edges(edges: Vec<ReplyEdge<VacancyRow>>) -> Vec<RepliedVacancy> {
    edges
        .into_iter()
        .map(|(row, cover_letter)| RepliedVacancy {
            vacancy: vacancy_from_row(row),
            cover_letter,
        })
        .collect()
}

fn resume_edges(edges: Vec<ReplyEdge<ResumeRow>>) -> Result<Vec<RepliedResume>, PersistenceError> {
    edges
        .into_iter()
        .map(|(row, cover_letter)| {
            Ok(RepliedResume {
                resume: resume_from_row(row)?,
                cover_letter,
            })
        })
        .collect()
}
