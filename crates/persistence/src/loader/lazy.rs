// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lazy relationship handles.
//!
//! A [`LazyAssoc`] defers its child fetch until first access, runs it
//! on the owning unit of work's connection, and caches the result for
//! the handle's lifetime. Once the unit of work closes the handle is
//! detached: uncached access fails with
//! [`PersistenceError::DetachedAccess`] instead of silently reopening a
//! connection, while an already-cached collection stays readable
//! through [`LazyAssoc::loaded`].

use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use diesel::SqliteConnection;
use diesel::prelude::*;
use vitae_domain::{Resume, Worker, Workload};

use crate::data_models::{ResumeRow, resume_columns, resume_from_row};
use crate::diesel_schema::resumes;
use crate::error::PersistenceError;
use crate::loader::{RepliedVacancy, replies};
use crate::session::SessionCtx;

type FetchFn<T> = Box<dyn Fn(&mut SqliteConnection) -> Result<Vec<T>, PersistenceError> + Send + Sync>;

/// A child collection fetched on first access.
pub struct LazyAssoc<T> {
    ctx: Arc<SessionCtx>,
    association: &'static str,
    cache: OnceLock<Vec<T>>,
    fetch: FetchFn<T>,
}

impl<T: Clone> LazyAssoc<T> {
    pub(crate) fn new(ctx: Arc<SessionCtx>, association: &'static str, fetch: FetchFn<T>) -> Self {
        Self {
            ctx,
            association,
            cache: OnceLock::new(),
            fetch,
        }
    }

    /// Returns the child collection, fetching it on first access.
    ///
    /// Later accesses return the cached collection without touching the
    /// database, so writes committed after the first access are not
    /// observed through this handle.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::DetachedAccess`] if the collection
    /// was never fetched and the owning unit of work has closed, or an
    /// error if the fetch fails.
    pub fn get(&self) -> Result<Vec<T>, PersistenceError> {
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }
        let fetched = self
            .ctx
            .with_conn(self.association, |conn| (self.fetch)(conn))?;
        // A concurrent first access may have won the race; either value
        // came from the same statement shape on the same connection.
        let _ = self.cache.set(fetched.clone());
        Ok(fetched)
    }

    /// The cached collection, if this handle was ever accessed. Never
    /// touches the database.
    #[must_use]
    pub fn loaded(&self) -> Option<&[T]> {
        self.cache.get().map(Vec::as_slice)
    }
}

impl<T> fmt::Debug for LazyAssoc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyAssoc")
            .field("association", &self.association)
            .field("loaded", &self.cache.get().is_some())
            .finish_non_exhaustive()
    }
}

/// A worker whose child collections load on first access.
#[derive(Debug)]
pub struct LazyWorker {
    /// The parent worker.
    pub worker: Worker,
    /// All resumes, ordered by resume id ascending.
    pub resumes: LazyAssoc<Resume>,
    /// Part-time resumes only, ordered by resume id descending.
    pub resumes_parttime: LazyAssoc<Resume>,
}

/// A resume whose reply collection loads on first access.
#[derive(Debug)]
pub struct LazyResume {
    /// The parent resume.
    pub resume: Resume,
    /// Replied-to vacancies, ordered by vacancy id.
    pub vacancies_replied: LazyAssoc<RepliedVacancy>,
}

/// Wraps loaded workers in lazy handles bound to `ctx`.
pub(crate) fn lazy_workers(ctx: &Arc<SessionCtx>, workers: Vec<Worker>) -> Vec<LazyWorker> {
    workers
        .into_iter()
        .map(|worker| {
            let worker_id = worker.id();
            LazyWorker {
                worker,
                resumes: LazyAssoc::new(
                    Arc::clone(ctx),
                    "worker.resumes",
                    Box::new(move |conn| fetch_worker_resumes(conn, worker_id, None)),
                ),
                resumes_parttime: LazyAssoc::new(
                    Arc::clone(ctx),
                    "worker.resumes_parttime",
                    Box::new(move |conn| {
                        fetch_worker_resumes(conn, worker_id, Some(Workload::Parttime))
                    }),
                ),
            }
        })
        .collect()
}

/// Wraps loaded resumes in lazy handles bound to `ctx`.
pub(crate) fn lazy_resumes(ctx: &Arc<SessionCtx>, loaded: Vec<Resume>) -> Vec<LazyResume> {
    loaded
        .into_iter()
        .map(|resume| {
            let resume_id = resume.id();
            LazyResume {
                resume,
                vacancies_replied: LazyAssoc::new(
                    Arc::clone(ctx),
                    "resume.vacancies_replied",
                    Box::new(move |conn| replies::vacancies_for_resume(conn, resume_id)),
                ),
            }
        })
        .collect()
}

fn fetch_worker_resumes(
    conn: &mut SqliteConnection,
    worker_id: i64,
    workload: Option<Workload>,
) -> Result<Vec<Resume>, PersistenceError> {
    let rows: Vec<ResumeRow> = if let Some(workload) = workload {
        resumes::table
            .select(resume_columns())
            .filter(resumes::worker_id.eq(worker_id))
            .filter(resumes::workload.eq(workload.as_str()))
            .order(resumes::id.desc())
            .load(conn)?
    } else {
        resumes::table
            .select(resume_columns())
            .filter(resumes::worker_id.eq(worker_id))
            .order(resumes::id.asc())
            .load(conn)?
    };
    rows.into_iter().map(resume_from_row).collect()
}
