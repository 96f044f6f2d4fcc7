// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Vitae hiring system.
//!
//! This crate provides typed `SQLite` persistence for workers, resumes,
//! vacancies and vacancy replies. It is built on Diesel over an r2d2
//! connection pool.
//!
//! ## Session Boundary
//!
//! All database work happens inside a unit of work obtained from a
//! [`DataAccess`]:
//!
//! - One unit of work maps to one pooled connection and one transaction.
//! - Commit on `Ok`, rollback on `Err`; partial effects never persist.
//! - Lazy relationship handles are bound to their unit of work and
//!   detach when it closes, rather than reopening connections.
//!
//! The asynchronous entry point wraps the same implementation in a
//! blocking task, so sync and async callers observe identical data
//! semantics.
//!
//! ## Module Organization
//!
//! - `queries` - read-only selects, aggregation and window ranking
//! - `mutations` - inserts, patches and deletes
//! - `loader` - relationship loading under four strategies
//! - `dto` - pure mapping of loaded graphs to transfer objects
//! - `backend` - migrations, PRAGMA setup and rowid retrieval
//!
//! ## Testing Philosophy
//!
//! - Tests run against unique named in-memory databases with shared
//!   cache, so the pool's connections all see one store and tests stay
//!   isolated from each other
//! - Foreign key enforcement is verified at startup, never assumed

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use vitae_domain::{
    NewResume, NewVacancy, Resume, ResumeFilter, ResumePatch, Vacancy, VacancyReply, Worker,
    WorkerFilter, WorkerPatch, Workload,
};

mod backend;
mod data_models;
mod diesel_schema;
pub mod dto;
mod error;
pub mod loader;
mod mutations;
mod queries;
mod session;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use loader::{
    LazyAssoc, LazyResume, LazyWorker, LoadStrategy, RepliedResume, RepliedVacancy, ResumeGraph,
    ResumesLoad, VacancyGraph, WorkerGraph,
};
pub use queries::RankingSpec;
pub use session::{DataAccess, PoolConfig, UnitOfWork};

/// The operation surface of a unit of work.
///
/// Every method runs on the unit of work's single connection, inside
/// its transaction, and observes earlier uncommitted writes made
/// through the same unit of work.
impl UnitOfWork {
    /// Inserts a worker and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_worker(&self, username: &str) -> Result<i64, PersistenceError> {
        self.run(|conn| mutations::workers::insert_worker(conn, username))
    }

    /// Inserts a batch of workers, returning their ids in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn insert_workers(&self, usernames: &[&str]) -> Result<Vec<i64>, PersistenceError> {
        self.run(|conn| mutations::workers::insert_workers(conn, usernames))
    }

    /// Selects workers matching `filter`. Zero matches is an empty
    /// vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidQuery`] for an unknown order
    /// key, or an error if the query fails.
    pub fn select_workers(&self, filter: &WorkerFilter) -> Result<Vec<Worker>, PersistenceError> {
        self.run(|conn| queries::workers::select_workers(conn, filter))
    }

    /// Fetches one worker by id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the worker is absent.
    pub fn get_worker(&self, worker_id: i64) -> Result<Worker, PersistenceError> {
        self.run(|conn| queries::workers::get_worker(conn, worker_id))
    }

    /// Applies a partial update to a worker and returns the updated
    /// row.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the worker is absent,
    /// or an error if the update fails.
    pub fn update_worker(
        &self,
        worker_id: i64,
        patch: &WorkerPatch,
    ) -> Result<Worker, PersistenceError> {
        self.run(|conn| mutations::workers::update_worker(conn, worker_id, patch))
    }

    /// Deletes a worker; its resumes and their replies cascade.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the worker is absent,
    /// or an error if the delete fails.
    pub fn delete_worker(&self, worker_id: i64) -> Result<(), PersistenceError> {
        self.run(|conn| mutations::workers::delete_worker(conn, worker_id))
    }

    /// Inserts a resume and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ConstraintViolation`] if a storage
    /// constraint rejects the row, or an error if the insert fails.
    pub fn insert_resume(&self, resume: &NewResume) -> Result<i64, PersistenceError> {
        self.run(|conn| mutations::resumes::insert_resume(conn, resume))
    }

    /// Inserts a batch of resumes, returning their ids in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; the unit of work rolls the
    /// whole batch back.
    pub fn insert_resumes(&self, batch: &[NewResume]) -> Result<Vec<i64>, PersistenceError> {
        self.run(|conn| mutations::resumes::insert_resumes(conn, batch))
    }

    /// Selects resumes matching `filter`. Zero matches is an empty
    /// vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidQuery`] for an unknown order
    /// key, or an error if the query fails.
    pub fn select_resumes(&self, filter: &ResumeFilter) -> Result<Vec<Resume>, PersistenceError> {
        self.run(|conn| queries::resumes::select_resumes(conn, filter))
    }

    /// Fetches one resume by id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the resume is absent.
    pub fn get_resume(&self, resume_id: i64) -> Result<Resume, PersistenceError> {
        self.run(|conn| queries::resumes::get_resume(conn, resume_id))
    }

    /// Applies a partial update to a resume, reassigning its
    /// `updated_at` timestamp, and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the resume is absent,
    /// [`PersistenceError::ConstraintViolation`] if the patch breaks a
    /// storage constraint, or an error if the update fails.
    pub fn update_resume(
        &self,
        resume_id: i64,
        patch: &ResumePatch,
    ) -> Result<Resume, PersistenceError> {
        self.run(|conn| mutations::resumes::update_resume(conn, resume_id, patch))
    }

    /// Deletes a resume; its replies cascade, the owning worker stays.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the resume is absent,
    /// or an error if the delete fails.
    pub fn delete_resume(&self, resume_id: i64) -> Result<(), PersistenceError> {
        self.run(|conn| mutations::resumes::delete_resume(conn, resume_id))
    }

    /// Counts all resumes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_resumes(&self) -> Result<usize, PersistenceError> {
        self.run(queries::resumes::count_resumes)
    }

    /// Average compensation per workload, over workloads that have at
    /// least one resume.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn avg_compensation_by_workload(&self) -> Result<Vec<(Workload, f64)>, PersistenceError> {
        self.run(queries::aggregates::avg_compensation_by_workload)
    }

    /// Ranks resumes within a partition via a window-function CTE and
    /// returns each resume with its rank.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidQuery`] for an unknown
    /// partition or order key, or an error if the query fails.
    pub fn ranked_resumes(
        &self,
        spec: &RankingSpec,
    ) -> Result<Vec<(Resume, i64)>, PersistenceError> {
        self.run(|conn| queries::ranking::ranked_resumes(conn, spec))
    }

    /// Inserts a vacancy and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_vacancy(&self, vacancy: &NewVacancy) -> Result<i64, PersistenceError> {
        self.run(|conn| mutations::vacancies::insert_vacancy(conn, vacancy))
    }

    /// Selects all vacancies, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn select_vacancies(&self) -> Result<Vec<Vacancy>, PersistenceError> {
        self.run(queries::vacancies::select_vacancies)
    }

    /// Fetches one vacancy by id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the vacancy is absent.
    pub fn get_vacancy(&self, vacancy_id: i64) -> Result<Vacancy, PersistenceError> {
        self.run(|conn| queries::vacancies::get_vacancy(conn, vacancy_id))
    }

    /// Deletes a vacancy; replies to it cascade.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the vacancy is absent,
    /// or an error if the delete fails.
    pub fn delete_vacancy(&self, vacancy_id: i64) -> Result<(), PersistenceError> {
        self.run(|conn| mutations::vacancies::delete_vacancy(conn, vacancy_id))
    }

    /// Records a reply from a resume to a vacancy, with an optional
    /// cover letter, and returns the created reply.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ConstraintViolation`] for a
    /// duplicate reply or a dangling id, or an error if the insert
    /// fails.
    pub fn reply_to_vacancy(
        &self,
        resume_id: i64,
        vacancy_id: i64,
        cover_letter: Option<&str>,
    ) -> Result<VacancyReply, PersistenceError> {
        self.run(|conn| {
            mutations::vacancies::reply_to_vacancy(conn, resume_id, vacancy_id, cover_letter)
        })
    }

    /// Loads all workers with their resumes under an eager strategy.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedLoadStrategy`] for the
    /// `Lazy` strategy (use [`Self::load_workers_lazy`]) or an
    /// inexpressible request, or an error if a statement fails.
    pub fn load_workers_with_resumes(
        &self,
        load: &ResumesLoad,
    ) -> Result<Vec<WorkerGraph>, PersistenceError> {
        self.run(|conn| loader::worker_resumes::load_worker_graphs(conn, load))
    }

    /// Loads all workers as lazy handles bound to this unit of work.
    ///
    /// Each handle's child collections fetch on first access and fail
    /// with [`PersistenceError::DetachedAccess`] once the unit of work
    /// has closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker select fails.
    pub fn load_workers_lazy(&self) -> Result<Vec<LazyWorker>, PersistenceError> {
        let workers = self.select_workers(&WorkerFilter::default())?;
        Ok(loader::lazy::lazy_workers(&self.ctx(), workers))
    }

    /// Loads all resumes with the vacancies they replied to under an
    /// eager strategy.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedLoadStrategy`] for the
    /// `Lazy` and `FilteredJoin` strategies, or an error if a statement
    /// fails.
    pub fn load_resumes_with_replies(
        &self,
        strategy: LoadStrategy,
    ) -> Result<Vec<ResumeGraph>, PersistenceError> {
        self.run(|conn| loader::replies::load_resume_graphs(conn, strategy))
    }

    /// Loads all resumes as lazy handles bound to this unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error if the resume select fails.
    pub fn load_resumes_lazy(&self) -> Result<Vec<LazyResume>, PersistenceError> {
        let loaded = self.select_resumes(&ResumeFilter::default())?;
        Ok(loader::lazy::lazy_resumes(&self.ctx(), loaded))
    }

    /// Loads all vacancies with the resumes that replied to them under
    /// an eager strategy.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedLoadStrategy`] for the
    /// `Lazy` and `FilteredJoin` strategies, or an error if a statement
    /// fails.
    pub fn load_vacancies_with_replies(
        &self,
        strategy: LoadStrategy,
    ) -> Result<Vec<VacancyGraph>, PersistenceError> {
        self.run(|conn| loader::replies::load_vacancy_graphs(conn, strategy))
    }
}
