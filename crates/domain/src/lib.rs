// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the Vitae hiring system.
//!
//! This crate defines the core entities (workers, resumes, vacancies
//! and vacancy replies), the validated input records used for writes,
//! and the filter types consumed by the query composer. It has no
//! database dependencies; construction-time validation here fails fast,
//! while the storage-boundary constraints remain authoritative.

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

mod error;
mod inputs;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use inputs::{
    NewResume, NewVacancy, OrderDirection, ResumeFilter, ResumePatch, WorkerFilter, WorkerPatch,
};
pub use types::{Resume, TITLE_MAX_LEN, Vacancy, VacancyReply, Worker, Workload};
