// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum length of a resume or vacancy title, matching the
/// `VARCHAR(256)` column bound.
pub const TITLE_MAX_LEN: usize = 256;

/// Working-hours commitment declared on a resume.
///
/// This is the closed variant set stored in the `workload` column. The
/// string mapping below is the single authoritative translation used at
/// the storage boundary; no reflection or runtime registration exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Workload {
    /// Part-time availability.
    Parttime,
    /// Full-time availability.
    Fulltime,
}

impl Workload {
    /// Converts this workload to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Parttime => "parttime",
            Self::Fulltime => "fulltime",
        }
    }
}

impl FromStr for Workload {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parttime" => Ok(Self::Parttime),
            "fulltime" => Ok(Self::Fulltime),
            _ => Err(DomainError::InvalidWorkload(s.to_string())),
        }
    }
}

impl std::fmt::Display for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A worker who owns zero or more resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    worker_id: i64,
    username: String,
}

impl Worker {
    /// Constructs a worker from a persisted row.
    #[must_use]
    pub const fn with_id(worker_id: i64, username: String) -> Self {
        Self {
            worker_id,
            username,
        }
    }

    /// The canonical numeric identifier assigned by the database.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.worker_id
    }

    /// The worker's username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// A resume owned by exactly one worker for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    resume_id: i64,
    title: String,
    compensation: i64,
    workload: Workload,
    worker_id: i64,
    created_at: String,
    updated_at: String,
}

impl Resume {
    /// Constructs a resume from a persisted row.
    #[must_use]
    pub const fn with_id(
        resume_id: i64,
        title: String,
        compensation: i64,
        workload: Workload,
        worker_id: i64,
        created_at: String,
        updated_at: String,
    ) -> Self {
        Self {
            resume_id,
            title,
            compensation,
            workload,
            worker_id,
            created_at,
            updated_at,
        }
    }

    /// The canonical numeric identifier assigned by the database.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.resume_id
    }

    /// The resume title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The requested compensation. Always strictly positive.
    #[must_use]
    pub const fn compensation(&self) -> i64 {
        self.compensation
    }

    /// The declared workload.
    #[must_use]
    pub const fn workload(&self) -> Workload {
        self.workload
    }

    /// The owning worker's identifier.
    #[must_use]
    pub const fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// Server-assigned UTC insertion timestamp (ISO 8601 text).
    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Server-assigned UTC timestamp of the most recent update.
    #[must_use]
    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }
}

/// A vacancy that receives replies from resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    vacancy_id: i64,
    title: String,
    compensation: Option<i64>,
}

impl Vacancy {
    /// Constructs a vacancy from a persisted row.
    #[must_use]
    pub const fn with_id(vacancy_id: i64, title: String, compensation: Option<i64>) -> Self {
        Self {
            vacancy_id,
            title,
            compensation,
        }
    }

    /// The canonical numeric identifier assigned by the database.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.vacancy_id
    }

    /// The vacancy title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The offered compensation, if published.
    #[must_use]
    pub const fn compensation(&self) -> Option<i64> {
        self.compensation
    }
}

/// A reply linking one resume to one vacancy.
///
/// Pure association row with a composite key. It is created only as a
/// side effect of replying to a vacancy and cascade-deletes when either
/// parent is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyReply {
    resume_id: i64,
    vacancy_id: i64,
    cover_letter: Option<String>,
}

impl VacancyReply {
    /// Constructs a reply from a persisted row.
    #[must_use]
    pub const fn new(resume_id: i64, vacancy_id: i64, cover_letter: Option<String>) -> Self {
        Self {
            resume_id,
            vacancy_id,
            cover_letter,
        }
    }

    /// The replying resume's identifier.
    #[must_use]
    pub const fn resume_id(&self) -> i64 {
        self.resume_id
    }

    /// The vacancy identifier.
    #[must_use]
    pub const fn vacancy_id(&self) -> i64 {
        self.vacancy_id
    }

    /// The optional cover letter attached to the reply.
    #[must_use]
    pub fn cover_letter(&self) -> Option<&str> {
        self.cover_letter.as_deref()
    }
}
