// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input records for writes and query composition.
//!
//! Write inputs (`NewResume`, `NewVacancy`) validate their invariants in
//! the constructor so an invalid record cannot be constructed at all. The
//! CHECK constraints at the storage boundary remain authoritative; the
//! constructors only fail fast before a statement is issued.
//!
//! Filter structs are plain parameter bags. Their `order_by` keys are
//! caller-supplied strings and are validated by the query composer
//! against a closed per-entity column list.

use crate::error::DomainError;
use crate::types::{TITLE_MAX_LEN, Workload};
use serde::{Deserialize, Serialize};

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::InvalidTitle(String::from("title is empty")));
    }
    if title.len() > TITLE_MAX_LEN {
        return Err(DomainError::InvalidTitle(format!(
            "title length {} exceeds bound {TITLE_MAX_LEN}",
            title.len()
        )));
    }
    Ok(())
}

/// Input record for inserting a resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResume {
    title: String,
    compensation: i64,
    workload: Workload,
    worker_id: i64,
}

impl NewResume {
    /// Validates and constructs a new resume input.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty or overlong, or if the
    /// compensation is not strictly positive.
    pub fn new(
        title: &str,
        compensation: i64,
        workload: Workload,
        worker_id: i64,
    ) -> Result<Self, DomainError> {
        validate_title(title)?;
        if compensation <= 0 {
            return Err(DomainError::NonPositiveCompensation(compensation));
        }
        Ok(Self {
            title: title.to_string(),
            compensation,
            workload,
            worker_id,
        })
    }

    /// The resume title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The requested compensation.
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
}

/// Input record for inserting a vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVacancy {
    title: String,
    compensation: Option<i64>,
}

impl NewVacancy {
    /// Validates and constructs a new vacancy input.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty or overlong, or if a
    /// published compensation is not strictly positive.
    pub fn new(title: &str, compensation: Option<i64>) -> Result<Self, DomainError> {
        validate_title(title)?;
        if let Some(value) = compensation
            && value <= 0
        {
            return Err(DomainError::NonPositiveCompensation(value));
        }
        Ok(Self {
            title: title.to_string(),
            compensation,
        })
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

/// Partial update for a worker. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPatch {
    /// New username, if it changes.
    pub username: Option<String>,
}

/// Partial update for a resume. `None` fields are left untouched.
///
/// Any applied patch reassigns the resume's `updated_at` timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumePatch {
    /// New title, if it changes.
    pub title: Option<String>,
    /// New compensation, if it changes.
    pub compensation: Option<i64>,
    /// New workload, if it changes.
    pub workload: Option<Workload>,
}

/// Direction applied to a validated order key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

/// Filter and ordering parameters for worker selects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerFilter {
    /// Exact username match.
    pub username_eq: Option<String>,
    /// Order key name, validated against the worker column list.
    pub order_by: Option<String>,
    /// Direction for `order_by`.
    pub direction: OrderDirection,
}

/// Filter and ordering parameters for resume selects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFilter {
    /// Substring match on the indexed title column.
    pub title_contains: Option<String>,
    /// Exact workload match.
    pub workload: Option<Workload>,
    /// Lower inclusive bound on compensation.
    pub min_compensation: Option<i64>,
    /// Restrict to resumes owned by this worker.
    pub worker_id: Option<i64>,
    /// Order key name, validated against the resume column list.
    pub order_by: Option<String>,
    /// Direction for `order_by`.
    pub direction: OrderDirection,
    /// Maximum number of rows returned.
    pub limit: Option<i64>,
}
