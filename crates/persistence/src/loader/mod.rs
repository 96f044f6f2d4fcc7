// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Relationship loading.
//!
//! Four strategies materialize a parent together with its children:
//!
//! * `Lazy` - parents only; each child collection is fetched on first
//!   access through a handle bound to the open unit of work.
//! * `Joined` - one LEFT JOIN statement; childless parents survive
//!   because child predicates live in the join's ON clause.
//! * `SelectIn` - one parent statement plus one batched child statement
//!   keyed by parent ids.
//! * `FilteredJoin` - one statement over a window-ranked child set,
//!   keeping at most the first K children per parent.
//!
//! Whatever the strategy, an equivalent load request produces an
//! equivalent graph.

use std::collections::HashMap;
use std::hash::Hash;

use vitae_domain::{OrderDirection, Resume, Vacancy, Worker, Workload};

use crate::error::PersistenceError;

pub mod lazy;
pub mod replies;
pub mod worker_resumes;

pub use lazy::{LazyAssoc, LazyResume, LazyWorker};

/// How a relationship is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Children fetched on first access, inside the open unit of work.
    Lazy,
    /// Single LEFT JOIN statement.
    Joined,
    /// Parent statement plus one batched child statement.
    SelectIn,
    /// Window-ranked join keeping the first K children per parent.
    FilteredJoin,
}

/// A request to load workers together with their resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumesLoad {
    /// Strategy materializing the child collections.
    pub strategy: LoadStrategy,
    /// Restrict child collections to this workload. Allowed under
    /// every strategy.
    pub workload: Option<Workload>,
    /// Keep at most this many resumes per worker. Only expressible as
    /// a window-ranked join, so any other strategy rejects it.
    pub per_parent_limit: Option<u32>,
    /// Ordering of each child collection by resume id.
    pub direction: OrderDirection,
}

impl ResumesLoad {
    /// A plain load of the full child collections under `strategy`.
    #[must_use]
    pub const fn new(strategy: LoadStrategy) -> Self {
        Self {
            strategy,
            workload: None,
            per_parent_limit: None,
            direction: OrderDirection::Ascending,
        }
    }

    /// Checks that the requested combination is expressible.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedLoadStrategy`] if a
    /// per-parent limit is requested under a strategy that cannot
    /// express it.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        if self.per_parent_limit.is_some() && self.strategy != LoadStrategy::FilteredJoin {
            return Err(PersistenceError::UnsupportedLoadStrategy {
                reason: String::from(
                    "a per-parent limit requires the window-ranked FilteredJoin strategy",
                ),
            });
        }
        Ok(())
    }
}

/// A worker with its eagerly loaded resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerGraph {
    /// The parent worker.
    pub worker: Worker,
    /// The loaded child collection, ordered by resume id.
    pub resumes: Vec<Resume>,
}

/// A vacancy a resume replied to, with the reply's cover letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepliedVacancy {
    /// The replied-to vacancy.
    pub vacancy: Vacancy,
    /// Cover letter attached to the reply, if any.
    pub cover_letter: Option<String>,
}

/// A resume with the vacancies it replied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeGraph {
    /// The parent resume.
    pub resume: Resume,
    /// Replied-to vacancies, ordered by vacancy id.
    pub vacancies_replied: Vec<RepliedVacancy>,
}

/// A resume that replied to a vacancy, with the reply's cover letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepliedResume {
    /// The replying resume.
    pub resume: Resume,
    /// Cover letter attached to the reply, if any.
    pub cover_letter: Option<String>,
}

/// A vacancy with the resumes that replied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyGraph {
    /// The parent vacancy.
    pub vacancy: Vacancy,
    /// Replying resumes, ordered by resume id.
    pub resumes_replied: Vec<RepliedResume>,
}

/// Regroups flat `(parent, optional child)` join rows into one entry
/// per parent, preserving first-seen parent order. A parent whose only
/// rows carry `None` children ends up with an empty collection.
pub(crate) fn regroup<P, C, K>(
    rows: Vec<(P, Option<C>)>,
    key: impl Fn(&P) -> K,
) -> Vec<(P, Vec<C>)>
where
    K: Eq + Hash + Copy,
{
    let mut order: Vec<K> = Vec::new();
    let mut grouped: HashMap<K, (P, Vec<C>)> = HashMap::new();

    for (parent, child) in rows {
        let parent_key = key(&parent);
        let slot = grouped.entry(parent_key).or_insert_with(|| {
            order.push(parent_key);
            (parent, Vec::new())
        });
        if let Some(child) = child {
            slot.1.push(child);
        }
    }

    order
        .into_iter()
        .filter_map(|parent_key| grouped.remove(&parent_key))
        .collect()
}
