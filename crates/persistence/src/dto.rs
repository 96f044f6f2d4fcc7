// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transfer objects for loaded graphs.
//!
//! Mapping is pure: it consumes graphs already materialized by the
//! loader and never touches the database. Lazy handles are mapped only
//! from their caches, so converting a detached handle can never trigger
//! a fetch.

use serde::Serialize;
use vitae_domain::{Resume, Vacancy, Worker, Workload};

use crate::loader::{LazyWorker, ResumeGraph, VacancyGraph, WorkerGraph};

/// A resume, flattened for transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeDto {
    /// Resume identifier.
    pub id: i64,
    /// Resume title.
    pub title: String,
    /// Requested compensation.
    pub compensation: i64,
    /// Declared workload.
    pub workload: Workload,
    /// Owning worker's identifier.
    pub worker_id: i64,
    /// Creation timestamp, as stored.
    pub created_at: String,
    /// Last-update timestamp, as stored.
    pub updated_at: String,
}

/// A worker with its nested resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerDto {
    /// Worker identifier.
    pub id: i64,
    /// Worker login name.
    pub username: String,
    /// The loaded resume collection, in loaded order.
    pub resumes: Vec<ResumeDto>,
}

/// One row of the flat worker/resume projection. Produced per leaf
/// resume, so a worker without resumes yields no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerResumeFlatDto {
    /// Worker identifier.
    pub worker_id: i64,
    /// Worker login name.
    pub username: String,
    /// Resume identifier.
    pub resume_id: i64,
    /// Resume title.
    pub title: String,
    /// Requested compensation.
    pub compensation: i64,
    /// Declared workload.
    pub workload: Workload,
}

/// A vacancy, flattened for transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyDto {
    /// Vacancy identifier.
    pub id: i64,
    /// Vacancy title.
    pub title: String,
    /// Offered compensation, if published.
    pub compensation: Option<i64>,
}

/// One reply edge seen from the resume side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepliedVacancyDto {
    /// The replied-to vacancy.
    pub vacancy: VacancyDto,
    /// Cover letter attached to the reply, if any.
    pub cover_letter: Option<String>,
}

/// A resume with the vacancies it replied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeRepliesDto {
    /// The parent resume.
    pub resume: ResumeDto,
    /// Replied-to vacancies, in loaded order.
    pub vacancies_replied: Vec<RepliedVacancyDto>,
}

/// One reply edge seen from the vacancy side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepliedResumeDto {
    /// The replying resume.
    pub resume: ResumeDto,
    /// Cover letter attached to the reply, if any.
    pub cover_letter: Option<String>,
}

/// A vacancy with the resumes that replied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyRepliesDto {
    /// The parent vacancy.
    pub vacancy: VacancyDto,
    /// Replying resumes, in loaded order.
    pub resumes_replied: Vec<RepliedResumeDto>,
}

fn resume_dto(resume: &Resume) -> ResumeDto {
    ResumeDto {
        id: resume.id(),
        title: resume.title().to_string(),
        compensation: resume.compensation(),
        workload: resume.workload(),
        worker_id: resume.worker_id(),
        created_at: resume.created_at().to_string(),
        updated_at: resume.updated_at().to_string(),
    }
}

fn vacancy_dto(vacancy: &Vacancy) -> VacancyDto {
    VacancyDto {
        id: vacancy.id(),
        title: vacancy.title().to_string(),
        compensation: vacancy.compensation(),
    }
}

fn worker_dto(worker: &Worker, resumes: &[Resume]) -> WorkerDto {
    WorkerDto {
        id: worker.id(),
        username: worker.username().to_string(),
        resumes: resumes.iter().map(resume_dto).collect(),
    }
}

/// Maps one eagerly loaded worker graph to its nested transfer object.
#[must_use]
pub fn worker_to_dto(graph: &WorkerGraph) -> WorkerDto {
    worker_dto(&graph.worker, &graph.resumes)
}

/// Maps eagerly loaded worker graphs to nested transfer objects.
#[must_use]
pub fn workers_to_dto(graphs: &[WorkerGraph]) -> Vec<WorkerDto> {
    graphs.iter().map(worker_to_dto).collect()
}

/// Maps eagerly loaded worker graphs to the flat per-resume projection.
///
/// Parent fields repeat on every row; workers without resumes produce
/// no rows.
#[must_use]
pub fn workers_to_flat(graphs: &[WorkerGraph]) -> Vec<WorkerResumeFlatDto> {
    graphs
        .iter()
        .flat_map(|graph| {
            graph.resumes.iter().map(|resume| WorkerResumeFlatDto {
                worker_id: graph.worker.id(),
                username: graph.worker.username().to_string(),
                resume_id: resume.id(),
                title: resume.title().to_string(),
                compensation: resume.compensation(),
                workload: resume.workload(),
            })
        })
        .collect()
}

/// Maps a lazy worker to a nested transfer object, if its resume
/// collection was already accessed.
///
/// Returns `None` when the collection was never fetched. The mapping
/// itself never triggers a fetch, so it is safe on detached handles.
#[must_use]
pub fn try_worker_dto(lazy: &LazyWorker) -> Option<WorkerDto> {
    lazy.resumes
        .loaded()
        .map(|resumes| worker_dto(&lazy.worker, resumes))
}

/// Maps one resume graph to its transfer object.
#[must_use]
pub fn resume_replies_to_dto(graph: &ResumeGraph) -> ResumeRepliesDto {
    ResumeRepliesDto {
        resume: resume_dto(&graph.resume),
        vacancies_replied: graph
            .vacancies_replied
            .iter()
            .map(|reply| RepliedVacancyDto {
                vacancy: vacancy_dto(&reply.vacancy),
                cover_letter: reply.cover_letter.clone(),
            })
            .collect(),
    }
}

/// Maps one vacancy graph to its transfer object.
#[must_use]
pub fn vacancy_replies_to_dto(graph: &VacancyGraph) -> VacancyRepliesDto {
    VacancyRepliesDto {
        vacancy: vacancy_dto(&graph.vacancy),
        resumes_replied: graph
            .resumes_replied
            .iter()
            .map(|reply| RepliedResumeDto {
                resume: resume_dto(&reply.resume),
                cover_letter: reply.cover_letter.clone(),
            })
            .collect(),
    }
}
