// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Many-to-many reply loading across both directions.

use vitae_domain::{NewVacancy, Workload};

use crate::tests::{data_access, seed_resume, seed_worker};
use crate::{LoadStrategy, PersistenceError, UnitOfWork};

/// Two resumes and two vacancies with three reply edges.
///
/// Returns `(resume_ids, vacancy_ids)`; resume 0 replies to both
/// vacancies (with a letter on the first), resume 1 replies only to
/// vacancy 1.
fn seed_replies(uow: &UnitOfWork) -> Result<([i64; 2], [i64; 2]), PersistenceError> {
    let worker_id = seed_worker(uow, "alice");
    let first_resume = seed_resume(uow, worker_id, "Developer", 80_000, Workload::Fulltime);
    let second_resume = seed_resume(uow, worker_id, "Consultant", 60_000, Workload::Parttime);

    let first_vacancy =
        uow.insert_vacancy(&NewVacancy::new("Backend Engineer", Some(100_000)).expect("valid"))?;
    let second_vacancy =
        uow.insert_vacancy(&NewVacancy::new("Platform Engineer", None).expect("valid"))?;

    uow.reply_to_vacancy(first_resume, first_vacancy, Some("Dear team"))?;
    uow.reply_to_vacancy(first_resume, second_vacancy, None)?;
    uow.reply_to_vacancy(second_resume, second_vacancy, Some("Hello"))?;

    Ok((
        [first_resume, second_resume],
        [first_vacancy, second_vacancy],
    ))
}

#[test]
fn resume_side_loads_each_reply_exactly_once() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let (resumes, vacancies) = seed_replies(uow)?;

            for strategy in [LoadStrategy::Joined, LoadStrategy::SelectIn] {
                let graphs = uow.load_resumes_with_replies(strategy)?;
                assert_eq!(graphs.len(), 2);

                let first = &graphs[0];
                assert_eq!(first.resume.id(), resumes[0]);
                let replied: Vec<i64> = first
                    .vacancies_replied
                    .iter()
                    .map(|r| r.vacancy.id())
                    .collect();
                assert_eq!(replied, vacancies.to_vec());
                assert_eq!(
                    first.vacancies_replied[0].cover_letter.as_deref(),
                    Some("Dear team")
                );
                assert_eq!(first.vacancies_replied[1].cover_letter, None);

                let second = &graphs[1];
                assert_eq!(second.vacancies_replied.len(), 1);
                assert_eq!(second.vacancies_replied[0].vacancy.id(), vacancies[1]);
            }
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn vacancy_side_mirrors_the_same_edges() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let (resumes, vacancies) = seed_replies(uow)?;

            for strategy in [LoadStrategy::Joined, LoadStrategy::SelectIn] {
                let graphs = uow.load_vacancies_with_replies(strategy)?;
                assert_eq!(graphs.len(), 2);

                let first = &graphs[0];
                assert_eq!(first.vacancy.id(), vacancies[0]);
                assert_eq!(first.resumes_replied.len(), 1);
                assert_eq!(first.resumes_replied[0].resume.id(), resumes[0]);

                let second = &graphs[1];
                let repliers: Vec<i64> = second
                    .resumes_replied
                    .iter()
                    .map(|r| r.resume.id())
                    .collect();
                assert_eq!(repliers, resumes.to_vec());
            }
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn joined_and_select_in_agree_on_replies() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            seed_replies(uow)?;

            assert_eq!(
                uow.load_resumes_with_replies(LoadStrategy::Joined)?,
                uow.load_resumes_with_replies(LoadStrategy::SelectIn)?
            );
            assert_eq!(
                uow.load_vacancies_with_replies(LoadStrategy::Joined)?,
                uow.load_vacancies_with_replies(LoadStrategy::SelectIn)?
            );
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn parents_without_edges_keep_empty_collections() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let worker_id = seed_worker(uow, "alice");
            seed_resume(uow, worker_id, "Unsent", 40_000, Workload::Parttime);
            uow.insert_vacancy(&NewVacancy::new("Unanswered", None).expect("valid"))?;

            let resumes = uow.load_resumes_with_replies(LoadStrategy::Joined)?;
            assert_eq!(resumes.len(), 1);
            assert!(resumes[0].vacancies_replied.is_empty());

            let vacancies = uow.load_vacancies_with_replies(LoadStrategy::Joined)?;
            assert_eq!(vacancies.len(), 1);
            assert!(vacancies[0].resumes_replied.is_empty());
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn reply_returns_the_created_edge() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let worker_id = seed_worker(uow, "alice");
            let resume_id = seed_resume(uow, worker_id, "Developer", 80_000, Workload::Fulltime);
            let vacancy_id =
                uow.insert_vacancy(&NewVacancy::new("Backend Engineer", None).expect("valid"))?;

            let reply = uow.reply_to_vacancy(resume_id, vacancy_id, Some("Dear team"))?;
            assert_eq!(reply.resume_id(), resume_id);
            assert_eq!(reply.vacancy_id(), vacancy_id);
            assert_eq!(reply.cover_letter(), Some("Dear team"));
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn duplicate_reply_is_a_constraint_violation() {
    let access = data_access();
    let result = access.with_unit_of_work(|uow| {
        let worker_id = seed_worker(uow, "alice");
        let resume_id = seed_resume(uow, worker_id, "Developer", 80_000, Workload::Fulltime);
        let vacancy_id =
            uow.insert_vacancy(&NewVacancy::new("Backend Engineer", None).expect("valid"))?;

        uow.reply_to_vacancy(resume_id, vacancy_id, None)?;
        uow.reply_to_vacancy(resume_id, vacancy_id, Some("Again"))
    });

    assert!(matches!(
        result,
        Err(PersistenceError::ConstraintViolation { .. })
    ));
}

#[test]
fn reply_with_dangling_ids_is_a_constraint_violation() {
    let access = data_access();
    let result = access.with_unit_of_work(|uow| uow.reply_to_vacancy(1, 1, None));

    match result {
        Err(PersistenceError::ConstraintViolation { constraint, .. }) => {
            assert_eq!(constraint, "foreign key");
        }
        other => panic!("Expected ConstraintViolation, got {other:?}"),
    }
}

#[test]
fn reply_loading_rejects_inexpressible_strategies() {
    let access = data_access();
    for strategy in [LoadStrategy::Lazy, LoadStrategy::FilteredJoin] {
        let on_resumes = access.with_unit_of_work(|uow| uow.load_resumes_with_replies(strategy));
        assert!(matches!(
            on_resumes,
            Err(PersistenceError::UnsupportedLoadStrategy { .. })
        ));

        let on_vacancies =
            access.with_unit_of_work(|uow| uow.load_vacancies_with_replies(strategy));
        assert!(matches!(
            on_vacancies,
            Err(PersistenceError::UnsupportedLoadStrategy { .. })
        ));
    }
}
