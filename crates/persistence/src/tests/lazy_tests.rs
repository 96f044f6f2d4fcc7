// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lazy relationship handles: on-demand fetch, caching and detachment.

use vitae_domain::Workload;

use crate::PersistenceError;
use crate::tests::{data_access, seed_hiring_graph, seed_resume, seed_worker};

#[test]
fn lazy_collections_fetch_on_first_access() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let (alice, _, carol) = seed_hiring_graph(uow);

            let workers = uow.load_workers_lazy()?;
            let alice_handle = workers
                .iter()
                .find(|w| w.worker.id() == alice)
                .expect("alice present");
            let carol_handle = workers
                .iter()
                .find(|w| w.worker.id() == carol)
                .expect("carol present");

            assert!(alice_handle.resumes.loaded().is_none());
            let resumes = alice_handle.resumes.get()?;
            assert_eq!(resumes.len(), 3);
            assert!(alice_handle.resumes.loaded().is_some());

            assert!(carol_handle.resumes.get()?.is_empty());
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn parttime_collection_is_filtered_and_descending() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let (alice, _, _) = seed_hiring_graph(uow);

            let workers = uow.load_workers_lazy()?;
            let alice_handle = workers
                .iter()
                .find(|w| w.worker.id() == alice)
                .expect("alice present");

            let parttime = alice_handle.resumes_parttime.get()?;
            assert_eq!(parttime.len(), 2);
            assert!(parttime.iter().all(|r| r.workload() == Workload::Parttime));
            assert!(parttime[0].id() > parttime[1].id());
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn repeated_access_returns_the_cached_collection() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let worker_id = seed_worker(uow, "alice");
            seed_resume(uow, worker_id, "Developer", 80_000, Workload::Fulltime);

            let workers = uow.load_workers_lazy()?;
            let handle = &workers[0];
            let first = handle.resumes.get()?;
            assert_eq!(first.len(), 1);

            // A write after the first access is not observed through
            // the same handle.
            seed_resume(uow, worker_id, "Architect", 150_000, Workload::Fulltime);
            let second = handle.resumes.get()?;
            assert_eq!(second, first);

            // A fresh handle sees the new row.
            let refreshed = uow.load_workers_lazy()?;
            assert_eq!(refreshed[0].resumes.get()?.len(), 2);
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn uncached_access_after_close_is_detached() {
    let access = data_access();
    let workers = access
        .with_unit_of_work(|uow| {
            seed_hiring_graph(uow);
            uow.load_workers_lazy()
        })
        .expect("unit of work");

    match workers[0].resumes.get() {
        Err(PersistenceError::DetachedAccess { association }) => {
            assert_eq!(association, "worker.resumes");
        }
        other => panic!("Expected DetachedAccess, got {other:?}"),
    }
}

#[test]
fn cached_collections_survive_close() {
    let access = data_access();
    let workers = access
        .with_unit_of_work(|uow| {
            let (alice, _, _) = seed_hiring_graph(uow);
            let workers = uow.load_workers_lazy()?;
            let handle = workers
                .iter()
                .find(|w| w.worker.id() == alice)
                .expect("alice present");
            handle.resumes.get()?;
            Ok(workers)
        })
        .expect("unit of work");

    let alice_handle = workers
        .iter()
        .find(|w| w.resumes.loaded().is_some())
        .expect("cached handle");
    // The cache stays readable; only a fresh fetch is refused.
    assert_eq!(alice_handle.resumes.get().expect("cached").len(), 3);
    assert!(matches!(
        workers
            .iter()
            .find(|w| w.resumes.loaded().is_none())
            .expect("uncached handle")
            .resumes
            .get(),
        Err(PersistenceError::DetachedAccess { .. })
    ));
}

#[test]
fn lazy_resumes_expose_their_replies() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let worker_id = seed_worker(uow, "alice");
            let resume_id = seed_resume(uow, worker_id, "Developer", 80_000, Workload::Fulltime);
            let vacancy = vitae_domain::NewVacancy::new("Backend Engineer", Some(100_000))
                .expect("valid vacancy");
            let vacancy_id = uow.insert_vacancy(&vacancy)?;
            uow.reply_to_vacancy(resume_id, vacancy_id, Some("Pick me"))?;

            let resumes = uow.load_resumes_lazy()?;
            assert_eq!(resumes.len(), 1);
            let replied = resumes[0].vacancies_replied.get()?;
            assert_eq!(replied.len(), 1);
            assert_eq!(replied[0].vacancy.id(), vacancy_id);
            assert_eq!(replied[0].cover_letter.as_deref(), Some("Pick me"));
            Ok(())
        })
        .expect("unit of work");
}
