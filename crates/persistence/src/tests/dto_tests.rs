// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transfer-object mapping: pure, shape-faithful, fetch-free.

use vitae_domain::{NewVacancy, Workload};

use crate::tests::{data_access, seed_hiring_graph, seed_resume, seed_worker};
use crate::{LoadStrategy, ResumesLoad, dto};

#[test]
fn nested_dto_mirrors_the_loaded_graph() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let (alice, _, carol) = seed_hiring_graph(uow);

            let graphs = uow.load_workers_with_resumes(&ResumesLoad::new(LoadStrategy::Joined))?;
            let dtos = dto::workers_to_dto(&graphs);

            assert_eq!(dtos.len(), 3);
            let alice_dto = dtos.iter().find(|d| d.id == alice).expect("alice");
            assert_eq!(alice_dto.username, "alice");
            assert_eq!(alice_dto.resumes.len(), 3);

            let carol_dto = dtos.iter().find(|d| d.id == carol).expect("carol");
            assert!(carol_dto.resumes.is_empty());
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn flat_dto_emits_one_row_per_resume_and_drops_childless_workers() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let (alice, bob, carol) = seed_hiring_graph(uow);

            let graphs = uow.load_workers_with_resumes(&ResumesLoad::new(LoadStrategy::SelectIn))?;
            let rows = dto::workers_to_flat(&graphs);

            assert_eq!(rows.len(), 4);
            assert_eq!(rows.iter().filter(|r| r.worker_id == alice).count(), 3);
            assert_eq!(rows.iter().filter(|r| r.worker_id == bob).count(), 1);
            assert!(rows.iter().all(|r| r.worker_id != carol));

            // Parent fields repeat on every row.
            assert!(
                rows.iter()
                    .filter(|r| r.worker_id == alice)
                    .all(|r| r.username == "alice")
            );
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn nested_dto_serializes_with_stable_field_names() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let worker_id = seed_worker(uow, "alice");
            seed_resume(uow, worker_id, "Developer", 80_000, Workload::Fulltime);

            let graphs = uow.load_workers_with_resumes(&ResumesLoad::new(LoadStrategy::Joined))?;
            let value = serde_json::to_value(dto::workers_to_dto(&graphs))
                .expect("serializable");

            assert_eq!(value[0]["username"], "alice");
            assert_eq!(value[0]["resumes"][0]["title"], "Developer");
            assert_eq!(value[0]["resumes"][0]["compensation"], 80_000);
            assert_eq!(value[0]["resumes"][0]["workload"], "Fulltime");
            Ok(())
        })
        .expect("unit of work");
}

#[test]
fn try_worker_dto_maps_only_accessed_handles() {
    let access = data_access();
    let workers = access
        .with_unit_of_work(|uow| {
            let (alice, _, _) = seed_hiring_graph(uow);
            let workers = uow.load_workers_lazy()?;

            let alice_handle = workers
                .iter()
                .find(|w| w.worker.id() == alice)
                .expect("alice present");
            assert!(dto::try_worker_dto(alice_handle).is_none());

            alice_handle.resumes.get()?;
            Ok(workers)
        })
        .expect("unit of work");

    // Mapping never fetches, so it works on detached handles too: the
    // accessed handle maps from its cache, the others map to None.
    let mapped: Vec<_> = workers.iter().map(dto::try_worker_dto).collect();
    assert_eq!(mapped.iter().filter(|d| d.is_some()).count(), 1);
    let alice_dto = mapped
        .into_iter()
        .flatten()
        .next()
        .expect("one mapped worker");
    assert_eq!(alice_dto.username, "alice");
    assert_eq!(alice_dto.resumes.len(), 3);
}

#[test]
fn reply_graphs_map_to_their_dto_shapes() {
    let access = data_access();
    access
        .with_unit_of_work(|uow| {
            let worker_id = seed_worker(uow, "alice");
            let resume_id = seed_resume(uow, worker_id, "Developer", 80_000, Workload::Fulltime);
            let vacancy_id = uow
                .insert_vacancy(&NewVacancy::new("Backend Engineer", Some(100_000)).expect("valid"))?;
            uow.reply_to_vacancy(resume_id, vacancy_id, Some("Dear team"))?;

            let resume_graphs = uow.load_resumes_with_replies(LoadStrategy::Joined)?;
            let resume_dto = dto::resume_replies_to_dto(&resume_graphs[0]);
            assert_eq!(resume_dto.resume.id, resume_id);
            assert_eq!(resume_dto.vacancies_replied.len(), 1);
            assert_eq!(
                resume_dto.vacancies_replied[0].cover_letter.as_deref(),
                Some("Dear team")
            );

            let vacancy_graphs = uow.load_vacancies_with_replies(LoadStrategy::Joined)?;
            let vacancy_dto = dto::vacancy_replies_to_dto(&vacancy_graphs[0]);
            assert_eq!(vacancy_dto.vacancy.compensation, Some(100_000));
            assert_eq!(vacancy_dto.resumes_replied[0].resume.id, resume_id);
            Ok(())
        })
        .expect("unit of work");
}
