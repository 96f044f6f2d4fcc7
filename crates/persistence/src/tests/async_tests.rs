// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Asynchronous entry point: same data semantics, blocking-thread
//! execution.

use vitae_domain::{NewResume, ResumeFilter, WorkerFilter, Workload};

use crate::PersistenceError;
use crate::tests::data_access;

#[tokio::test]
async fn async_unit_of_work_commits_like_the_sync_one() {
    let access = data_access();

    access
        .with_unit_of_work_async(|uow| {
            let worker_id = uow.insert_worker("alice")?;
            let resume = NewResume::new("Developer", 80_000, Workload::Fulltime, worker_id)
                .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
            uow.insert_resume(&resume)?;
            Ok(())
        })
        .await
        .expect("async unit of work");

    // Visible to a plain synchronous unit of work afterwards.
    access
        .with_unit_of_work(|uow| {
            assert_eq!(uow.select_workers(&WorkerFilter::default())?.len(), 1);
            assert_eq!(uow.select_resumes(&ResumeFilter::default())?.len(), 1);
            Ok(())
        })
        .expect("unit of work");
}

#[tokio::test]
async fn async_unit_of_work_rolls_back_on_error() {
    let access = data_access();

    let result: Result<(), PersistenceError> = access
        .with_unit_of_work_async(|uow| {
            uow.insert_worker("alice")?;
            Err(PersistenceError::QueryFailed(String::from("boom")))
        })
        .await;
    assert!(result.is_err());

    access
        .with_unit_of_work_async(|uow| {
            assert!(uow.select_workers(&WorkerFilter::default())?.is_empty());
            Ok(())
        })
        .await
        .expect("async unit of work");
}

#[tokio::test]
async fn statement_order_is_preserved_within_an_async_unit_of_work() {
    let access = data_access();

    let usernames = access
        .with_unit_of_work_async(|uow| {
            uow.insert_workers(&["first", "second", "third"])?;
            Ok(uow
                .select_workers(&WorkerFilter::default())?
                .into_iter()
                .map(|w| w.username().to_string())
                .collect::<Vec<_>>())
        })
        .await
        .expect("async unit of work");

    assert_eq!(usernames, vec!["first", "second", "third"]);
}
