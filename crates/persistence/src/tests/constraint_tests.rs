// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage-boundary constraint enforcement and transactional rollback.

use diesel::prelude::*;
use vitae_domain::{NewResume, ResumeFilter, WorkerFilter, Workload};

use crate::tests::{data_access, seed_worker};
use crate::{PersistenceError, diesel_schema};

#[test]
fn check_constraint_rejects_non_positive_compensation() {
    let access = data_access();

    // The typed input refuses to construct the row, so drive the raw
    // statement straight at the CHECK constraint.
    let result = access.with_unit_of_work(|uow| {
        let worker_id = seed_worker(uow, "alice");
        uow.run(|conn| {
            diesel::insert_into(diesel_schema::resumes::table)
                .values((
                    diesel_schema::resumes::title.eq("Underpaid"),
                    diesel_schema::resumes::compensation.eq(-100),
                    diesel_schema::resumes::workload.eq("fulltime"),
                    diesel_schema::resumes::worker_id.eq(worker_id),
                ))
                .execute(conn)?;
            Ok(())
        })
    });

    match result {
        Err(PersistenceError::ConstraintViolation { constraint, .. }) => {
            assert_eq!(constraint, "check");
        }
        other => panic!("Expected ConstraintViolation, got {other:?}"),
    }
}

#[test]
fn foreign_keys_reject_resume_for_missing_worker() {
    let access = data_access();
    let result = access.with_unit_of_work(|uow| {
        let orphan =
            NewResume::new("Orphan", 50_000, Workload::Fulltime, 999).expect("valid input");
        uow.insert_resume(&orphan)
    });

    match result {
        Err(PersistenceError::ConstraintViolation { constraint, .. }) => {
            assert_eq!(constraint, "foreign key");
        }
        other => panic!("Expected ConstraintViolation, got {other:?}"),
    }
}

#[test]
fn workload_check_rejects_unknown_literal() {
    let access = data_access();
    let result = access.with_unit_of_work(|uow| {
        let worker_id = seed_worker(uow, "alice");
        uow.run(|conn| {
            diesel::insert_into(diesel_schema::resumes::table)
                .values((
                    diesel_schema::resumes::title.eq("Freelance"),
                    diesel_schema::resumes::compensation.eq(50_000),
                    diesel_schema::resumes::workload.eq("weekends"),
                    diesel_schema::resumes::worker_id.eq(worker_id),
                ))
                .execute(conn)?;
            Ok(())
        })
    });

    assert!(matches!(
        result,
        Err(PersistenceError::ConstraintViolation { .. })
    ));
}

#[test]
fn failed_unit_of_work_leaves_no_partial_writes() {
    let access = data_access();

    let result: Result<(), PersistenceError> = access.with_unit_of_work(|uow| {
        let worker_id = seed_worker(uow, "alice");
        let valid =
            NewResume::new("Developer", 80_000, Workload::Fulltime, worker_id).expect("valid");
        uow.insert_resume(&valid)?;

        // Second insert violates the foreign key and fails the whole
        // unit of work.
        let orphan = NewResume::new("Orphan", 50_000, Workload::Fulltime, 999).expect("valid");
        uow.insert_resume(&orphan)?;
        Ok(())
    });
    assert!(result.is_err());

    access
        .with_unit_of_work(|uow| {
            assert!(uow.select_workers(&WorkerFilter::default())?.is_empty());
            assert!(uow.select_resumes(&ResumeFilter::default())?.is_empty());
            Ok(())
        })
        .expect("unit of work");
}
