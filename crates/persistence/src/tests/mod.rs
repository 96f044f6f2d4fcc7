// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod async_tests;
mod constraint_tests;
mod dto_tests;
mod lazy_tests;
mod replies_tests;

use vitae_domain::{NewResume, Workload};

use crate::{DataAccess, UnitOfWork};

pub fn data_access() -> DataAccess {
    DataAccess::new_in_memory().expect("in-memory database")
}

pub fn seed_worker(uow: &UnitOfWork, username: &str) -> i64 {
    uow.insert_worker(username).expect("insert worker")
}

pub fn seed_resume(
    uow: &UnitOfWork,
    worker_id: i64,
    title: &str,
    compensation: i64,
    workload: Workload,
) -> i64 {
    let resume = NewResume::new(title, compensation, workload, worker_id).expect("valid resume");
    uow.insert_resume(&resume).expect("insert resume")
}

/// Two workers with mixed workloads plus one childless worker.
///
/// Returns `(alice_id, bob_id, carol_id)`; Alice has two part-time and
/// one full-time resume, Bob has one full-time resume, Carol has none.
pub fn seed_hiring_graph(uow: &UnitOfWork) -> (i64, i64, i64) {
    let alice = seed_worker(uow, "alice");
    let bob = seed_worker(uow, "bob");
    let carol = seed_worker(uow, "carol");

    seed_resume(uow, alice, "Junior Developer", 50_000, Workload::Parttime);
    seed_resume(uow, alice, "Developer", 90_000, Workload::Fulltime);
    seed_resume(uow, alice, "Weekend Consultant", 30_000, Workload::Parttime);
    seed_resume(uow, bob, "Data Engineer", 120_000, Workload::Fulltime);

    (alice, bob, carol)
}
