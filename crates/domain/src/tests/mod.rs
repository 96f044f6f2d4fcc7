// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used)]

use std::str::FromStr;

use crate::{DomainError, NewResume, NewVacancy, TITLE_MAX_LEN, Workload};

#[test]
fn test_workload_round_trips_through_storage_strings() {
    for workload in [Workload::Parttime, Workload::Fulltime] {
        let parsed = Workload::from_str(workload.as_str()).expect("Known variant parses");
        assert_eq!(parsed, workload);
    }
}

#[test]
fn test_workload_rejects_unknown_literal() {
    let result = Workload::from_str("weekend");
    assert_eq!(
        result,
        Err(DomainError::InvalidWorkload(String::from("weekend")))
    );
}

#[test]
fn test_new_resume_rejects_non_positive_compensation() {
    for bad in [0, -50_000] {
        let result = NewResume::new("Rust developer", bad, Workload::Fulltime, 1);
        assert_eq!(result, Err(DomainError::NonPositiveCompensation(bad)));
    }
}

#[test]
fn test_new_resume_rejects_overlong_title() {
    let title = "x".repeat(TITLE_MAX_LEN + 1);
    let result = NewResume::new(&title, 100_000, Workload::Fulltime, 1);
    assert!(matches!(result, Err(DomainError::InvalidTitle(_))));
}

#[test]
fn test_new_resume_accepts_title_at_bound() {
    let title = "x".repeat(TITLE_MAX_LEN);
    let resume =
        NewResume::new(&title, 100_000, Workload::Parttime, 7).expect("Title at bound is valid");
    assert_eq!(resume.title().len(), TITLE_MAX_LEN);
    assert_eq!(resume.worker_id(), 7);
}

#[test]
fn test_new_vacancy_allows_absent_compensation() {
    let vacancy = NewVacancy::new("Unpaid internship", None).expect("Absent compensation is valid");
    assert_eq!(vacancy.compensation(), None);
}

#[test]
fn test_new_vacancy_rejects_non_positive_compensation() {
    let result = NewVacancy::new("Senior engineer", Some(0));
    assert_eq!(result, Err(DomainError::NonPositiveCompensation(0)));
}
