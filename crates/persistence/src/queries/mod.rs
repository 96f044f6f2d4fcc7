// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the hiring data layer.
//!
//! ## Module Organization
//!
//! - `workers` - worker selects
//! - `resumes` - resume selects and counts
//! - `vacancies` - vacancy selects
//! - `aggregates` - GROUP BY aggregation
//! - `ranking` - CTE/window-function ranking
//!
//! Filter and sort keys arrive as caller-supplied strings and are
//! resolved against a closed per-entity column list before any
//! statement executes; an unknown key fails with
//! [`crate::PersistenceError::InvalidQuery`]. Zero matching rows is
//! never an error.

pub mod aggregates;
pub mod ranking;
pub mod resumes;
pub mod vacancies;
pub mod workers;

pub use ranking::RankingSpec;
