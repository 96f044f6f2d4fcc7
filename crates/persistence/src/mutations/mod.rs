// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the hiring data layer.
//!
//! ## Module Organization
//!
//! - `workers` - worker inserts, updates and deletes
//! - `resumes` - resume inserts, patches and deletes
//! - `vacancies` - vacancy inserts and vacancy replies
//!
//! All mutations use the Diesel DSL, with the `last_insert_rowid()`
//! helper from the `backend` module as the only backend-specific piece.
//! Constraint violations surface as
//! [`crate::PersistenceError::ConstraintViolation`]; the storage engine,
//! not application traversal, applies cascade rules.

pub mod resumes;
pub mod vacancies;
pub mod workers;
