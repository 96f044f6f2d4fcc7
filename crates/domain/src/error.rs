// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resume or vacancy title is empty or exceeds the column bound.
    InvalidTitle(String),
    /// Compensation must be strictly positive.
    NonPositiveCompensation(i64),
    /// Workload literal is not a recognized variant.
    InvalidWorkload(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::NonPositiveCompensation(value) => {
                write!(f, "Compensation must be positive, got {value}")
            }
            Self::InvalidWorkload(value) => write!(f, "Invalid workload: '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}
