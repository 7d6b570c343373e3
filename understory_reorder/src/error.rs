// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`Reorderer::start`](crate::Reorderer::start).

/// Why a container could not be made reorderable.
///
/// Both cases leave the host untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// The container has fewer than two eligible children.
    #[error("container has {eligible} eligible children, reordering needs at least two")]
    TooFewChildren {
        /// Number of children that are not drag-disabled.
        eligible: usize,
    },
    /// The reorderer already manages a container; call `stop` first.
    #[error("reorderer is already started")]
    AlreadyStarted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_problem() {
        let few = ReorderError::TooFewChildren { eligible: 1 };
        assert_eq!(
            few.to_string(),
            "container has 1 eligible children, reordering needs at least two"
        );
        assert_eq!(
            ReorderError::AlreadyStarted.to_string(),
            "reorderer is already started"
        );
    }
}
