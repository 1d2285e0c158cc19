//! Error types for the steady-chain crate.

/// Error type for all fallible operations in the steady-chain crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// Returned when a row of the transition matrix does not sum to 1.
    #[error("matrix is not stochastic (rows do not sum to 1): row {row} sums to {sum}")]
    NotStochastic {
        /// Zero-based index of the first offending row.
        row: usize,
        /// The offending row's sum.
        sum: f64,
    },

    /// Returned when the normalized balance system has no unique solution.
    ///
    /// This happens for reducible chains with multiple stationary
    /// distributions, where the normalization substitution leaves the
    /// system singular.
    #[error("system could not be solved (singular matrix)")]
    SingularSystem,

    /// Returned when vector and matrix dimensions are incompatible.
    #[error("dimension mismatch: expected {expected} entries, got {got}")]
    DimensionMismatch {
        /// Number of entries the matrix dimension requires.
        expected: usize,
        /// Number of entries actually supplied.
        got: usize,
    },

    /// Returned when input fails schema validation before any computation.
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_not_stochastic() {
        let e = ChainError::NotStochastic { row: 1, sum: 0.99 };
        assert_eq!(
            e.to_string(),
            "matrix is not stochastic (rows do not sum to 1): row 1 sums to 0.99"
        );
    }

    #[test]
    fn error_singular_system() {
        let e = ChainError::SingularSystem;
        assert_eq!(
            e.to_string(),
            "system could not be solved (singular matrix)"
        );
    }

    #[test]
    fn error_dimension_mismatch() {
        let e = ChainError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(
            e.to_string(),
            "dimension mismatch: expected 3 entries, got 2"
        );
    }

    #[test]
    fn error_malformed_input() {
        let e = ChainError::MalformedInput {
            reason: "matrix is empty".to_string(),
        };
        assert_eq!(e.to_string(), "malformed input: matrix is empty");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ChainError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ChainError>();
    }
}
