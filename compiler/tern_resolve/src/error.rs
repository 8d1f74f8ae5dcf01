//! Resolver construction errors.

/// A resolver was configured with an unusable search scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverConfigError {
    #[error("search scope `{scope}` has no associated project")]
    NoProject { scope: String },
}
