//! Lowering configuration.

/// Environment variable that turns specialization off when set.
pub const NO_SPECIALIZE_ENV: &str = "TERN_NO_SPECIALIZE";

/// Options for one lowering session.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LowerOptions {
    /// Consult the specialization table. When off, every operation takes
    /// the generic call path.
    pub specialize: bool,
}

impl Default for LowerOptions {
    fn default() -> Self {
        LowerOptions { specialize: true }
    }
}

impl LowerOptions {
    /// Defaults, with specialization disabled if `TERN_NO_SPECIALIZE` is set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).is_some())
    }

    fn from_lookup(is_set: impl Fn(&str) -> bool) -> Self {
        LowerOptions {
            specialize: !is_set(NO_SPECIALIZE_ENV),
        }
    }
}
