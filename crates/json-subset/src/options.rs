//! Checker configuration.

/// How far the checker goes after the first mismatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Stop at the first mismatch and report only that one.
    #[default]
    FailFast,
    /// Keep checking sibling keys and elements, reporting every mismatch.
    CollectAll,
}

/// What to do with a contained node outside the JSON model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Record an `UnsupportedConstruct` mismatch.
    #[default]
    Mismatch,
    /// Abort the check with [`ContainsError::Unsupported`](crate::ContainsError::Unsupported).
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub unsupported: UnsupportedPolicy,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    /// Shorthand for [`Mode::CollectAll`].
    pub fn collect_all(self) -> Self {
        self.with_mode(Mode::CollectAll)
    }

    /// Shorthand for [`UnsupportedPolicy::Error`].
    pub fn strict(self) -> Self {
        self.with_unsupported(UnsupportedPolicy::Error)
    }
}
