//! Error taxonomy for the store and sync engine.

use std::fmt;

/// One of the ordered data sources consulted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Remote,
    Cache,
    Seed,
    Defaults,
    /// The export-artifact sink. Not part of the startup chain; only a
    /// write destination.
    Export,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Cache => "cache",
            Self::Seed => "seed",
            Self::Defaults => "defaults",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by persistence tiers and, in strict mode, by mutations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A load tier had nothing usable (absent, unreachable, malformed, or
    /// empty). Recovered locally by falling through the precedence chain.
    #[error("{tier} tier unavailable: {reason}")]
    SourceUnavailable { tier: Tier, reason: String },

    /// A persistence tier rejected or could not complete a write.
    #[error("{tier} tier write failed: {reason}")]
    WriteFailed { tier: Tier, reason: String },

    /// The referenced task id is absent. Only surfaced in strict mode;
    /// the default behavior is a silent no-op.
    #[error("no task with id {0}")]
    NotFound(u64),

    /// An import file or storage blob could not be parsed.
    #[error("malformed task data: {0}")]
    MalformedInput(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedInput(e.to_string())
    }
}
