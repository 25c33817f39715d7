//! Common error infrastructure for skilltree-core.
//!
//! Construction problems are [`ConfigError`]s and abort service creation
//! entirely. Call-time failures are [`SkillTreeError`]s. Ordinary upgrade
//! refusals are *not* errors; they are [`crate::UpgradeOutcome`] values.

use crate::store::StoreError;

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid input at call time, e.g. an unknown skill id.
    Validation,

    /// Authored data is inconsistent. The engine refuses to start.
    Configuration,

    /// A collaborator (store, lock) failed underneath the engine.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Uniform classification for every error type in the crate.
pub trait ProgressionFault: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for log fields and test assertions.
    fn error_code(&self) -> &'static str;
}

/// Fatal problems found while validating authored data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("skill definition at index {index} has an empty id")]
    EmptySkillId { index: usize },

    #[error("duplicated skill id: {0}")]
    DuplicateSkillId(String),

    #[error("skill '{skill_id}' has invalid max level {max_level}")]
    InvalidMaxLevel { skill_id: String, max_level: u32 },

    #[error("skill '{skill_id}' has unknown prerequisite id '{prerequisite_id}'")]
    UnknownPrerequisite {
        skill_id: String,
        prerequisite_id: String,
    },

    #[error("skill prerequisite cycle detected: {}", path.join(" -> "))]
    PrerequisiteCycle {
        /// Every node on the cycle, closed by repeating the first one.
        path: Vec<String>,
    },

    #[error("unknown currency key: '{0}'")]
    UnknownCurrency(String),
}

impl ProgressionFault for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySkillId { .. } => "config.empty_skill_id",
            Self::DuplicateSkillId(_) => "config.duplicate_skill_id",
            Self::InvalidMaxLevel { .. } => "config.invalid_max_level",
            Self::UnknownPrerequisite { .. } => "config.unknown_prerequisite",
            Self::PrerequisiteCycle { .. } => "config.prerequisite_cycle",
            Self::UnknownCurrency(_) => "config.unknown_currency",
        }
    }
}

/// Errors surfaced by [`crate::SkillGraphService`].
#[derive(Debug, thiserror::Error)]
pub enum SkillTreeError {
    #[error("skill not found: {0}")]
    SkillNotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("progression store failed: {0}")]
    Store(#[from] StoreError),
}

impl ProgressionFault for SkillTreeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SkillNotFound(_) => ErrorSeverity::Validation,
            Self::Config(inner) => inner.severity(),
            Self::Store(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SkillNotFound(_) => "skill.not_found",
            Self::Config(inner) => inner.error_code(),
            Self::Store(inner) => inner.error_code(),
        }
    }
}

pub type Result<T, E = SkillTreeError> = core::result::Result<T, E>;
