//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., `VitalsError`, `AuthorityError`) are defined in
//! their respective modules alongside the components they guard. This module
//! provides the shared classification used by logging and recovery code.
//!
//! None of these errors abort a simulation tick: gameplay operations either
//! clamp their inputs, report a boolean failure, or hand back one of these
//! values for the caller to log.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed elsewhere or later (e.g. routed to
///   the authority, retried after a cooldown)
/// - **Validation**: invalid input or configuration, should not be retried as-is
/// - **Internal**: unexpected state inconsistency that requires investigation
/// - **Fatal**: unrecoverable, the entity cannot be simulated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization in logs and for testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
