use std::fmt::{Display, Formatter};

/// Describes why the evaluation service produced a given result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EvaluationReason {
    /// The service did not report a known reason.
    Unknown,
    /// The flag is disabled.
    FlagDisabled,
    /// A rule or rollout matched the evaluation context.
    Match,
    /// No rule matched, the flag's default was served.
    Default,
}

impl EvaluationReason {
    const UNKNOWN: &'static str = "UNKNOWN_EVALUATION_REASON";
    const FLAG_DISABLED: &'static str = "FLAG_DISABLED_EVALUATION_REASON";
    const MATCH: &'static str = "MATCH_EVALUATION_REASON";
    const DEFAULT: &'static str = "DEFAULT_EVALUATION_REASON";

    /// Reads a reason reported by the service. Unrecognized values map to [`EvaluationReason::Unknown`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flipt::EvaluationReason;
    ///
    /// assert_eq!(EvaluationReason::parse("MATCH_EVALUATION_REASON"), EvaluationReason::Match);
    /// assert_eq!(EvaluationReason::parse("whatever"), EvaluationReason::Unknown);
    /// ```
    pub fn parse(reason: &str) -> Self {
        match reason {
            Self::FLAG_DISABLED => EvaluationReason::FlagDisabled,
            Self::MATCH => EvaluationReason::Match,
            Self::DEFAULT => EvaluationReason::Default,
            _ => EvaluationReason::Unknown,
        }
    }

    /// The wire representation of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationReason::Unknown => Self::UNKNOWN,
            EvaluationReason::FlagDisabled => Self::FLAG_DISABLED,
            EvaluationReason::Match => Self::MATCH,
            EvaluationReason::Default => Self::DEFAULT,
        }
    }
}

impl Display for EvaluationReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
