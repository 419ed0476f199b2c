/// Extraction state definitions for tracking one restaurant in a batch
use std::fmt;

/// Represents where one restaurant is in the scrape pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionState {
    // ===== Active States =====
    /// Restaurant is waiting for its turn in the batch
    Pending,

    /// Page is being navigated, loaded or parsed
    Extracting,

    // ===== Terminal States =====
    /// At least one record was extracted
    Succeeded,

    /// The page had the expected structure but no items
    Empty,

    /// Resolution, navigation or extraction failed
    Failed,
}

impl ExtractionState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Extracting)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns true if this represents a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Returns true if moving from this state to `next` is allowed
    ///
    /// States only move forward: Pending -> Extracting -> one terminal
    /// state. A restaurant may also fail before extraction starts, when no
    /// extractor is registered for it.
    pub fn can_transition_to(&self, next: ExtractionState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Extracting)
                | (Self::Pending, Self::Failed)
                | (Self::Extracting, Self::Succeeded)
                | (Self::Extracting, Self::Empty)
                | (Self::Extracting, Self::Failed)
        )
    }

    /// Terminal state for a finished extraction of `item_count` records
    pub fn from_item_count(item_count: usize) -> Self {
        if item_count == 0 {
            Self::Empty
        } else {
            Self::Succeeded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Extracting => "extracting",
            Self::Succeeded => "succeeded",
            Self::Empty => "empty",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible extraction states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Extracting,
            Self::Succeeded,
            Self::Empty,
            Self::Failed,
        ]
    }
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
