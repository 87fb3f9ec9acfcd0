use serde::{Deserialize, Serialize};

/// App shell state while deciding what the user sees first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OnboardingState {
    Loading,
    SignedOut,
    SelectingTopics { user_id: u64 },
    Ready { user_id: u64 },
}

/// A resolved session: who is signed in and whether they already picked topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSession {
    pub user_id: u64,
    pub has_topics: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingError {
    pub from: &'static str,
    pub event: &'static str,
}

impl std::fmt::Display for OnboardingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot apply {} in state {}", self.event, self.from)
    }
}

impl std::error::Error for OnboardingError {}

impl OnboardingState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::SignedOut => "signed_out",
            Self::SelectingTopics { .. } => "selecting_topics",
            Self::Ready { .. } => "ready",
        }
    }

    /// Stored session finished loading (or there was none).
    pub fn session_resolved(self, session: Option<ResolvedSession>) -> Result<Self, OnboardingError> {
        match self {
            Self::Loading => Ok(Self::from_session(session)),
            _ => Err(self.reject("session_resolved")),
        }
    }

    pub fn signed_in(self, session: ResolvedSession) -> Result<Self, OnboardingError> {
        match self {
            Self::SignedOut => Ok(Self::from_session(Some(session))),
            _ => Err(self.reject("signed_in")),
        }
    }

    pub fn topics_selected(self) -> Result<Self, OnboardingError> {
        match self {
            Self::SelectingTopics { user_id } => Ok(Self::Ready { user_id }),
            _ => Err(self.reject("topics_selected")),
        }
    }

    pub fn signed_out(self) -> Result<Self, OnboardingError> {
        match self {
            Self::Loading => Err(self.reject("signed_out")),
            _ => Ok(Self::SignedOut),
        }
    }

    pub const fn user_id(self) -> Option<u64> {
        match self {
            Self::SelectingTopics { user_id } | Self::Ready { user_id } => Some(user_id),
            Self::Loading | Self::SignedOut => None,
        }
    }

    fn from_session(session: Option<ResolvedSession>) -> Self {
        match session {
            None => Self::SignedOut,
            Some(ResolvedSession {
                user_id,
                has_topics: false,
            }) => Self::SelectingTopics { user_id },
            Some(ResolvedSession {
                user_id,
                has_topics: true,
            }) => Self::Ready { user_id },
        }
    }

    fn reject(self, event: &'static str) -> OnboardingError {
        OnboardingError {
            from: self.name(),
            event,
        }
    }
}
