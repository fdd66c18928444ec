use serde::{Deserialize, Serialize};

/// Progress of one server's connection attempt.
///
/// `Idle → Verifying → Verified → Listing → Listed | ListingFailed`, or
/// `Verifying → VerificationFailed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Idle,
    Verifying,
    Verified,
    Listing,
    Listed,
    ListingFailed,
    VerificationFailed,
}

impl ConnectionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ConnectionState::Listed
                | ConnectionState::ListingFailed
                | ConnectionState::VerificationFailed
        )
    }

    /// The state reached from `self` when the current step succeeds.
    pub fn advance(self) -> Self {
        match self {
            ConnectionState::Idle => ConnectionState::Verifying,
            ConnectionState::Verifying => ConnectionState::Verified,
            ConnectionState::Verified => ConnectionState::Listing,
            ConnectionState::Listing => ConnectionState::Listed,
            terminal => terminal,
        }
    }

    /// The state reached from `self` when the current step fails.
    pub fn fail(self) -> Self {
        match self {
            ConnectionState::Idle | ConnectionState::Verifying => {
                ConnectionState::VerificationFailed
            }
            ConnectionState::Verified | ConnectionState::Listing => ConnectionState::ListingFailed,
            terminal => terminal,
        }
    }
}
