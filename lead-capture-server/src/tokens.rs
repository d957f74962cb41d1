//! One-shot submission tokens for the HTML form.
//!
//! Every rendered form carries a fresh token in a hidden input. A POST claims
//! the token before anything reaches the sink. A second POST with the same
//! token is refused while the first is still in flight and after it has been
//! delivered, so a double click sends one lead. A failed attempt (invalid
//! input or a sink error) gives the token back so the user can retry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Claims older than this are forgotten.
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimState {
    InFlight,
    Used,
}

#[derive(Debug)]
struct Claim {
    state: ClaimState,
    at: Instant,
}

#[derive(Debug)]
pub struct SubmissionTokens {
    claims: Mutex<HashMap<Uuid, Claim>>,
    ttl: Duration,
}

impl Default for SubmissionTokens {
    fn default() -> Self {
        Self::with_ttl(TOKEN_TTL)
    }
}

impl SubmissionTokens {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            claims: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Token for a freshly rendered form.
    pub fn issue(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Claim `token` for one submission attempt.
    ///
    /// Tokens this process never issued are accepted, so a page rendered
    /// before a restart still submits. The `Err` carries the state of the
    /// earlier claim.
    pub fn claim(&self, token: Uuid) -> Result<TokenClaim<'_>, ClaimState> {
        let mut claims = self.lock();
        let now = Instant::now();
        claims.retain(|_, claim| now.duration_since(claim.at) < self.ttl);

        if let Some(existing) = claims.get(&token) {
            return Err(existing.state);
        }
        claims.insert(
            token,
            Claim {
                state: ClaimState::InFlight,
                at: now,
            },
        );
        Ok(TokenClaim {
            tokens: self,
            token,
            consumed: false,
        })
    }

    pub fn state(&self, token: Uuid) -> Option<ClaimState> {
        self.lock().get(&token).map(|claim| claim.state)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Claim>> {
        self.claims.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An in-flight claim. Dropping it without [`TokenClaim::consume`] releases
/// the token.
#[derive(Debug)]
pub struct TokenClaim<'a> {
    tokens: &'a SubmissionTokens,
    token: Uuid,
    consumed: bool,
}

impl TokenClaim<'_> {
    pub fn token(&self) -> Uuid {
        self.token
    }

    /// The lead was delivered; the token can never be claimed again.
    pub fn consume(mut self) {
        if let Some(claim) = self.tokens.lock().get_mut(&self.token) {
            claim.state = ClaimState::Used;
        }
        self.consumed = true;
    }
}

impl Drop for TokenClaim<'_> {
    fn drop(&mut self) {
        if !self.consumed {
            self.tokens.lock().remove(&self.token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_while_in_flight() {
        let tokens = SubmissionTokens::default();
        let token = tokens.issue();

        let claim = tokens.claim(token).unwrap();
        assert_eq!(tokens.claim(token).unwrap_err(), ClaimState::InFlight);

        claim.consume();
        assert_eq!(tokens.claim(token).unwrap_err(), ClaimState::Used);
        assert_eq!(tokens.state(token), Some(ClaimState::Used));
    }

    #[test]
    fn dropped_claim_releases_the_token() {
        let tokens = SubmissionTokens::default();
        let token = tokens.issue();

        drop(tokens.claim(token).unwrap());
        assert_eq!(tokens.state(token), None);
        assert!(tokens.claim(token).is_ok());
    }

    #[test]
    fn issued_tokens_are_distinct() {
        let tokens = SubmissionTokens::default();
        assert_ne!(tokens.issue(), tokens.issue());
    }

    #[test]
    fn expired_claims_are_forgotten() {
        let tokens = SubmissionTokens::with_ttl(Duration::ZERO);
        let token = tokens.issue();

        tokens.claim(token).unwrap().consume();
        assert!(tokens.claim(token).is_ok());
    }
}
