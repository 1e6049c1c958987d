//! L402 paywall API.

use crate::endpoints::l402;
use crate::types::{
    CreateL402ChallengeRequest, L402Challenge, L402Payment, L402Verification, PayL402Request,
    VerifyL402Request,
};

resource_api! {
    /// L402 paywall authentication.
    L402Api {
        /// Create a challenge (invoice plus macaroon).
        call fn create_challenge(request: CreateL402ChallengeRequest) -> L402Challenge = l402::create_challenge;

        /// Verify an `Authorization: L402 ...` token. Stateless.
        call fn verify(request: VerifyL402Request) -> L402Verification = l402::verify;

        /// Pay a challenge and get a ready-to-use `Authorization` value.
        call fn pay(request: PayL402Request) -> L402Payment = l402::pay;
    }
}
