//! Restore API.

use crate::endpoints::restore;
use crate::types::{PasskeyChallenge, PasskeyRestoreRequest, RecoveryRestoreRequest, RestoredWallet};

resource_api! {
    /// Wallet restoration via recovery passphrase or passkey.
    RestoreApi {
        /// Restore with a recovery passphrase.
        call fn recovery(request: RecoveryRestoreRequest) -> RestoredWallet = restore::recovery;

        /// Start a passkey assertion.
        call fn passkey_begin() -> PasskeyChallenge = restore::passkey_begin;

        /// Finish the assertion and receive fresh keys.
        call fn passkey_complete(request: PasskeyRestoreRequest) -> RestoredWallet = restore::passkey_complete;
    }
}
