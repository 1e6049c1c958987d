//! Backup API.

use crate::endpoints::backup;
use crate::types::{PasskeyBackupRequest, PasskeyChallenge, RecoveryBackup};

resource_api! {
    /// Wallet backup via recovery passphrase or passkey.
    BackupApi {
        /// Generate a recovery passphrase.
        call fn recovery() -> RecoveryBackup = backup::recovery;

        /// Start passkey registration.
        call fn passkey_begin() -> PasskeyChallenge = backup::passkey_begin;

        /// Finish passkey registration with the authenticator's attestation.
        call fn passkey_complete(request: PasskeyBackupRequest) -> () = backup::passkey_complete;
    }
}
