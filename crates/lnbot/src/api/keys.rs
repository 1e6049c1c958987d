//! API key rotation.

use crate::endpoints::keys;
use crate::types::RotatedKey;

resource_api! {
    /// API key rotation.
    KeysApi {
        /// Rotate the key in `slot` (0 = primary, 1 = secondary).
        call fn rotate(slot: u8) -> RotatedKey = keys::rotate;
    }
}
