//! Wallet-wide event stream.

use crate::endpoints::events;
use crate::types::WalletEvent;

resource_api! {
    /// Real-time wallet events.
    EventsApi {
        /// Stream every event for the wallet.
        stream fn stream() -> WalletEvent = events::stream;
    }
}
