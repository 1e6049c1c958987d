//! Wallets API.

use crate::endpoints::wallets;
use crate::types::{CreateWalletRequest, CreatedWallet, UpdateWalletRequest, Wallet};

resource_api! {
    /// Wallet creation and management.
    WalletsApi {
        /// Create a new wallet. No authentication required.
        call fn create(request: CreateWalletRequest) -> CreatedWallet = wallets::create;

        /// Get the current wallet and its balances.
        call fn current() -> Wallet = wallets::current;

        /// Rename the current wallet.
        call fn update(request: UpdateWalletRequest) -> Wallet = wallets::update;
    }
}
