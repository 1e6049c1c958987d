//! Lightning addresses API.

use crate::endpoints::addresses;
use crate::types::{Address, CreateAddressRequest, TransferAddressRequest, TransferredAddress};

resource_api! {
    /// Lightning address management.
    AddressesApi {
        /// Claim an address, or a random one when none is given.
        call fn create(request: CreateAddressRequest) -> Address = addresses::create;

        /// List the wallet's addresses.
        call fn list() -> Vec<Address> = addresses::list;

        /// Release an address.
        call fn delete(address: &str) -> () = addresses::delete;

        /// Move an address to another wallet.
        call fn transfer(address: &str, request: TransferAddressRequest) -> TransferredAddress = addresses::transfer;
    }
}
