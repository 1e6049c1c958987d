//! API endpoint façades.
//!
//! Each resource is declared once with `resource_api!`, which emits the async
//! façade and a blocking twin (behind the `blocking` feature). Both build
//! their requests from the shared endpoint table.

/// Declare a resource façade.
///
/// `call fn` entries return a decoded value; `stream fn` entries open an SSE
/// stream and return its events.
macro_rules! resource_api {
    (
        $(#[$doc:meta])*
        $name:ident {
            $(
                $(#[$mdoc:meta])*
                $kind:ident fn $method:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty = $endpoint:path;
            )*
        }
    ) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            client: $crate::client::LnBot,
        }

        impl $name {
            pub(crate) fn new(client: $crate::client::LnBot) -> Self {
                Self { client }
            }

            $(
                resource_api!(@async $kind [$(#[$mdoc])*] $method($($arg: $ty),*) -> $ret = $endpoint);
            )*
        }

        #[cfg(feature = "blocking")]
        pub(crate) mod blocking {
            #[allow(unused_imports)]
            use super::*;

            $(#[$doc])*
            #[derive(Clone)]
            pub struct $name {
                client: $crate::blocking::LnBot,
            }

            impl $name {
                pub(crate) fn new(client: $crate::blocking::LnBot) -> Self {
                    Self { client }
                }

                $(
                    resource_api!(@blocking $kind [$(#[$mdoc])*] $method($($arg: $ty),*) -> $ret = $endpoint);
                )*
            }
        }
    };

    (@async call [$(#[$doc:meta])*] $method:ident($($arg:ident: $ty:ty),*) -> $ret:ty = $endpoint:path) => {
        $(#[$doc])*
        pub async fn $method(&self, $($arg: $ty),*) -> $crate::error::Result<$ret> {
            self.client.execute($endpoint($($arg),*)?).await
        }
    };

    (@async stream [$(#[$doc:meta])*] $method:ident($($arg:ident: $ty:ty),*) -> $ret:ty = $endpoint:path) => {
        $(#[$doc])*
        pub async fn $method(
            &self,
            $($arg: $ty),*
        ) -> $crate::error::Result<$crate::sse::EventStream<$ret>> {
            self.client.open_stream($endpoint($($arg),*)?).await
        }
    };

    (@blocking call [$(#[$doc:meta])*] $method:ident($($arg:ident: $ty:ty),*) -> $ret:ty = $endpoint:path) => {
        $(#[$doc])*
        pub fn $method(&self, $($arg: $ty),*) -> $crate::error::Result<$ret> {
            self.client.execute($endpoint($($arg),*)?)
        }
    };

    (@blocking stream [$(#[$doc:meta])*] $method:ident($($arg:ident: $ty:ty),*) -> $ret:ty = $endpoint:path) => {
        $(#[$doc])*
        pub fn $method(
            &self,
            $($arg: $ty),*
        ) -> $crate::error::Result<$crate::blocking::EventIter<$ret>> {
            self.client.open_stream($endpoint($($arg),*)?)
        }
    };
}

pub(crate) mod addresses;
pub(crate) mod backup;
pub(crate) mod events;
pub(crate) mod invoices;
pub(crate) mod keys;
pub(crate) mod l402;
pub(crate) mod payments;
pub(crate) mod restore;
pub(crate) mod transactions;
pub(crate) mod wallets;
pub(crate) mod webhooks;

pub use addresses::AddressesApi;
pub use backup::BackupApi;
pub use events::EventsApi;
pub use invoices::InvoicesApi;
pub use keys::KeysApi;
pub use l402::L402Api;
pub use payments::PaymentsApi;
pub use restore::RestoreApi;
pub use transactions::TransactionsApi;
pub use wallets::WalletsApi;
pub use webhooks::WebhooksApi;
