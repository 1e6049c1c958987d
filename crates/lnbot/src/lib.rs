//! Rust client for the LnBot Lightning wallet API.
//!
//! Wallets, invoices, payments, Lightning addresses, webhooks, backups and
//! L402 paywalls, with typed responses and real-time event streams. Both an
//! async client ([`LnBot`]) and, behind the default `blocking` feature, a
//! blocking one ([`blocking::LnBot`]) are provided. They expose the same
//! resources and behave identically.
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use lnbot::{CreateInvoiceRequest, LnBot, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = LnBot::builder().api_key("key_...").build()?;
//!
//! let invoice = client
//!     .invoices()
//!     .create(CreateInvoiceRequest::new(1000).with_memo("coffee"))
//!     .await?;
//!
//! let mut events = client.invoices().watch(invoice.number, Some(300)).await?;
//! while let Some(event) = events.next().await {
//!     let event = event?;
//!     println!("{}: {:?}", event.event, event.data.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Failed responses map to [`Error`] variants by status (400, 401, 403, 404,
//! 409, then a generic variant for the rest), each carrying the extracted
//! message and the raw body. Timeouts and transport failures have their own
//! variants.
//!
//! # Wire format
//!
//! Field names are snake_case in Rust and camelCase on the wire; the
//! conversion happens on the top-level keys of every request and response
//! (see [`naming`]). Unknown response fields are ignored.

mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod config;
mod endpoints;
pub mod error;
pub mod naming;
pub mod parse;
mod request;
pub mod sse;
pub mod types;

pub use api::{
    AddressesApi, BackupApi, EventsApi, InvoicesApi, KeysApi, L402Api, PaymentsApi, RestoreApi,
    TransactionsApi, WalletsApi, WebhooksApi,
};
pub use client::{ClientBuilder, LnBot};
pub use config::{KeySource, ResolvedKey};
pub use error::{classify, Error, Result};
pub use sse::EventStream;
pub use types::*;
