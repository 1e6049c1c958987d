//! Payments API.

use crate::endpoints::payments;
use crate::types::{CreatePaymentRequest, ListQuery, NumberOrHash, Payment, PaymentEvent};

resource_api! {
    /// Send sats to Lightning addresses, LNURLs, or BOLT11 invoices.
    PaymentsApi {
        /// Send a payment.
        call fn create(request: CreatePaymentRequest) -> Payment = payments::create;

        /// List payments, newest first.
        call fn list(query: ListQuery) -> Vec<Payment> = payments::list;

        /// Get a payment by number or payment hash.
        call fn get(id: impl Into<NumberOrHash>) -> Payment = payments::get;

        /// Watch a payment until it settles or fails.
        stream fn watch(id: impl Into<NumberOrHash>, timeout: Option<u64>) -> PaymentEvent = payments::watch;
    }
}
