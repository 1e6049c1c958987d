//! Invoices API.

use crate::endpoints::invoices;
use crate::types::{
    AddressInvoice, CreateInvoiceForAddressRequest, CreateInvoiceForWalletRequest,
    CreateInvoiceRequest, Invoice, InvoiceEvent, ListQuery, NumberOrHash,
};

resource_api! {
    /// BOLT11 invoice creation and retrieval.
    InvoicesApi {
        /// Create a new invoice.
        call fn create(request: CreateInvoiceRequest) -> Invoice = invoices::create;

        /// List invoices, newest first.
        call fn list(query: ListQuery) -> Vec<Invoice> = invoices::list;

        /// Get an invoice by number or payment hash.
        call fn get(id: impl Into<NumberOrHash>) -> Invoice = invoices::get;

        /// Create an invoice for a wallet by ID. No authentication required.
        call fn create_for_wallet(request: CreateInvoiceForWalletRequest) -> AddressInvoice = invoices::create_for_wallet;

        /// Create an invoice for a Lightning address. No authentication required.
        call fn create_for_address(request: CreateInvoiceForAddressRequest) -> AddressInvoice = invoices::create_for_address;

        /// Watch an invoice until it settles or expires.
        ///
        /// `timeout` asks the server to close the stream after that many
        /// seconds; the stream then ends normally.
        stream fn watch(id: impl Into<NumberOrHash>, timeout: Option<u64>) -> InvoiceEvent = invoices::watch;
    }
}
