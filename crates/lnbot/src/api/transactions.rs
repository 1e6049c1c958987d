//! Transactions API.

use crate::endpoints::transactions;
use crate::types::{ListQuery, Transaction};

resource_api! {
    /// Transaction history.
    TransactionsApi {
        /// List credits and debits, newest first.
        call fn list(query: ListQuery) -> Vec<Transaction> = transactions::list;
    }
}
