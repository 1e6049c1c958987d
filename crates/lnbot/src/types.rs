//! Request and response types for the LnBot API.
//!
//! Records are declared in `snake_case`; the wire's `camelCase` is handled by
//! [`crate::naming`] on the way in and out, so no per-field renames appear
//! here. Amounts are in satoshis.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Path parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies an invoice or payment either by its sequence number or by its
/// payment hash. The server routes both forms through the same path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumberOrHash {
    /// Wallet-local sequence number.
    Number(u64),
    /// Hex payment hash.
    Hash(String),
}

impl fmt::Display for NumberOrHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberOrHash::Number(n) => write!(f, "{}", n),
            NumberOrHash::Hash(h) => write!(f, "{}", h),
        }
    }
}

impl From<u64> for NumberOrHash {
    fn from(n: u64) -> Self {
        NumberOrHash::Number(n)
    }
}

impl From<&str> for NumberOrHash {
    fn from(h: &str) -> Self {
        NumberOrHash::Hash(h.to_string())
    }
}

impl From<String> for NumberOrHash {
    fn from(h: String) -> Self {
        NumberOrHash::Hash(h)
    }
}

/// Pagination parameters for list endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ListQuery {
    /// Maximum number of items to return.
    pub limit: Option<u32>,
    /// Return items after this sequence number.
    pub after: Option<u64>,
}

impl ListQuery {
    /// Limit the number of returned items.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only return items after `after`.
    pub fn after(mut self, after: u64) -> Self {
        self.after = Some(after);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wallets
// ─────────────────────────────────────────────────────────────────────────────

/// Current wallet and its balances.
///
/// `available` is `balance - on_hold`, computed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Wallet ID.
    pub wallet_id: String,
    /// Display name.
    pub name: String,
    /// Total balance.
    pub balance: i64,
    /// Amount reserved for in-flight payments.
    pub on_hold: i64,
    /// Spendable balance.
    pub available: i64,
}

/// Credentials returned when a wallet is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedWallet {
    /// Wallet ID.
    pub wallet_id: String,
    /// Primary API key.
    pub primary_key: String,
    /// Secondary API key.
    pub secondary_key: String,
    /// Display name.
    pub name: String,
    /// Lightning address assigned to the wallet.
    pub address: String,
    /// 12-word recovery passphrase.
    pub recovery_passphrase: String,
}

/// Request to create a wallet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWalletRequest {
    /// Optional display name.
    pub name: Option<String>,
}

/// Request to rename the current wallet.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateWalletRequest {
    /// New display name.
    pub name: String,
}

/// An API key slot, as listed by the server. The key itself is never shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Key ID.
    pub id: String,
    /// Slot name (primary, secondary).
    pub name: String,
    /// Last characters of the key.
    pub hint: String,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last use (ISO 8601).
    #[serde(default)]
    pub last_used_at: Option<String>,
}

/// Result of rotating an API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatedKey {
    /// The new key. Only shown once.
    pub key: String,
    /// Key slot name (primary, secondary).
    pub name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Invoices
// ─────────────────────────────────────────────────────────────────────────────

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Waiting for payment.
    Pending,
    /// Paid.
    Settled,
    /// Expired unpaid.
    Expired,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    /// Whether no further transitions can happen.
    pub fn is_terminal(self) -> bool {
        matches!(self, InvoiceStatus::Settled | InvoiceStatus::Expired)
    }
}

/// A BOLT11 invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Wallet-local invoice number.
    pub number: u64,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Amount in sats.
    pub amount: u64,
    /// Encoded payment request.
    pub bolt11: String,
    /// Caller-supplied reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Memo embedded in the invoice.
    #[serde(default)]
    pub memo: Option<String>,
    /// Transaction number once settled.
    #[serde(default)]
    pub tx_number: Option<u64>,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Settlement time (ISO 8601).
    #[serde(default)]
    pub settled_at: Option<String>,
    /// Expiry time (ISO 8601).
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Invoice issued on behalf of another wallet or a Lightning address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressInvoice {
    /// Encoded payment request.
    pub bolt11: String,
    /// Amount in sats.
    pub amount: u64,
    /// Expiry time (ISO 8601).
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Request to create an invoice.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceRequest {
    /// Amount in sats.
    pub amount: u64,
    /// Caller-supplied reference.
    pub reference: Option<String>,
    /// Memo embedded in the invoice.
    pub memo: Option<String>,
}

impl CreateInvoiceRequest {
    /// Create a request for `amount` sats.
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            reference: None,
            memo: None,
        }
    }

    /// Set the reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the memo.
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Request to create an invoice for a wallet by ID. No authentication needed.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceForWalletRequest {
    /// Target wallet.
    pub wallet_id: String,
    /// Amount in sats.
    pub amount: u64,
    /// Caller-supplied reference.
    pub reference: Option<String>,
    /// Payer comment.
    pub comment: Option<String>,
}

impl CreateInvoiceForWalletRequest {
    /// Create a request for `amount` sats payable to `wallet_id`.
    pub fn new(wallet_id: impl Into<String>, amount: u64) -> Self {
        Self {
            wallet_id: wallet_id.into(),
            amount,
            reference: None,
            comment: None,
        }
    }

    /// Set the reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Request to create an invoice for a Lightning address. No authentication needed.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceForAddressRequest {
    /// Lightning address (`user@domain`).
    pub address: String,
    /// Amount in sats.
    pub amount: u64,
    /// LNURL tag.
    pub tag: Option<String>,
    /// Payer comment.
    pub comment: Option<String>,
}

impl CreateInvoiceForAddressRequest {
    /// Create a request for `amount` sats payable to `address`.
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
            tag: None,
            comment: None,
        }
    }

    /// Set the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Accepted, not yet sent.
    Pending,
    /// In flight.
    Processing,
    /// Delivered.
    Settled,
    /// Gave up.
    Failed,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Whether no further transitions can happen.
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Settled | PaymentStatus::Failed)
    }
}

/// An outgoing payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Wallet-local payment number.
    pub number: u64,
    /// Lifecycle status.
    pub status: PaymentStatus,
    /// Requested amount in sats.
    pub amount: u64,
    /// Routing fee ceiling in sats.
    pub max_fee: u64,
    /// Destination as given by the caller.
    pub address: String,
    /// Routing fee actually paid.
    #[serde(default)]
    pub actual_fee: Option<u64>,
    /// Caller-supplied reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Transaction number once settled.
    #[serde(default)]
    pub tx_number: Option<u64>,
    /// Why the payment failed.
    #[serde(default)]
    pub failure_reason: Option<String>,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Settlement time (ISO 8601).
    #[serde(default)]
    pub settled_at: Option<String>,
}

/// Request to send a payment.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    /// Lightning address, LNURL, or BOLT11 invoice.
    pub target: String,
    /// Amount in sats. Required unless the invoice carries one.
    pub amount: Option<u64>,
    /// Deduplicates retried submissions.
    pub idempotency_key: Option<String>,
    /// Routing fee ceiling in sats.
    pub max_fee: Option<u64>,
    /// Caller-supplied reference.
    pub reference: Option<String>,
}

impl CreatePaymentRequest {
    /// Create a payment request to `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            amount: None,
            idempotency_key: None,
            max_fee: None,
            reference: None,
        }
    }

    /// Set the amount.
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the idempotency key.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Set the fee ceiling.
    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    /// Set the reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Addresses
// ─────────────────────────────────────────────────────────────────────────────

/// A Lightning address owned by the wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// The address (`user@domain`).
    pub address: String,
    /// Whether the name was generated randomly.
    pub generated: bool,
    /// What the address cost in sats.
    pub cost: u64,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Result of transferring an address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferredAddress {
    /// The address.
    pub address: String,
    /// Receiving wallet ID.
    pub transferred_to: String,
}

/// Request to create an address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAddressRequest {
    /// Desired address; random when omitted.
    pub address: Option<String>,
}

/// Request to transfer an address to another wallet.
#[derive(Debug, Clone, Serialize)]
pub struct TransferAddressRequest {
    /// API key of the receiving wallet.
    pub target_wallet_key: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Incoming.
    Credit,
    /// Outgoing.
    Debit,
    /// A type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction number.
    pub number: u64,
    /// Credit or debit.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount in sats.
    pub amount: u64,
    /// Wallet balance after this entry.
    pub balance_after: i64,
    /// Lightning network fee.
    pub network_fee: u64,
    /// Service fee.
    pub service_fee: u64,
    /// Payment hash.
    #[serde(default)]
    pub payment_hash: Option<String>,
    /// Payment preimage.
    #[serde(default)]
    pub preimage: Option<String>,
    /// Caller-supplied reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhooks
// ─────────────────────────────────────────────────────────────────────────────

/// A newly registered webhook, including its signing secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedWebhook {
    /// Webhook ID.
    pub id: String,
    /// Endpoint URL.
    pub url: String,
    /// Signing secret. Only shown once.
    pub secret: String,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A registered webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    /// Webhook ID.
    pub id: String,
    /// Endpoint URL.
    pub url: String,
    /// Whether deliveries are enabled.
    pub active: bool,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request to register a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookRequest {
    /// Endpoint URL.
    pub url: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Backup / Restore
// ─────────────────────────────────────────────────────────────────────────────

/// A generated recovery passphrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryBackup {
    /// 12-word BIP-39 passphrase.
    pub passphrase: String,
}

/// Wallet credentials returned by a restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoredWallet {
    /// Wallet ID.
    pub wallet_id: String,
    /// Display name.
    pub name: String,
    /// Fresh primary API key.
    pub primary_key: String,
    /// Fresh secondary API key.
    pub secondary_key: String,
}

/// WebAuthn ceremony options for a passkey backup or restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasskeyChallenge {
    /// Ceremony session to pass back on completion.
    pub session_id: String,
    /// Options to hand to the authenticator, as sent by the server.
    pub options: serde_json::Value,
}

/// Request to restore with a recovery passphrase.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryRestoreRequest {
    /// 12-word passphrase.
    pub passphrase: String,
}

/// Completion of a passkey backup.
#[derive(Debug, Clone, Serialize)]
pub struct PasskeyBackupRequest {
    /// Session from [`PasskeyChallenge`].
    pub session_id: String,
    /// Authenticator attestation.
    pub attestation: serde_json::Value,
}

/// Completion of a passkey restore.
#[derive(Debug, Clone, Serialize)]
pub struct PasskeyRestoreRequest {
    /// Session from [`PasskeyChallenge`].
    pub session_id: String,
    /// Authenticator assertion.
    pub assertion: serde_json::Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// L402
// ─────────────────────────────────────────────────────────────────────────────

/// An L402 challenge: invoice plus macaroon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L402Challenge {
    /// Base64 macaroon.
    pub macaroon: String,
    /// BOLT11 invoice to pay.
    pub invoice: String,
    /// Payment hash of the invoice.
    pub payment_hash: String,
    /// Expiry time (ISO 8601).
    pub expires_at: String,
    /// Ready-made `WWW-Authenticate` header value.
    pub www_authenticate: String,
}

/// Result of verifying an L402 token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L402Verification {
    /// Whether the token is valid.
    pub valid: bool,
    /// Payment hash bound to the macaroon.
    #[serde(default)]
    pub payment_hash: Option<String>,
    /// Caveats carried by the macaroon.
    #[serde(default)]
    pub caveats: Option<Vec<String>>,
    /// Why verification failed.
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of paying an L402 challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L402Payment {
    /// Payment status.
    pub status: PaymentStatus,
    /// Ready-made `Authorization` header value, once settled.
    #[serde(default)]
    pub authorization: Option<String>,
    /// Payment hash.
    #[serde(default)]
    pub payment_hash: Option<String>,
    /// Preimage, once settled.
    #[serde(default)]
    pub preimage: Option<String>,
    /// Amount paid in sats.
    #[serde(default)]
    pub amount: Option<u64>,
    /// Routing fee in sats.
    #[serde(default)]
    pub fee: Option<u64>,
    /// Payment number.
    #[serde(default)]
    pub payment_number: Option<u64>,
    /// Failure description.
    #[serde(default)]
    pub error: Option<String>,
}

/// Request to create an L402 challenge.
#[derive(Debug, Clone, Serialize)]
pub struct CreateL402ChallengeRequest {
    /// Price in sats.
    pub amount: u64,
    /// Invoice description.
    pub description: Option<String>,
    /// Challenge lifetime.
    pub expiry_seconds: Option<u64>,
    /// Macaroon caveats, e.g. `service=api`.
    pub caveats: Option<Vec<String>>,
}

impl CreateL402ChallengeRequest {
    /// Create a challenge request priced at `amount` sats.
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            description: None,
            expiry_seconds: None,
            caveats: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the expiry.
    pub fn with_expiry_seconds(mut self, seconds: u64) -> Self {
        self.expiry_seconds = Some(seconds);
        self
    }

    /// Set the caveats.
    pub fn with_caveats<I, S>(mut self, caveats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.caveats = Some(caveats.into_iter().map(Into::into).collect());
        self
    }
}

/// Request to verify an L402 token.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyL402Request {
    /// `Authorization` header value (`L402 <macaroon>:<preimage>`).
    pub authorization: String,
}

/// Request to pay an L402 challenge.
#[derive(Debug, Clone, Serialize)]
pub struct PayL402Request {
    /// `WWW-Authenticate` header value from the 402 response.
    pub www_authenticate: String,
    /// Routing fee ceiling in sats.
    pub max_fee: Option<u64>,
    /// Caller-supplied reference.
    pub reference: Option<String>,
    /// Wait for settlement before returning.
    pub wait: Option<bool>,
    /// Seconds to wait when `wait` is set.
    pub timeout: Option<u64>,
}

impl PayL402Request {
    /// Create a request paying the given challenge header.
    pub fn new(www_authenticate: impl Into<String>) -> Self {
        Self {
            www_authenticate: www_authenticate.into(),
            max_fee: None,
            reference: None,
            wait: None,
            timeout: None,
        }
    }

    /// Set the fee ceiling.
    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    /// Set the reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Wait up to `timeout` seconds for settlement.
    pub fn wait(mut self, timeout: u64) -> Self {
        self.wait = Some(true);
        self.timeout = Some(timeout);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming
// ─────────────────────────────────────────────────────────────────────────────

/// One named event from a per-resource watch stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent<T> {
    /// Event name from the `event:` line (e.g. `settled`).
    pub event: String,
    /// Decoded payload from the `data:` line.
    pub data: T,
}

/// Event from `invoices().watch()`.
pub type InvoiceEvent = StreamEvent<Invoice>;

/// Event from `payments().watch()`.
pub type PaymentEvent = StreamEvent<Payment>;

/// Event from the wallet-wide stream. Each one describes itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletEvent {
    /// Event name (e.g. `invoice.settled`).
    #[serde(default)]
    pub event: String,
    /// When the event happened (ISO 8601).
    #[serde(default)]
    pub created_at: String,
    /// Event payload, exactly as sent.
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
