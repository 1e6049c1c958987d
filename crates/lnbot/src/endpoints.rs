//! Endpoint table shared by the async and blocking façades.
//!
//! Each function describes one API operation. Nothing here performs I/O.

use crate::error::Result;
use crate::request::{ApiRequest, Call, StreamCall};
use crate::sse::{NamedEvents, SelfDescribing};
use crate::types::*;

#[derive(serde::Serialize)]
struct WatchQuery {
    timeout: Option<u64>,
}

pub(crate) mod wallets {
    use super::*;

    pub(crate) fn create(request: CreateWalletRequest) -> Result<Call<CreatedWallet>> {
        let mut req = ApiRequest::post("/v1/wallets");
        if request.name.is_some() {
            req = req.json(&request)?;
        }
        Ok(Call::record(req))
    }

    pub(crate) fn current() -> Result<Call<Wallet>> {
        Ok(Call::record(ApiRequest::get("/v1/wallets/current")))
    }

    pub(crate) fn update(request: UpdateWalletRequest) -> Result<Call<Wallet>> {
        Ok(Call::record(
            ApiRequest::patch("/v1/wallets/current").json(&request)?,
        ))
    }
}

pub(crate) mod keys {
    use super::*;

    pub(crate) fn rotate(slot: u8) -> Result<Call<RotatedKey>> {
        Ok(Call::record(ApiRequest::post(format!(
            "/v1/keys/{}/rotate",
            slot
        ))))
    }
}

pub(crate) mod invoices {
    use super::*;

    pub(crate) fn create(request: CreateInvoiceRequest) -> Result<Call<Invoice>> {
        Ok(Call::record(ApiRequest::post("/v1/invoices").json(&request)?))
    }

    pub(crate) fn list(query: ListQuery) -> Result<Call<Vec<Invoice>>> {
        Ok(Call::list(ApiRequest::get("/v1/invoices").query(&query)?))
    }

    pub(crate) fn get(id: impl Into<NumberOrHash>) -> Result<Call<Invoice>> {
        Ok(Call::record(ApiRequest::get(format!(
            "/v1/invoices/{}",
            id.into()
        ))))
    }

    pub(crate) fn create_for_wallet(
        request: CreateInvoiceForWalletRequest,
    ) -> Result<Call<AddressInvoice>> {
        Ok(Call::record(
            ApiRequest::post("/v1/invoices/for-wallet").json(&request)?,
        ))
    }

    pub(crate) fn create_for_address(
        request: CreateInvoiceForAddressRequest,
    ) -> Result<Call<AddressInvoice>> {
        Ok(Call::record(
            ApiRequest::post("/v1/invoices/for-address").json(&request)?,
        ))
    }

    pub(crate) fn watch(
        id: impl Into<NumberOrHash>,
        timeout: Option<u64>,
    ) -> Result<StreamCall<InvoiceEvent>> {
        let req = ApiRequest::get(format!("/v1/invoices/{}/events", id.into()))
            .query(&WatchQuery { timeout })?;
        Ok(StreamCall::new(req, NamedEvents::<Invoice>::new()))
    }
}

pub(crate) mod payments {
    use super::*;

    pub(crate) fn create(request: CreatePaymentRequest) -> Result<Call<Payment>> {
        Ok(Call::record(ApiRequest::post("/v1/payments").json(&request)?))
    }

    pub(crate) fn list(query: ListQuery) -> Result<Call<Vec<Payment>>> {
        Ok(Call::list(ApiRequest::get("/v1/payments").query(&query)?))
    }

    pub(crate) fn get(id: impl Into<NumberOrHash>) -> Result<Call<Payment>> {
        Ok(Call::record(ApiRequest::get(format!(
            "/v1/payments/{}",
            id.into()
        ))))
    }

    pub(crate) fn watch(
        id: impl Into<NumberOrHash>,
        timeout: Option<u64>,
    ) -> Result<StreamCall<PaymentEvent>> {
        let req = ApiRequest::get(format!("/v1/payments/{}/events", id.into()))
            .query(&WatchQuery { timeout })?;
        Ok(StreamCall::new(req, NamedEvents::<Payment>::new()))
    }
}

pub(crate) mod addresses {
    use super::*;

    pub(crate) fn create(request: CreateAddressRequest) -> Result<Call<Address>> {
        let mut req = ApiRequest::post("/v1/addresses");
        if request.address.is_some() {
            req = req.json(&request)?;
        }
        Ok(Call::record(req))
    }

    pub(crate) fn list() -> Result<Call<Vec<Address>>> {
        Ok(Call::list(ApiRequest::get("/v1/addresses")))
    }

    pub(crate) fn delete(address: &str) -> Result<Call<()>> {
        Ok(Call::empty(ApiRequest::delete(format!(
            "/v1/addresses/{}",
            address
        ))))
    }

    pub(crate) fn transfer(
        address: &str,
        request: TransferAddressRequest,
    ) -> Result<Call<TransferredAddress>> {
        Ok(Call::record(
            ApiRequest::post(format!("/v1/addresses/{}/transfer", address)).json(&request)?,
        ))
    }
}

pub(crate) mod transactions {
    use super::*;

    pub(crate) fn list(query: ListQuery) -> Result<Call<Vec<Transaction>>> {
        Ok(Call::list(ApiRequest::get("/v1/transactions").query(&query)?))
    }
}

pub(crate) mod webhooks {
    use super::*;

    pub(crate) fn create(request: CreateWebhookRequest) -> Result<Call<CreatedWebhook>> {
        Ok(Call::record(ApiRequest::post("/v1/webhooks").json(&request)?))
    }

    pub(crate) fn list() -> Result<Call<Vec<Webhook>>> {
        Ok(Call::list(ApiRequest::get("/v1/webhooks")))
    }

    pub(crate) fn delete(id: &str) -> Result<Call<()>> {
        Ok(Call::empty(ApiRequest::delete(format!("/v1/webhooks/{}", id))))
    }
}

pub(crate) mod events {
    use super::*;

    pub(crate) fn stream() -> Result<StreamCall<WalletEvent>> {
        Ok(StreamCall::new(ApiRequest::get("/v1/events"), SelfDescribing))
    }
}

pub(crate) mod backup {
    use super::*;

    pub(crate) fn recovery() -> Result<Call<RecoveryBackup>> {
        Ok(Call::record(ApiRequest::post("/v1/backup/recovery")))
    }

    pub(crate) fn passkey_begin() -> Result<Call<PasskeyChallenge>> {
        Ok(Call::record(ApiRequest::post("/v1/backup/passkey/begin")))
    }

    pub(crate) fn passkey_complete(request: PasskeyBackupRequest) -> Result<Call<()>> {
        Ok(Call::empty(
            ApiRequest::post("/v1/backup/passkey/complete").json(&request)?,
        ))
    }
}

pub(crate) mod restore {
    use super::*;

    pub(crate) fn recovery(request: RecoveryRestoreRequest) -> Result<Call<RestoredWallet>> {
        Ok(Call::record(
            ApiRequest::post("/v1/restore/recovery").json(&request)?,
        ))
    }

    pub(crate) fn passkey_begin() -> Result<Call<PasskeyChallenge>> {
        Ok(Call::record(ApiRequest::post("/v1/restore/passkey/begin")))
    }

    pub(crate) fn passkey_complete(request: PasskeyRestoreRequest) -> Result<Call<RestoredWallet>> {
        Ok(Call::record(
            ApiRequest::post("/v1/restore/passkey/complete").json(&request)?,
        ))
    }
}

pub(crate) mod l402 {
    use super::*;

    pub(crate) fn create_challenge(
        request: CreateL402ChallengeRequest,
    ) -> Result<Call<L402Challenge>> {
        Ok(Call::record(
            ApiRequest::post("/v1/l402/challenges").json(&request)?,
        ))
    }

    pub(crate) fn verify(request: VerifyL402Request) -> Result<Call<L402Verification>> {
        Ok(Call::record(ApiRequest::post("/v1/l402/verify").json(&request)?))
    }

    pub(crate) fn pay(request: PayL402Request) -> Result<Call<L402Payment>> {
        Ok(Call::record(ApiRequest::post("/v1/l402/pay").json(&request)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_wallet_create_without_name_has_no_body() {
        let call = wallets::create(CreateWalletRequest::default()).unwrap();
        assert_eq!(call.request.body, None);

        let call = wallets::create(CreateWalletRequest {
            name: Some("Test".into()),
        })
        .unwrap();
        assert_eq!(call.request.body, Some(json!({"name": "Test"})));
    }

    #[test]
    fn test_invoice_create_omits_memo() {
        let call = invoices::create(CreateInvoiceRequest::new(100)).unwrap();
        assert_eq!(call.request.method(), Method::POST);
        assert_eq!(call.request.path(), "/v1/invoices");
        assert_eq!(call.request.body, Some(json!({"amount": 100})));
    }

    #[test]
    fn test_number_or_hash_paths() {
        assert_eq!(invoices::get(42).unwrap().request.path(), "/v1/invoices/42");
        assert_eq!(
            payments::get("hash456").unwrap().request.path(),
            "/v1/payments/hash456"
        );
    }

    #[test]
    fn test_watch_timeout_query() {
        let call = invoices::watch(42, Some(120)).unwrap();
        assert_eq!(call.request.path(), "/v1/invoices/42/events");
        assert_eq!(
            call.request.query,
            vec![("timeout".to_string(), "120".to_string())]
        );

        let call = payments::watch("abc", None).unwrap();
        assert!(call.request.query.is_empty());
    }

    #[test]
    fn test_payment_body_is_camel_cased() {
        let call = payments::create(
            CreatePaymentRequest::new("user@ln.bot").with_idempotency_key("idem_1"),
        )
        .unwrap();
        assert_eq!(
            call.request.body,
            Some(json!({"target": "user@ln.bot", "idempotencyKey": "idem_1"}))
        );
    }

    #[test]
    fn test_l402_pay_body() {
        let call = l402::pay(PayL402Request::new("L402 mac:inv").with_max_fee(10)).unwrap();
        assert_eq!(
            call.request.body,
            Some(json!({"wwwAuthenticate": "L402 mac:inv", "maxFee": 10}))
        );
    }

    #[test]
    fn test_restore_paths_and_bodies() {
        let call = restore::recovery(RecoveryRestoreRequest {
            passphrase: "one two three".into(),
        })
        .unwrap();
        assert_eq!(call.request.path(), "/v1/restore/recovery");
        assert_eq!(call.request.body, Some(json!({"passphrase": "one two three"})));

        let call = restore::passkey_complete(PasskeyRestoreRequest {
            session_id: "s1".into(),
            assertion: json!({"id": "cred"}),
        })
        .unwrap();
        assert_eq!(call.request.path(), "/v1/restore/passkey/complete");
        assert_eq!(
            call.request.body,
            Some(json!({"sessionId": "s1", "assertion": {"id": "cred"}}))
        );

        let call = restore::passkey_begin().unwrap();
        assert_eq!(call.request.method(), Method::POST);
        assert_eq!(call.request.body, None);
    }

    #[test]
    fn test_l402_challenge_body() {
        let call = l402::create_challenge(
            CreateL402ChallengeRequest::new(100).with_expiry_seconds(3600),
        )
        .unwrap();
        assert_eq!(call.request.path(), "/v1/l402/challenges");
        assert_eq!(
            call.request.body,
            Some(json!({"amount": 100, "expirySeconds": 3600}))
        );
    }

    #[test]
    fn test_events_stream_path() {
        let call = events::stream().unwrap();
        assert_eq!(call.request.method(), Method::GET);
        assert_eq!(call.request.path(), "/v1/events");
        assert!(call.request.query.is_empty());
    }

    #[test]
    fn test_delete_has_no_body() {
        let call = webhooks::delete("wh_1").unwrap();
        assert_eq!(call.request.method(), Method::DELETE);
        assert_eq!(call.request.body, None);
    }
}
