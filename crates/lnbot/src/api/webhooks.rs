//! Webhooks API.

use crate::endpoints::webhooks;
use crate::types::{CreateWebhookRequest, CreatedWebhook, Webhook};

resource_api! {
    /// Webhook registration and management.
    WebhooksApi {
        /// Register an endpoint (at most 10 per wallet).
        call fn create(request: CreateWebhookRequest) -> CreatedWebhook = webhooks::create;

        /// List registered webhooks.
        call fn list() -> Vec<Webhook> = webhooks::list;

        /// Delete a webhook.
        call fn delete(id: &str) -> () = webhooks::delete;
    }
}
