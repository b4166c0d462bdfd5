use std::{future::Future, time::Instant};

use serde_json::Value;

use crate::constants::{
    FETCH_ERROR_PREFIX, HEALTH_ENDPOINT, MENU_ENDPOINT, UNKNOWN_ERROR_MSG,
};
use crate::data_types::{
    menu_data_types::error_message_of, HealthStatus, MenuError, MenuQuery, MenuResponse,
    SubmitOutcome,
};
use crate::errors::TransportError;
use crate::menu_form::MenuForm;
use crate::page::PageContext;
use crate::result_renderer::render_into;

/// Status and JSON body of a `POST /api/menu` exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuReply {
    pub status: u16,
    pub body: Value,
}

impl MenuReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One request/response exchange with the menu endpoint.
pub trait MenuTransport {
    fn post_menu(
        &self,
        query: &MenuQuery,
    ) -> impl Future<Output = Result<MenuReply, TransportError>> + Send;
}

pub struct HttpMenuClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMenuClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpMenuClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn check_health(&self) -> Result<HealthStatus, TransportError> {
        let now = Instant::now();
        let status = self
            .client
            .get(self.endpoint(HEALTH_ENDPOINT))
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;

        log::debug!("health check: {:.2?}", now.elapsed());
        Ok(status)
    }
}

impl MenuTransport for HttpMenuClient {
    async fn post_menu(&self, query: &MenuQuery) -> Result<MenuReply, TransportError> {
        let resp = self
            .client
            .post(self.endpoint(MENU_ENDPOINT))
            .json(query)
            .send()
            .await?;

        let status = resp.status().as_u16();
        // body is parsed before the status is looked at, error replies are JSON too
        let bytes = resp.bytes().await?;
        let body = serde_json::from_slice::<Value>(&bytes)?;

        Ok(MenuReply { status, body })
    }
}

/// Handles one submission of `form`: clears the page, sends the query and
/// leaves either rendered markup or an error message behind. The loading
/// overlay is shown for exactly the duration of the request.
pub async fn submit_menu_form<T: MenuTransport>(
    page: &mut PageContext,
    form: &MenuForm,
    transport: &T,
) -> SubmitOutcome {
    page.reset();

    let Some(query) = form.collect() else {
        return SubmitOutcome::Skipped;
    };

    let _loading = page.loading_overlay.show();
    let now = Instant::now();
    let reply = transport.post_menu(&query).await;
    log::debug!("menu request for {} on {}: {:.2?}", query.url, query.date, now.elapsed());

    let response = match reply {
        Ok(reply) if !reply.is_success() => {
            let msg = error_message_of(&reply.body)
                .unwrap_or_else(|| UNKNOWN_ERROR_MSG.to_string());
            log::info!("menu request failed with status {}", reply.status);

            page.error_display.set_text(msg.clone());
            // no stale menu next to an error, only the diagnostic dump if the server sent one
            match reply.body.get("raw_response").filter(|raw| !raw.is_null()) {
                Some(raw) => {
                    let diagnostics = MenuResponse::Error(MenuError {
                        error: msg.clone(),
                        raw_response: Some(raw.clone()),
                    });
                    render_into(&mut page.result_display, &diagnostics);
                }
                None => page.result_display.clear(),
            }
            return SubmitOutcome::ApplicationError(msg);
        }
        Ok(reply) => MenuResponse::from_value(reply.body),
        Err(e) => Err(e),
    };

    match response {
        Ok(response) => {
            render_into(&mut page.result_display, &response);
            SubmitOutcome::Rendered(response)
        }
        Err(e) => {
            log::warn!("menu request failed: {}", e);
            let msg = format!("{}{}", FETCH_ERROR_PREFIX, e);
            page.error_display.set_text(msg.clone());
            page.result_display.clear();
            SubmitOutcome::TransportError(msg)
        }
    }
}
