pub mod menu_data_types;

pub use menu_data_types::{MenuError, MenuItem, MenuPayload, MenuQuery, MenuResponse};

use serde::{Deserialize, Serialize};

/// Reply of `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// How a submission ended, as seen from the page.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A field was empty; nothing was sent.
    Skipped,
    /// The payload was handed to the renderer (this includes a 2xx body that
    /// carries an `error` field).
    Rendered(MenuResponse),
    /// Non-2xx status, message shown in the error display.
    ApplicationError(String),
    /// The request itself failed, message shown in the error display.
    TransportError(String),
}
