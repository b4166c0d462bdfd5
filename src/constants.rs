pub const MENU_ENDPOINT: &str = "/api/menu";
pub const HEALTH_ENDPOINT: &str = "/api/health";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

pub const UNKNOWN_ERROR_MSG: &str = "An unknown error occurred.";
pub const FETCH_ERROR_PREFIX: &str = "Fetch error: ";

pub const UNKNOWN_RESTAURANT: &str = "Neznámá restaurace";
pub const MISSING_FIELD: &str = "-";
pub const MISSING_PRICE: &str = "—";
pub const CURRENCY: &str = "Kč";
pub const NO_MENU_MSG: &str = "No menu found for the selected date.";
