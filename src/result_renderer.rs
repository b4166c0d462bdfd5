use serde_json::Value;

use crate::constants::{
    CURRENCY, MISSING_FIELD, MISSING_PRICE, NO_MENU_MSG, UNKNOWN_RESTAURANT,
};
use crate::data_types::{MenuError, MenuItem, MenuPayload, MenuResponse};
use crate::page::ResultDisplay;

/// Renders `response` and swaps it into the result display.
pub fn render_into(display: &mut ResultDisplay, response: &MenuResponse) {
    display.replace(render_result(response));
}

pub fn render_result(response: &MenuResponse) -> String {
    let body = match response {
        MenuResponse::Error(err) => error_to_html(err),
        MenuResponse::Menu { menu, raw } => menu_to_html(menu, raw),
    };

    format!("<div class=\"card\">\n{}</div>\n", body)
}

fn error_to_html(err: &MenuError) -> String {
    let mut html = format!("<p><strong>Chyba:</strong> {}</p>\n", escape_html(&err.error));

    if let Some(raw) = err.raw_response.as_ref() {
        html += &json_dump(raw);
    }

    html
}

fn menu_to_html(menu: &MenuPayload, raw: &Value) -> String {
    let restaurant = non_empty(menu.restaurant_name.as_deref()).unwrap_or(UNKNOWN_RESTAURANT);
    let date = non_empty(menu.date.as_deref()).unwrap_or(MISSING_FIELD);
    let day = non_empty(menu.day_of_week.as_deref()).unwrap_or(MISSING_FIELD);
    let source = menu.source_url.as_deref().unwrap_or_default();

    let mut html = String::new();

    // heading + meta block
    html += &format!(
        "<h2>{}{}</h2>\n",
        escape_html(restaurant),
        if menu.cached == Some(true) {
            " <small>(z cache)</small>"
        } else {
            ""
        }
    );
    html += &format!(
        "<p><strong>Datum:</strong> {} ({})</p>\n",
        escape_html(date),
        escape_html(day)
    );
    html += &format!(
        "<p><strong>Zdroj:</strong> <a href=\"{0}\" target=\"_blank\">{0}</a></p>\n",
        escape_html(source)
    );

    html += "<div>\n";
    if menu.menu_items.is_empty() {
        html += &format!("<p><em>{}</em></p>\n", NO_MENU_MSG);
    }
    for item in &menu.menu_items {
        html += &item_to_html(item);
    }
    html += "</div>\n";

    html += &json_dump(raw);
    html
}

fn item_to_html(item: &MenuItem) -> String {
    let category = item.category.as_deref().unwrap_or_default();
    let name = item.name.as_deref().unwrap_or_default();

    let mut html = String::from("<div class=\"menu-item\">\n");
    html += &format!("<strong>{}</strong><br/>\n", escape_html(category));
    html += &format!("<span>{}</span><br/>\n", escape_html(name));
    html += &format!("<span>{}</span>\n", escape_html(&weight_price_line(item)));

    if let Some(allergens) = item.allergens.as_ref().filter(|a| !a.is_empty()) {
        html += "<div><small>Alergeny:</small> ";
        for allergen in allergens {
            html += &format!("<span class=\"badge\">{}</span>", escape_html(allergen));
        }
        html += "</div>\n";
    }

    html += "</div>\n";
    html
}

/// `"300g | 89 Kč"`, or just the price part when the weight is missing.
pub fn weight_price_line(item: &MenuItem) -> String {
    let price = format_price(item.price);

    match non_empty(item.weight.as_deref()) {
        Some(weight) => format!("{} | {}", weight, price),
        None => price,
    }
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        // f64 Display drops the fraction of whole numbers: 89.0 -> "89"
        Some(value) => format!("{} {}", value, CURRENCY),
        None => MISSING_PRICE.to_string(),
    }
}

fn json_dump(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    format!("<pre>{}</pre>\n", escape_html(&pretty))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
