//! Template engine for the HTML presentation layer using Jinja2 syntax.

use minijinja::{Environment, Value};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Page templates bundled at compile time: (name, source)
const PAGES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/pages/base.html")),
    ("login.html", include_str!("../../../templates/pages/login.html")),
    (
        "dashboard.html",
        include_str!("../../../templates/pages/dashboard.html"),
    ),
    ("data.html", include_str!("../../../templates/pages/data.html")),
    (
        "add_data.html",
        include_str!("../../../templates/pages/add_data.html"),
    ),
    (
        "edit_data.html",
        include_str!("../../../templates/pages/edit_data.html"),
    ),
    ("stats.html", include_str!("../../../templates/pages/stats.html")),
    ("error.html", include_str!("../../../templates/pages/error.html")),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Format a number with two decimals, e.g. prices and averages
fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("money", money);

    for (name, source) in PAGES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with any serializable context.
///
/// HTML auto-escaping is on for every `.html` page; pass pre-rendered markup
/// through [`chart_fragment`] or `Value::from_safe_string`.
pub fn render_page<S: Serialize>(template_name: &str, ctx: S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Mark an already-rendered chart fragment as safe markup for a template
pub fn chart_fragment(html: String) -> Value {
    Value::from_safe_string(html)
}

#[cfg(test)]
fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}
