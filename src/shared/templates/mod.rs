//! HTML page templates.
//!
//! Pages live in `templates/pages/` and use Jinja2 syntax. They are compiled
//! into the binary so the server does not depend on its working directory.
//!
//! # Usage
//!
//! ```ignore
//! use minijinja::context;
//! use crate::shared::templates::render_page;
//!
//! let html = render_page("login.html", context! { notices => Vec::<String>::new() })?;
//! ```

pub mod engine;

pub use engine::{chart_fragment, render_page, TemplateError};
