use axum::response::{Html, Redirect};

use crate::core::error::PageResult;
use crate::features::session::Session;
use crate::shared::templates::render_page;

/// Sign-in page
pub async fn login_page(session: Session) -> PageResult<Html<String>> {
    let html = render_page("login.html", session.page_context().await)?;
    Ok(Html(html))
}

/// Any submission signs the session in; credentials are not checked.
///
/// The form body is never read, so an empty or arbitrary payload is accepted.
pub async fn login(session: Session) -> Redirect {
    session.login().await;
    Redirect::to("/dashboard")
}

pub async fn logout(session: Session) -> Redirect {
    session.logout().await;
    Redirect::to("/")
}
