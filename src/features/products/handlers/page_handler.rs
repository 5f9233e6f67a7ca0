use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::core::error::{AppError, PageResult};
use crate::core::extractor::{PageForm, PageParams, PagePath};
use crate::features::products::dtos::ProductForm;
use crate::features::products::handlers::ProductState;
use crate::features::session::Session;
use crate::shared::constants::{
    NOTICE_PRODUCT_ADDED, NOTICE_PRODUCT_DELETED, NOTICE_PRODUCT_UPDATED,
};
use crate::shared::templates::render_page;
use crate::shared::types::PageQuery;

/// Paginated product table
pub async fn view_data(
    session: Session,
    State(state): State<ProductState>,
    PageParams(query): PageParams<PageQuery>,
) -> PageResult<Html<String>> {
    let page = state.catalog_service.list_page(&query).await?;

    let html = render_page(
        "data.html",
        context! {
            products => page.products,
            page => page.page,
            total_pages => page.total_pages,
            page_range => page.page_range,
            ..session.page_context().await
        },
    )?;

    Ok(Html(html))
}

/// Empty add form with brand suggestions
pub async fn add_form(
    session: Session,
    State(state): State<ProductState>,
) -> PageResult<Html<String>> {
    let brands = state.catalog_service.brand_suggestions().await?;

    let html = render_page(
        "add_data.html",
        context! {
            form => ProductForm::default(),
            brands,
            errors => Vec::<String>::new(),
            ..session.page_context().await
        },
    )?;

    Ok(Html(html))
}

pub async fn add_product(
    session: Session,
    State(state): State<ProductState>,
    PageForm(form): PageForm<ProductForm>,
) -> PageResult<Response> {
    let form = form.trimmed();
    let input = match form.to_input() {
        Ok(input) => input,
        Err(AppError::Validation(errors)) => {
            tracing::debug!("Rejected product submission: {:?}", errors);
            let brands = state.catalog_service.brand_suggestions().await?;
            let html = render_page(
                "add_data.html",
                context! {
                    form,
                    brands,
                    errors,
                    ..session.page_context().await
                },
            )?;
            return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    state.catalog_service.create(input).await?;
    session.notify(NOTICE_PRODUCT_ADDED).await;

    Ok(Redirect::to("/view_data").into_response())
}

/// Edit form pre-filled from the stored record; unknown ids render a 404 page
pub async fn edit_form(
    session: Session,
    State(state): State<ProductState>,
    PagePath(product_id): PagePath<i64>,
) -> PageResult<Html<String>> {
    let product = state.catalog_service.get(product_id).await?;

    let html = render_page(
        "edit_data.html",
        context! {
            product_id,
            form => ProductForm::from(&product),
            errors => Vec::<String>::new(),
            ..session.page_context().await
        },
    )?;

    Ok(Html(html))
}

pub async fn update_product(
    session: Session,
    State(state): State<ProductState>,
    PagePath(product_id): PagePath<i64>,
    PageForm(form): PageForm<ProductForm>,
) -> PageResult<Response> {
    let form = form.trimmed();
    let input = match form.to_input() {
        Ok(input) => input,
        Err(AppError::Validation(errors)) => {
            let html = render_page(
                "edit_data.html",
                context! {
                    product_id,
                    form,
                    errors,
                    ..session.page_context().await
                },
            )?;
            return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    if state.catalog_service.update(product_id, input).await? {
        session.notify(NOTICE_PRODUCT_UPDATED).await;
    }

    Ok(Redirect::to("/view_data").into_response())
}

pub async fn delete_product(
    session: Session,
    State(state): State<ProductState>,
    PagePath(product_id): PagePath<i64>,
) -> PageResult<Redirect> {
    if state.catalog_service.delete(product_id).await? {
        session.notify(NOTICE_PRODUCT_DELETED).await;
    }

    Ok(Redirect::to("/view_data"))
}
