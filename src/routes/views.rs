use axum::{
    Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::{
    error::{AppResult, parse_id},
    routes::params::{ProductQuery, VIEW_DEFAULT_LIMIT},
    services::{cart_service, product_service},
    state::AppState,
};

pub const VIEW_PRODUCTS_PATH: &str = "/products";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(products_page))
        .route("/carts/{id}", get(cart_page))
}

pub async fn products_page(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Response {
    let result: AppResult<String> = async {
        let Query(query) = query?;
        let params = query.normalize(VIEW_DEFAULT_LIMIT)?;
        let page = product_service::list_products(&state, &params, VIEW_PRODUCTS_PATH).await?;
        state.views.products(&page.items, &page.meta)
    }
    .await;
    respond(&state, result)
}

pub async fn cart_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result: AppResult<String> = async {
        let id = parse_id(&id)?;
        let cart = cart_service::get_cart(&state, id).await?;
        state.views.cart(&cart)
    }
    .await;
    respond(&state, result)
}

fn respond(state: &AppState, result: AppResult<String>) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(err) => state.views.error_page(&err),
    }
}
