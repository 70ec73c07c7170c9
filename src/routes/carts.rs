use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{post, put},
};
use serde_json::Value;

use crate::{
    dto::cart::{ReplaceCartRequest, UpdateQuantityRequest, parse_line_items, parse_quantity},
    error::{AppResult, parse_id},
    models::{Cart, CartWithProducts},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route("/{id}", put(replace_products).get(get_cart).delete(clear_cart))
        .route("/{id}/product/{product_id}", post(add_product))
        .route(
            "/{id}/products/{product_id}",
            put(update_quantity).delete(remove_product),
        )
}

#[utoipa::path(
    post,
    path = "/api/carts",
    responses(
        (status = 201, description = "Empty cart created", body = ApiResponse<Cart>),
    ),
    tag = "Carts"
)]
pub async fn create_cart(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<Cart>>)> {
    let cart = cart_service::create_cart(&state).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(cart))))
}

#[utoipa::path(
    get,
    path = "/api/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Cart with expanded products", body = ApiResponse<CartWithProducts>),
        (status = 400, description = "Malformed cart id"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartWithProducts>>> {
    let id = parse_id(&id)?;
    let cart = cart_service::get_cart(&state, id).await?;
    Ok(Json(ApiResponse::success(cart)))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/product/{product_id}",
    params(
        ("id" = String, Path, description = "Cart ID"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Quantity incremented or line item appended", body = ApiResponse<Cart>),
        (status = 404, description = "Cart or product not found"),
    ),
    tag = "Carts"
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let id = parse_id(&id)?;
    let product_id = parse_id(&product_id)?;
    let cart = cart_service::add_product(&state, id, product_id).await?;
    Ok(Json(ApiResponse::success(cart)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}/products/{product_id}",
    params(
        ("id" = String, Path, description = "Cart ID"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Line item removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Cart not found, or product not in cart"),
    ),
    tag = "Carts"
)]
pub async fn remove_product(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let id = parse_id(&id)?;
    let product_id = parse_id(&product_id)?;
    cart_service::remove_product(&state, id, product_id).await?;
    Ok(Json(ApiResponse::message("product removed from cart")))
}

#[utoipa::path(
    put,
    path = "/api/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    request_body = ReplaceCartRequest,
    responses(
        (status = 200, description = "Line items replaced", body = ApiResponse<Cart>),
        (status = 400, description = "Body is not a sequence of line items"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn replace_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let id = parse_id(&id)?;
    let Json(body) = body?;
    let items = parse_line_items(body)?;
    let cart = cart_service::replace_products(&state, id, items).await?;
    Ok(Json(ApiResponse::success_with_message("cart updated", cart)))
}

#[utoipa::path(
    put,
    path = "/api/carts/{id}/products/{product_id}",
    params(
        ("id" = String, Path, description = "Cart ID"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity set", body = ApiResponse<Cart>),
        (status = 400, description = "Quantity is not a positive number"),
        (status = 404, description = "Cart not found, or product not in cart"),
    ),
    tag = "Carts"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
    payload: Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let id = parse_id(&id)?;
    let product_id = parse_id(&product_id)?;
    let Json(payload) = payload?;
    let quantity = parse_quantity(&payload.quantity)?;
    let cart = cart_service::update_quantity(&state, id, product_id, quantity).await?;
    Ok(Json(ApiResponse::success_with_message("quantity updated", cart)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "All line items removed", body = ApiResponse<Cart>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let id = parse_id(&id)?;
    let cart = cart_service::clear_cart(&state, id).await?;
    Ok(Json(ApiResponse::success_with_message("cart emptied", cart)))
}
