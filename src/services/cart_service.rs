//! Cart reads and the transactional read-modify-write used by every cart mutation.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    entity::{
        carts::{self, Entity as Carts},
        products::{self, Entity as Products},
    },
    error::{AppError, AppResult},
    line_items::{LineItem, LineItems},
    models::{Cart, CartWithProducts, ExpandedLineItem, Product},
    services::product_service::PRODUCT_NOT_FOUND,
    state::AppState,
};

pub const CART_NOT_FOUND: &str = "cart not found";
pub const ITEM_NOT_FOUND: &str = "product not found in cart";

pub async fn create_cart(state: &AppState) -> AppResult<Cart> {
    let cart = carts::ActiveModel {
        id: Set(Uuid::new_v4()),
        products: Set(LineItems::new()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(cart_id = %cart.id, "cart created");
    Ok(cart.into())
}

/// Loads a cart and resolves every line item's product reference.
pub async fn get_cart(state: &AppState, id: Uuid) -> AppResult<CartWithProducts> {
    let cart = Carts::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(CART_NOT_FOUND))?;

    let ids = cart.products.product_ids();
    let by_id: HashMap<Uuid, Product> = if ids.is_empty() {
        HashMap::new()
    } else {
        Products::find()
            .filter(products::Column::Id.is_in(ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|model| (model.id, Product::from(model)))
            .collect()
    };

    let products = cart
        .products
        .iter()
        .map(|item| ExpandedLineItem {
            product: by_id.get(&item.product).cloned(),
            quantity: item.quantity,
        })
        .collect();

    Ok(CartWithProducts {
        id: cart.id,
        products,
        created_at: cart.created_at.with_timezone(&chrono::Utc),
    })
}

pub async fn add_product(state: &AppState, cart_id: Uuid, product_id: Uuid) -> AppResult<Cart> {
    let product_exists = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .is_some();

    let (cart, quantity) = mutate_cart(state, cart_id, |items| {
        if !product_exists {
            return Err(AppError::not_found(PRODUCT_NOT_FOUND));
        }
        Ok(items.add(product_id))
    })
    .await?;

    tracing::debug!(%cart_id, %product_id, quantity, "product added to cart");
    Ok(cart)
}

pub async fn remove_product(state: &AppState, cart_id: Uuid, product_id: Uuid) -> AppResult<Cart> {
    let (cart, ()) = mutate_cart(state, cart_id, |items| {
        if items.remove(product_id) {
            Ok(())
        } else {
            Err(AppError::not_found(ITEM_NOT_FOUND))
        }
    })
    .await?;

    tracing::debug!(%cart_id, %product_id, "product removed from cart");
    Ok(cart)
}

/// `quantity` must already be validated as positive.
pub async fn update_quantity(
    state: &AppState,
    cart_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> AppResult<Cart> {
    let (cart, ()) = mutate_cart(state, cart_id, |items| {
        if items.set_quantity(product_id, quantity) {
            Ok(())
        } else {
            Err(AppError::not_found(ITEM_NOT_FOUND))
        }
    })
    .await?;

    tracing::debug!(%cart_id, %product_id, quantity, "cart quantity updated");
    Ok(cart)
}

pub async fn replace_products(
    state: &AppState,
    cart_id: Uuid,
    products: Vec<LineItem>,
) -> AppResult<Cart> {
    let (cart, ()) = mutate_cart(state, cart_id, |items| {
        items.replace_all(products);
        Ok(())
    })
    .await?;

    tracing::debug!(%cart_id, lines = cart.products.len(), "cart products replaced");
    Ok(cart)
}

pub async fn clear_cart(state: &AppState, cart_id: Uuid) -> AppResult<Cart> {
    let (cart, ()) = mutate_cart(state, cart_id, |items| {
        items.clear();
        Ok(())
    })
    .await?;

    tracing::debug!(%cart_id, "cart cleared");
    Ok(cart)
}

/// Runs `apply` against the cart's line items while holding a row lock, so
/// concurrent mutations of one cart are serialised instead of overwriting
/// each other. An error from `apply` rolls the transaction back.
async fn mutate_cart<T, F>(state: &AppState, cart_id: Uuid, apply: F) -> AppResult<(Cart, T)>
where
    F: FnOnce(&mut LineItems) -> AppResult<T>,
{
    let txn = state.orm.begin().await?;

    let cart = Carts::find_by_id(cart_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found(CART_NOT_FOUND))?;

    let mut items = cart.products.clone();
    let outcome = apply(&mut items)?;

    let mut active: carts::ActiveModel = cart.into();
    active.products = Set(items);
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    Ok((updated.into(), outcome))
}
