use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Thumbnails},
    error::{AppError, AppResult},
    models::Product,
    response::Meta,
    routes::params::{ListParams, ProductFilter, SortOrder},
    state::AppState,
};

pub const PRODUCT_NOT_FOUND: &str = "product not found";
const DUPLICATE_CODE: &str = "error creating product (check the 'code' field)";

pub struct ProductPage {
    pub items: Vec<Product>,
    pub meta: Meta,
}

/// Lists one page of products. Prev/next links are built under `base`.
pub async fn list_products(
    state: &AppState,
    params: &ListParams,
    base: &str,
) -> AppResult<ProductPage> {
    let mut finder = Products::find();
    finder = match params.filter() {
        Some(ProductFilter::Availability(status)) => finder.filter(Column::Status.eq(status)),
        Some(ProductFilter::Category(category)) => finder.filter(Column::Category.eq(category)),
        None => finder,
    };

    let total = finder.clone().count(&state.orm).await?;

    finder = match params.sort {
        Some(SortOrder::Asc) => finder.order_by_asc(Column::Price),
        Some(SortOrder::Desc) => finder.order_by_desc(Column::Price),
        None => finder.order_by_asc(Column::CreatedAt),
    };

    let items = finder
        .order_by_asc(Column::Id)
        .limit(params.limit)
        .offset(params.offset())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(total, params.page, params.limit).with_links(|page| params.link(base, page));
    Ok(ProductPage { items, meta })
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<Product> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Product::from)
        .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))
}

pub async fn create_product(state: &AppState, payload: CreateProductRequest) -> AppResult<Product> {
    payload.validate()?;
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        description: Set(payload.description),
        code: Set(payload.code),
        price: Set(payload.price),
        stock: Set(payload.stock),
        category: Set(payload.category),
        status: Set(payload.status),
        thumbnails: Set(Thumbnails(payload.thumbnails)),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await.map_err(write_error)?;
    tracing::info!(product_id = %product.id, code = %product.code, "product created");
    Ok(product.into())
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<Product> {
    payload.validate()?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(code) = payload.code {
        active.code = Set(code);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(thumbnails) = payload.thumbnails {
        active.thumbnails = Set(Thumbnails(thumbnails));
    }

    if !active.is_changed() {
        return Ok(existing.into());
    }

    let product = active.update(&state.orm).await.map_err(write_error)?;
    tracing::info!(product_id = %product.id, "product updated");
    Ok(product.into())
}

pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found(PRODUCT_NOT_FOUND));
    }

    tracing::info!(product_id = %id, "product deleted");
    Ok(())
}

fn write_error(err: DbErr) -> AppError {
    if matches!(err, DbErr::RecordNotUpdated) {
        return AppError::not_found(PRODUCT_NOT_FOUND);
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::bad_request(DUPLICATE_CODE),
        _ => AppError::Orm(err),
    }
}
