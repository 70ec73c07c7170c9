use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{ReplaceCartRequest, UpdateQuantityRequest},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    line_items::LineItem,
    models::{Cart, CartWithProducts, ExpandedLineItem, Product},
    response::{ApiResponse, Meta, Paginated, Status},
    routes::{carts, health, params::SortOrder, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        carts::create_cart,
        carts::get_cart,
        carts::add_product,
        carts::remove_product,
        carts::replace_products,
        carts::update_quantity,
        carts::clear_cart
    ),
    components(
        schemas(
            Product,
            Cart,
            CartWithProducts,
            ExpandedLineItem,
            LineItem,
            CreateProductRequest,
            UpdateProductRequest,
            ReplaceCartRequest,
            UpdateQuantityRequest,
            SortOrder,
            Status,
            Meta,
            ApiResponse<Product>,
            ApiResponse<Cart>,
            ApiResponse<CartWithProducts>,
            Paginated<Product>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Carts", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
