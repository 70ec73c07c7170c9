//! Server-side HTML rendering with Handlebars.
//!
//! Templates are embedded at compile time and registered once at startup; a
//! template that fails to parse aborts the boot instead of the first request.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use handlebars::{Handlebars, TemplateError, handlebars_helper};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{CartWithProducts, Product},
    response::Meta,
};

const TEMPLATES: &[(&str, &str)] = &[
    ("products", include_str!("../templates/products.hbs")),
    ("cart", include_str!("../templates/cart.hbs")),
    ("error", include_str!("../templates/error.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../templates/partials/header.hbs")),
    ("footer", include_str!("../templates/partials/footer.hbs")),
];

handlebars_helper!(multiply: |a: f64, b: f64| format!("{:.2}", a * b));
handlebars_helper!(money: |a: f64| format!("{:.2}", a));

pub struct Views {
    registry: Handlebars<'static>,
}

#[derive(Serialize)]
struct ProductsPage<'a> {
    title: &'static str,
    products: &'a [Product],
    page: &'a Meta,
}

#[derive(Serialize)]
struct CartPage<'a> {
    title: &'static str,
    cart: &'a CartWithProducts,
    total: f64,
}

#[derive(Serialize)]
struct ErrorPage<'a> {
    title: &'static str,
    error: &'a str,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_helper("multiply", Box::new(multiply));
        registry.register_helper("money", Box::new(money));
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    pub fn products(&self, products: &[Product], page: &Meta) -> AppResult<String> {
        let data = ProductsPage {
            title: "Products",
            products,
            page,
        };
        Ok(self.registry.render("products", &data)?)
    }

    pub fn cart(&self, cart: &CartWithProducts) -> AppResult<String> {
        let data = CartPage {
            title: "Cart",
            cart,
            total: cart.total(),
        };
        Ok(self.registry.render("cart", &data)?)
    }

    /// Renders the error template with the status matching `err`.
    pub fn error_page(&self, err: &AppError) -> Response {
        err.log();
        let status = err.status();
        let message = match err {
            AppError::Orm(_) | AppError::Render(_) => {
                "Something went wrong while loading this page".to_string()
            }
            other => other.to_string(),
        };
        let data = ErrorPage {
            title: "Error",
            error: &message,
        };
        match self.registry.render("error", &data) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_err) => {
                tracing::error!(error = %render_err, "error template failed to render");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpandedLineItem;
    use chrono::Utc;
    use uuid::Uuid;

    fn product(title: &str, price: f64) -> Product {
        Product {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{title} description"),
            code: format!("{title}-code"),
            price,
            stock: 5,
            category: "misc".into(),
            status: true,
            thumbnails: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn templates_register() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn products_page_lists_items_and_links() {
        let views = Views::new().unwrap();
        let meta = Meta::new(30, 2, 12).with_links(|p| format!("/products?page={p}"));
        let html = views
            .products(&[product("Lamp", 20.0), product("Chair", 45.5)], &meta)
            .unwrap();

        assert!(html.contains("Lamp"));
        assert!(html.contains("Chair"));
        assert!(html.contains("45.50"));
        assert!(html.contains("Page 2 of 3"));
        assert!(html.contains("rel=\"prev\""));
        assert!(html.contains("rel=\"next\""));
    }

    #[test]
    fn empty_products_page_says_so() {
        let views = Views::new().unwrap();
        let html = views.products(&[], &Meta::new(0, 1, 12)).unwrap();
        assert!(html.contains("No products found"));
        assert!(!html.contains("rel=\"next\""));
    }

    #[test]
    fn cart_page_shows_subtotals_and_total() {
        let views = Views::new().unwrap();
        let cart = CartWithProducts {
            id: Uuid::new_v4(),
            products: vec![
                ExpandedLineItem {
                    product: Some(product("Pen", 1.25)),
                    quantity: 4,
                },
                ExpandedLineItem {
                    product: None,
                    quantity: 2,
                },
            ],
            created_at: Utc::now(),
        };
        let html = views.cart(&cart).unwrap();

        assert!(html.contains("Pen"));
        assert!(html.contains("5.00"));
        assert!(html.contains("no longer available"));
        assert!(html.contains(&cart.id.to_string()));
    }

    #[test]
    fn error_page_keeps_status() {
        let views = Views::new().unwrap();
        let response = views.error_page(&AppError::not_found("cart not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = views.error_page(&AppError::InvalidId("abc".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_template_escapes_message() {
        let views = Views::new().unwrap();
        let html = views
            .registry
            .render(
                "error",
                &ErrorPage {
                    title: "Error",
                    error: "<b>cart</b> not found",
                },
            )
            .unwrap();
        assert!(html.contains("&lt;b&gt;cart&lt;/b&gt; not found"));
    }
}
