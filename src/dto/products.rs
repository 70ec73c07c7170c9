use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

fn default_status() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        check_code(&self.code)?;
        check_price(self.price)?;
        check_stock(self.stock)
    }
}

impl UpdateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(code) = &self.code {
            check_code(code)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(stock) = self.stock {
            check_stock(stock)?;
        }
        Ok(())
    }
}

fn check_code(code: &str) -> AppResult<()> {
    if code.trim().is_empty() {
        return Err(AppError::bad_request("code must not be blank"));
    }
    Ok(())
}

fn check_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::bad_request("price must be a non-negative number"));
    }
    Ok(())
}

fn check_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::bad_request("stock must not be negative"));
    }
    Ok(())
}
