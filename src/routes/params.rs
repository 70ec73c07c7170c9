use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

pub const API_DEFAULT_LIMIT: u64 = 10;
pub const VIEW_DEFAULT_LIMIT: u64 = 12;
pub const MAX_LIMIT: u64 = 100;

/// Largest offset the database accepts (a signed 64-bit `OFFSET`).
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Raw listing parameters. Kept as strings so that empty values coming from
/// HTML forms behave like absent ones.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Items per page.
    pub limit: Option<String>,
    /// Page number, starting at 1.
    pub page: Option<String>,
    /// `asc` or `desc`, ordering by price.
    pub sort: Option<String>,
    /// `true`/`false` filters on availability, anything else on exact category.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(raw: &str) -> AppResult<Self> {
        match raw {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::bad_request(format!(
                "sort must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Availability(bool),
    Category(String),
}

impl ProductFilter {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => ProductFilter::Availability(true),
            "false" => ProductFilter::Availability(false),
            category => ProductFilter::Category(category.to_string()),
        }
    }
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub limit: u64,
    pub page: u64,
    pub sort: Option<SortOrder>,
    /// The `query` value as received, re-embedded in page links.
    pub query: Option<String>,
}

#[derive(Serialize)]
struct LinkParams<'a> {
    page: u64,
    limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
}

impl ProductQuery {
    pub fn normalize(&self, default_limit: u64) -> AppResult<ListParams> {
        let limit = positive(present(&self.limit), "limit")?
            .unwrap_or(default_limit)
            .min(MAX_LIMIT);
        let page = positive(present(&self.page), "page")?.unwrap_or(1);
        if (page - 1).checked_mul(limit).is_none_or(|offset| offset > MAX_OFFSET) {
            return Err(AppError::bad_request(format!("page out of range: {page}")));
        }
        let sort = present(&self.sort)
            .map(|raw| SortOrder::parse(raw.trim()))
            .transpose()?;
        let query = present(&self.query).map(str::to_string);
        Ok(ListParams {
            limit,
            page,
            sort,
            query,
        })
    }
}

impl ListParams {
    pub fn filter(&self) -> Option<ProductFilter> {
        self.query.as_deref().map(ProductFilter::parse)
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Link to `page` under `base`, keeping limit, sort and query.
    pub fn link(&self, base: &str, page: u64) -> String {
        let params = LinkParams {
            page,
            limit: self.limit,
            sort: self.sort,
            query: self.query.as_deref(),
        };
        match serde_urlencoded::to_string(&params) {
            Ok(qs) => format!("{base}?{qs}"),
            Err(_) => format!("{base}?page={page}&limit={}", self.limit),
        }
    }
}

/// The raw value, or `None` when it is missing or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn positive(value: Option<&str>, name: &str) -> AppResult<Option<u64>> {
    value
        .map(|raw| match raw.trim().parse::<u64>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(AppError::bad_request(format!(
                "{name} must be a positive integer, got '{raw}'"
            ))),
        })
        .transpose()
}
