use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// JSON envelope shared by every API route: `{status, message?, payload?}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            payload: Some(payload),
        }
    }

    pub fn success_with_message(message: impl Into<String>, payload: T) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            payload: Some(payload),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            payload: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            payload: None,
        }
    }
}

/// Pagination metadata, flattened next to the payload of list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub total_docs: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub page: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl Meta {
    /// `page` and `limit` must be at least 1. An empty collection still has one page.
    pub fn new(total_docs: u64, page: u64, limit: u64) -> Self {
        let total_pages = total_docs.div_ceil(limit).max(1);
        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;
        Self {
            total_docs,
            limit,
            total_pages,
            page,
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
            prev_link: None,
            next_link: None,
        }
    }

    pub fn with_links(mut self, link: impl Fn(u64) -> String) -> Self {
        self.prev_link = self.prev_page.map(&link);
        self.next_link = self.next_page.map(&link);
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub status: Status,
    pub payload: Vec<T>,
    #[serde(flatten)]
    pub meta: Meta,
}

impl<T: Serialize> Paginated<T> {
    pub fn success(payload: Vec<T>, meta: Meta) -> Self {
        Self {
            status: Status::Success,
            payload,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_has_a_single_page() {
        let meta = Meta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_prev_page);
        assert!(!meta.has_next_page);
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn has_next_page_iff_total_exceeds_page_times_limit() {
        for total in 0..40u64 {
            for limit in 1..7u64 {
                for page in 1..10u64 {
                    let meta = Meta::new(total, page, limit);
                    assert_eq!(
                        meta.has_next_page,
                        total > page * limit,
                        "total={total} limit={limit} page={page}"
                    );
                }
            }
        }
    }

    #[test]
    fn middle_page_points_both_ways() {
        let meta = Meta::new(25, 2, 10).with_links(|p| format!("/x?page={p}"));
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.prev_page, Some(1));
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.prev_link.as_deref(), Some("/x?page=1"));
        assert_eq!(meta.next_link.as_deref(), Some("/x?page=3"));
    }

    #[test]
    fn last_page_has_no_next_link() {
        let meta = Meta::new(20, 2, 10).with_links(|p| format!("/x?page={p}"));
        assert!(!meta.has_next_page);
        assert_eq!(meta.next_link, None);
    }

    #[test]
    fn list_envelope_is_flat() {
        let body = Paginated::success(vec![1, 2], Meta::new(2, 1, 10));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["payload"], serde_json::json!([1, 2]));
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["hasNextPage"], false);
        assert!(value["nextLink"].is_null());
    }

    #[test]
    fn message_only_envelope_omits_payload() {
        let value = serde_json::to_value(ApiResponse::error("nope")).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "error", "message": "nope" }));
    }
}
