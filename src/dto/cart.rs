use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    line_items::LineItem,
};

/// Body of the bulk replace endpoint: `{"products": [...]}` or a bare array.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceCartRequest {
    #[schema(value_type = Vec<LineItem>)]
    pub products: Value,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// Positive integer, as a JSON number or numeric string.
    #[serde(default)]
    #[schema(value_type = i32)]
    pub quantity: Value,
}

/// Checks that the body carries a sequence of `{product, quantity}` pairs.
pub fn parse_line_items(body: Value) -> AppResult<Vec<LineItem>> {
    let list = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(items)) => items,
            _ => return Err(AppError::bad_request("expected an array of products")),
        },
        _ => return Err(AppError::bad_request("expected an array of products")),
    };

    list.into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let item: LineItem = serde_json::from_value(raw).map_err(|err| {
                AppError::bad_request(format!("invalid line item at index {index}: {err}"))
            })?;
            if item.quantity < 1 {
                return Err(AppError::bad_request(format!(
                    "invalid line item at index {index}: quantity must be at least 1"
                )));
            }
            Ok(item)
        })
        .collect()
}

/// Accepts `3`, `3.0` or `"3"`; rejects zero, negatives, fractions and anything non-numeric.
pub fn parse_quantity(value: &Value) -> AppResult<i32> {
    let invalid = || AppError::bad_request("a valid positive numeric quantity is required");
    let number = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
                .ok_or_else(invalid)?,
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if number < 1 {
        return Err(invalid());
    }
    i32::try_from(number).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn accepts_wrapped_and_bare_arrays() {
        let product = Uuid::new_v4();
        let wrapped = parse_line_items(json!({ "products": [{ "product": product, "quantity": 2 }] }))
            .unwrap();
        let bare = parse_line_items(json!([{ "product": product, "quantity": 2 }])).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[0].quantity, 2);
    }

    #[test]
    fn rejects_non_sequence_bodies() {
        for body in [
            json!({ "products": "nope" }),
            json!({ "products": { "product": "x" } }),
            json!({}),
            json!("products"),
            json!(42),
        ] {
            assert!(matches!(parse_line_items(body), Err(AppError::BadRequest(_))));
        }
    }

    #[test]
    fn rejects_malformed_items() {
        assert!(parse_line_items(json!([{ "product": "not-a-uuid" }])).is_err());
        assert!(parse_line_items(json!([{ "product": Uuid::new_v4(), "quantity": 0 }])).is_err());
    }

    #[test]
    fn quantity_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_quantity(&json!(3)).unwrap(), 3);
        assert_eq!(parse_quantity(&json!(4.0)).unwrap(), 4);
        assert_eq!(parse_quantity(&json!(" 5 ")).unwrap(), 5);
    }

    #[test]
    fn quantity_rejects_invalid_values() {
        for value in [
            json!(0),
            json!(-2),
            json!(1.5),
            json!("abc"),
            json!(null),
            json!(true),
            json!([1]),
            json!(10_000_000_000i64),
        ] {
            assert!(parse_quantity(&value).is_err(), "{value} should be rejected");
        }
    }
}
