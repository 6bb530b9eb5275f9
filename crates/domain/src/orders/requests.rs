//! Inbound request schemas for the order entity.

use serde::Deserialize;
use validator::Validate;

/// Body of an order create. The order id is never client-supplied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 20))]
    pub customer_name: String,
    #[validate(range(min = 1))]
    pub order_item_count: u32,
}

/// Body of an order delete: the primary key only.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteOrderRequest {
    #[validate(custom(function = crate::validate::uuid_v4))]
    pub order_id: String,
}

/// Key of an order get, carried in the `order_id` request header.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetOrderRequest {
    #[validate(custom(function = crate::validate::uuid_v4))]
    pub order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_create_request_passes() {
        let req = CreateOrderRequest {
            customer_name: "Alice".to_string(),
            order_item_count: 5,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_customer_name_fails() {
        let req = CreateOrderRequest {
            customer_name: String::new(),
            order_item_count: 5,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn over_long_customer_name_fails() {
        let req = CreateOrderRequest {
            customer_name: "a".repeat(21),
            order_item_count: 5,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_item_count_fails() {
        let req = CreateOrderRequest {
            customer_name: "Alice".to_string(),
            order_item_count: 0,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn delete_request_requires_v4_uuid() {
        let good = DeleteOrderRequest {
            order_id: "1bc634f1-3a11-41e8-a0a2-58da4717fb7b".to_string(),
        };
        assert!(good.validate().is_ok());

        let bad = DeleteOrderRequest {
            order_id: "not-a-uuid".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
