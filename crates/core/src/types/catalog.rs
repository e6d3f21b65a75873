//! Restaurant and menu catalog types.
//!
//! The catalog is static fixture data owned by the front-end; these types
//! only describe its shape so the flow engine can carry a selection around.

use serde::{Deserialize, Serialize};

use super::id::{ItemId, RestaurantId};
use super::price::Price;

/// A restaurant shown on the browse screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub image_url: String,
    /// Promotion badge shown on the restaurant card, e.g. "Mã giảm 100k".
    pub discount_label: String,
    pub category: String,
}

/// A dish or drink on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub unit_price: Price,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_serde_roundtrip() {
        let item = MenuItem {
            id: ItemId::from("1"),
            name: "Kem flan (hộp)".to_owned(),
            description: "Kem flan thơm ngon mát lạnh".to_owned(),
            unit_price: Price::new(10_000),
            image_url: "https://example.com/flan.jpg".to_owned(),
        };
        let json = serde_json::to_string(&item).expect("serialize");
        let parsed: MenuItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, item);
    }
}
