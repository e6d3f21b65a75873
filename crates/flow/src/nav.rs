//! The navigation controller.
//!
//! Owns the current-screen pointer and the selected-restaurant context.
//! Transitions are unrestricted point-to-point; business rules that gate
//! specific moves (checkout validation, payment completion) live in the
//! orchestrator, not here.

use delights_core::Restaurant;
use serde::{Deserialize, Serialize};

/// The five screens of the ordering flow.
///
/// There is no terminal screen: payment completion navigates back to
/// [`Screen::Browse`], making the flow cyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Browse,
    Menu,
    Cart,
    Checkout,
    Payment,
}

impl core::fmt::Display for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Browse => write!(f, "browse"),
            Self::Menu => write!(f, "menu"),
            Self::Cart => write!(f, "cart"),
            Self::Checkout => write!(f, "checkout"),
            Self::Payment => write!(f, "payment"),
        }
    }
}

impl core::str::FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "browse" => Ok(Self::Browse),
            "menu" => Ok(Self::Menu),
            "cart" => Ok(Self::Cart),
            "checkout" => Ok(Self::Checkout),
            "payment" => Ok(Self::Payment),
            _ => Err(format!("unknown screen: {s}")),
        }
    }
}

/// Tracks which screen is active and which restaurant is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Navigator {
    current: Screen,
    selected_restaurant: Option<Restaurant>,
}

impl Navigator {
    /// A navigator starting on the browse screen with no selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Screen::Browse,
            selected_restaurant: None,
        }
    }

    /// The active screen.
    #[must_use]
    pub const fn current(&self) -> Screen {
        self.current
    }

    /// The restaurant chosen on the browse screen, if any.
    ///
    /// Retained across navigation until a new selection replaces it.
    #[must_use]
    pub const fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.selected_restaurant.as_ref()
    }

    /// Move to `screen`.
    pub fn goto(&mut self, screen: Screen) {
        self.current = screen;
    }

    /// Record `restaurant` as selected and move to the menu screen.
    ///
    /// This is a single compound transition so a menu screen can never be
    /// active without a selection behind it.
    pub fn select_restaurant(&mut self, restaurant: Restaurant) {
        self.selected_restaurant = Some(restaurant);
        self.current = Screen::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delights_core::RestaurantId;

    fn restaurant(id: i32, name: &str) -> Restaurant {
        Restaurant {
            id: RestaurantId::new(id),
            name: name.to_owned(),
            address: String::new(),
            image_url: String::new(),
            discount_label: String::new(),
            category: String::new(),
        }
    }

    #[test]
    fn test_starts_on_browse_with_no_selection() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Screen::Browse);
        assert!(nav.selected_restaurant().is_none());
    }

    #[test]
    fn test_goto_is_unrestricted() {
        let mut nav = Navigator::new();
        nav.goto(Screen::Payment);
        assert_eq!(nav.current(), Screen::Payment);
        nav.goto(Screen::Cart);
        assert_eq!(nav.current(), Screen::Cart);
    }

    #[test]
    fn test_select_restaurant_is_compound() {
        let mut nav = Navigator::new();
        nav.select_restaurant(restaurant(1, "Ăn Vặt RyTy"));

        assert_eq!(nav.current(), Screen::Menu);
        assert_eq!(
            nav.selected_restaurant().map(|r| r.name.as_str()),
            Some("Ăn Vặt RyTy")
        );
    }

    #[test]
    fn test_selection_retained_until_replaced() {
        let mut nav = Navigator::new();
        nav.select_restaurant(restaurant(1, "Ăn Vặt RyTy"));
        nav.goto(Screen::Browse);
        assert!(nav.selected_restaurant().is_some());

        nav.select_restaurant(restaurant(2, "Xuân Thu"));
        assert_eq!(
            nav.selected_restaurant().map(|r| r.id),
            Some(RestaurantId::new(2))
        );
    }

    #[test]
    fn test_screen_from_str_roundtrip() {
        for screen in [
            Screen::Browse,
            Screen::Menu,
            Screen::Cart,
            Screen::Checkout,
            Screen::Payment,
        ] {
            let parsed: Screen = screen.to_string().parse().expect("roundtrip");
            assert_eq!(parsed, screen);
        }
        assert!("lobby".parse::<Screen>().is_err());
    }
}
