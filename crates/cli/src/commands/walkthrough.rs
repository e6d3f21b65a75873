//! Scripted end-to-end order.
//!
//! Drives one complete flow: pick a restaurant, fill a cart, check out,
//! pay, and wait for the success countdown to return home.

use std::error::Error;
use std::time::Duration;

use delights_flow::{
    DeliveryDraft, FlowConfig, NewCartLine, PaymentMethod, Screen, SessionHandle,
};

use crate::fixtures;
use crate::render::render;

/// How many polls to allow before declaring the run stuck.
const MAX_POLLS: u32 = 600;

pub async fn run(fast: bool) -> Result<(), Box<dyn Error>> {
    let mut config = FlowConfig::from_env()?;
    if fast {
        config.payment_delay = Duration::from_millis(200);
        config.countdown_tick = Duration::from_millis(100);
    }

    let restaurants = fixtures::restaurants();
    let menu = fixtures::menu();
    let restaurant = restaurants.first().cloned().ok_or("no fixture restaurants")?;
    let first = menu.first().cloned().ok_or("no fixture menu items")?;
    let second = menu.get(1).cloned().ok_or("no fixture menu items")?;

    let handle = SessionHandle::spawn(config.clone());

    handle.select_restaurant(restaurant.clone())?;
    render(&handle.snapshot().await?, &restaurants, &menu);

    handle.add_to_cart(NewCartLine::from_menu_item(&first, restaurant.name.clone()))?;
    handle.add_to_cart(NewCartLine::from_menu_item(&second, restaurant.name.clone()))?;
    handle.add_to_cart(NewCartLine::from_menu_item(&second, restaurant.name.clone()))?;
    handle.navigate(Screen::Cart)?;
    render(&handle.snapshot().await?, &restaurants, &menu);

    handle.navigate(Screen::Checkout)?;
    handle.submit_delivery_details(DeliveryDraft {
        recipient_name: "Nguyễn Văn A".to_owned(),
        phone: "0905123456".to_owned(),
        address: "161/3 Thành Thủy, Đà Nẵng".to_owned(),
        driver_note: "Gọi trước khi giao".to_owned(),
    })?;
    render(&handle.snapshot().await?, &restaurants, &menu);

    handle.initiate_payment(PaymentMethod::CashOnDelivery)?;
    render(&handle.snapshot().await?, &restaurants, &menu);

    // Poll until the countdown brings the flow back to browse.
    let mut last_screen = Screen::Payment;
    for _ in 0..MAX_POLLS {
        tokio::time::sleep(config.countdown_tick).await;
        let snapshot = handle.snapshot().await?;
        if snapshot.screen != last_screen || snapshot.screen == Screen::Payment {
            render(&snapshot, &restaurants, &menu);
        }
        last_screen = snapshot.screen;
        if snapshot.screen == Screen::Browse {
            return Ok(());
        }
    }
    Err("walkthrough did not complete".into())
}
