//! Interactive ordering session.
//!
//! Reads commands from stdin, translates them into flow events, and
//! renders a snapshot after each one. Timers (gateway delay, success
//! countdown) run for real, so `state` after paying shows the flow moving
//! on its own.

use std::error::Error;

use tokio::io::{AsyncBufReadExt, BufReader};

use delights_core::{ItemId, MenuItem, Restaurant, RestaurantId};
use delights_flow::{
    DeliveryDraft, FlowConfig, NewCartLine, PaymentMethod, Screen, SessionHandle,
};

use crate::fixtures;
use crate::render::render;

const HELP: &str = "\
Commands:
  restaurants                         list restaurants
  select <restaurant-id>              open a restaurant's menu
  menu                                show the menu
  add <item-id>                       add one unit to the cart
  qty <item-id> <n>                   set a line's quantity (0 removes)
  remove <item-id>                    remove a line
  go <browse|menu|cart|checkout|payment>
  details <name> | <phone> | <address> [| note]
  pay [cod|momo|bank|card]            initiate payment
  home                                return home now (skip the countdown)
  state                               render the current screen
  json                                dump the snapshot as JSON
  quit";

pub async fn run() -> Result<(), Box<dyn Error>> {
    let config = FlowConfig::from_env()?;
    let restaurants = fixtures::restaurants();
    let menu = fixtures::menu();
    let handle = SessionHandle::spawn(config);

    println!("Shoppe Delights — gõ `help` để xem lệnh");
    render(&handle.snapshot().await?, &restaurants, &menu);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit") {
            break;
        }
        match dispatch(input, &handle, &restaurants, &menu).await {
            Ok(true) => render(&handle.snapshot().await?, &restaurants, &menu),
            Ok(false) => {}
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

/// Handle one input line. `Ok(true)` means the screen should re-render.
async fn dispatch(
    input: &str,
    handle: &SessionHandle,
    restaurants: &[Restaurant],
    menu: &[MenuItem],
) -> Result<bool, String> {
    let (command, rest) = match input.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command {
        "help" => {
            println!("{HELP}");
            Ok(false)
        }
        "state" => Ok(true),
        "json" => {
            let snapshot = handle.snapshot().await.map_err(|e| e.to_string())?;
            let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
            println!("{json}");
            Ok(false)
        }
        "restaurants" => {
            handle
                .navigate(Screen::Browse)
                .map_err(|e| e.to_string())?;
            Ok(true)
        }
        "select" => {
            let id: i32 = rest
                .parse()
                .map_err(|_| format!("usage: select <restaurant-id>, got {rest:?}"))?;
            let restaurant = restaurants
                .iter()
                .find(|r| r.id == RestaurantId::new(id))
                .ok_or_else(|| format!("no restaurant with id {id}"))?;
            handle
                .select_restaurant(restaurant.clone())
                .map_err(|e| e.to_string())?;
            Ok(true)
        }
        "menu" => {
            handle.navigate(Screen::Menu).map_err(|e| e.to_string())?;
            Ok(true)
        }
        "add" => {
            let item = find_item(menu, rest)?;
            let restaurant_name = handle
                .snapshot()
                .await
                .map_err(|e| e.to_string())?
                .selected_restaurant
                .map_or_else(|| "Unknown Restaurant".to_owned(), |r| r.name);
            handle
                .add_to_cart(NewCartLine::from_menu_item(item, restaurant_name))
                .map_err(|e| e.to_string())?;
            Ok(true)
        }
        "qty" => {
            let (id, quantity) = rest
                .split_once(' ')
                .ok_or_else(|| "usage: qty <item-id> <n>".to_owned())?;
            let quantity: i64 = quantity
                .trim()
                .parse()
                .map_err(|_| "usage: qty <item-id> <n>".to_owned())?;
            handle
                .update_quantity(ItemId::from(id.trim()), quantity)
                .map_err(|e| e.to_string())?;
            Ok(true)
        }
        "remove" => {
            handle
                .update_quantity(ItemId::from(rest), 0)
                .map_err(|e| e.to_string())?;
            Ok(true)
        }
        "go" => {
            let screen: Screen = rest.parse()?;
            handle.navigate(screen).map_err(|e| e.to_string())?;
            Ok(true)
        }
        "details" => {
            let mut fields = rest.split('|').map(str::trim);
            let draft = DeliveryDraft {
                recipient_name: fields.next().unwrap_or_default().to_owned(),
                phone: fields.next().unwrap_or_default().to_owned(),
                address: fields.next().unwrap_or_default().to_owned(),
                driver_note: fields.next().unwrap_or_default().to_owned(),
            };
            handle
                .submit_delivery_details(draft)
                .map_err(|e| e.to_string())?;
            Ok(true)
        }
        "pay" => {
            let method = if rest.is_empty() {
                PaymentMethod::default()
            } else {
                rest.parse()?
            };
            handle.initiate_payment(method).map_err(|e| e.to_string())?;
            Ok(true)
        }
        "home" => {
            handle.return_home_now().map_err(|e| e.to_string())?;
            Ok(true)
        }
        _ => Err(format!("unknown command {command:?} — gõ `help`")),
    }
}

fn find_item<'a>(menu: &'a [MenuItem], id: &str) -> Result<&'a MenuItem, String> {
    menu.iter()
        .find(|item| item.id.as_str() == id)
        .ok_or_else(|| format!("no menu item with id {id:?}"))
}
