//! Snapshot rendering.
//!
//! Pure presentation: takes a flow snapshot and prints the active screen.
//! The match over [`Screen`] is exhaustive, so adding a screen will not
//! compile until it renders.

use delights_core::{MenuItem, Restaurant};
use delights_flow::{PaymentMethod, PaymentPhase, Screen, Snapshot};

/// Print the screen the snapshot says is active.
pub fn render(snapshot: &Snapshot, restaurants: &[Restaurant], menu: &[MenuItem]) {
    println!();
    match snapshot.screen {
        Screen::Browse => render_browse(snapshot, restaurants),
        Screen::Menu => render_menu(snapshot, menu),
        Screen::Cart => render_cart(snapshot),
        Screen::Checkout => render_checkout(snapshot),
        Screen::Payment => render_payment(snapshot),
    }
}

fn render_badge(snapshot: &Snapshot) {
    if snapshot.total_items > 0 {
        println!("  🛒 {} món trong giỏ", snapshot.total_items);
    }
}

fn render_browse(snapshot: &Snapshot, restaurants: &[Restaurant]) {
    println!("🍽️  ShoppeFood — Đà Nẵng");
    render_badge(snapshot);
    for restaurant in restaurants {
        println!(
            "  [{}] {} — {} ({})",
            restaurant.id, restaurant.name, restaurant.address, restaurant.discount_label
        );
    }
}

fn render_menu(snapshot: &Snapshot, menu: &[MenuItem]) {
    match &snapshot.selected_restaurant {
        Some(restaurant) => println!("MENU — {}", restaurant.name),
        None => println!("MENU"),
    }
    render_badge(snapshot);
    for item in menu {
        println!(
            "  [{}] {} — {} ({})",
            item.id, item.name, item.unit_price, item.description
        );
    }
}

fn render_cart(snapshot: &Snapshot) {
    println!("Giỏ hàng ({} món)", snapshot.lines.len());
    if snapshot.lines.is_empty() {
        println!("  Giỏ hàng trống — hãy thêm món ăn để tiếp tục (gõ `go browse`)");
        return;
    }
    for line in &snapshot.lines {
        println!(
            "  {} x{} — {} ({})",
            line.name,
            line.quantity,
            line.line_total(),
            line.restaurant_name
        );
    }
    render_totals(snapshot);
}

fn render_checkout(snapshot: &Snapshot) {
    println!("Xác nhận đơn hàng");
    for line in &snapshot.lines {
        println!("  {} x{} — {}", line.name, line.quantity, line.line_total());
    }
    let delivery = &snapshot.delivery;
    println!("  Họ và tên *: {}", delivery.recipient_name);
    println!("  Số điện thoại *: {}", delivery.phone);
    println!("  Địa chỉ giao hàng *: {}", delivery.address);
    println!("  Ghi chú cho tài xế: {}", delivery.driver_note);
    render_totals(snapshot);
    if snapshot.can_proceed_to_payment {
        println!("  [Đặt hàng] sẵn sàng — gõ `details ...` rồi chuyển sang thanh toán");
    } else {
        println!("  [Đặt hàng] chưa khả dụng — điền đủ tên, số điện thoại, địa chỉ");
    }
}

fn render_payment(snapshot: &Snapshot) {
    println!("Thanh toán");
    match &snapshot.phase {
        PaymentPhase::Idle => {
            render_totals(snapshot);
            for method in [
                PaymentMethod::CashOnDelivery,
                PaymentMethod::Momo,
                PaymentMethod::BankTransfer,
                PaymentMethod::Card,
            ] {
                let marker = if method == snapshot.payment_method {
                    "●"
                } else {
                    "○"
                };
                println!("  {marker} [{method}] {}", method.label());
            }
            println!("  Gõ `pay` để thanh toán {}", snapshot.totals.payable);
        }
        PaymentPhase::Processing => println!("  Đang xử lý..."),
        PaymentPhase::Succeeded {
            order_id,
            remaining,
        } => {
            println!("  ✅ Đặt hàng thành công!");
            println!("  Mã đơn hàng: {order_id}");
            println!("  Tổng tiền: {}", snapshot.totals.payable);
            println!("  Tự động chuyển về trang chủ sau {remaining} giây... (`home` để về ngay)");
        }
        PaymentPhase::Failed { reason } => {
            println!("  ❌ Thanh toán thất bại: {reason}");
            println!("  Gõ `pay` để thử lại");
        }
    }
}

fn render_totals(snapshot: &Snapshot) {
    let totals = &snapshot.totals;
    println!("  Tạm tính: {}", totals.subtotal);
    println!("  Phí giao hàng: {}", totals.delivery_fee);
    println!("  Tổng cộng: {}", totals.payable);
}
