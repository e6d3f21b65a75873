//! Hardcoded catalog data.
//!
//! There is no backend; the browse screen shows these restaurants and every
//! restaurant serves the same sample menu.

use delights_core::{ItemId, MenuItem, Price, Restaurant, RestaurantId};

/// The restaurants on the browse screen.
pub fn restaurants() -> Vec<Restaurant> {
    [
        (
            1,
            "Ăn Vặt RyTy - Shop Online",
            "161/3 Thành Thủy, P. Thành Bình",
            "Ăn vặt",
        ),
        (
            2,
            "Xuân Thu - Bún Măng Vịt & Cơm Tấm",
            "46A Phạm Văn Nghị, P. Thác Gián",
            "Bún măng vịt",
        ),
        (
            3,
            "Tiệm Nước GoHi - Ghế Lá",
            "12 Ngô Văn Sở, P. Hòa Khánh Nam",
            "Đồ uống",
        ),
        (
            4,
            "Ăn Vặt Trúc Vũ - Dinh Văn",
            "38 - 48 Đinh Văn Chấp, P. Hòa Xuân",
            "Ăn vặt",
        ),
        (
            5,
            "Bánh Mì Ba Già - Triều Nữ",
            "24 Triều Nữ Vương, Quận Hải Châu",
            "Bánh mì",
        ),
        (
            6,
            "Lẩu Nồng - Bánh Mướt & Bánh Căn",
            "43/5 Phan Tứ, P. Mỹ An, Quận Ngũ",
            "Lẩu",
        ),
    ]
    .into_iter()
    .map(|(id, name, address, category)| Restaurant {
        id: RestaurantId::new(id),
        name: name.to_owned(),
        address: address.to_owned(),
        image_url: format!("https://images.shoppe-delights.test/restaurants/{id}.jpg"),
        discount_label: "Mã giảm 100k".to_owned(),
        category: category.to_owned(),
    })
    .collect()
}

/// The sample menu served by every restaurant.
pub fn menu() -> Vec<MenuItem> {
    [
        ("1", "Nha đam hạt chia (chai)", "Nước giải khát tự nhiên", 15_000),
        ("2", "Sữa chua uống (chai)", "Sữa chua uống mát lạnh", 20_000),
        ("3", "Gân bò chua cay (hũ)", "Gân bò tươi ngon chua cay", 80_000),
        ("4", "Kem flan (hộp)", "Kem flan thơm ngon mát lạnh", 10_000),
    ]
    .into_iter()
    .map(|(id, name, description, price)| MenuItem {
        id: ItemId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        unit_price: Price::new(price),
        image_url: format!("https://images.shoppe-delights.test/menu/{id}.jpg"),
    })
    .collect()
}
