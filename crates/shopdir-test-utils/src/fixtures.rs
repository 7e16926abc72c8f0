use serde_json::json;
use shopdir_protocol::{Category, Contact, ShopRecord};

/// A record with the fields most tests care about.
pub fn shop(id: &str, category: &str, shop_type: &str, name: &str) -> ShopRecord {
    ShopRecord {
        id: id.to_string(),
        category: Category::from(category),
        shop_type: shop_type.to_string(),
        name: name.to_string(),
        ..ShopRecord::default()
    }
}

/// Small mixed catalog, including a KTV filed under service.
pub fn sample_shops() -> Vec<ShopRecord> {
    let mut noodles = shop("chef_001", "food", "Restaurant", "Lanzhou Noodle House");
    noodles.description = "Hand-pulled noodles and broth".to_string();
    noodles.tags = "noodles, halal".to_string();
    noodles.contact = Contact {
        wechat: "lz_noodle".to_string(),
        phone: "0113 496 0001".to_string(),
    };
    noodles.images = vec!["001-1.jpg".to_string(), "001-2.png".to_string()];
    noodles.menu = "chef_001-menu.jpg".to_string();

    let mut hotpot = shop("chef_003", "food", "Hotpot", "Chongqing Hotpot");
    hotpot.tags = "spicy, group".to_string();

    let mut arcade = shop("ent_001", "entertainment", "Arcade", "Pixel Arcade");
    arcade.open_time = "12:00-23:00".to_string();

    let mut karaoke = shop("srv_002", "service", "KTV", "Echo KTV");
    karaoke.description = "Private karaoke rooms".to_string();

    let repair = shop("srv_001", "service", "Repair", "Phone Fix");

    vec![noodles, hotpot, arcade, karaoke, repair]
}

/// The sample catalog in bundled-file form.
pub fn sample_json() -> String {
    serde_json::to_string_pretty(&sample_shops()).unwrap_or_else(|_| "[]".to_string())
}

/// A spreadsheet export with a quoted, comma-bearing images cell.
pub fn sample_csv() -> String {
    let rows = [
        "id,category,type,name,address,contact_wechat,contact_phone,images,tags",
        concat!(
            "chef_010,food,Cafe,Corner Cafe,\"1 Park Row, Leeds\",cafe_wx,,",
            "\"010-1.jpg, 010-2.jpg\",coffee"
        ),
        "ent_004,entertainment,Bar,Night Owl,,,,,late",
        ",,,,,,,,",
    ];
    format!("{}\n", rows.join("\n"))
}
