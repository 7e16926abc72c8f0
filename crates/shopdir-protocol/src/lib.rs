//! Shared record types for the shop directory.
//!
//! The JSON form of [`ShopRecord`] is the bundled `shops.json` schema: it is
//! read by the public loader and written by the admin editor export.

mod category;
mod record;

pub use category::Category;
pub use record::{Contact, ShopRecord, join_list, split_list};
