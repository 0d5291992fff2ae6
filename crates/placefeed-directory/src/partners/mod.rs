//! Partner records and menus.

mod convert;
mod read;
mod types;

pub use convert::{partner_from_lookup, partner_from_row};
pub use read::{get_partner_by_key, list_active_partners, list_available_menu_items};
pub use types::{MenuItemRow, PartnerRow};
