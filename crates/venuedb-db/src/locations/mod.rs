//! Database operations for the `locations` table.

mod read;
mod store;
mod types;
mod write;

pub use read::get_location_by_public_id;
pub use store::PgLocationStore;
pub use types::LocationRow;
pub use write::{create_location, delete_location, update_location};
