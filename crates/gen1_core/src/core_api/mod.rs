mod engine;
mod error;
mod item_catalog;
mod types;
pub mod well_known_items;

pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use item_catalog::{item_id, item_name, known_items, normalize_name, resolve_item};
pub use types::{BagItemEntry, Edit, PlannedChange, Snapshot};
