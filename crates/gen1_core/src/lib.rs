pub mod backup;
pub mod bag;
pub mod checksum;
pub mod core_api;
pub mod digits;
pub mod image;
pub mod integrity;
pub mod money;
pub mod profile;
pub mod transaction;
