pub mod donation;
pub mod inventory;
