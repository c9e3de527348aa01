pub mod donation_mapper;
pub mod inventory_mapper;
