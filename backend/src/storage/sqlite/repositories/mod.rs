pub mod donation_repository;
pub mod inventory_repository;

pub use donation_repository::DonationRepository;
pub use inventory_repository::InventoryRepository;
