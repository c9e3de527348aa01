use crate::domain::models::inventory::InventoryRecord as DomainRecord;
use shared::InventoryRecord as SharedRecord;

pub struct InventoryMapper;

impl InventoryMapper {
    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            blood_group: domain.blood_group,
            units_available: domain.units_available,
            location: domain.location,
            expiry_date: domain.expiry_date,
            updated_at: domain.updated_at,
        }
    }
}
