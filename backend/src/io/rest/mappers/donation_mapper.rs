use crate::domain::models::donation::Donation as DomainDonation;
use shared::DonationRequest as SharedDonation;

pub struct DonationMapper;

impl DonationMapper {
    pub fn to_dto(domain: DomainDonation) -> SharedDonation {
        SharedDonation {
            id: domain.id,
            donor_id: domain.donor_id,
            blood_group: domain.blood_group,
            units: domain.units,
            status: domain.status,
            risk_score: domain.risk_score,
            admin_approved: domain.admin_approved,
            verification_status: domain.verification_status,
            submitted_at: domain.submitted_at,
            decided_at: domain.decided_at,
            donation_center: domain.donation_center,
            notes: domain.notes,
            admin_notes: domain.admin_notes,
        }
    }
}
