//! Advisory risk scoring over submitted vitals and screening answers.
//!
//! The score annotates the request for the reviewing admin; it never blocks
//! submission or approval. Weighted contributions are capped at 100.

use shared::{HealthScreening, RiskAssessment, RiskFlag, Vitals};

// Acceptable ranges for a routine whole-blood donation
const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 65;
const MIN_WEIGHT_KG: f64 = 55.0;
const MIN_SYSTOLIC: u32 = 90;
const MAX_SYSTOLIC: u32 = 140;
const MIN_DIASTOLIC: u32 = 60;
const MAX_DIASTOLIC: u32 = 90;
const MIN_HEMOGLOBIN: f64 = 13.0;
const CRITICAL_HEMOGLOBIN: f64 = 11.0;

// Weighted contributions
const AGE_WEIGHT: u32 = 20;
const WEIGHT_WEIGHT: u32 = 15;
const BLOOD_PRESSURE_WEIGHT: u32 = 10;
const HEMOGLOBIN_WEIGHT: u32 = 15;
const SCREENING_FLAG_WEIGHT: u32 = 10;

#[derive(Clone)]
pub struct RiskService {
    high_risk_threshold: u8,
}

impl RiskService {
    pub fn new(high_risk_threshold: u8) -> Self {
        Self { high_risk_threshold }
    }

    /// Score the submission and collect qualitative flags
    pub fn assess(&self, vitals: &Vitals, screening: &HealthScreening) -> RiskAssessment {
        let mut score: u32 = 0;
        let mut flags = Vec::new();

        if vitals.age < MIN_AGE || vitals.age > MAX_AGE {
            score += AGE_WEIGHT;
            flags.push(RiskFlag::AgeOutOfRange);
        }

        if vitals.weight_kg < MIN_WEIGHT_KG {
            score += WEIGHT_WEIGHT;
            flags.push(RiskFlag::LowWeight);
        }

        let systolic_abnormal = vitals.systolic < MIN_SYSTOLIC || vitals.systolic > MAX_SYSTOLIC;
        let diastolic_abnormal =
            vitals.diastolic < MIN_DIASTOLIC || vitals.diastolic > MAX_DIASTOLIC;
        if systolic_abnormal {
            score += BLOOD_PRESSURE_WEIGHT;
        }
        if diastolic_abnormal {
            score += BLOOD_PRESSURE_WEIGHT;
        }
        if systolic_abnormal || diastolic_abnormal {
            flags.push(RiskFlag::AbnormalBloodPressure);
        }

        if vitals.hemoglobin < MIN_HEMOGLOBIN {
            score += HEMOGLOBIN_WEIGHT;
            flags.push(RiskFlag::LowHemoglobin);
        }
        if vitals.hemoglobin < CRITICAL_HEMOGLOBIN {
            score += HEMOGLOBIN_WEIGHT;
            flags.push(RiskFlag::VeryLowHemoglobin);
        }

        let screening_flags = [
            (screening.recent_illness, RiskFlag::RecentIllness),
            (screening.chronic_condition, RiskFlag::ChronicCondition),
            (screening.current_medication, RiskFlag::CurrentMedication),
            (
                screening.recent_tattoo_or_piercing,
                RiskFlag::RecentTattooOrPiercing,
            ),
            (screening.recent_travel, RiskFlag::RecentTravel),
        ];
        for (answered_yes, flag) in screening_flags {
            if answered_yes {
                score += SCREENING_FLAG_WEIGHT;
                flags.push(flag);
            }
        }

        let score = score.min(100) as u8;
        if score > self.high_risk_threshold {
            flags.push(RiskFlag::ManualReviewRecommended);
        }

        RiskAssessment { score, flags }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_vitals() -> Vitals {
        Vitals {
            age: 30,
            weight_kg: 72.0,
            systolic: 118,
            diastolic: 76,
            hemoglobin: 14.5,
        }
    }

    #[test]
    fn test_healthy_adult_scores_zero() {
        let service = RiskService::new(60);
        let assessment = service.assess(&healthy_vitals(), &HealthScreening::default());
        assert_eq!(assessment.score, 0);
        assert!(assessment.flags.is_empty());
    }

    #[test]
    fn test_individual_vital_contributions() {
        let service = RiskService::new(60);

        let mut vitals = healthy_vitals();
        vitals.age = 17;
        let assessment = service.assess(&vitals, &HealthScreening::default());
        assert_eq!(assessment.score, 20);
        assert_eq!(assessment.flags, vec![RiskFlag::AgeOutOfRange]);

        let mut vitals = healthy_vitals();
        vitals.weight_kg = 52.0;
        let assessment = service.assess(&vitals, &HealthScreening::default());
        assert_eq!(assessment.score, 15);
        assert_eq!(assessment.flags, vec![RiskFlag::LowWeight]);

        // Both pressure bands out of range count twice but flag once
        let mut vitals = healthy_vitals();
        vitals.systolic = 150;
        vitals.diastolic = 95;
        let assessment = service.assess(&vitals, &HealthScreening::default());
        assert_eq!(assessment.score, 20);
        assert_eq!(assessment.flags, vec![RiskFlag::AbnormalBloodPressure]);
    }

    #[test]
    fn test_low_hemoglobin_tiers() {
        let service = RiskService::new(60);

        let mut vitals = healthy_vitals();
        vitals.hemoglobin = 12.1;
        let assessment = service.assess(&vitals, &HealthScreening::default());
        assert_eq!(assessment.score, 15);
        assert_eq!(assessment.flags, vec![RiskFlag::LowHemoglobin]);

        // Below the critical tier both contributions apply
        vitals.hemoglobin = 10.4;
        let assessment = service.assess(&vitals, &HealthScreening::default());
        assert_eq!(assessment.score, 30);
        assert_eq!(
            assessment.flags,
            vec![RiskFlag::LowHemoglobin, RiskFlag::VeryLowHemoglobin]
        );
    }

    #[test]
    fn test_screening_answers_add_fixed_increment() {
        let service = RiskService::new(60);
        let screening = HealthScreening {
            recent_illness: true,
            current_medication: true,
            ..Default::default()
        };
        let assessment = service.assess(&healthy_vitals(), &screening);
        assert_eq!(assessment.score, 20);
        assert_eq!(
            assessment.flags,
            vec![RiskFlag::RecentIllness, RiskFlag::CurrentMedication]
        );
    }

    #[test]
    fn test_high_risk_threshold_adds_manual_review_flag() {
        let service = RiskService::new(60);
        // 20 (age) + 15 (weight) + 15 (hemoglobin) + 20 (two screening
        // answers) = 70, over the threshold
        let vitals = Vitals {
            age: 70,
            weight_kg: 50.0,
            systolic: 120,
            diastolic: 80,
            hemoglobin: 12.0,
        };
        let screening = HealthScreening {
            recent_illness: true,
            chronic_condition: true,
            ..Default::default()
        };
        let assessment = service.assess(&vitals, &screening);
        assert_eq!(assessment.score, 70);
        assert!(assessment
            .flags
            .contains(&RiskFlag::ManualReviewRecommended));
    }

    #[test]
    fn test_score_is_capped_at_100() {
        let service = RiskService::new(60);
        let vitals = Vitals {
            age: 80,
            weight_kg: 40.0,
            systolic: 180,
            diastolic: 110,
            hemoglobin: 9.0,
        };
        let screening = HealthScreening {
            recent_illness: true,
            chronic_condition: true,
            current_medication: true,
            recent_tattoo_or_piercing: true,
            recent_travel: true,
        };
        // Raw sum is 20+15+20+30+50 = 135
        let assessment = service.assess(&vitals, &screening);
        assert_eq!(assessment.score, 100);
    }
}
