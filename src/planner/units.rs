use crate::models::UnitSystem;
use crate::planner::constants::{
    CM_PER_INCH, IMPERIAL_HEIGHT_INCH_LIMIT, IMPERIAL_WEIGHT_LBS_LIMIT, LBS_PER_KG,
};

/// Height split into whole feet and remaining whole inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: u32,
}

/// Convert centimeters to feet and inches, rounded to the nearest inch.
pub fn cm_to_feet_inches(cm: f64) -> FeetInches {
    let total_inches = (cm.max(0.0) / CM_PER_INCH).round() as u32;
    FeetInches {
        feet: total_inches / 12,
        inches: total_inches % 12,
    }
}

pub fn feet_inches_to_cm(feet: u32, inches: u32) -> f64 {
    (feet * 12 + inches) as f64 * CM_PER_INCH
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

/// Bring stored height/weight into centimeters and kilograms.
///
/// Imperial profiles are inconsistent about whether conversion already
/// happened upstream: heights under 100 are read as inches and weights over
/// 140 as pounds. Metric profiles pass through untouched.
pub fn normalize_height_weight(height: f64, weight: f64, units: UnitSystem) -> (f64, f64) {
    if units != UnitSystem::Imperial {
        return (height, weight);
    }

    let height_cm = if height < IMPERIAL_HEIGHT_INCH_LIMIT {
        height * CM_PER_INCH
    } else {
        height
    };
    let weight_kg = if weight > IMPERIAL_WEIGHT_LBS_LIMIT {
        lbs_to_kg(weight)
    } else {
        weight
    };

    (height_cm, weight_kg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn test_cm_to_feet_inches() {
        assert_eq!(cm_to_feet_inches(180.0), FeetInches { feet: 5, inches: 11 });
        assert_eq!(cm_to_feet_inches(152.4), FeetInches { feet: 5, inches: 0 });
        assert_eq!(cm_to_feet_inches(0.0), FeetInches { feet: 0, inches: 0 });
    }

    #[test]
    fn test_feet_inches_to_cm() {
        assert_float_absolute_eq!(feet_inches_to_cm(5, 11), 180.34, 1e-9);
        assert_float_absolute_eq!(feet_inches_to_cm(6, 0), 182.88, 1e-9);
    }

    #[test]
    fn test_weight_conversions() {
        assert_float_absolute_eq!(kg_to_lbs(1.0), 2.20462, 1e-12);
        assert_float_absolute_eq!(lbs_to_kg(220.462), 100.0, 1e-9);
    }

    #[test]
    fn test_normalize_imperial() {
        let (h, w) = normalize_height_weight(70.0, 180.0, UnitSystem::Imperial);
        assert_float_absolute_eq!(h, 177.8, 1e-9);
        assert_float_absolute_eq!(w, 180.0 / 2.20462, 1e-9);
    }

    #[test]
    fn test_normalize_boundaries_not_converted() {
        let (h, w) = normalize_height_weight(100.0, 140.0, UnitSystem::Imperial);
        assert_eq!(h, 100.0);
        assert_eq!(w, 140.0);
    }

    #[test]
    fn test_normalize_metric_untouched() {
        let (h, w) = normalize_height_weight(60.0, 200.0, UnitSystem::Metric);
        assert_eq!(h, 60.0);
        assert_eq!(w, 200.0);
    }
}
