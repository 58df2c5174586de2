use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leanval_db::growth::models::{GrowthMetric, GrowthStatus, MetricUnit, WellKnownKind};

pub const LTV_CAC_RATIO_ID: &str = "ltv-cac-ratio";

/// Industry benchmark for a healthy LTV:CAC ratio.
pub const LTV_CAC_TARGET: f64 = 3.0;

/// Ratios at or above this (but under target) are at risk; below it off track.
pub const LTV_CAC_AT_RISK_FLOOR: f64 = 2.0;

/// A metric computed from other growth metrics. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedMetric {
    pub id: String,
    pub name: String,
    pub category: String,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: MetricUnit,
    pub status: GrowthStatus,
    pub source_metric_ids: Vec<Uuid>,
}

pub fn ltv_cac_status(ratio: f64) -> GrowthStatus {
    if ratio >= LTV_CAC_TARGET {
        GrowthStatus::OnTrack
    } else if ratio >= LTV_CAC_AT_RISK_FLOOR {
        GrowthStatus::AtRisk
    } else {
        GrowthStatus::OffTrack
    }
}

/// LTV:CAC from the first metric tagged `Ltv` and the first tagged `Cac`.
///
/// `None` when either is missing or CAC is not positive.
pub fn derive_ltv_cac(metrics: &[GrowthMetric]) -> Option<DerivedMetric> {
    let cac = metrics.iter().find(|m| m.kind == WellKnownKind::Cac)?;
    let ltv = metrics.iter().find(|m| m.kind == WellKnownKind::Ltv)?;

    if cac.current_value <= 0.0 {
        tracing::debug!(cac_id = %cac.id, "CAC is not positive, skipping LTV:CAC");
        return None;
    }

    let ratio = ltv.current_value / cac.current_value;
    if !ratio.is_finite() {
        return None;
    }

    Some(DerivedMetric {
        id: LTV_CAC_RATIO_ID.to_string(),
        name: "LTV:CAC Ratio".to_string(),
        category: "unit-economics".to_string(),
        current_value: ratio,
        target_value: LTV_CAC_TARGET,
        unit: MetricUnit::Ratio,
        status: ltv_cac_status(ratio),
        source_metric_ids: vec![ltv.id, cac.id],
    })
}

/// Every derived metric available for a growth model's metric list.
pub fn derive_metrics(metrics: &[GrowthMetric]) -> Vec<DerivedMetric> {
    derive_ltv_cac(metrics).into_iter().collect()
}

/// Best-effort kind for a growth metric created without an explicit tag.
///
/// Matches on the lowercased name first ("cac", "acquisition cost", "ltv",
/// "lifetime value"), then on category plus name.
pub fn infer_well_known_kind(name: &str, category: &str) -> WellKnownKind {
    let name = name.to_lowercase();
    let category = category.to_lowercase();

    if name.contains("cac") || name.contains("acquisition cost") {
        return WellKnownKind::Cac;
    }
    if name.contains("ltv") || name.contains("lifetime value") {
        return WellKnownKind::Ltv;
    }

    if category.contains("acquisition") && name.contains("cost") {
        WellKnownKind::Cac
    } else if (category.contains("revenue") || category.contains("retention"))
        && (name.contains("lifetime") || name.contains("customer value"))
    {
        WellKnownKind::Ltv
    } else {
        WellKnownKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn growth_metric(name: &str, kind: WellKnownKind, current_value: f64) -> GrowthMetric {
        let now = Utc::now();
        GrowthMetric {
            id: Uuid::new_v4(),
            growth_model_id: Uuid::nil(),
            name: name.to_string(),
            category: "unit-economics".to_string(),
            kind,
            current_value,
            target_value: 0.0,
            unit: MetricUnit::Currency,
            status: GrowthStatus::OnTrack,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn healthy_ratio_is_on_track() {
        let metrics = vec![
            growth_metric("CAC", WellKnownKind::Cac, 50.0),
            growth_metric("LTV", WellKnownKind::Ltv, 200.0),
        ];
        let derived = derive_ltv_cac(&metrics).expect("should derive");
        assert_eq!(derived.id, LTV_CAC_RATIO_ID);
        assert!((derived.current_value - 4.0).abs() < f64::EPSILON);
        assert!((derived.target_value - 3.0).abs() < f64::EPSILON);
        assert_eq!(derived.unit, MetricUnit::Ratio);
        assert_eq!(derived.status, GrowthStatus::OnTrack);
        assert_eq!(derived.source_metric_ids, vec![metrics[1].id, metrics[0].id]);
    }

    #[test]
    fn low_ratio_is_off_track() {
        let metrics = vec![
            growth_metric("CAC", WellKnownKind::Cac, 100.0),
            growth_metric("LTV", WellKnownKind::Ltv, 150.0),
        ];
        let derived = derive_ltv_cac(&metrics).unwrap();
        assert!((derived.current_value - 1.5).abs() < f64::EPSILON);
        assert_eq!(derived.status, GrowthStatus::OffTrack);
    }

    #[test]
    fn status_band_edges() {
        assert_eq!(ltv_cac_status(3.0), GrowthStatus::OnTrack);
        assert_eq!(ltv_cac_status(2.999), GrowthStatus::AtRisk);
        assert_eq!(ltv_cac_status(2.0), GrowthStatus::AtRisk);
        assert_eq!(ltv_cac_status(1.999), GrowthStatus::OffTrack);
    }

    #[test]
    fn zero_cac_yields_nothing() {
        let metrics = vec![
            growth_metric("CAC", WellKnownKind::Cac, 0.0),
            growth_metric("LTV", WellKnownKind::Ltv, 500.0),
        ];
        assert!(derive_ltv_cac(&metrics).is_none());
        assert!(derive_metrics(&metrics).is_empty());
    }

    #[test]
    fn missing_either_side_yields_nothing() {
        let only_cac = vec![growth_metric("CAC", WellKnownKind::Cac, 50.0)];
        let only_ltv = vec![growth_metric("LTV", WellKnownKind::Ltv, 200.0)];
        assert!(derive_metrics(&only_cac).is_empty());
        assert!(derive_metrics(&only_ltv).is_empty());
        assert!(derive_metrics(&[]).is_empty());
    }

    #[test]
    fn untagged_metrics_are_ignored_even_with_matching_names() {
        let metrics = vec![
            growth_metric("CAC", WellKnownKind::Other, 50.0),
            growth_metric("LTV", WellKnownKind::Other, 200.0),
        ];
        assert!(derive_metrics(&metrics).is_empty());
    }

    #[test]
    fn infer_kind_from_name() {
        assert_eq!(infer_well_known_kind("Blended CAC", ""), WellKnownKind::Cac);
        assert_eq!(
            infer_well_known_kind("Customer Acquisition Cost", "marketing"),
            WellKnownKind::Cac
        );
        assert_eq!(infer_well_known_kind("LTV (12m)", ""), WellKnownKind::Ltv);
        assert_eq!(
            infer_well_known_kind("Customer Lifetime Value", ""),
            WellKnownKind::Ltv
        );
    }

    #[test]
    fn infer_kind_from_category_fallback() {
        assert_eq!(
            infer_well_known_kind("Cost per signup", "Acquisition"),
            WellKnownKind::Cac
        );
        assert_eq!(
            infer_well_known_kind("Avg customer value", "Revenue"),
            WellKnownKind::Ltv
        );
        assert_eq!(
            infer_well_known_kind("Weekly actives", "Engagement"),
            WellKnownKind::Other
        );
    }
}
