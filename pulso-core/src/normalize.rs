//! Tolerant conversion of oracle payloads into canonical snapshots.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::level::{LevelDistribution, Reading, StressLevel};
use crate::snapshot::StressSnapshot;

/// Convert a raw oracle payload into a snapshot.
///
/// Tolerates the three shapes the service is known to produce: an explicit
/// `last_analysis` object, a bare per-level `distribution`, and anything
/// else (no usable reading). Never panics on malformed input.
pub fn normalize(raw: &Value, observed_at: DateTime<Utc>) -> StressSnapshot {
    if let Some(analysis) = raw.get("last_analysis")
        && let Some(snapshot) = from_analysis(analysis, raw, observed_at)
    {
        return snapshot;
    }

    if let Some(snapshot) = from_distribution(raw, observed_at) {
        return snapshot;
    }

    StressSnapshot::unknown(observed_at)
}

/// Shape (a): the payload carries an analysis object with its own level and
/// probabilities. `stress_label` wins over the numeric `stress_level` index.
fn from_analysis(analysis: &Value, raw: &Value, observed_at: DateTime<Utc>) -> Option<StressSnapshot> {
    let level = analysis
        .get("stress_label")
        .and_then(Value::as_str)
        .and_then(StressLevel::from_label)
        .or_else(|| {
            analysis
                .get("stress_level")
                .and_then(Value::as_u64)
                .and_then(StressLevel::from_index)
        })?;

    let probabilities = analysis.get("probabilities");
    let distribution = LevelDistribution::new(
        prob(probabilities, StressLevel::Low),
        prob(probabilities, StressLevel::Medium),
        prob(probabilities, StressLevel::High),
    );

    Some(StressSnapshot {
        reading: Reading::Level(level),
        distribution,
        observed_at,
        total_observations: total_observations(raw),
    })
}

/// Shape (b): only a distribution of counts or weights is present. The
/// strictly greatest raw value wins; ties resolve Medium, then High, then
/// Low (the service's observed tie-break, preserved as-is).
fn from_distribution(raw: &Value, observed_at: DateTime<Utc>) -> Option<StressSnapshot> {
    let dist = raw.get("distribution")?.as_object()?;

    let value = |level: StressLevel| {
        dist.get(level.wire_key())
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    };
    let low = value(StressLevel::Low);
    let medium = value(StressLevel::Medium);
    let high = value(StressLevel::High);

    // A fresh service reports an all-zero distribution before any analysis
    // has run; that is "no reading yet", not a three-way tie.
    let reading = if low.max(medium).max(high) <= 0.0 {
        Reading::Unknown
    } else {
        let mut best = StressLevel::Medium;
        let mut best_value = medium;
        for (candidate, candidate_value) in [(StressLevel::High, high), (StressLevel::Low, low)] {
            if candidate_value > best_value {
                best = candidate;
                best_value = candidate_value;
            }
        }
        Reading::Level(best)
    };

    Some(StressSnapshot {
        reading,
        // The level is derived from the raw values above; only the stored
        // distribution is clamped.
        distribution: LevelDistribution::new(low, medium, high),
        observed_at,
        total_observations: total_observations(raw),
    })
}

fn prob(probabilities: Option<&Value>, level: StressLevel) -> f64 {
    probabilities
        .and_then(|p| p.get(level.wire_key()))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn total_observations(raw: &Value) -> Option<u64> {
    raw.get("total_analyses").and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn explicit_analysis_is_used_directly() {
        let payload = json!({
            "last_analysis": {
                "stress_label": "ALTO",
                "probabilities": {"bajo": 0.1, "medio": 0.2, "alto": 0.7}
            },
            "total_analyses": 12
        });
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::High));
        assert_eq!(snapshot.distribution.high, 0.7);
        assert_eq!(snapshot.total_observations, Some(12));
    }

    #[test]
    fn analysis_numeric_index_is_accepted() {
        let payload = json!({"last_analysis": {"stress_level": 1}});
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::Medium));
        assert!(snapshot.distribution.is_empty());
    }

    #[test]
    fn malformed_analysis_falls_back_to_distribution() {
        let payload = json!({
            "last_analysis": {"stress_label": "nonsense"},
            "distribution": {"bajo": 1.0, "medio": 3.0, "alto": 2.0}
        });
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::Medium));
    }

    #[test]
    fn distribution_picks_strictly_greatest() {
        // alto is strictly greatest
        let payload = json!({"distribution": {"bajo": 0.2, "medio": 0.3, "alto": 0.5}});
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::High));
    }

    #[test]
    fn distribution_tie_prefers_medium() {
        // bajo/medio tie at the top
        let payload = json!({"distribution": {"bajo": 0.4, "medio": 0.4, "alto": 0.2}});
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::Medium));
    }

    #[test]
    fn distribution_tie_prefers_high_over_low() {
        let payload = json!({"distribution": {"bajo": 0.4, "medio": 0.1, "alto": 0.4}});
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::High));
    }

    #[test]
    fn count_distribution_derives_before_clamping() {
        // Raw counts: clamping first would erase the ordering.
        let payload = json!({"distribution": {"bajo": 30, "medio": 5, "alto": 8}, "total_analyses": 43});
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::Low));
        assert_eq!(snapshot.distribution.low, 1.0);
        assert_eq!(snapshot.total_observations, Some(43));
    }

    #[test]
    fn all_zero_distribution_is_unknown() {
        let payload = json!({"distribution": {"bajo": 0, "medio": 0, "alto": 0}, "total_analyses": 0});
        let snapshot = normalize(&payload, now());
        assert!(snapshot.reading.is_unknown());
    }

    #[test]
    fn missing_distribution_keys_default_to_zero() {
        let payload = json!({"distribution": {"alto": 0.9}});
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::High));
        assert_eq!(snapshot.distribution.low, 0.0);
        assert_eq!(snapshot.distribution.medium, 0.0);
    }

    #[test]
    fn empty_payload_is_unknown() {
        let stamp = now();
        let snapshot = normalize(&json!({}), stamp);
        assert!(snapshot.reading.is_unknown());
        assert!(snapshot.distribution.is_empty());
        assert_eq!(snapshot.observed_at, stamp);
    }

    #[test]
    fn non_object_payload_is_unknown() {
        assert!(normalize(&json!("garbage"), now()).reading.is_unknown());
        assert!(normalize(&json!(null), now()).reading.is_unknown());
        assert!(normalize(&json!([1, 2, 3]), now()).reading.is_unknown());
    }

    #[test]
    fn non_numeric_distribution_values_read_as_zero() {
        let payload = json!({"distribution": {"bajo": "lots", "medio": 0.3, "alto": null}});
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.reading, Reading::Level(StressLevel::Medium));
    }

    #[test]
    fn out_of_range_probabilities_are_clamped() {
        let payload = json!({
            "last_analysis": {
                "stress_label": "bajo",
                "probabilities": {"bajo": 1.8, "medio": -0.4, "alto": 0.2}
            }
        });
        let snapshot = normalize(&payload, now());
        assert_eq!(snapshot.distribution.low, 1.0);
        assert_eq!(snapshot.distribution.medium, 0.0);
        assert_eq!(snapshot.distribution.high, 0.2);
    }
}
