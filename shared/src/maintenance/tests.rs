use super::*;
use crate::models::{MaintenanceSchedule, TrackingType};

// =========================================================
// 辅助函数
// =========================================================

fn status_at(mileage: f64) -> MaintenanceStatus {
    evaluate_default(&VehicleUsageSnapshot::from_mileage(mileage)).unwrap()
}

fn schedule(tracking_type: TrackingType, interval: f64, last: f64, thresholds: &str) -> MaintenanceSchedule {
    MaintenanceSchedule {
        id: 1,
        vehicle_id: 1,
        task_name: "Oil Change".to_string(),
        tracking_type,
        interval_value: interval,
        alert_thresholds: thresholds.to_string(),
        last_performed_value: last,
        last_performed_date: None,
        is_active: true,
    }
}

// =========================================================
// evaluate 测试
// =========================================================

#[test]
fn test_progress_is_mileage_mod_interval() {
    for m in [0.0, 1.0, 499.0, 500.0, 4999.0, 5000.0, 12_345.0, 104_999.0, 1_000_000.0] {
        let status = status_at(m);
        assert_eq!(status.progress_within_cycle, m % 5000.0);
        assert!(status.progress_within_cycle >= 0.0);
        assert!(status.progress_within_cycle < 5000.0);
        assert!(status.progress_fraction >= 0.0 && status.progress_fraction < 1.0);
    }
}

#[test]
fn test_zero_mileage_is_critical() {
    let status = status_at(0.0);
    assert_eq!(status.progress_within_cycle, 0.0);
    assert_eq!(status.progress_fraction, 0.0);
    assert_eq!(status.classification, HealthClassification::Critical);
}

#[test]
fn test_critical_boundary_at_500() {
    assert_eq!(status_at(499.0).classification, HealthClassification::Critical);
    assert_eq!(status_at(499.99).classification, HealthClassification::Critical);
    assert_eq!(status_at(500.0).classification, HealthClassification::Healthy);
}

#[test]
fn test_periodicity() {
    assert_eq!(status_at(5000.0), status_at(0.0));
    for m in [0.0, 250.0, 499.0, 500.0, 3210.0, 4999.0] {
        assert_eq!(status_at(m), status_at(m + 5000.0));
        assert_eq!(status_at(m), status_at(m + 50_000.0));
    }
}

#[test]
fn test_end_of_cycle_is_healthy() {
    let status = status_at(4999.0);
    assert!((status.progress_fraction - 0.9998).abs() < 1e-9);
    assert!((status.progress_percent() - 99.98).abs() < 1e-9);
    assert_eq!(status.remaining_in_cycle(), 1.0);
    assert_eq!(status.classification, HealthClassification::Healthy);
}

#[test]
fn test_evaluate_is_idempotent() {
    let snapshot = VehicleUsageSnapshot {
        current_mileage: 73_421.7,
        current_hours: 1520.3,
    };
    let first = evaluate_default(&snapshot).unwrap();
    let second = evaluate_default(&snapshot).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_hours_do_not_affect_status() {
    let a = VehicleUsageSnapshot { current_mileage: 7000.0, current_hours: 0.0 };
    let b = VehicleUsageSnapshot { current_mileage: 7000.0, current_hours: 9_999.0 };
    assert_eq!(evaluate_default(&a).unwrap(), evaluate_default(&b).unwrap());
}

#[test]
fn test_negative_mileage_rejected() {
    let err = evaluate_default(&VehicleUsageSnapshot::from_mileage(-1.0)).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_non_finite_mileage_rejected() {
    for m in [f64::NAN, f64::INFINITY] {
        let err = evaluate_default(&VehicleUsageSnapshot::from_mileage(m)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}

#[test]
fn test_custom_interval_keeps_absolute_buffer() {
    let interval = ServiceInterval::new(10_000.0).unwrap();
    let near_start = evaluate(&VehicleUsageSnapshot::from_mileage(10_400.0), interval).unwrap();
    assert_eq!(near_start.progress_within_cycle, 400.0);
    assert_eq!(near_start.classification, HealthClassification::Critical);

    // 10% 的 10000 是 1000，但缓冲区仍是 500
    let mid = evaluate(&VehicleUsageSnapshot::from_mileage(10_700.0), interval).unwrap();
    assert_eq!(mid.classification, HealthClassification::Healthy);
    assert!((mid.progress_fraction - 0.07).abs() < 1e-12);
}

#[test]
fn test_interval_must_be_positive() {
    assert!(ServiceInterval::new(0.0).is_err());
    assert!(ServiceInterval::new(-5000.0).is_err());
    assert!(ServiceInterval::new(f64::NAN).is_err());
    assert!(serde_json::from_str::<ServiceInterval>("0").is_err());
    assert_eq!(serde_json::from_str::<ServiceInterval>("3000").unwrap().value(), 3000.0);
}

// =========================================================
// 保养计划测试
// =========================================================

#[test]
fn test_parse_thresholds_sorted_descending() {
    assert_eq!(parse_thresholds("100, 500,250").unwrap(), vec![500.0, 250.0, 100.0]);
    assert!(parse_thresholds("").unwrap().is_empty());
    assert!(parse_thresholds(" , ").unwrap().is_empty());
}

#[test]
fn test_parse_thresholds_rejects_garbage() {
    let err = parse_thresholds("500,soon").unwrap_err();
    assert!(err.to_string().contains("soon"));
    assert!(parse_thresholds("NaN").is_err());
}

#[test]
fn test_schedule_due_miles() {
    let s = schedule(TrackingType::Miles, 5000.0, 100_000.0, "500,250,100");
    let snapshot = VehicleUsageSnapshot { current_mileage: 104_800.0, current_hours: 10.0 };
    let due = ScheduleDue::compute(&s, &snapshot).unwrap().unwrap();
    assert_eq!(due.remaining, 200.0);
    assert_eq!(due.crossed_threshold, Some(250.0));
    assert!(!due.is_overdue());
}

#[test]
fn test_schedule_due_hours_uses_hours() {
    let s = schedule(TrackingType::Hours, 250.0, 1000.0, "50");
    let snapshot = VehicleUsageSnapshot { current_mileage: 999_999.0, current_hours: 1100.0 };
    let due = ScheduleDue::compute(&s, &snapshot).unwrap().unwrap();
    assert_eq!(due.remaining, 150.0);
    assert_eq!(due.crossed_threshold, None);
}

#[test]
fn test_schedule_overdue() {
    let s = schedule(TrackingType::Miles, 5000.0, 0.0, "500");
    let due = ScheduleDue::compute(&s, &VehicleUsageSnapshot::from_mileage(5300.0))
        .unwrap()
        .unwrap();
    assert_eq!(due.remaining, -300.0);
    assert!(due.is_overdue());
    assert_eq!(due.crossed_threshold, Some(500.0));
}

#[test]
fn test_schedule_time_based_not_computable() {
    let s = schedule(TrackingType::Time, 90.0, 0.0, "7");
    assert!(ScheduleDue::compute(&s, &VehicleUsageSnapshot::default()).unwrap().is_none());
}
