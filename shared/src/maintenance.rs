//! 保养状态计算
//!
//! 所有展示车辆健康状态的视图（车辆卡片、车队列表、统计页）都调用这里的
//! `evaluate`，不在视图中重复取模与阈值判断。

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{MaintenanceSchedule, TrackingType};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 默认保养周期（里程单位）
pub const DEFAULT_SERVICE_INTERVAL: f64 = 5000.0;

/// 周期起点之后的绝对缓冲区，落在其中即为 Critical
///
/// 这是固定的距离值，不随周期长度缩放。
pub const CRITICAL_BUFFER: f64 = 500.0;

// =========================================================
// 输入与配置
// =========================================================

/// 车辆累计使用读数
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleUsageSnapshot {
    pub current_mileage: f64,
    pub current_hours: f64,
}

impl VehicleUsageSnapshot {
    pub fn from_mileage(current_mileage: f64) -> Self {
        Self {
            current_mileage,
            current_hours: 0.0,
        }
    }
}

/// 保养周期长度，必须为有限正数
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ServiceInterval(f64);

impl ServiceInterval {
    pub fn new(value: f64) -> ApiResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ApiError::invalid_input(format!(
                "service interval must be a positive number, got {value}"
            )))
        }
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl Default for ServiceInterval {
    fn default() -> Self {
        Self(DEFAULT_SERVICE_INTERVAL)
    }
}

impl<'de> Deserialize<'de> for ServiceInterval {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        ServiceInterval::new(raw).map_err(serde::de::Error::custom)
    }
}

// =========================================================
// 输出
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthClassification {
    Healthy,
    Critical,
}

impl HealthClassification {
    pub fn label(&self) -> &'static str {
        match self {
            HealthClassification::Healthy => "Healthy",
            HealthClassification::Critical => "Critical",
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, HealthClassification::Critical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceStatus {
    /// 当前周期内已行驶距离，位于 `[0, interval)`
    pub progress_within_cycle: f64,
    /// 位于 `[0, 1)`
    pub progress_fraction: f64,
    pub classification: HealthClassification,
    pub interval: ServiceInterval,
}

impl MaintenanceStatus {
    /// 进度条宽度百分比
    pub fn progress_percent(&self) -> f64 {
        self.progress_fraction * 100.0
    }

    /// 距离下一次保养的剩余距离
    pub fn remaining_in_cycle(&self) -> f64 {
        self.interval.value() - self.progress_within_cycle
    }
}

/// 计算车辆在当前保养周期中的位置以及健康分类
///
/// 里程为负数或非有限值时返回 `InvalidInput`。
pub fn evaluate(
    snapshot: &VehicleUsageSnapshot,
    interval: ServiceInterval,
) -> ApiResult<MaintenanceStatus> {
    let mileage = snapshot.current_mileage;
    if !mileage.is_finite() || mileage < 0.0 {
        return Err(ApiError::invalid_input(format!(
            "mileage must be a non-negative number, got {mileage}"
        )));
    }

    let progress_within_cycle = mileage.rem_euclid(interval.value());
    let classification = if progress_within_cycle < CRITICAL_BUFFER {
        HealthClassification::Critical
    } else {
        HealthClassification::Healthy
    };

    Ok(MaintenanceStatus {
        progress_within_cycle,
        progress_fraction: progress_within_cycle / interval.value(),
        classification,
        interval,
    })
}

/// 使用默认 5000 周期
pub fn evaluate_default(snapshot: &VehicleUsageSnapshot) -> ApiResult<MaintenanceStatus> {
    evaluate(snapshot, ServiceInterval::default())
}

// =========================================================
// 保养计划到期计算
// =========================================================

/// 解析 `"500,250,100"` 形式的告警阈值，按降序返回
pub fn parse_thresholds(raw: &str) -> ApiResult<Vec<f64>> {
    let mut thresholds = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let value = item
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ApiError::invalid_input(format!("invalid alert threshold: {item}")))?;
        thresholds.push(value);
    }
    thresholds.sort_by(|a, b| b.total_cmp(a));
    Ok(thresholds)
}

/// 单个保养计划的到期情况
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDue {
    pub tracking_type: TrackingType,
    /// 距离到期的剩余量，负数表示已逾期
    pub remaining: f64,
    /// 已越过的最大阈值
    pub crossed_threshold: Option<f64>,
}

impl ScheduleDue {
    /// 基于车辆读数计算
    ///
    /// `time` 类型无法由读数推导，返回 `Ok(None)`。
    pub fn compute(
        schedule: &MaintenanceSchedule,
        snapshot: &VehicleUsageSnapshot,
    ) -> ApiResult<Option<Self>> {
        let current = match schedule.tracking_type {
            TrackingType::Miles => snapshot.current_mileage,
            TrackingType::Hours => snapshot.current_hours,
            TrackingType::Time => return Ok(None),
        };
        let remaining = schedule.last_performed_value + schedule.interval_value - current;
        let thresholds = parse_thresholds(&schedule.alert_thresholds)?;
        let crossed_threshold = thresholds.into_iter().find(|t| remaining <= *t);

        Ok(Some(Self {
            tracking_type: schedule.tracking_type,
            remaining,
            crossed_threshold,
        }))
    }

    pub fn is_overdue(&self) -> bool {
        self.remaining < 0.0
    }
}

#[cfg(test)]
mod tests;
