//! 领域模型 (Domain Models)
//!
//! 字段名与外部后端的 JSON 负载保持一致。

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::date::Timestamp;
use crate::maintenance::VehicleUsageSnapshot;

// =========================================================
// 车辆
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub geotab_id: String,
    pub name: String,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub current_mileage: f64,
    #[serde(default)]
    pub current_hours: f64,
    pub last_sync: Timestamp,
}

impl Vehicle {
    pub fn snapshot(&self) -> VehicleUsageSnapshot {
        VehicleUsageSnapshot {
            current_mileage: self.current_mileage,
            current_hours: self.current_hours,
        }
    }

    /// 车架号，空字符串视为未设置
    pub fn vin_label(&self) -> &str {
        match self.vin.as_deref() {
            Some(vin) if !vin.trim().is_empty() => vin,
            _ => "VIN NOT SET",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    pub geotab_id: String,
    pub vin: Option<String>,
}

impl NewVehicle {
    /// 由表单字段构造，空 VIN 以 `null` 发送
    pub fn new(name: impl Into<String>, geotab_id: impl Into<String>, vin: &str) -> Self {
        let vin = vin.trim();
        Self {
            name: name.into().trim().to_string(),
            geotab_id: geotab_id.into().trim().to_string(),
            vin: (!vin.is_empty()).then(|| vin.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteVehicle {
    pub id: i64,
}

// =========================================================
// 维护记录
// =========================================================

pub const DEFAULT_TASK_NAME: &str = "Regular Maintenance";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaintenanceLog {
    pub vehicle_id: i64,
    pub task_name: String,
    pub performed_at_mileage: f64,
    pub performed_at_hours: f64,
    pub cost: f64,
    pub notes: Option<String>,
}

impl NewMaintenanceLog {
    /// 以车辆当前读数作为默认值
    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.id,
            task_name: DEFAULT_TASK_NAME.to_string(),
            performed_at_mileage: vehicle.current_mileage,
            performed_at_hours: vehicle.current_hours,
            cost: 0.0,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    pub vehicle_name: String,
    pub task_name: String,
    pub performed_date: Timestamp,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub performed_at_mileage: f64,
    #[serde(default)]
    pub performed_at_hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_maintenance_cost: f64,
    pub count: u64,
}

// =========================================================
// 设置
// =========================================================

pub const SETTING_GEOTAB_SERVER: &str = "geotab_server";
pub const SETTING_GEOTAB_DB: &str = "geotab_db";
pub const SETTING_GEOTAB_USER: &str = "geotab_user";
pub const SETTING_GEOTAB_PASS: &str = "geotab_pass";
pub const SETTING_ADMIN_EMAIL: &str = "admin_email";

/// 平铺的键值设置表
///
/// 未知键原样保留；后端偶尔返回的非字符串值统一转为字符串。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, String>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// 用 `other` 覆盖同名键，保留本地独有的键
    pub fn merge(&mut self, other: Settings) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let map = raw
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect();
        Ok(Settings(map))
    }
}

// =========================================================
// 认证
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub id: i64,
    pub email: String,
    pub login_time: Timestamp,
    #[serde(default)]
    pub user_id: Option<i64>,
}

// =========================================================
// 通知
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: Timestamp,
}

// =========================================================
// 支持工单
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupportTicket {
    pub issue_type: String,
    pub impact_count: u32,
    pub description: String,
    pub user_email: String,
    pub attachment: Option<Attachment>,
}

// =========================================================
// 保养计划
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingType {
    Miles,
    Hours,
    Time,
}

impl TrackingType {
    pub fn unit_label(&self) -> &'static str {
        match self {
            TrackingType::Miles => "MI",
            TrackingType::Hours => "HR",
            TrackingType::Time => "DAYS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    pub id: i64,
    pub vehicle_id: i64,
    pub task_name: String,
    pub tracking_type: TrackingType,
    pub interval_value: f64,
    #[serde(default)]
    pub alert_thresholds: String,
    #[serde(default)]
    pub last_performed_value: f64,
    #[serde(default)]
    pub last_performed_date: Option<Timestamp>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub vehicle_id: i64,
    pub task_name: String,
    pub tracking_type: TrackingType,
    pub interval_value: f64,
    pub alert_thresholds: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub interval_value: f64,
    pub last_performed_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vehicle_from_backend_json() {
        let v: Vehicle = serde_json::from_value(json!({
            "id": 3,
            "geotab_id": "b12",
            "name": "Truck 12",
            "vin": null,
            "current_mileage": 10234.5,
            "current_hours": 812.25,
            "last_sync": "2024-05-02T08:00:00.000123"
        }))
        .unwrap();
        assert_eq!(v.vin_label(), "VIN NOT SET");
        assert_eq!(v.snapshot().current_mileage, 10234.5);
    }

    #[test]
    fn test_new_vehicle_blank_vin_is_null() {
        let req = NewVehicle::new(" Van 4 ", "b4", "  ");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"name": "Van 4", "geotab_id": "b4", "vin": null}));
    }

    #[test]
    fn test_settings_stringifies_and_preserves_unknown_keys() {
        let s: Settings = serde_json::from_value(json!({
            "geotab_server": "my.geotab.com",
            "sync_minutes": 15,
            "custom": null
        }))
        .unwrap();
        assert_eq!(s.get(SETTING_GEOTAB_SERVER), "my.geotab.com");
        assert_eq!(s.get("sync_minutes"), "15");
        assert_eq!(s.get("custom"), "");
        assert_eq!(s.get(SETTING_ADMIN_EMAIL), "");
    }

    #[test]
    fn test_notification_type_field() {
        let n: Notification = serde_json::from_value(json!({
            "id": 1,
            "title": "Oil change due",
            "message": "Truck 12 is within 250 miles",
            "type": "warning",
            "is_read": false,
            "created_at": "2024-05-02T08:00:00"
        }))
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Warning);
    }

    #[test]
    fn test_log_defaults_from_vehicle() {
        let v = Vehicle {
            id: 9,
            geotab_id: "g".into(),
            name: "Loader".into(),
            vin: Some("1FT".into()),
            current_mileage: 420.0,
            current_hours: 33.5,
            last_sync: Timestamp::parse("2024-01-01").unwrap(),
        };
        let log = NewMaintenanceLog::for_vehicle(&v);
        assert_eq!(log.task_name, DEFAULT_TASK_NAME);
        assert_eq!(log.performed_at_mileage, 420.0);
        assert_eq!(log.performed_at_hours, 33.5);
        assert_eq!(log.cost, 0.0);
    }
}
