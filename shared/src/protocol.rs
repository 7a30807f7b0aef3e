use serde::de::{Deserialize, DeserializeOwned, Deserializer, IgnoredAny};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AccessToken, CostSummary, Credentials, DeleteVehicle, LogRecord, LoginRecord,
    MaintenanceSchedule, NewMaintenanceLog, NewSchedule, NewVehicle, Notification, ScheduleUpdate,
    Settings, SupportTicket, UserProfile, Vehicle,
};
use crate::request::{FormField, HttpMethod, RequestBody};

/// 请求是否携带 Bearer 令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 从不携带
    None,
    /// 有则携带
    Optional,
    /// 必须携带，本地没有令牌时直接失败
    Required,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    const AUTH: AuthMode = AuthMode::None;

    /// The URL path, relative to the API base.
    fn path(&self) -> String;

    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Empty)
    }
}

/// 响应体内容无关紧要的接口使用此类型，可以从任何 JSON（包括 `null`）解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ignored;

impl<'de> Deserialize<'de> for Ignored {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Ignored)
    }
}

fn json_body<T: Serialize>(value: &T) -> ApiResult<RequestBody> {
    serde_json::to_string(value)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::invalid_input(format!("failed to encode request: {e}")))
}

// =========================================================
// 车辆 (Vehicles)
// =========================================================

/// List all vehicles
#[derive(Debug, Clone, Copy, Default)]
pub struct ListVehicles;

impl ApiRequest for ListVehicles {
    type Response = Vec<Vehicle>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/vehicles".to_string()
    }
}

/// Enroll a vehicle
impl ApiRequest for NewVehicle {
    type Response = Vehicle;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/vehicles".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        json_body(self)
    }
}

/// Delete a vehicle (and, on the backend, its logs)
impl ApiRequest for DeleteVehicle {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const AUTH: AuthMode = AuthMode::Optional;

    fn path(&self) -> String {
        format!("/vehicles/{}", self.id)
    }
}

// =========================================================
// 维护记录与统计 (Logs & Analytics)
// =========================================================

impl ApiRequest for NewMaintenanceLog {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthMode = AuthMode::Optional;

    fn path(&self) -> String {
        "/logs".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        json_body(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetCostSummary;

impl ApiRequest for GetCostSummary {
    type Response = CostSummary;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/analytics/cost".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListLogRecords;

impl ApiRequest for ListLogRecords {
    type Response = Vec<LogRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/analytics/logs".to_string()
    }
}

// =========================================================
// 设置 (Settings)
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GetSettings;

impl ApiRequest for GetSettings {
    type Response = Settings;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/settings/all".to_string()
    }
}

/// Persist the whole settings map
impl ApiRequest for Settings {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/settings".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        json_body(self)
    }
}

// =========================================================
// 认证 (Auth)
// =========================================================

impl ApiRequest for Credentials {
    type Response = AccessToken;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        json_body(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetProfile;

impl ApiRequest for GetProfile {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Required;

    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListLoginRecords;

impl ApiRequest for ListLoginRecords {
    type Response = Vec<LoginRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Required;

    fn path(&self) -> String {
        "/admin/logs/login".to_string()
    }
}

// =========================================================
// 通知 (Notifications)
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListNotifications;

impl ApiRequest for ListNotifications {
    type Response = Vec<Notification>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/notifications".to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkNotificationRead {
    pub id: i64,
}

impl ApiRequest for MarkNotificationRead {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/notifications/{}/read", self.id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkAllNotificationsRead;

impl ApiRequest for MarkAllNotificationsRead {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/notifications/read-all".to_string()
    }
}

// =========================================================
// 支持工单 (Support)
// =========================================================

impl ApiRequest for SupportTicket {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/support/submit".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        let mut fields = vec![
            ("issue_type".to_string(), FormField::Text(self.issue_type.clone())),
            (
                "impact_count".to_string(),
                FormField::Text(self.impact_count.to_string()),
            ),
            ("description".to_string(), FormField::Text(self.description.clone())),
            ("user_email".to_string(), FormField::Text(self.user_email.clone())),
        ];
        if let Some(attachment) = &self.attachment {
            fields.push((
                "attachment".to_string(),
                FormField::File {
                    file_name: attachment.file_name.clone(),
                    content_type: attachment.content_type.clone(),
                    bytes: attachment.bytes.clone(),
                },
            ));
        }
        Ok(RequestBody::Multipart(fields))
    }
}

// =========================================================
// 保养计划 (Schedules)
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListSchedules {
    pub vehicle_id: i64,
}

impl ApiRequest for ListSchedules {
    type Response = Vec<MaintenanceSchedule>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/schedules/{}", self.vehicle_id)
    }
}

impl ApiRequest for NewSchedule {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/schedules".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        json_body(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateSchedule {
    pub id: i64,
    pub update: ScheduleUpdate,
}

impl ApiRequest for UpdateSchedule {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTH: AuthMode = AuthMode::Optional;

    fn path(&self) -> String {
        format!("/schedules/{}", self.id)
    }

    fn body(&self) -> ApiResult<RequestBody> {
        json_body(&self.update)
    }
}
