//! 车队后端 API 客户端
//!
//! 唯一负责拼接 URL、附加令牌以及把响应映射为 `ApiError` 的地方。
//! 不做重试，不做取消：调用方在哪里发起请求，就在哪里处理错误。

use crate::analytics::filter_vehicle_history;
use crate::error::{ApiError, ApiResult, Detail, ErrorBody};
use crate::models::{
    CostSummary, Credentials, DeleteVehicle, LogRecord, LoginRecord, MaintenanceSchedule,
    NewMaintenanceLog, NewSchedule, NewVehicle, Notification, ScheduleUpdate, Settings,
    SupportTicket, UserProfile, Vehicle,
};
use crate::protocol::{
    ApiRequest, AuthMode, GetCostSummary, GetProfile, GetSettings, ListLogRecords,
    ListLoginRecords, ListNotifications, ListSchedules, ListVehicles, MarkAllNotificationsRead,
    MarkNotificationRead, UpdateSchedule,
};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::session::{Session, SessionStore};

#[derive(Clone, Debug)]
pub struct FleetApi<C, S> {
    base_url: String,
    http: C,
    session: Session<S>,
}

impl<C: HttpClient, S: SessionStore> FleetApi<C, S> {
    pub fn new(base_url: &str, http: C, session: Session<S>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            session,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送一个类型化请求并解析响应
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let auth = match R::AUTH {
            AuthMode::None => None,
            AuthMode::Optional => self.session.bearer_header(),
            AuthMode::Required => Some(
                self.session
                    .bearer_header()
                    .ok_or_else(|| ApiError::unauthorized("Please sign in to continue."))?,
            ),
        };

        let url = self.url(&request.path());
        let mut http_request = HttpRequest::new(&url, R::METHOD).with_body(request.body()?);
        if let Some((name, value)) = auth {
            http_request = http_request.with_header(name, &value);
        }

        tracing::debug!(method = R::METHOD.as_str(), %url, "sending request");
        let response = self.http.send(http_request).await.inspect_err(|e| {
            tracing::warn!(method = R::METHOD.as_str(), %url, error = %e, "request failed");
        })?;

        if !response.ok() {
            let err = error_from_response(&response);
            tracing::warn!(
                method = R::METHOD.as_str(),
                %url,
                status = response.status,
                error = %err,
                "backend rejected request"
            );
            return Err(err);
        }

        let body = response.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(|e| ApiError::decode(e.to_string()))
    }

    // =========================================================
    // 车辆
    // =========================================================

    pub async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        self.execute(&ListVehicles).await
    }

    pub async fn add_vehicle(&self, vehicle: &NewVehicle) -> ApiResult<Vehicle> {
        self.execute(vehicle).await
    }

    pub async fn delete_vehicle(&self, id: i64) -> ApiResult<()> {
        self.execute(&DeleteVehicle { id }).await.map(drop)
    }

    // =========================================================
    // 维护记录与统计
    // =========================================================

    pub async fn log_maintenance(&self, log: &NewMaintenanceLog) -> ApiResult<()> {
        self.execute(log).await.map(drop)
    }

    pub async fn cost_summary(&self) -> ApiResult<CostSummary> {
        self.execute(&GetCostSummary).await
    }

    pub async fn log_records(&self) -> ApiResult<Vec<LogRecord>> {
        self.execute(&ListLogRecords).await
    }

    /// 单车历史，来自全局记录的过滤结果
    pub async fn vehicle_history(&self, vehicle: &Vehicle) -> ApiResult<Vec<LogRecord>> {
        let records = self.log_records().await?;
        Ok(filter_vehicle_history(records, vehicle))
    }

    // =========================================================
    // 设置
    // =========================================================

    pub async fn settings(&self) -> ApiResult<Settings> {
        self.execute(&GetSettings).await
    }

    pub async fn save_settings(&self, settings: &Settings) -> ApiResult<()> {
        self.execute(settings).await.map(drop)
    }

    // =========================================================
    // 认证
    // =========================================================

    /// 登录成功后令牌写入会话
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<()> {
        let token = self.execute(credentials).await?;
        if token.access_token.trim().is_empty() {
            return Err(ApiError::decode("login response carried an empty token"));
        }
        self.session.set_token(&token.access_token);
        tracing::info!(email = %credentials.email, "signed in");
        Ok(())
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    pub async fn profile(&self) -> ApiResult<UserProfile> {
        self.execute(&GetProfile).await
    }

    pub async fn login_records(&self) -> ApiResult<Vec<LoginRecord>> {
        self.execute(&ListLoginRecords).await
    }

    // =========================================================
    // 通知
    // =========================================================

    pub async fn notifications(&self) -> ApiResult<Vec<Notification>> {
        self.execute(&ListNotifications).await
    }

    pub async fn mark_notification_read(&self, id: i64) -> ApiResult<()> {
        self.execute(&MarkNotificationRead { id }).await.map(drop)
    }

    pub async fn mark_all_notifications_read(&self) -> ApiResult<()> {
        self.execute(&MarkAllNotificationsRead).await.map(drop)
    }

    // =========================================================
    // 支持工单
    // =========================================================

    pub async fn submit_support_ticket(&self, ticket: &SupportTicket) -> ApiResult<()> {
        self.execute(ticket).await.map(drop)
    }

    // =========================================================
    // 保养计划
    // =========================================================

    pub async fn schedules(&self, vehicle_id: i64) -> ApiResult<Vec<MaintenanceSchedule>> {
        self.execute(&ListSchedules { vehicle_id }).await
    }

    pub async fn add_schedule(&self, schedule: &NewSchedule) -> ApiResult<()> {
        self.execute(schedule).await.map(drop)
    }

    pub async fn update_schedule(&self, id: i64, update: ScheduleUpdate) -> ApiResult<()> {
        self.execute(&UpdateSchedule { id, update }).await.map(drop)
    }
}

/// 将非 2xx 响应转换为错误
fn error_from_response(response: &HttpResponse) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| {
            let raw = response.body.trim();
            if raw.is_empty() {
                Detail::Text(format!("Request failed with status {}", response.status))
            } else {
                Detail::Text(raw.to_string())
            }
        });

    if response.status == 401 {
        ApiError::Unauthorized(detail.render())
    } else {
        ApiError::Backend {
            status: response.status,
            detail,
        }
    }
}

#[cfg(test)]
mod tests;
