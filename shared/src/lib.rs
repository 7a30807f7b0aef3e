pub mod analytics;
pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod format;
pub mod input;
pub mod maintenance;
pub mod models;
pub mod protocol;
pub mod request;
pub mod session;

pub use client::FleetApi;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, Detail};
pub use maintenance::{
    evaluate, evaluate_default, HealthClassification, MaintenanceStatus, ScheduleDue,
    ServiceInterval, VehicleUsageSnapshot,
};
pub use models::*;
pub use session::{Session, SessionStore};
