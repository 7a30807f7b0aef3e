//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `EnrollmentForm`，负责数据的持有、重置
//! 以及到请求对象的转换。

use geotrack_shared::input::require_non_empty;
use geotrack_shared::{ApiResult, NewVehicle};
use leptos::prelude::*;

/// 使用 `RwSignal` 因为它实现了 `Copy`，可以直接作为 Props 传递。
#[derive(Clone, Copy)]
pub struct EnrollmentForm {
    pub name: RwSignal<String>,
    pub geotab_id: RwSignal<String>,
    pub vin: RwSignal<String>,
}

impl EnrollmentForm {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            geotab_id: RwSignal::new(String::new()),
            vin: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.geotab_id.set(String::new());
        self.vin.set(String::new());
    }

    /// VIN 可留空，名称与 Geotab ID 必填
    pub fn to_request(&self) -> ApiResult<NewVehicle> {
        let name = require_non_empty("Vehicle name", &self.name.get_untracked())?;
        let geotab_id = require_non_empty("Geotab ID", &self.geotab_id.get_untracked())?;
        Ok(NewVehicle::new(name, geotab_id, &self.vin.get_untracked()))
    }
}

impl Default for EnrollmentForm {
    fn default() -> Self {
        Self::new()
    }
}
