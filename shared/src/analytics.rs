//! 统计页使用的聚合计算

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::maintenance::{evaluate, HealthClassification, ServiceInterval};
use crate::models::{CostSummary, LogRecord, Vehicle};

impl CostSummary {
    /// 本地汇总，与 `/analytics/cost` 的口径一致
    pub fn from_records(records: &[LogRecord]) -> Self {
        Self {
            total_maintenance_cost: records.iter().map(|r| r.cost).sum(),
            count: records.len() as u64,
        }
    }
}

// =========================================================
// 月度费用趋势
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCost {
    pub year: i32,
    pub month: u32,
    /// `Jan`
    pub label: String,
    pub total: f64,
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// 以最近一条记录所在月份为终点，返回连续 `months` 个月的费用，缺失月份补 0
pub fn monthly_cost_trend(records: &[LogRecord], months: usize) -> Vec<MonthlyCost> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.performed_date.year_month()).or_default() += record.cost;
    }

    let Some(&latest) = buckets.keys().next_back() else {
        return Vec::new();
    };
    let (mut year, mut month) = latest;

    let mut trend = Vec::with_capacity(months);
    for _ in 0..months {
        trend.push(MonthlyCost {
            year,
            month,
            label: month_label(year, month),
            total: buckets.get(&(year, month)).copied().unwrap_or(0.0),
        });
        (year, month) = previous_month(year, month);
    }
    trend.reverse();
    trend
}

// =========================================================
// 车队健康指数
// =========================================================

/// 健康车辆占比（整数百分比），空车队返回 None
///
/// 读数非法的车辆不计入健康数，但计入总数。
pub fn fleet_health_index(vehicles: &[Vehicle], interval: ServiceInterval) -> Option<u32> {
    if vehicles.is_empty() {
        return None;
    }
    let healthy = vehicles
        .iter()
        .filter(|v| {
            evaluate(&v.snapshot(), interval)
                .map(|s| s.classification == HealthClassification::Healthy)
                .unwrap_or(false)
        })
        .count();
    Some(((healthy as f64 / vehicles.len() as f64) * 100.0).round() as u32)
}

// =========================================================
// 折线图几何
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// SVG 折线图的坐标
///
/// 纵轴下限固定为 0，上限为数据最大值（全为 0 时取 100）。
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub max: f64,
    pub points: Vec<ChartPoint>,
}

impl ChartGeometry {
    pub fn new(data: &[f64], width: f64, height: f64, padding: f64) -> Self {
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max = if max.is_finite() && max > 0.0 { max } else { 100.0 };
        let inner_w = width - padding * 2.0;
        let inner_h = height - padding * 2.0;

        let points = data
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let x = if data.len() > 1 {
                    (i as f64 / (data.len() - 1) as f64) * inner_w + padding
                } else {
                    width / 2.0
                };
                let y = height - (d / max) * inner_h - padding;
                ChartPoint { x, y }
            })
            .collect();

        Self {
            width,
            height,
            padding,
            max,
            points,
        }
    }

    /// 网格线的 y 坐标（0%、50%、100%）
    pub fn grid_lines(&self) -> [f64; 3] {
        let inner_h = self.height - self.padding * 2.0;
        [0.0, 0.5, 1.0].map(|p| self.height - p * inner_h - self.padding)
    }

    /// `<polyline points=...>`
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 折线下方填充区域的 path
    pub fn area_path(&self) -> String {
        let base = self.height - self.padding;
        format!(
            "M {:.1},{:.1} {} {:.1},{:.1} Z",
            self.padding,
            base,
            self.polyline(),
            self.width - self.padding,
            base
        )
    }
}

// =========================================================
// 单车历史
// =========================================================

/// 从全局记录中挑出属于 `vehicle` 的条目，最新的在前
///
/// 记录带 `vehicle_id` 时按 id 匹配，否则按车辆名称匹配。
pub fn filter_vehicle_history(records: Vec<LogRecord>, vehicle: &Vehicle) -> Vec<LogRecord> {
    let mut history: Vec<LogRecord> = records
        .into_iter()
        .filter(|r| match r.vehicle_id {
            Some(id) => id == vehicle.id,
            None => r.vehicle_name == vehicle.name,
        })
        .collect();
    history.sort_by(|a, b| b.performed_date.cmp(&a.performed_date));
    history
}

/// 最近 `n` 个月的起始日期，用于统计页标题
pub fn trend_start_label(trend: &[MonthlyCost]) -> Option<String> {
    let first = trend.first()?;
    NaiveDate::from_ymd_opt(first.year, first.month, 1)
        .map(|d| format!("{} {}", d.format("%b"), d.year()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Timestamp;

    fn record(id: i64, vehicle_id: Option<i64>, name: &str, date: &str, cost: f64) -> LogRecord {
        LogRecord {
            id,
            vehicle_id,
            vehicle_name: name.to_string(),
            task_name: "Oil".to_string(),
            performed_date: Timestamp::parse(date).unwrap(),
            cost,
            performed_at_mileage: 0.0,
            performed_at_hours: None,
            notes: None,
        }
    }

    fn vehicle(id: i64, name: &str, mileage: f64) -> Vehicle {
        Vehicle {
            id,
            geotab_id: format!("b{id}"),
            name: name.to_string(),
            vin: None,
            current_mileage: mileage,
            current_hours: 0.0,
            last_sync: Timestamp::parse("2024-01-01").unwrap(),
        }
    }

    #[test]
    fn test_cost_summary_from_records() {
        let records = [
            record(1, Some(1), "A", "2024-01-02", 100.0),
            record(2, Some(1), "A", "2024-01-09", 50.5),
        ];
        let summary = CostSummary::from_records(&records);
        assert_eq!(summary.total_maintenance_cost, 150.5);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_monthly_trend_zero_fills_and_crosses_year() {
        let records = [
            record(1, Some(1), "A", "2023-11-20", 40.0),
            record(2, Some(1), "A", "2024-01-05", 10.0),
            record(3, Some(2), "B", "2024-01-28", 15.0),
        ];
        let trend = monthly_cost_trend(&records, 4);
        let labels: Vec<&str> = trend.iter().map(|m| m.label.as_str()).collect();
        let totals: Vec<f64> = trend.iter().map(|m| m.total).collect();
        assert_eq!(labels, ["Oct", "Nov", "Dec", "Jan"]);
        assert_eq!(totals, [0.0, 40.0, 0.0, 25.0]);
        assert_eq!(trend_start_label(&trend).as_deref(), Some("Oct 2023"));
    }

    #[test]
    fn test_monthly_trend_empty() {
        assert!(monthly_cost_trend(&[], 6).is_empty());
    }

    #[test]
    fn test_health_index() {
        let fleet = [
            vehicle(1, "A", 5200.0),
            vehicle(2, "B", 6000.0),
            vehicle(3, "C", 7400.0),
        ];
        assert_eq!(fleet_health_index(&fleet, ServiceInterval::default()), Some(67));
        assert_eq!(fleet_health_index(&[], ServiceInterval::default()), None);
    }

    #[test]
    fn test_chart_scaling() {
        let chart = ChartGeometry::new(&[0.0, 50.0, 100.0], 400.0, 150.0, 20.0);
        assert_eq!(chart.max, 100.0);
        assert_eq!(chart.points[0], ChartPoint { x: 20.0, y: 130.0 });
        assert_eq!(chart.points[1], ChartPoint { x: 200.0, y: 75.0 });
        assert_eq!(chart.points[2], ChartPoint { x: 380.0, y: 20.0 });
        assert_eq!(chart.grid_lines(), [130.0, 75.0, 20.0]);
        assert_eq!(chart.polyline(), "20.0,130.0 200.0,75.0 380.0,20.0");
    }

    #[test]
    fn test_chart_all_zero_and_single_point() {
        let chart = ChartGeometry::new(&[0.0, 0.0], 400.0, 150.0, 20.0);
        assert_eq!(chart.max, 100.0);
        assert!(chart.points.iter().all(|p| p.y == 130.0));

        let single = ChartGeometry::new(&[30.0], 400.0, 150.0, 20.0);
        assert_eq!(single.points[0], ChartPoint { x: 200.0, y: 20.0 });
    }

    #[test]
    fn test_vehicle_history_matches_id_then_name() {
        let records = vec![
            record(1, Some(2), "Truck", "2024-01-01", 1.0),
            record(2, None, "Truck", "2024-03-01", 1.0),
            record(3, Some(5), "Truck", "2024-02-01", 1.0),
            record(4, None, "Other", "2024-02-01", 1.0),
        ];
        let history = filter_vehicle_history(records, &vehicle(2, "Truck", 0.0));
        let ids: Vec<i64> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 1]);
    }
}
