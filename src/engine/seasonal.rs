// ==========================================
// 零售库存分配决策支持系统 - 季节性预测引擎
// ==========================================
// 职责: 基于历史周销数据计算季节指数，层级回退取因子
// 回退链: 商品 → 子类目 → 大类 → 内置默认曲线
// 输入: 历史周销 CSV (MainGroup / SubGroupDesc / year / week / sales / promo)
// ==========================================

use crate::util::safe_divide;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

/// 无子类目数据时的默认活动提升倍数
const DEFAULT_PROMO_LIFT: f64 = 1.2;

// ==========================================
// 错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum SeasonalError {
    #[error("历史数据文件读取失败: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("历史数据 CSV 解析失败: {0}")]
    CsvParseError(#[from] csv::Error),

    #[error("历史数据缺少必需列: {0}")]
    MissingColumns(String),
}

// ==========================================
// 历史数据行
// ==========================================
#[derive(Debug, Clone, Deserialize)]
struct HistoricalRow {
    #[serde(default)]
    sku: Option<String>,
    #[serde(rename = "MainGroup")]
    main_group: String,
    #[serde(rename = "SubGroupDesc")]
    sub_group: String,
    year: i32,
    week: u32,
    sales: f64,
    #[serde(default)]
    promo: u8,
}

// ==========================================
// 季节因子查询结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorSource {
    Product,
    Subcat,
    Maingroup,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactor {
    /// 1.0 = 中性，>1 旺季，<1 淡季
    pub factor: f64,
    pub source: FactorSource,
    pub week: u32,
    pub promo_adjusted: bool,
}

// ==========================================
// 周度季节报告行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalReportRow {
    pub week: u32,
    /// 全部分组在该周季节指数的均值
    pub avg_factor: f64,
}

// ==========================================
// 周度预测行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyForecast {
    pub week: u32,
    pub forecasted_daily_sales: f64,
    pub forecasted_weekly_sales: f64,
    pub seasonal_factor: f64,
    pub source: FactorSource,
    pub is_promo: bool,
}

// ==========================================
// SeasonalForecaster - 季节性预测引擎
// ==========================================
pub struct SeasonalForecaster {
    /// "product_{sku}" / "subcat_{name}" / "maingroup_{name}" → 周 → 指数
    seasonal_indices: HashMap<String, HashMap<u32, f64>>,
    /// "subcat_{name}" → 活动提升倍数
    promo_impact: HashMap<String, f64>,
    /// 同层级键 → 年度 → 销量合计（同比查询用）
    yearly_sales: HashMap<String, BTreeMap<i32, f64>>,
}

impl SeasonalForecaster {
    /// 无历史数据的空引擎，所有查询走默认曲线
    pub fn empty() -> Self {
        Self {
            seasonal_indices: HashMap::new(),
            promo_impact: HashMap::new(),
            yearly_sales: HashMap::new(),
        }
    }

    /// 从历史周销 CSV 构建
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, SeasonalError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;

        // 先做列校验，给出可读的缺列报告
        let headers = reader.headers()?.clone();
        let required = ["MainGroup", "SubGroupDesc", "year", "week", "sales"];
        let missing: Vec<&str> = required
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(SeasonalError::MissingColumns(missing.join(", ")));
        }

        let mut rows = Vec::new();
        for record in reader.deserialize::<HistoricalRow>() {
            rows.push(record?);
        }

        info!(records = rows.len(), "历史周销数据加载完成");
        Ok(Self::from_rows(&rows))
    }

    fn from_rows(rows: &[HistoricalRow]) -> Self {
        let mut forecaster = Self::empty();
        forecaster.build_indices(rows);
        forecaster.build_promo_impact(rows);
        forecaster.build_yearly_sales(rows);
        info!(groups = forecaster.seasonal_indices.len(), "季节指数构建完成");
        forecaster
    }

    /// 按键分组后计算周度季节指数: 周均销量 / 全期均销量
    fn build_indices(&mut self, rows: &[HistoricalRow]) {
        let mut grouped: HashMap<String, Vec<&HistoricalRow>> = HashMap::new();
        for row in rows {
            if let Some(sku) = row.sku.as_deref().filter(|s| !s.trim().is_empty()) {
                grouped
                    .entry(format!("product_{}", sku))
                    .or_default()
                    .push(row);
            }
            grouped
                .entry(format!("subcat_{}", row.sub_group))
                .or_default()
                .push(row);
            grouped
                .entry(format!("maingroup_{}", row.main_group))
                .or_default()
                .push(row);
        }

        for (key, group) in grouped {
            let overall_avg = group.iter().map(|r| r.sales).sum::<f64>() / group.len() as f64;
            if overall_avg <= 0.0 {
                continue;
            }

            let mut weekly: HashMap<u32, (f64, usize)> = HashMap::new();
            for row in &group {
                let entry = weekly.entry(row.week).or_insert((0.0, 0));
                entry.0 += row.sales;
                entry.1 += 1;
            }

            let index: HashMap<u32, f64> = weekly
                .into_iter()
                .map(|(week, (sum, count))| (week, (sum / count as f64) / overall_avg))
                .collect();
            self.seasonal_indices.insert(key, index);
        }
    }

    /// 子类目活动提升 = 活动期均销 / 非活动期均销
    fn build_promo_impact(&mut self, rows: &[HistoricalRow]) {
        let mut by_subcat: HashMap<String, (Vec<f64>, Vec<f64>)> = HashMap::new();
        for row in rows {
            let entry = by_subcat.entry(row.sub_group.clone()).or_default();
            if row.promo == 1 {
                entry.0.push(row.sales);
            } else {
                entry.1.push(row.sales);
            }
        }

        for (subcat, (promo, normal)) in by_subcat {
            let promo_avg = mean(&promo);
            let normal_avg = mean(&normal);
            let lift = if normal_avg > 0.0 {
                safe_divide(promo_avg, normal_avg, 1.0)
            } else {
                1.0
            };
            self.promo_impact.insert(format!("subcat_{}", subcat), lift);
        }
    }

    /// 同层级键 → 年度销量合计
    fn build_yearly_sales(&mut self, rows: &[HistoricalRow]) {
        for row in rows {
            let mut add = |key: String| {
                *self
                    .yearly_sales
                    .entry(key)
                    .or_default()
                    .entry(row.year)
                    .or_insert(0.0) += row.sales;
            };
            if let Some(sku) = row.sku.as_deref().filter(|s| !s.trim().is_empty()) {
                add(format!("product_{}", sku));
            }
            add(format!("subcat_{}", row.sub_group));
            add(format!("maingroup_{}", row.main_group));
        }
    }

    /// 层级回退取季节因子
    ///
    /// # 参数
    /// - `week`: ISO 周号，None 时取当前周
    /// - `is_promo`: 活动商品叠加活动提升倍数
    pub fn get_seasonal_factor(
        &self,
        sku: Option<&str>,
        subcat: Option<&str>,
        maingroup: Option<&str>,
        week: Option<u32>,
        is_promo: bool,
    ) -> SeasonalFactor {
        let week = week.unwrap_or_else(|| Utc::now().iso_week().week());

        let lookup = |key: String| -> Option<f64> {
            self.seasonal_indices
                .get(&key)
                .map(|index| index.get(&week).copied().unwrap_or(1.0))
        };

        let (mut factor, source) = sku
            .and_then(|s| lookup(format!("product_{}", s)).map(|f| (f, FactorSource::Product)))
            .or_else(|| {
                subcat.and_then(|s| {
                    lookup(format!("subcat_{}", s)).map(|f| (f, FactorSource::Subcat))
                })
            })
            .or_else(|| {
                maingroup.and_then(|m| {
                    lookup(format!("maingroup_{}", m)).map(|f| (f, FactorSource::Maingroup))
                })
            })
            .unwrap_or((default_seasonal_factor(week), FactorSource::Default));

        if is_promo {
            let lift = subcat
                .and_then(|s| self.promo_impact.get(&format!("subcat_{}", s)).copied())
                .unwrap_or(DEFAULT_PROMO_LIFT);
            factor *= lift;
        }

        SeasonalFactor {
            factor,
            source,
            week,
            promo_adjusted: is_promo,
        }
    }

    /// 同比增速: 最近两个年度的销量总和对比
    ///
    /// 层级回退与因子查询一致: 商品 → 子类目 → 大类；
    /// 不足两个年度或上年销量为 0 时返回 None
    pub fn get_yoy_growth(
        &self,
        sku: Option<&str>,
        subcat: Option<&str>,
        maingroup: Option<&str>,
    ) -> Option<f64> {
        let key = sku
            .map(|s| format!("product_{}", s))
            .filter(|k| self.yearly_sales.contains_key(k))
            .or_else(|| {
                subcat
                    .map(|s| format!("subcat_{}", s))
                    .filter(|k| self.yearly_sales.contains_key(k))
            })
            .or_else(|| {
                maingroup
                    .map(|m| format!("maingroup_{}", m))
                    .filter(|k| self.yearly_sales.contains_key(k))
            })?;

        let mut by_year = self.yearly_sales[&key].iter().rev();
        let (_, latest) = by_year.next()?;
        let (_, previous) = by_year.next()?;
        if *previous <= 0.0 {
            return None;
        }
        Some((latest - previous) / previous)
    }

    /// 周度季节报告: 各分组季节指数按周取均值，按周号升序
    pub fn seasonal_report(&self) -> Vec<SeasonalReportRow> {
        let mut by_week: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for index in self.seasonal_indices.values() {
            for (&week, &factor) in index {
                by_week.entry(week).or_default().push(factor);
            }
        }

        by_week
            .into_iter()
            .map(|(week, factors)| SeasonalReportRow {
                week,
                avg_factor: mean(&factors),
            })
            .collect()
    }

    /// 未来 N 周的日销/周销预测
    pub fn forecast_next_weeks(
        &self,
        sku: Option<&str>,
        subcat: Option<&str>,
        maingroup: Option<&str>,
        base_daily_sales: f64,
        weeks_ahead: u32,
        is_promo: bool,
    ) -> Vec<WeeklyForecast> {
        let current_week = Utc::now().iso_week().week();

        (0..weeks_ahead)
            .map(|offset| {
                let mut target_week = (current_week + offset) % 52;
                if target_week == 0 {
                    target_week = 52;
                }

                let seasonal =
                    self.get_seasonal_factor(sku, subcat, maingroup, Some(target_week), is_promo);

                WeeklyForecast {
                    week: target_week,
                    forecasted_daily_sales: base_daily_sales * seasonal.factor,
                    forecasted_weekly_sales: base_daily_sales * 7.0 * seasonal.factor,
                    seasonal_factor: seasonal.factor,
                    source: seasonal.source,
                    is_promo,
                }
            })
            .collect()
    }
}

/// 内置默认季节曲线（无任何历史数据时）
///
/// 44-47 周旺季 1.5，1-4 周淡季 0.7，22-35 周夏季 0.9，其余中性
fn default_seasonal_factor(week: u32) -> f64 {
    match week {
        44..=47 => 1.5,
        1..=4 => 0.7,
        22..=35 => 0.9,
        _ => 1.0,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        sku: Option<&str>,
        sub_group: &str,
        week: u32,
        sales: f64,
        promo: u8,
    ) -> HistoricalRow {
        HistoricalRow {
            sku: sku.map(|s| s.to_string()),
            main_group: "home".to_string(),
            sub_group: sub_group.to_string(),
            year: 2024,
            week,
            sales,
            promo,
        }
    }

    #[test]
    fn test_default_curve() {
        assert_eq!(default_seasonal_factor(45), 1.5);
        assert_eq!(default_seasonal_factor(2), 0.7);
        assert_eq!(default_seasonal_factor(30), 0.9);
        assert_eq!(default_seasonal_factor(15), 1.0);
    }

    #[test]
    fn test_empty_forecaster_uses_default_curve() {
        let forecaster = SeasonalForecaster::empty();
        let factor = forecaster.get_seasonal_factor(Some("X"), Some("kitchen"), None, Some(45), false);
        assert_eq!(factor.factor, 1.5);
        assert_eq!(factor.source, FactorSource::Default);
    }

    #[test]
    fn test_product_level_index_preferred() {
        // SKU-1 的 10 周销量为全期均值的 2 倍
        let rows = vec![
            row(Some("SKU-1"), "kitchen", 10, 20.0, 0),
            row(Some("SKU-1"), "kitchen", 11, 10.0, 0),
            row(Some("SKU-1"), "kitchen", 12, 0.0, 0),
        ];
        let forecaster = SeasonalForecaster::from_rows(&rows);

        let factor =
            forecaster.get_seasonal_factor(Some("SKU-1"), Some("kitchen"), None, Some(10), false);
        assert_eq!(factor.source, FactorSource::Product);
        assert!((factor.factor - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_subcat_fallback_when_sku_unknown() {
        let rows = vec![
            row(Some("SKU-1"), "kitchen", 10, 20.0, 0),
            row(Some("SKU-1"), "kitchen", 11, 10.0, 0),
        ];
        let forecaster = SeasonalForecaster::from_rows(&rows);

        let factor =
            forecaster.get_seasonal_factor(Some("SKU-404"), Some("kitchen"), None, Some(10), false);
        assert_eq!(factor.source, FactorSource::Subcat);
    }

    #[test]
    fn test_promo_lift_applied() {
        // 活动周销 30，常规周销 10 → 提升 3 倍
        let rows = vec![
            row(None, "kitchen", 10, 10.0, 0),
            row(None, "kitchen", 11, 30.0, 1),
        ];
        let forecaster = SeasonalForecaster::from_rows(&rows);

        let normal =
            forecaster.get_seasonal_factor(None, Some("kitchen"), None, Some(10), false);
        let promo = forecaster.get_seasonal_factor(None, Some("kitchen"), None, Some(10), true);
        assert!(promo.promo_adjusted);
        assert!((promo.factor / normal.factor - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_yoy_growth_over_latest_two_years() {
        // 2023 合计 100，2024 合计 120 → +20%
        let mut rows = vec![
            row(None, "kitchen", 10, 40.0, 0),
            row(None, "kitchen", 11, 60.0, 0),
            row(None, "kitchen", 10, 80.0, 0),
            row(None, "kitchen", 11, 40.0, 0),
        ];
        rows[0].year = 2023;
        rows[1].year = 2023;
        let forecaster = SeasonalForecaster::from_rows(&rows);

        let growth = forecaster
            .get_yoy_growth(None, Some("kitchen"), None)
            .unwrap();
        assert!((growth - 0.2).abs() < 1e-9);

        // 大类层级同样可查
        let growth = forecaster.get_yoy_growth(None, None, Some("home")).unwrap();
        assert!((growth - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_yoy_growth_needs_two_years() {
        let rows = vec![row(None, "kitchen", 10, 50.0, 0)];
        let forecaster = SeasonalForecaster::from_rows(&rows);

        assert_eq!(forecaster.get_yoy_growth(None, Some("kitchen"), None), None);
        assert_eq!(forecaster.get_yoy_growth(None, Some("unknown"), None), None);
        assert_eq!(SeasonalForecaster::empty().get_yoy_growth(Some("X"), None, None), None);
    }

    #[test]
    fn test_seasonal_report_sorted_by_week() {
        // 子类目与大类索引相同: 第 10 周指数 4/3，第 11 周 2/3
        let rows = vec![
            row(None, "kitchen", 11, 10.0, 0),
            row(None, "kitchen", 10, 20.0, 0),
        ];
        let forecaster = SeasonalForecaster::from_rows(&rows);

        let report = forecaster.seasonal_report();
        let weeks: Vec<u32> = report.iter().map(|r| r.week).collect();
        assert_eq!(weeks, vec![10, 11]);
        assert!((report[0].avg_factor - 4.0 / 3.0).abs() < 1e-9);
        assert!((report[1].avg_factor - 2.0 / 3.0).abs() < 1e-9);

        assert!(SeasonalForecaster::empty().seasonal_report().is_empty());
    }

    #[test]
    fn test_forecast_next_weeks_wraps_year() {
        let forecaster = SeasonalForecaster::empty();
        let forecasts = forecaster.forecast_next_weeks(None, None, None, 10.0, 4, false);
        assert_eq!(forecasts.len(), 4);
        for forecast in &forecasts {
            assert!(forecast.week >= 1 && forecast.week <= 52);
            assert!(
                (forecast.forecasted_weekly_sales - forecast.forecasted_daily_sales * 7.0).abs()
                    < 1e-9
            );
        }
    }
}
