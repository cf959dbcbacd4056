// ==========================================
// 零售库存分配决策支持系统 - 汇总报表实体
// ==========================================
// 职责: 段位/类目维度的汇总行类型，供报表与导出消费
// ==========================================

use crate::domain::types::Segment;
use serde::{Deserialize, Serialize};

// ==========================================
// SegmentSummary - 段位汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub segment: Segment,
    pub count: usize,
    pub total_stock: f64,
    /// 库存金额 = Σ(总库存 × 单价)
    pub stock_value: f64,
    pub avg_velocity: f64,
    pub avg_trend: f64,
    pub total_daily_sales: f64,
    pub avg_days_of_stock: f64,
    pub avg_final_score: f64,
}

// ==========================================
// CategoryPerformance - 类目绩效行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub category: String,
    pub product_count: usize,
    pub total_stock: f64,
    pub daily_sales: f64,
    pub avg_price: f64,
    pub avg_velocity: f64,
    pub avg_score: f64,
    pub avg_stock_days: f64,
    pub stock_value: f64,
}
