// ==========================================
// 零售库存分配决策支持系统 - 告警实体
// ==========================================
// 职责: 告警生成器的输出行类型
// 红线: 告警每轮整表重建，无跨轮身份，无确认状态
// ==========================================

use crate::domain::types::{AlertCategory, AlertLevel, Segment};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// AlertRecord - 告警行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub level: AlertLevel,
    pub category: AlertCategory,
    pub sku: String,
    pub product_name: String,
    pub segment: Segment,
    pub message: String,
    pub action: String,
    /// base(level) + (10 − clip(days_of_stock, 0, 10))
    pub priority: f64,
    pub days_of_stock: f64,
    pub forecasted_sales: f64,
    pub created_at: NaiveDateTime,
}

// ==========================================
// AlertSummary - 告警汇总 (每轮现算，不缓存)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub by_category: HashMap<AlertCategory, usize>,
}

impl AlertSummary {
    pub fn empty() -> Self {
        Self {
            total: 0,
            critical: 0,
            warning: 0,
            info: 0,
            by_category: HashMap::new(),
        }
    }
}
