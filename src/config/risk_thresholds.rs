// ==========================================
// 零售库存分配决策支持系统 - 风险阈值配置
// ==========================================
// 职责: 库存天数风险分档
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// 临界库存天数（告警 CRITICAL 档）
    pub critical_stock_days: f64,
    /// 关注库存天数（告警 WARNING 档）
    pub warning_stock_days: f64,
    /// 理想库存天数
    pub ideal_stock_days: f64,
    /// 超储库存天数
    pub overstock_days: f64,
    /// 紧急调拨阈值（与调拨 lead time 联动）
    pub urgent_transfer_threshold_days: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_stock_days: 3.0,
            warning_stock_days: 7.0,
            ideal_stock_days: 30.0,
            overstock_days: 60.0,
            urgent_transfer_threshold_days: 5.0,
        }
    }
}
