// ==========================================
// 零售库存分配决策支持系统 - 分配计划实体
// ==========================================
// 职责: 分配规划器的输出行类型
// 生命周期: 每次规划整表重建，不做局部更新
// ==========================================

use crate::domain::types::{Depot, MarkdownAdvice, Segment};
use serde::{Deserialize, Serialize};

// ==========================================
// AllocationRecord - 单品分配计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub sku: String,
    pub product_name: String,
    pub category: String,
    pub segment: Segment,
    pub price: f64,

    // ===== 现状 =====
    pub current_stock: f64,
    pub stock_akyazi: f64,
    pub stock_ana_depo: f64,
    pub stock_oms: f64,
    pub days_of_stock: f64,

    // ===== 需求预测 =====
    /// 趋势修正后的日销预测（可被季节性估计器替换）
    pub forecasted_daily_sales: f64,
    pub safety_stock_needed: f64,
    pub reorder_point: f64,

    // ===== 电商仓目标与调拨 =====
    /// 电商仓目标库存 = 总库存 × allocation_pct
    pub optimal_akyazi_stock: f64,
    /// 调拨在途期间电商仓被消耗的量
    pub stock_consumed_during_transfer: f64,
    /// 主仓 → 电商仓建议调拨量，已按主仓现货封顶
    pub transfer_from_ana_depo: f64,
    /// 电商仓预计断货天数（分母加 0.1 稳定零需求场景）
    pub days_until_stockout_akyazi: f64,
    /// 电商仓会在调拨到达前断货
    pub is_urgent_transfer: bool,

    // ===== 补货与降价 =====
    /// 总库存低于再订货点
    pub is_critical: bool,
    pub primary_depot: Depot,
    pub depot_priority: Vec<Depot>,
    pub auto_transfer: bool,
    pub markdown_recommendation: MarkdownAdvice,
}

// ==========================================
// ReorderRecommendation - 补货建议行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    pub sku: String,
    pub product_name: String,
    pub segment: Segment,
    pub current_stock: f64,
    pub reorder_point: f64,
    pub days_of_stock: f64,
    /// max(0, 安全库存需求 − 当前库存)
    pub suggested_order_qty: f64,
}

// ==========================================
// MarkdownCandidate - 降价候选行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownCandidate {
    pub sku: String,
    pub product_name: String,
    pub segment: Segment,
    pub current_stock: f64,
    pub days_of_stock: f64,
    pub markdown_recommendation: MarkdownAdvice,
    /// 单价 × 库存 × 折扣率
    pub potential_loss: f64,
}

// ==========================================
// ReallocationAdvice - 仓间再平衡建议
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReallocationAction {
    IncreaseAkyazi, // 向电商仓补
    ReduceAkyazi,   // 从电商仓撤
}

impl std::fmt::Display for ReallocationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReallocationAction::IncreaseAkyazi => write!(f, "INCREASE_AKYAZI"),
            ReallocationAction::ReduceAkyazi => write!(f, "REDUCE_AKYAZI"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReallocationAdvice {
    pub sku: String,
    pub product_name: String,
    pub segment: Segment,
    /// 当前电商仓占比（百分比）
    pub current_akyazi_pct: f64,
    /// 策略目标占比（百分比）
    pub optimal_akyazi_pct: f64,
    pub action: ReallocationAction,
    pub suggested_transfer: f64,
}

// ==========================================
// TransferSimulation - 调拨模拟结果 (纯投影，不落表)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSimulation {
    pub sku: String,
    pub product_name: String,
    pub from_depot: Depot,
    pub to_depot: Depot,
    /// 请求调拨量
    pub requested_qty: f64,
    /// 实际可动量（按源仓现货封顶，保证库存守恒）
    pub moved_qty: f64,
    pub current_from: f64,
    pub new_from: f64,
    pub current_to: f64,
    pub new_to: f64,
    pub current_days_of_stock: f64,
    pub new_days_of_stock: f64,
    /// 目的仓为电商仓时：调拨到达前（按在途消耗）是否会断货
    pub destination_stockout_risk: bool,
}

// ==========================================
// TransferSummaryStats - 调拨面板汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferSummaryStats {
    pub urgent_transfers: usize,
    pub auto_transfers: usize,
    pub total_transfer_volume: f64,
    pub avg_transfer_size: f64,
}
