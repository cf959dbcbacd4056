// ==========================================
// 零售库存分配决策支持系统 - 配置层
// ==========================================
// 红线: 配置为显式传参的不可变结构，没有全局会话状态
// 任何"编辑"都克隆产生新配置，旧引用保持有效（写时复制）
// ==========================================

pub mod metric_weights;
pub mod risk_thresholds;
pub mod segment_policy;

pub use metric_weights::MetricWeights;
pub use risk_thresholds::RiskThresholds;
pub use segment_policy::{SegmentPolicy, SegmentPolicyMap};

use serde::{Deserialize, Serialize};

// ==========================================
// AnalysisConfig - 管线运行配置聚合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub segment_policies: SegmentPolicyMap,
    pub metric_weights: MetricWeights,
    pub risk_thresholds: RiskThresholds,
    /// 主仓 → 电商仓调拨在途天数
    pub transfer_lead_time_days: f64,
    /// 降价潜在损失折扣率（来源实现各处硬编码 0.30，此处收敛为配置）
    pub markdown_discount_rate: f64,
    /// 自动调拨建议的最小件数阈值
    pub min_transfer_qty: f64,
}

impl AnalysisConfig {
    /// 替换调拨 lead time，产出新配置
    ///
    /// 紧急调拨阈值与 lead time 联动更新
    pub fn with_transfer_lead_time(&self, days: f64) -> Self {
        let mut config = self.clone();
        config.transfer_lead_time_days = days;
        config.risk_thresholds.urgent_transfer_threshold_days = days;
        config
    }

    /// 配置快照（JSON），用于记录一次分析所用的完整参数
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// 从快照恢复配置
    pub fn from_snapshot_json(snapshot: &str) -> serde_json::Result<Self> {
        serde_json::from_str(snapshot)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            segment_policies: SegmentPolicyMap::default(),
            metric_weights: MetricWeights::default(),
            risk_thresholds: RiskThresholds::default(),
            transfer_lead_time_days: 5.0,
            markdown_discount_rate: 0.30,
            min_transfer_qty: 10.0,
        }
    }
}
