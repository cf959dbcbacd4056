// ==========================================
// 零售库存分配决策支持系统 - 指标权重配置
// ==========================================
// 职责: 综合分加权系数
// 红线: 权重之和 ≈ 100 由调用层提示，计算层不强制
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    pub velocity_score: f64,
    pub trend_score: f64,
    pub engagement_score: f64,
    pub conversion_rate: f64,
    pub quality_score: f64,
    pub stockout_penalty: f64,
}

impl MetricWeights {
    /// 权重总和
    pub fn total(&self) -> f64 {
        self.velocity_score
            + self.trend_score
            + self.engagement_score
            + self.conversion_rate
            + self.quality_score
            + self.stockout_penalty
    }

    /// 权重总和是否为 100（允许浮点误差）
    ///
    /// 仅供调用层在运行管线前提示，指标计算器本身不校验
    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() < 1e-6
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            velocity_score: 30.0,
            trend_score: 25.0,
            engagement_score: 15.0,
            conversion_rate: 10.0,
            quality_score: 10.0,
            stockout_penalty: 10.0,
        }
    }
}
