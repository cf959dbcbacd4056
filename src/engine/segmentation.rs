// ==========================================
// 零售库存分配决策支持系统 - 生命周期定段引擎
// ==========================================
// 职责: 按固定顺序评估规则，为每个商品指定唯一段位
// 输入: ScoredProduct 表 + 段位策略
// 输出: SegmentedProduct 表
// 红线: 规则顺序 HOT → RISING_STAR → STEADY → SLOW → DYING，
//       首次命中即定段，均未命中为 UNCLASSIFIED
// ==========================================

use crate::config::SegmentPolicyMap;
use crate::domain::product::{ProductMetrics, ProductRecord, ScoredProduct, SegmentedProduct};
use crate::domain::types::Segment;
use tracing::instrument;

// ==========================================
// SegmentationEngine - 定段引擎
// ==========================================
pub struct SegmentationEngine {
    // 无状态引擎，逐行独立判定
}

impl SegmentationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 批量定段
    ///
    /// 逐行独立（行序无关），仅规则顺序在行内有意义
    #[instrument(skip(self, products, policies), fields(count = products.len()))]
    pub fn classify_batch(
        &self,
        products: &[ScoredProduct],
        policies: &SegmentPolicyMap,
    ) -> Vec<SegmentedProduct> {
        products
            .iter()
            .map(|scored| SegmentedProduct {
                product: scored.product.clone(),
                metrics: scored.metrics,
                segment: self.classify_single(&scored.product, &scored.metrics, policies),
            })
            .collect()
    }

    /// 单品定段，首次命中即返回
    pub fn classify_single(
        &self,
        product: &ProductRecord,
        metrics: &ProductMetrics,
        policies: &SegmentPolicyMap,
    ) -> Segment {
        // 1. HOT: 高流速 + 高趋势 + 绝对销量门槛
        let hot = policies.policy_for(Segment::Hot);
        if metrics.velocity_score > hot.velocity_min.unwrap_or(1.5)
            && metrics.trend_score > hot.trend_min.unwrap_or(1.3)
            && product.daily_sales_avg_7d > hot.daily_sales_min.unwrap_or(15.0)
        {
            return Segment::Hot;
        }

        // 2. RISING_STAR: 流速居于区间内 + 趋势与互动达标
        let rising = policies.policy_for(Segment::RisingStar);
        if metrics.velocity_score > rising.velocity_min.unwrap_or(1.2)
            && metrics.velocity_score <= rising.velocity_max.unwrap_or(1.5)
            && metrics.trend_score > rising.trend_min.unwrap_or(1.2)
            && metrics.engagement_score > rising.engagement_min.unwrap_or(5.0)
        {
            return Segment::RisingStar;
        }

        // 3. STEADY: 流速平稳 + 有基础销量 + 断货少
        let steady = policies.policy_for(Segment::Steady);
        if metrics.velocity_score >= steady.velocity_min.unwrap_or(0.8)
            && metrics.velocity_score <= steady.velocity_max.unwrap_or(1.2)
            && product.daily_sales_avg_30d > steady.daily_sales_min.unwrap_or(5.0)
            && product.stock_out_days_last_30d < steady.stockout_max.unwrap_or(3)
        {
            return Segment::Steady;
        }

        // 4. SLOW: 仍有销量但低于门槛
        let slow = policies.policy_for(Segment::Slow);
        if product.daily_sales_avg_7d < slow.daily_sales_max.unwrap_or(5.0)
            && product.daily_sales_avg_7d > 0.0
            && metrics.velocity_score >= slow.velocity_min.unwrap_or(0.5)
        {
            return Segment::Slow;
        }

        // 5. DYING: 流速塌陷或库存天数超长（或条件）
        let dying = policies.policy_for(Segment::Dying);
        if metrics.velocity_score < dying.velocity_max.unwrap_or(0.5)
            || metrics.days_of_stock > dying.stock_days_min.unwrap_or(60.0)
        {
            return Segment::Dying;
        }

        Segment::Unclassified
    }
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self::new()
    }
}
