// ==========================================
// 零售库存分配决策支持系统 - 指标计算器
// ==========================================
// 职责: 对商品表派生 9 项无量纲指标与加权综合分
// 输入: 清洗后的商品表 + 指标权重
// 输出: ScoredProduct 表（不回写输入）
// 红线: 所有比值经 safe_divide，除零回退默认值而非报错
// ==========================================

use crate::config::MetricWeights;
use crate::domain::product::{ProductMetrics, ProductRecord, ScoredProduct};
use crate::util::{clip_lower, safe_divide};
use tracing::instrument;

/// 无近期销量时 days_of_stock 的哨兵值（"库存近乎无限"）
pub const DAYS_OF_STOCK_SENTINEL: f64 = 999.0;

/// 活动加成乘数
pub const CAMPAIGN_BOOST_FACTOR: f64 = 1.3;

// ==========================================
// MetricEngine - 指标计算器
// ==========================================
pub struct MetricEngine {
    // 无状态引擎，逐行独立计算
}

impl MetricEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 批量计算指标
    ///
    /// 逐行独立，行序无关；权重之和是否为 100 由调用层负责提示
    #[instrument(skip(self, products, weights), fields(count = products.len()))]
    pub fn calculate_batch(
        &self,
        products: &[ProductRecord],
        weights: &MetricWeights,
    ) -> Vec<ScoredProduct> {
        products
            .iter()
            .map(|product| ScoredProduct {
                product: product.clone(),
                metrics: self.calculate_single(product, weights),
            })
            .collect()
    }

    /// 单品指标计算
    ///
    /// 计算顺序固定（后列可依赖前列），与列定义一一对应
    pub fn calculate_single(
        &self,
        product: &ProductRecord,
        weights: &MetricWeights,
    ) -> ProductMetrics {
        // 1. 流速分: 近期 / 中期销量比，1.0 = 平稳
        let velocity_score = safe_divide(
            product.daily_sales_avg_7d,
            product.daily_sales_avg_30d,
            1.0,
        );

        // 2. 趋势分: 单日动量
        let trend_score = safe_divide(
            product.daily_sales_yesterday,
            product.daily_sales_avg_7d,
            1.0,
        );

        // 3. 互动分: 加购率（百分比）
        let engagement_score = safe_divide(
            product.add_to_cart_7d as f64,
            product.view_count_7d as f64,
            0.0,
        ) * 100.0;

        // 4. 转化率: 周销量 / 周加购（直接购买时可超 100）
        let conversion_rate = safe_divide(
            product.daily_sales_avg_7d * 7.0,
            product.add_to_cart_7d as f64,
            0.0,
        ) * 100.0;

        // 5. 库存可售天数: 无销量时取哨兵值 999
        let days_of_stock = safe_divide(
            product.total_stock,
            product.daily_sales_avg_7d,
            DAYS_OF_STOCK_SENTINEL,
        );

        // 6. 质量分: 评分按 0-100 缩放 + 评论量加分（封顶 10），再减半
        let review_bonus = (product.review_count as f64 / 10.0).min(10.0);
        let quality_score = (product.avg_rating * 20.0 + review_bonus) / 2.0;

        // 7. 断货惩罚: 每断货日扣 3 分，下限 0
        let stockout_penalty =
            clip_lower(100.0 - product.stock_out_days_last_30d as f64 * 3.0, 0.0);

        // 8. 活动加成: 乘数而非加数
        let campaign_boost = if product.campaign_flag {
            CAMPAIGN_BOOST_FACTOR
        } else {
            1.0
        };

        // 9. 综合分: 加权和 × 活动加成
        let final_score = (velocity_score * weights.velocity_score
            + trend_score * weights.trend_score
            + engagement_score * weights.engagement_score
            + conversion_rate * weights.conversion_rate
            + quality_score * weights.quality_score
            + stockout_penalty * weights.stockout_penalty)
            * campaign_boost;

        ProductMetrics {
            velocity_score,
            trend_score,
            engagement_score,
            conversion_rate,
            days_of_stock,
            quality_score,
            stockout_penalty,
            campaign_boost,
            final_score,
        }
    }
}

impl Default for MetricEngine {
    fn default() -> Self {
        Self::new()
    }
}
