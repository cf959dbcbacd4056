// ==========================================
// 分配规划器 - 计划生成
// ==========================================
// 逐行独立计算；未配置段位回退 STEADY 策略
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::allocation::AllocationRecord;
use crate::domain::product::SegmentedProduct;
use crate::domain::types::{Depot, MarkdownAdvice, Segment};
use crate::engine::forecast::DemandEstimator;
use tracing::instrument;

/// 零需求场景下稳定断货天数计算的 epsilon
const FORECAST_EPSILON: f64 = 0.1;

// ==========================================
// AllocationEngine - 分配规划引擎
// ==========================================
pub struct AllocationEngine {
    // 无状态引擎，查询方法见 queries.rs / simulation.rs
}

impl AllocationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成整表分配计划
    ///
    /// # 参数
    /// - `products`: 定段后的商品表
    /// - `config`: 段位策略 + lead time 等运行配置
    /// - `estimator`: 日销预测估计器（默认趋势修正，可替换季节性估计）
    #[instrument(skip_all, fields(count = products.len()))]
    pub fn generate_plan(
        &self,
        products: &[SegmentedProduct],
        config: &AnalysisConfig,
        estimator: &dyn DemandEstimator,
    ) -> Vec<AllocationRecord> {
        products
            .iter()
            .map(|row| self.plan_single(row, config, estimator))
            .collect()
    }

    /// 单品分配计划
    fn plan_single(
        &self,
        row: &SegmentedProduct,
        config: &AnalysisConfig,
        estimator: &dyn DemandEstimator,
    ) -> AllocationRecord {
        let product = &row.product;
        let policy = config.segment_policies.policy_for(row.segment);
        let lead_time = config.transfer_lead_time_days;

        // 需求预测
        let forecasted_daily_sales = estimator.forecasted_daily_sales(row);

        // 补货参数
        let safety_stock_needed = forecasted_daily_sales * policy.safety_stock_days;
        let reorder_point = forecasted_daily_sales * policy.reorder_days;

        // 电商仓目标库存与在途消耗
        let optimal_akyazi_stock = product.total_stock * policy.allocation_pct;
        let stock_consumed_during_transfer = forecasted_daily_sales * lead_time;

        // 主仓 → 电商仓建议调拨量，按主仓现货封顶
        let uncapped_need =
            (optimal_akyazi_stock + stock_consumed_during_transfer - product.stock_akyazi).max(0.0);
        let transfer_from_ana_depo = uncapped_need.min(product.stock_ana_depo);

        // 电商仓断货窗口
        let days_until_stockout_akyazi =
            product.stock_akyazi / (forecasted_daily_sales + FORECAST_EPSILON);
        let is_urgent_transfer = days_until_stockout_akyazi < lead_time;

        // 补货临界
        let is_critical = product.total_stock < reorder_point;

        // 首选履约仓（贪心规则，非全局最优）
        let primary_depot = if product.stock_akyazi > forecasted_daily_sales {
            Depot::Akyazi
        } else if product.stock_ana_depo > 0.0 {
            Depot::AnaDepo
        } else {
            Depot::Oms
        };

        // 降价建议: DYING 一律 URGENT
        let markdown_recommendation = if row.segment == Segment::Dying {
            MarkdownAdvice::Urgent
        } else if row.metrics.days_of_stock > policy.markdown_day {
            MarkdownAdvice::Consider
        } else {
            MarkdownAdvice::No
        };

        AllocationRecord {
            sku: product.sku.clone(),
            product_name: product.product_name.clone(),
            category: product.category.clone(),
            segment: row.segment,
            price: product.price,
            current_stock: product.total_stock,
            stock_akyazi: product.stock_akyazi,
            stock_ana_depo: product.stock_ana_depo,
            stock_oms: product.stock_oms_total,
            days_of_stock: row.metrics.days_of_stock,
            forecasted_daily_sales,
            safety_stock_needed,
            reorder_point,
            optimal_akyazi_stock,
            stock_consumed_during_transfer,
            transfer_from_ana_depo,
            days_until_stockout_akyazi,
            is_urgent_transfer,
            is_critical,
            primary_depot,
            depot_priority: policy.depot_priority.clone(),
            auto_transfer: policy.auto_transfer,
            markdown_recommendation,
        }
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new()
    }
}
