// ==========================================
// 零售库存分配决策支持系统 - 需求预测接口
// ==========================================
// 职责: 分配规划器上游的日销预测估计器接缝
// 默认实现为趋势修正估计，季节性估计器可整体替换，
// 规划器本身的契约不变
// ==========================================

use crate::domain::product::SegmentedProduct;
use crate::engine::seasonal::SeasonalForecaster;

// ==========================================
// DemandEstimator - 日销预测估计器
// ==========================================
pub trait DemandEstimator {
    /// 单品预测日销量
    fn forecasted_daily_sales(&self, product: &SegmentedProduct) -> f64;
}

// ==========================================
// TrendDemandEstimator - 趋势修正估计 (默认)
// ==========================================
// forecast = daily_sales_avg_7d × trend_score
pub struct TrendDemandEstimator;

impl DemandEstimator for TrendDemandEstimator {
    fn forecasted_daily_sales(&self, product: &SegmentedProduct) -> f64 {
        product.product.daily_sales_avg_7d * product.metrics.trend_score
    }
}

// ==========================================
// SeasonalDemandEstimator - 季节性修正估计
// ==========================================
// 在趋势预测之上叠加季节因子（层级回退: 商品 → 类目 → 默认曲线），
// 活动商品叠加活动提升
pub struct SeasonalDemandEstimator<'a> {
    forecaster: &'a SeasonalForecaster,
    /// ISO 周号；None 时取当前周
    week: Option<u32>,
}

impl<'a> SeasonalDemandEstimator<'a> {
    pub fn new(forecaster: &'a SeasonalForecaster, week: Option<u32>) -> Self {
        Self { forecaster, week }
    }
}

impl DemandEstimator for SeasonalDemandEstimator<'_> {
    fn forecasted_daily_sales(&self, product: &SegmentedProduct) -> f64 {
        let base = product.product.daily_sales_avg_7d * product.metrics.trend_score;
        let seasonal = self.forecaster.get_seasonal_factor(
            Some(&product.product.sku),
            Some(&product.product.category),
            None,
            self.week,
            product.product.campaign_flag,
        );
        base * seasonal.factor
    }
}
