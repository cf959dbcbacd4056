// ==========================================
// 分配规划器 - 调拨模拟
// ==========================================
// 职责: 假设性仓间调拨的纯投影计算
// 红线: 不改写底层商品表；实际可动量按源仓现货封顶，
//       保证三仓之和在模拟前后守恒
// ==========================================

use crate::domain::allocation::TransferSimulation;
use crate::domain::product::SegmentedProduct;
use crate::domain::types::Depot;
use thiserror::Error;

use super::core::AllocationEngine;

/// 与计划生成一致的 epsilon 稳定项
const FORECAST_EPSILON: f64 = 0.1;

// ==========================================
// 错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("SKU 不存在: {0}")]
    SkuNotFound(String),

    #[error("源仓与目的仓相同: {0}")]
    SameDepot(Depot),

    #[error("调拨量必须为非负数: {0}")]
    NegativeQuantity(f64),
}

impl AllocationEngine {
    /// 调拨模拟
    ///
    /// # 参数
    /// - `quantity`: 请求调拨量（实际可动量按源仓现货封顶）
    /// - `lead_time_days`: 在途天数，用于目的仓断货风险判定
    ///
    /// # 返回
    /// 调拨后的库存投影；目的仓为电商仓时附带断货风险标记
    /// （按调拨前目的仓库存扣减在途消耗判断）
    pub fn simulate_transfer(
        &self,
        products: &[SegmentedProduct],
        sku: &str,
        from_depot: Depot,
        to_depot: Depot,
        quantity: f64,
        lead_time_days: f64,
    ) -> Result<TransferSimulation, AllocationError> {
        if from_depot == to_depot {
            return Err(AllocationError::SameDepot(from_depot));
        }
        if quantity < 0.0 {
            return Err(AllocationError::NegativeQuantity(quantity));
        }

        let row = products
            .iter()
            .find(|p| p.product.sku == sku)
            .ok_or_else(|| AllocationError::SkuNotFound(sku.to_string()))?;
        let product = &row.product;

        let current_from = product.stock_in(from_depot);
        let current_to = product.stock_in(to_depot);

        // 实际可动量封顶，三仓之和守恒
        let moved_qty = quantity.min(current_from);
        let new_from = current_from - moved_qty;
        let new_to = current_to + moved_qty;

        // 与分配计划同一口径的需求预测
        let forecasted_daily = product.daily_sales_avg_7d * row.metrics.trend_score;

        // 调拨后总量 = 未参与仓 + 两个参与仓的新值
        let untouched: f64 = [Depot::Akyazi, Depot::AnaDepo, Depot::Oms]
            .iter()
            .filter(|d| **d != from_depot && **d != to_depot)
            .map(|d| product.stock_in(*d))
            .sum();
        let new_total = untouched + new_from + new_to;
        let new_days_of_stock = new_total / (forecasted_daily + FORECAST_EPSILON);

        // 目的仓为电商仓时: 调拨前库存是否撑不过在途期
        let destination_stockout_risk = to_depot == Depot::Akyazi
            && current_to - forecasted_daily * lead_time_days < 0.0;

        Ok(TransferSimulation {
            sku: product.sku.clone(),
            product_name: product.product_name.clone(),
            from_depot,
            to_depot,
            requested_qty: quantity,
            moved_qty,
            current_from,
            new_from,
            current_to,
            new_to,
            current_days_of_stock: row.metrics.days_of_stock,
            new_days_of_stock,
            destination_stockout_risk,
        })
    }
}
