// ==========================================
// 分配规划器 - 只读查询
// ==========================================
// 职责: 调拨 / 补货 / 降价 / 仓间再平衡建议的过滤与排序
// 所有查询基于既有分配表，不触发重算
// ==========================================

use crate::config::SegmentPolicyMap;
use crate::domain::allocation::{
    AllocationRecord, MarkdownCandidate, ReallocationAction, ReallocationAdvice,
    ReorderRecommendation, TransferSummaryStats,
};
use crate::domain::types::{MarkdownAdvice, Segment};
use serde::{Deserialize, Serialize};

use super::core::AllocationEngine;

/// 再平衡建议的占比偏差阈值（10 个百分点）
const REALLOCATION_DEVIATION_PCT: f64 = 0.10;

// ==========================================
// TransferPriority - 调拨查询口径
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferPriority {
    /// 仅 lead time 内断货的行
    Urgent,
    /// 仅 auto_transfer 策略开启的行
    Auto,
    /// 全部有调拨需求的行
    All,
}

impl AllocationEngine {
    /// 调拨建议查询
    ///
    /// 过滤: 调拨量 ≥ min_transfer 且满足口径条件
    /// 排序: 紧急行在前，其后按电商仓断货天数升序
    pub fn get_transfer_recommendations(
        &self,
        plan: &[AllocationRecord],
        priority: TransferPriority,
        min_transfer: f64,
    ) -> Vec<AllocationRecord> {
        let mut transfers: Vec<AllocationRecord> = plan
            .iter()
            .filter(|r| r.transfer_from_ana_depo >= min_transfer)
            .filter(|r| match priority {
                TransferPriority::Urgent => r.is_urgent_transfer,
                TransferPriority::Auto => r.auto_transfer,
                TransferPriority::All => true,
            })
            .cloned()
            .collect();

        transfers.sort_by(|a, b| {
            b.is_urgent_transfer
                .cmp(&a.is_urgent_transfer)
                .then_with(|| {
                    a.days_until_stockout_akyazi
                        .partial_cmp(&b.days_until_stockout_akyazi)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        transfers
    }

    /// 补货建议查询
    ///
    /// 过滤: is_critical；排序: 可售天数升序
    /// suggested_order_qty = max(0, 安全库存需求 − 当前库存)
    pub fn get_reorder_recommendations(
        &self,
        plan: &[AllocationRecord],
    ) -> Vec<ReorderRecommendation> {
        let mut reorders: Vec<ReorderRecommendation> = plan
            .iter()
            .filter(|r| r.is_critical)
            .map(|r| ReorderRecommendation {
                sku: r.sku.clone(),
                product_name: r.product_name.clone(),
                segment: r.segment,
                current_stock: r.current_stock,
                reorder_point: r.reorder_point,
                days_of_stock: r.days_of_stock,
                suggested_order_qty: (r.safety_stock_needed - r.current_stock).max(0.0),
            })
            .collect();

        reorders.sort_by(|a, b| {
            a.days_of_stock
                .partial_cmp(&b.days_of_stock)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        reorders
    }

    /// 降价候选查询
    ///
    /// 过滤: 建议非 NO；排序: 可售天数降序
    /// potential_loss = 单价 × 库存 × 折扣率
    pub fn get_markdown_candidates(
        &self,
        plan: &[AllocationRecord],
        discount_rate: f64,
    ) -> Vec<MarkdownCandidate> {
        let mut candidates: Vec<MarkdownCandidate> = plan
            .iter()
            .filter(|r| r.markdown_recommendation != MarkdownAdvice::No)
            .map(|r| MarkdownCandidate {
                sku: r.sku.clone(),
                product_name: r.product_name.clone(),
                segment: r.segment,
                current_stock: r.current_stock,
                days_of_stock: r.days_of_stock,
                markdown_recommendation: r.markdown_recommendation,
                potential_loss: r.price * r.current_stock * discount_rate,
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.days_of_stock
                .partial_cmp(&a.days_of_stock)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        candidates
    }

    /// 仓间再平衡建议
    ///
    /// 仅针对 HOT / RISING_STAR / STEADY：电商仓实际占比与策略目标
    /// 偏差超过 10 个百分点时给出增/减建议
    pub fn get_reallocation_advice(
        &self,
        plan: &[AllocationRecord],
        policies: &SegmentPolicyMap,
    ) -> Vec<ReallocationAdvice> {
        plan.iter()
            .filter(|r| {
                matches!(
                    r.segment,
                    Segment::Hot | Segment::RisingStar | Segment::Steady
                )
            })
            .filter_map(|r| {
                // 分母 +1 与来源实现保持一致，零库存行占比记 0
                let current_pct = r.stock_akyazi / (r.current_stock + 1.0);
                let optimal_pct = policies.policy_for(r.segment).allocation_pct;

                if (current_pct - optimal_pct).abs() <= REALLOCATION_DEVIATION_PCT {
                    return None;
                }

                let action = if current_pct < optimal_pct {
                    ReallocationAction::IncreaseAkyazi
                } else {
                    ReallocationAction::ReduceAkyazi
                };

                Some(ReallocationAdvice {
                    sku: r.sku.clone(),
                    product_name: r.product_name.clone(),
                    segment: r.segment,
                    current_akyazi_pct: current_pct * 100.0,
                    optimal_akyazi_pct: optimal_pct * 100.0,
                    action,
                    suggested_transfer: r.transfer_from_ana_depo,
                })
            })
            .collect()
    }

    /// 调拨面板汇总统计
    pub fn get_transfer_summary_stats(&self, plan: &[AllocationRecord]) -> TransferSummaryStats {
        let with_need: Vec<&AllocationRecord> = plan
            .iter()
            .filter(|r| r.transfer_from_ana_depo > 0.0)
            .collect();

        let total_transfer_volume: f64 =
            with_need.iter().map(|r| r.transfer_from_ana_depo).sum();
        let avg_transfer_size = if with_need.is_empty() {
            0.0
        } else {
            total_transfer_volume / with_need.len() as f64
        };

        TransferSummaryStats {
            urgent_transfers: plan.iter().filter(|r| r.is_urgent_transfer).count(),
            auto_transfers: with_need.iter().filter(|r| r.auto_transfer).count(),
            total_transfer_volume,
            avg_transfer_size,
        }
    }
}
