// ==========================================
// 零售库存分配决策支持系统 - 报表 API
// ==========================================
// 职责: 定段表上的聚合与排名查询，供面板与导出消费
// 所有查询只读，不触发流水线重算
// ==========================================

use crate::domain::product::SegmentedProduct;
use crate::domain::summary::{CategoryPerformance, SegmentSummary};
use crate::domain::types::Segment;
use std::collections::BTreeMap;

// ==========================================
// ReportApi - 报表查询
// ==========================================
pub struct ReportApi;

impl ReportApi {
    pub fn new() -> Self {
        Self
    }

    /// 段位汇总（按固定段位顺序，空段位不出行）
    pub fn segment_summary(&self, products: &[SegmentedProduct]) -> Vec<SegmentSummary> {
        Segment::ALL
            .iter()
            .filter_map(|segment| {
                let rows: Vec<&SegmentedProduct> =
                    products.iter().filter(|p| p.segment == *segment).collect();
                if rows.is_empty() {
                    return None;
                }
                let count = rows.len();
                let n = count as f64;
                Some(SegmentSummary {
                    segment: *segment,
                    count,
                    total_stock: rows.iter().map(|p| p.product.total_stock).sum(),
                    stock_value: rows.iter().map(|p| p.product.stock_value()).sum(),
                    avg_velocity: rows.iter().map(|p| p.metrics.velocity_score).sum::<f64>() / n,
                    avg_trend: rows.iter().map(|p| p.metrics.trend_score).sum::<f64>() / n,
                    total_daily_sales: rows.iter().map(|p| p.product.daily_sales_avg_7d).sum(),
                    avg_days_of_stock: rows.iter().map(|p| p.metrics.days_of_stock).sum::<f64>()
                        / n,
                    avg_final_score: rows.iter().map(|p| p.metrics.final_score).sum::<f64>() / n,
                })
            })
            .collect()
    }

    /// 类目绩效（按类目名排序）
    pub fn category_performance(&self, products: &[SegmentedProduct]) -> Vec<CategoryPerformance> {
        let mut by_category: BTreeMap<&str, Vec<&SegmentedProduct>> = BTreeMap::new();
        for row in products {
            by_category
                .entry(row.product.category.as_str())
                .or_default()
                .push(row);
        }

        by_category
            .into_iter()
            .map(|(category, rows)| {
                let n = rows.len() as f64;
                CategoryPerformance {
                    category: category.to_string(),
                    product_count: rows.len(),
                    total_stock: rows.iter().map(|p| p.product.total_stock).sum(),
                    daily_sales: rows.iter().map(|p| p.product.daily_sales_avg_7d).sum(),
                    avg_price: rows.iter().map(|p| p.product.price).sum::<f64>() / n,
                    avg_velocity: rows.iter().map(|p| p.metrics.velocity_score).sum::<f64>() / n,
                    avg_score: rows.iter().map(|p| p.metrics.final_score).sum::<f64>() / n,
                    avg_stock_days: rows.iter().map(|p| p.metrics.days_of_stock).sum::<f64>() / n,
                    stock_value: rows.iter().map(|p| p.product.stock_value()).sum(),
                }
            })
            .collect()
    }

    /// 综合分排名前 n
    pub fn top_performers(&self, products: &[SegmentedProduct], n: usize) -> Vec<SegmentedProduct> {
        let mut sorted: Vec<SegmentedProduct> = products.to_vec();
        sorted.sort_by(|a, b| {
            b.metrics
                .final_score
                .partial_cmp(&a.metrics.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted.truncate(n);
        sorted
    }

    /// 综合分排名后 n
    pub fn bottom_performers(
        &self,
        products: &[SegmentedProduct],
        n: usize,
    ) -> Vec<SegmentedProduct> {
        let mut sorted: Vec<SegmentedProduct> = products.to_vec();
        sorted.sort_by(|a, b| {
            a.metrics
                .final_score
                .partial_cmp(&b.metrics.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted.truncate(n);
        sorted
    }

    /// 临界库存商品（仅 HOT / RISING_STAR，按可售天数升序）
    pub fn critical_stock_products(
        &self,
        products: &[SegmentedProduct],
        threshold_days: f64,
    ) -> Vec<SegmentedProduct> {
        let mut critical: Vec<SegmentedProduct> = products
            .iter()
            .filter(|p| p.metrics.days_of_stock < threshold_days)
            .filter(|p| matches!(p.segment, Segment::Hot | Segment::RisingStar))
            .cloned()
            .collect();
        critical.sort_by(|a, b| {
            a.metrics
                .days_of_stock
                .partial_cmp(&b.metrics.days_of_stock)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        critical
    }

    /// 超储商品（不限段位，按可售天数降序）
    pub fn overstocked_products(
        &self,
        products: &[SegmentedProduct],
        threshold_days: f64,
    ) -> Vec<SegmentedProduct> {
        let mut overstocked: Vec<SegmentedProduct> = products
            .iter()
            .filter(|p| p.metrics.days_of_stock > threshold_days)
            .cloned()
            .collect();
        overstocked.sort_by(|a, b| {
            b.metrics
                .days_of_stock
                .partial_cmp(&a.metrics.days_of_stock)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        overstocked
    }
}

impl Default for ReportApi {
    fn default() -> Self {
        Self::new()
    }
}
