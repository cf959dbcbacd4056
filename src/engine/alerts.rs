// ==========================================
// 零售库存分配决策支持系统 - 告警生成器
// ==========================================
// 职责: 基于分配表与商品表生成五类运营告警并排序
// 输入: 定段后的商品表 + 分配计划表 + 运行配置
// 输出: AlertRecord 表（每轮整表重建，无跨轮身份）
// 红线: 同一商品同时满足临界与趋势条件时只保留临界告警
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::alert::{AlertRecord, AlertSummary};
use crate::domain::allocation::AllocationRecord;
use crate::domain::product::SegmentedProduct;
use crate::domain::types::{AlertCategory, AlertLevel, MarkdownAdvice, Segment};
use crate::util::clip;
use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use tracing::instrument;

/// 历史断货告警阈值（近 30 天断货天数）
const STOCKOUT_HISTORY_THRESHOLD_DAYS: i32 = 5;

/// 大额调拨告警阈值（件）
const LARGE_TRANSFER_THRESHOLD_QTY: f64 = 100.0;

// ==========================================
// AlertEngine - 告警引擎
// ==========================================
pub struct AlertEngine {
    // 无状态引擎，整表输入整表输出
}

impl AlertEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成全部告警
    ///
    /// 五类规则依次评估，之后统一计算优先级并排序:
    /// priority = base(level) + (10 − clip(days_of_stock, 0, 10))，
    /// 按优先级降序、同优先级按可售天数升序
    #[instrument(skip_all, fields(count = plan.len()))]
    pub fn generate_all(
        &self,
        products: &[SegmentedProduct],
        plan: &[AllocationRecord],
        config: &AnalysisConfig,
    ) -> Vec<AlertRecord> {
        let now = Local::now().naive_local();
        let mut alerts = Vec::new();

        self.critical_stock_alerts(plan, config, now, &mut alerts);
        self.trend_alerts(plan, config, now, &mut alerts);
        self.markdown_alerts(plan, config, now, &mut alerts);
        self.stockout_history_alerts(products, now, &mut alerts);
        self.large_transfer_alerts(plan, now, &mut alerts);

        alerts.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.days_of_stock
                        .partial_cmp(&b.days_of_stock)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        alerts
    }

    /// 临界库存告警 (CRITICAL / STOCK)
    ///
    /// HOT / RISING_STAR 且可售天数低于临界阈值
    fn critical_stock_alerts(
        &self,
        plan: &[AllocationRecord],
        config: &AnalysisConfig,
        now: NaiveDateTime,
        alerts: &mut Vec<AlertRecord>,
    ) {
        let critical_days = config.risk_thresholds.critical_stock_days;
        for record in plan {
            if record.days_of_stock >= critical_days {
                continue;
            }
            if !matches!(record.segment, Segment::Hot | Segment::RisingStar) {
                continue;
            }
            alerts.push(self.build_alert(
                AlertLevel::Critical,
                AlertCategory::Stock,
                record,
                format!(
                    "临界库存! 仅剩 {:.1} 天可售，预测日销 {:.0} 件",
                    record.days_of_stock, record.forecasted_daily_sales
                ),
                format!(
                    "紧急: 立即从主仓调拨 {:.0} 件",
                    record.transfer_from_ana_depo
                ),
                now,
            ));
        }
    }

    /// 高流速风险告警 (WARNING / TREND)
    ///
    /// HOT 且可售天数低于关注阈值；已达临界档的行跳过，
    /// 避免与临界库存告警重复
    fn trend_alerts(
        &self,
        plan: &[AllocationRecord],
        config: &AnalysisConfig,
        now: NaiveDateTime,
        alerts: &mut Vec<AlertRecord>,
    ) {
        let warning_days = config.risk_thresholds.warning_stock_days;
        let critical_days = config.risk_thresholds.critical_stock_days;
        for record in plan {
            if record.segment != Segment::Hot || record.days_of_stock >= warning_days {
                continue;
            }
            if record.days_of_stock < critical_days {
                continue;
            }
            alerts.push(self.build_alert(
                AlertLevel::Warning,
                AlertCategory::Trend,
                record,
                format!("HOT 商品库存仅可售 {:.1} 天", record.days_of_stock),
                format!("准备调拨: {:.0} 件", record.transfer_from_ana_depo),
                now,
            ));
        }
    }

    /// 降价紧急告警 (INFO / MARKDOWN)
    fn markdown_alerts(
        &self,
        plan: &[AllocationRecord],
        config: &AnalysisConfig,
        now: NaiveDateTime,
        alerts: &mut Vec<AlertRecord>,
    ) {
        for record in plan {
            if record.markdown_recommendation != MarkdownAdvice::Urgent {
                continue;
            }
            let potential_loss =
                record.price * record.current_stock * config.markdown_discount_rate;
            alerts.push(self.build_alert(
                AlertLevel::Info,
                AlertCategory::Markdown,
                record,
                format!("商品处于衰退段，积压 {:.0} 天可售库存", record.days_of_stock),
                format!(
                    "启动降价: 建议 30%-50% 折扣（潜在损失 {:.0} 元）",
                    potential_loss
                ),
                now,
            ));
        }
    }

    /// 历史断货告警 (WARNING / STOCKOUT_HISTORY)
    ///
    /// 基于商品表而非分配表，预测口径用 7 日均销
    fn stockout_history_alerts(
        &self,
        products: &[SegmentedProduct],
        now: NaiveDateTime,
        alerts: &mut Vec<AlertRecord>,
    ) {
        for row in products {
            if row.product.stock_out_days_last_30d <= STOCKOUT_HISTORY_THRESHOLD_DAYS {
                continue;
            }
            if !matches!(
                row.segment,
                Segment::Hot | Segment::RisingStar | Segment::Steady
            ) {
                continue;
            }
            let level = AlertLevel::Warning;
            let days_of_stock = row.metrics.days_of_stock;
            alerts.push(AlertRecord {
                level,
                category: AlertCategory::StockoutHistory,
                sku: row.product.sku.clone(),
                product_name: row.product.product_name.clone(),
                segment: row.segment,
                message: format!(
                    "近 30 天发生 {} 天断货",
                    row.product.stock_out_days_last_30d
                ),
                action: "提高安全库存天数，复核供应商 lead time".to_string(),
                priority: level.base_priority() + (10.0 - clip(days_of_stock, 0.0, 10.0)),
                days_of_stock,
                forecasted_sales: row.product.daily_sales_avg_7d,
                created_at: now,
            });
        }
    }

    /// 大额调拨告警 (WARNING / TRANSFER)
    fn large_transfer_alerts(
        &self,
        plan: &[AllocationRecord],
        now: NaiveDateTime,
        alerts: &mut Vec<AlertRecord>,
    ) {
        for record in plan {
            if record.transfer_from_ana_depo <= LARGE_TRANSFER_THRESHOLD_QTY
                || !record.auto_transfer
            {
                continue;
            }
            alerts.push(self.build_alert(
                AlertLevel::Warning,
                AlertCategory::Transfer,
                record,
                format!("大额调拨需求: {:.0} 件", record.transfer_from_ana_depo),
                format!(
                    "安排调拨（主仓 → 电商仓），电商仓现货 {:.0} 件",
                    record.stock_akyazi
                ),
                now,
            ));
        }
    }

    fn build_alert(
        &self,
        level: AlertLevel,
        category: AlertCategory,
        record: &AllocationRecord,
        message: String,
        action: String,
        now: NaiveDateTime,
    ) -> AlertRecord {
        AlertRecord {
            level,
            category,
            sku: record.sku.clone(),
            product_name: record.product_name.clone(),
            segment: record.segment,
            message,
            action,
            priority: level.base_priority() + (10.0 - clip(record.days_of_stock, 0.0, 10.0)),
            days_of_stock: record.days_of_stock,
            forecasted_sales: record.forecasted_daily_sales,
            created_at: now,
        }
    }

    /// 告警汇总（按等级与类别计数，每轮现算）
    pub fn summarize(&self, alerts: &[AlertRecord]) -> AlertSummary {
        if alerts.is_empty() {
            return AlertSummary::empty();
        }

        let mut by_category: HashMap<AlertCategory, usize> = HashMap::new();
        for alert in alerts {
            *by_category.entry(alert.category).or_insert(0) += 1;
        }

        AlertSummary {
            total: alerts.len(),
            critical: alerts.iter().filter(|a| a.level == AlertLevel::Critical).count(),
            warning: alerts.iter().filter(|a| a.level == AlertLevel::Warning).count(),
            info: alerts.iter().filter(|a| a.level == AlertLevel::Info).count(),
            by_category,
        }
    }

    /// 告警过滤（等级 / 类别 / 段位，None 表示不过滤该维度）
    pub fn filter(
        &self,
        alerts: &[AlertRecord],
        level: Option<AlertLevel>,
        category: Option<AlertCategory>,
        segment: Option<Segment>,
    ) -> Vec<AlertRecord> {
        alerts
            .iter()
            .filter(|a| level.map_or(true, |l| a.level == l))
            .filter(|a| category.map_or(true, |c| a.category == c))
            .filter(|a| segment.map_or(true, |s| a.segment == s))
            .cloned()
            .collect()
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{ProductMetrics, ProductRecord};
    use crate::domain::types::Depot;

    fn make_plan_record(
        sku: &str,
        segment: Segment,
        days_of_stock: f64,
        transfer: f64,
        auto_transfer: bool,
        markdown: MarkdownAdvice,
    ) -> AllocationRecord {
        AllocationRecord {
            sku: sku.to_string(),
            product_name: format!("商品 {}", sku),
            category: "kitchen".to_string(),
            segment,
            price: 100.0,
            current_stock: 50.0,
            stock_akyazi: 20.0,
            stock_ana_depo: 20.0,
            stock_oms: 10.0,
            days_of_stock,
            forecasted_daily_sales: 10.0,
            safety_stock_needed: 50.0,
            reorder_point: 30.0,
            optimal_akyazi_stock: 40.0,
            stock_consumed_during_transfer: 50.0,
            transfer_from_ana_depo: transfer,
            days_until_stockout_akyazi: days_of_stock,
            is_urgent_transfer: false,
            is_critical: false,
            primary_depot: Depot::Akyazi,
            depot_priority: vec![Depot::Akyazi, Depot::AnaDepo],
            auto_transfer,
            markdown_recommendation: markdown,
        }
    }

    fn make_product_row(
        sku: &str,
        segment: Segment,
        stockout_days: i32,
        days_of_stock: f64,
    ) -> SegmentedProduct {
        SegmentedProduct {
            product: ProductRecord {
                sku: sku.to_string(),
                product_name: format!("商品 {}", sku),
                category: "kitchen".to_string(),
                tip: 1,
                price: 100.0,
                margin_pct: 40.0,
                stock_akyazi: 20.0,
                stock_ana_depo: 20.0,
                stock_oms_total: 10.0,
                total_stock: 50.0,
                daily_sales_avg_30d: 5.0,
                daily_sales_avg_7d: 5.0,
                daily_sales_yesterday: 5.0,
                view_count_7d: 100,
                add_to_cart_7d: 10,
                favorites_7d: 5,
                avg_rating: 4.0,
                review_count: 50,
                stock_out_days_last_30d: stockout_days,
                campaign_flag: false,
            },
            metrics: ProductMetrics {
                velocity_score: 1.0,
                trend_score: 1.0,
                engagement_score: 10.0,
                conversion_rate: 50.0,
                days_of_stock,
                quality_score: 42.5,
                stockout_penalty: 100.0,
                campaign_boost: 1.0,
                final_score: 80.0,
            },
            segment,
        }
    }

    #[test]
    fn test_critical_stock_alert_for_hot_segments_only() {
        let plan = vec![
            make_plan_record("SKU-HOT", Segment::Hot, 1.5, 50.0, true, MarkdownAdvice::No),
            make_plan_record("SKU-SLOW", Segment::Slow, 1.5, 0.0, false, MarkdownAdvice::No),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        let stock_alerts: Vec<_> = alerts
            .iter()
            .filter(|a| a.category == AlertCategory::Stock)
            .collect();
        assert_eq!(stock_alerts.len(), 1);
        assert_eq!(stock_alerts[0].sku, "SKU-HOT");
        assert_eq!(stock_alerts[0].level, AlertLevel::Critical);
    }

    #[test]
    fn test_trend_alert_skipped_when_critical_applies() {
        // days_of_stock=1.5 同时满足临界与趋势条件，只出临界告警
        let plan = vec![make_plan_record(
            "SKU-1",
            Segment::Hot,
            1.5,
            50.0,
            true,
            MarkdownAdvice::No,
        )];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        assert!(alerts.iter().any(|a| a.category == AlertCategory::Stock));
        assert!(!alerts.iter().any(|a| a.category == AlertCategory::Trend));
    }

    #[test]
    fn test_trend_alert_in_warning_band() {
        // 3 ≤ days < 7 的 HOT 行只出趋势告警
        let plan = vec![make_plan_record(
            "SKU-1",
            Segment::Hot,
            5.0,
            30.0,
            true,
            MarkdownAdvice::No,
        )];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        assert!(alerts.iter().any(|a| a.category == AlertCategory::Trend));
        assert!(!alerts.iter().any(|a| a.category == AlertCategory::Stock));
    }

    #[test]
    fn test_markdown_alert_only_for_urgent() {
        let plan = vec![
            make_plan_record("SKU-URGENT", Segment::Dying, 90.0, 0.0, false, MarkdownAdvice::Urgent),
            make_plan_record("SKU-CONSIDER", Segment::Slow, 50.0, 0.0, false, MarkdownAdvice::Consider),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        let markdowns: Vec<_> = alerts
            .iter()
            .filter(|a| a.category == AlertCategory::Markdown)
            .collect();
        assert_eq!(markdowns.len(), 1);
        assert_eq!(markdowns[0].sku, "SKU-URGENT");
        assert_eq!(markdowns[0].level, AlertLevel::Info);
    }

    #[test]
    fn test_stockout_history_alert_threshold() {
        let products = vec![
            make_product_row("SKU-BAD", Segment::Steady, 8, 10.0),
            make_product_row("SKU-OK", Segment::Steady, 5, 10.0),
            make_product_row("SKU-SLOW", Segment::Slow, 8, 10.0),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&products, &[], &AnalysisConfig::default());

        let stockouts: Vec<_> = alerts
            .iter()
            .filter(|a| a.category == AlertCategory::StockoutHistory)
            .collect();
        assert_eq!(stockouts.len(), 1);
        assert_eq!(stockouts[0].sku, "SKU-BAD");
    }

    #[test]
    fn test_large_transfer_alert_requires_auto() {
        let plan = vec![
            make_plan_record("SKU-AUTO", Segment::Hot, 20.0, 150.0, true, MarkdownAdvice::No),
            make_plan_record("SKU-MANUAL", Segment::Slow, 20.0, 150.0, false, MarkdownAdvice::No),
            make_plan_record("SKU-SMALL", Segment::Hot, 20.0, 50.0, true, MarkdownAdvice::No),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        let transfers: Vec<_> = alerts
            .iter()
            .filter(|a| a.category == AlertCategory::Transfer)
            .collect();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].sku, "SKU-AUTO");
    }

    #[test]
    fn test_priority_formula_and_ordering() {
        let plan = vec![
            make_plan_record("SKU-INFO", Segment::Dying, 90.0, 0.0, false, MarkdownAdvice::Urgent),
            make_plan_record("SKU-CRIT", Segment::Hot, 1.0, 50.0, true, MarkdownAdvice::No),
            make_plan_record("SKU-WARN", Segment::Hot, 5.0, 30.0, true, MarkdownAdvice::No),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        // CRITICAL: 100 + (10 − 1) = 109
        let crit = alerts.iter().find(|a| a.sku == "SKU-CRIT").unwrap();
        assert_eq!(crit.priority, 109.0);
        // WARNING: 50 + (10 − 5) = 55
        let warn = alerts.iter().find(|a| a.sku == "SKU-WARN").unwrap();
        assert_eq!(warn.priority, 55.0);
        // INFO: 10 + (10 − 10) = 10，days 裁剪到上限
        let info = alerts.iter().find(|a| a.sku == "SKU-INFO").unwrap();
        assert_eq!(info.priority, 10.0);

        // 全序: 优先级降序
        let priorities: Vec<f64> = alerts.iter().map(|a| a.priority).collect();
        assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_equal_priority_breaks_by_days_ascending() {
        let plan = vec![
            make_plan_record("SKU-A", Segment::Hot, 1.4, 50.0, true, MarkdownAdvice::No),
            make_plan_record("SKU-B", Segment::Hot, 1.4, 50.0, true, MarkdownAdvice::No),
            make_plan_record("SKU-C", Segment::Hot, 0.5, 50.0, true, MarkdownAdvice::No),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        let days: Vec<f64> = alerts
            .iter()
            .filter(|a| a.category == AlertCategory::Stock)
            .map(|a| a.days_of_stock)
            .collect();
        assert_eq!(days[0], 0.5);
    }

    #[test]
    fn test_summary_counts() {
        let plan = vec![
            make_plan_record("SKU-CRIT", Segment::Hot, 1.0, 150.0, true, MarkdownAdvice::No),
            make_plan_record("SKU-INFO", Segment::Dying, 90.0, 0.0, false, MarkdownAdvice::Urgent),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());
        let summary = engine.summarize(&alerts);

        // SKU-CRIT 同时触发临界与大额调拨
        assert_eq!(summary.total, 3);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.by_category[&AlertCategory::Stock], 1);
        assert_eq!(summary.by_category[&AlertCategory::Transfer], 1);
    }

    #[test]
    fn test_empty_inputs_produce_empty_summary() {
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &[], &AnalysisConfig::default());
        assert!(alerts.is_empty());
        assert_eq!(engine.summarize(&alerts), AlertSummary::empty());
    }

    #[test]
    fn test_filter_by_level_and_category() {
        let plan = vec![
            make_plan_record("SKU-CRIT", Segment::Hot, 1.0, 150.0, true, MarkdownAdvice::No),
            make_plan_record("SKU-INFO", Segment::Dying, 90.0, 0.0, false, MarkdownAdvice::Urgent),
        ];
        let engine = AlertEngine::new();
        let alerts = engine.generate_all(&[], &plan, &AnalysisConfig::default());

        let criticals = engine.filter(&alerts, Some(AlertLevel::Critical), None, None);
        assert!(criticals.iter().all(|a| a.level == AlertLevel::Critical));
        assert_eq!(criticals.len(), 1);

        let markdowns = engine.filter(&alerts, None, Some(AlertCategory::Markdown), None);
        assert_eq!(markdowns.len(), 1);

        let dying = engine.filter(&alerts, None, None, Some(Segment::Dying));
        assert!(dying.iter().all(|a| a.segment == Segment::Dying));

        let unfiltered = engine.filter(&alerts, None, None, None);
        assert_eq!(unfiltered.len(), alerts.len());
    }
}
