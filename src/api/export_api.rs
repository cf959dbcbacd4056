// ==========================================
// 零售库存分配决策支持系统 - 导出 API
// ==========================================
// 职责: 分配计划 / 告警 / 段位汇总表的 CSV 导出
// 格式: UTF-8 逗号分隔，表头固定，枚举按 SCREAMING_SNAKE_CASE 文本
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::alert::AlertRecord;
use crate::domain::allocation::AllocationRecord;
use crate::domain::summary::SegmentSummary;
use csv::Writer;
use std::path::Path;
use tracing::info;

// ==========================================
// ExportApi - CSV 导出
// ==========================================
pub struct ExportApi;

impl ExportApi {
    pub fn new() -> Self {
        Self
    }

    /// 导出分配计划表
    pub fn export_allocation_plan<P: AsRef<Path>>(
        &self,
        plan: &[AllocationRecord],
        path: P,
    ) -> ApiResult<()> {
        let mut writer = Writer::from_path(path.as_ref())?;

        writer.write_record([
            "sku",
            "product_name",
            "category",
            "segment",
            "current_stock",
            "stock_akyazi",
            "stock_ana_depo",
            "stock_oms",
            "days_of_stock",
            "forecasted_daily_sales",
            "optimal_akyazi_stock",
            "transfer_from_ana_depo",
            "days_until_stockout_akyazi",
            "is_urgent_transfer",
            "is_critical",
            "primary_depot",
            "markdown_recommendation",
        ])?;

        for record in plan {
            writer.write_record([
                record.sku.as_str(),
                record.product_name.as_str(),
                record.category.as_str(),
                &record.segment.to_string(),
                &format!("{:.1}", record.current_stock),
                &format!("{:.1}", record.stock_akyazi),
                &format!("{:.1}", record.stock_ana_depo),
                &format!("{:.1}", record.stock_oms),
                &format!("{:.1}", record.days_of_stock),
                &format!("{:.2}", record.forecasted_daily_sales),
                &format!("{:.1}", record.optimal_akyazi_stock),
                &format!("{:.1}", record.transfer_from_ana_depo),
                &format!("{:.1}", record.days_until_stockout_akyazi),
                &record.is_urgent_transfer.to_string(),
                &record.is_critical.to_string(),
                &record.primary_depot.to_string(),
                &record.markdown_recommendation.to_string(),
            ])?;
        }

        writer.flush()?;
        info!(rows = plan.len(), "分配计划导出完成");
        Ok(())
    }

    /// 导出告警表
    pub fn export_alerts<P: AsRef<Path>>(
        &self,
        alerts: &[AlertRecord],
        path: P,
    ) -> ApiResult<()> {
        let mut writer = Writer::from_path(path.as_ref())?;

        writer.write_record([
            "level",
            "priority",
            "category",
            "sku",
            "product_name",
            "segment",
            "message",
            "action",
            "created_at",
        ])?;

        for alert in alerts {
            writer.write_record([
                &alert.level.to_string(),
                &format!("{:.0}", alert.priority),
                &alert.category.to_string(),
                alert.sku.as_str(),
                alert.product_name.as_str(),
                &alert.segment.to_string(),
                alert.message.as_str(),
                alert.action.as_str(),
                &alert.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])?;
        }

        writer.flush()?;
        info!(rows = alerts.len(), "告警表导出完成");
        Ok(())
    }

    /// 导出段位汇总表
    pub fn export_segment_summary<P: AsRef<Path>>(
        &self,
        summary: &[SegmentSummary],
        path: P,
    ) -> ApiResult<()> {
        let mut writer = Writer::from_path(path.as_ref())?;

        writer.write_record([
            "segment",
            "count",
            "total_stock",
            "stock_value",
            "avg_velocity",
            "avg_trend",
            "total_daily_sales",
            "avg_days_of_stock",
            "avg_final_score",
        ])?;

        for row in summary {
            writer.write_record([
                &row.segment.to_string(),
                &row.count.to_string(),
                &format!("{:.1}", row.total_stock),
                &format!("{:.2}", row.stock_value),
                &format!("{:.3}", row.avg_velocity),
                &format!("{:.3}", row.avg_trend),
                &format!("{:.1}", row.total_daily_sales),
                &format!("{:.1}", row.avg_days_of_stock),
                &format!("{:.1}", row.avg_final_score),
            ])?;
        }

        writer.flush()?;
        info!(rows = summary.len(), "段位汇总导出完成");
        Ok(())
    }
}

impl Default for ExportApi {
    fn default() -> Self {
        Self::new()
    }
}
