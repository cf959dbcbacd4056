// ==========================================
// 零售库存分配决策支持系统 - 命令行入口
// ==========================================
// 用法: inventory-dss <商品表文件.csv|.xlsx> [输出目录]
// 流程: 导入 → 流水线分析 → 打印汇总 → 导出 CSV 报表
// ==========================================

use anyhow::{bail, Context, Result};
use inventory_dss::config::AnalysisConfig;
use inventory_dss::engine::TransferPriority;
use inventory_dss::{logging, ExportApi, PipelineApi, ProductImporter, ReportApi};
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("用法: {} <商品表文件.csv|.xlsx> [输出目录]", args[0]);
    }
    let input = PathBuf::from(&args[1]);
    let output_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    // 导入
    let outcome = ProductImporter::new()
        .import_file(&input)
        .with_context(|| format!("导入失败: {}", input.display()))?;
    for warning in &outcome.report.warnings {
        eprintln!("警告: {}", warning);
    }
    info!(products = outcome.products.len(), "商品表导入完成");

    // 流水线分析
    let mut pipeline = PipelineApi::new(AnalysisConfig::default());
    pipeline.run(&outcome.products)?;

    // 汇总输出
    let summary = pipeline.alert_summary()?;
    println!(
        "告警: 共 {} 条 (CRITICAL {} / WARNING {} / INFO {})",
        summary.total, summary.critical, summary.warning, summary.info
    );
    let urgent = pipeline.transfer_recommendations(TransferPriority::Urgent)?;
    println!("紧急调拨: {} 条", urgent.len());

    let report_api = ReportApi::new();
    let segment_summary = report_api.segment_summary(pipeline.segmented()?);
    for row in &segment_summary {
        println!(
            "{:<14} {:>5} 个商品  库存 {:>10.0}  库存金额 {:>12.0}  平均可售 {:>6.1} 天",
            row.segment.to_string(),
            row.count,
            row.total_stock,
            row.stock_value,
            row.avg_days_of_stock
        );
    }

    // CSV 导出
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("输出目录创建失败: {}", output_dir.display()))?;
    let export = ExportApi::new();
    export.export_allocation_plan(
        pipeline.allocation_plan()?,
        output_dir.join("allocation_plan.csv"),
    )?;
    export.export_alerts(pipeline.alerts()?, output_dir.join("alerts.csv"))?;
    export.export_segment_summary(&segment_summary, output_dir.join("segment_summary.csv"))?;

    println!("报表已导出至 {}", output_dir.display());
    Ok(())
}
