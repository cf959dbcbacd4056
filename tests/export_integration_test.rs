// ==========================================
// 导出层集成测试
// ==========================================
// 覆盖: 流水线输出表 → CSV 文件的落盘与回读
// ==========================================

mod helpers;

use helpers::test_data_builder::sample_catalog;
use inventory_dss::config::AnalysisConfig;
use inventory_dss::{ExportApi, PipelineApi, ReportApi};
use tempfile::tempdir;

fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn test_export_allocation_plan_roundtrip() {
    let mut pipeline = PipelineApi::new(AnalysisConfig::default());
    pipeline.run(&sample_catalog()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("allocation_plan.csv");
    ExportApi::new()
        .export_allocation_plan(pipeline.allocation_plan().unwrap(), &path)
        .unwrap();

    let lines = read_lines(&path);
    // 表头 + 每个商品一行
    assert_eq!(lines.len(), 1 + sample_catalog().len());
    assert!(lines[0].starts_with("sku,product_name,category,segment"));
    assert!(lines.iter().skip(1).any(|l| l.contains("SKU-HOT")));
    // 段位按 SCREAMING_SNAKE_CASE 文本落盘
    assert!(lines.iter().any(|l| l.contains("DYING")));
}

#[test]
fn test_export_alerts_csv() {
    let mut pipeline = PipelineApi::new(AnalysisConfig::default());
    pipeline.run(&sample_catalog()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("alerts.csv");
    ExportApi::new()
        .export_alerts(pipeline.alerts().unwrap(), &path)
        .unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines[0], "level,priority,category,sku,product_name,segment,message,action,created_at");
    assert_eq!(lines.len(), 1 + pipeline.alerts().unwrap().len());
}

#[test]
fn test_export_segment_summary_csv() {
    let mut pipeline = PipelineApi::new(AnalysisConfig::default());
    pipeline.run(&sample_catalog()).unwrap();

    let summary = ReportApi::new().segment_summary(pipeline.segmented().unwrap());
    let dir = tempdir().unwrap();
    let path = dir.path().join("segment_summary.csv");
    ExportApi::new()
        .export_segment_summary(&summary, &path)
        .unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1 + summary.len());
    assert!(lines[0].starts_with("segment,count,total_stock"));
}
