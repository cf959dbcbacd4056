// ==========================================
// 零售库存分配决策支持系统 - 数据校验器
// ==========================================
// 职责: 列级校验。必填列缺失 / 空数据集为致命错误，
//       可选列缺失仅记警告并在清洗阶段按默认值补齐
// ==========================================

use crate::importer::file_parser::RawRecord;
use serde::{Deserialize, Serialize};

/// 必填列（缺失即导入失败）
pub const REQUIRED_COLUMNS: &[&str] = &[
    "sku",
    "product_name",
    "category",
    "tip",
    "price",
    "stock_akyazi",
    "stock_ana_depo",
    "stock_oms_total",
    "daily_sales_avg_30d",
    "daily_sales_avg_7d",
    "daily_sales_yesterday",
];

/// 可选列及其默认值
pub const OPTIONAL_COLUMN_DEFAULTS: &[(&str, f64)] = &[
    ("margin_pct", 40.0),
    ("view_count_7d", 0.0),
    ("add_to_cart_7d", 0.0),
    ("favorites_7d", 0.0),
    ("review_count", 0.0),
    ("avg_rating", 4.0),
    ("stock_out_days_last_30d", 0.0),
    ("campaign_flag", 0.0),
];

// ==========================================
// ValidationReport - 校验结果
// ==========================================
// 错误与警告分离: 错误阻断导入，警告随结果返回
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ==========================================
// Validator - 列级校验
// ==========================================
pub struct Validator;

impl Validator {
    /// 校验原始行集的列完整性
    pub fn validate_columns(&self, records: &[RawRecord]) -> ValidationReport {
        let mut report = ValidationReport::default();

        if records.is_empty() {
            report.errors.push("数据集为空".to_string());
            return report;
        }

        // 解析器保证每行携带全部表头，取首行即可
        let first = &records[0];

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !first.contains_key(**col))
            .copied()
            .collect();
        if !missing.is_empty() {
            report
                .errors
                .push(format!("必填列缺失: {}", missing.join(", ")));
            return report;
        }

        for (col, default) in OPTIONAL_COLUMN_DEFAULTS {
            if !first.contains_key(*col) {
                report.warnings.push(format!(
                    "可选列 '{}' 缺失，按默认值 {} 补齐",
                    col, default
                ));
            }
        }

        report
    }
}
