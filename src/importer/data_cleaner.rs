// ==========================================
// 零售库存分配决策支持系统 - 数据清洗器
// ==========================================
// 职责: 单元格文本到类型化字段的强制转换与范围约束
// 红线: 清洗只降级不阻断，脏值回退默认并记警告
// ==========================================

use crate::importer::file_parser::RawRecord;
use crate::util::clip;

pub struct DataCleaner;

impl DataCleaner {
    /// 文本字段（TRIM，缺失按空串处理）
    pub fn text(&self, record: &RawRecord, field: &str) -> String {
        record
            .get(field)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// 必填数值字段
    ///
    /// 空值与无法解析的值按 0 处理并记警告，负值裁剪为 0
    pub fn numeric(
        &self,
        record: &RawRecord,
        field: &str,
        row: usize,
        warnings: &mut Vec<String>,
    ) -> f64 {
        let raw = self.text(record, field);
        if raw.is_empty() {
            warnings.push(format!("行 {} '{}' 为空，按 0 处理", row, field));
            return 0.0;
        }

        match raw.parse::<f64>() {
            Ok(v) if v < 0.0 => {
                warnings.push(format!("行 {} '{}' 为负值 {}，裁剪为 0", row, field, v));
                0.0
            }
            Ok(v) => v,
            Err(_) => {
                warnings.push(format!(
                    "行 {} '{}' 无法解析 ('{}')，按 0 处理",
                    row, field, raw
                ));
                0.0
            }
        }
    }

    /// 可选数值字段
    ///
    /// 缺失 / 空值 / 无法解析一律回退默认值，负值裁剪为 0
    pub fn optional_numeric(
        &self,
        record: &RawRecord,
        field: &str,
        default: f64,
        row: usize,
        warnings: &mut Vec<String>,
    ) -> f64 {
        let raw = self.text(record, field);
        if raw.is_empty() {
            return default;
        }
        match raw.parse::<f64>() {
            Ok(v) if v < 0.0 => {
                warnings.push(format!("行 {} '{}' 为负值 {}，裁剪为 0", row, field, v));
                0.0
            }
            Ok(v) => v,
            Err(_) => {
                warnings.push(format!(
                    "行 {} '{}' 无法解析 ('{}')，按默认值 {} 处理",
                    row, field, raw, default
                ));
                default
            }
        }
    }

    /// 计数字段（非负整数，小数截断）
    pub fn count(
        &self,
        record: &RawRecord,
        field: &str,
        default: u32,
        row: usize,
        warnings: &mut Vec<String>,
    ) -> u32 {
        self.optional_numeric(record, field, default as f64, row, warnings)
            .floor() as u32
    }

    /// 商品类型字段（仅允许 1/2，非法值归 2）
    pub fn tip(&self, record: &RawRecord, row: usize, warnings: &mut Vec<String>) -> u8 {
        let raw = self.text(record, "tip");
        match raw.parse::<u8>() {
            Ok(1) => 1,
            Ok(2) => 2,
            _ => {
                warnings.push(format!("行 {} 'tip' 非法值 '{}'，归为类型 2", row, raw));
                2
            }
        }
    }

    /// 布尔标志字段（真值集合外一律为假）
    pub fn flag(&self, record: &RawRecord, field: &str) -> bool {
        let raw = self.text(record, field).to_lowercase();
        matches!(raw.as_str(), "1" | "true" | "y" | "yes" | "是")
    }

    /// 评分字段（裁剪到 [0, 5]）
    pub fn rating(
        &self,
        record: &RawRecord,
        default: f64,
        row: usize,
        warnings: &mut Vec<String>,
    ) -> f64 {
        let raw = self.optional_numeric(record, "avg_rating", default, row, warnings);
        clip(raw, 0.0, 5.0)
    }

    /// 断货天数字段（裁剪到 [0, 30]）
    pub fn stockout_days(
        &self,
        record: &RawRecord,
        row: usize,
        warnings: &mut Vec<String>,
    ) -> i32 {
        let raw = self.optional_numeric(record, "stock_out_days_last_30d", 0.0, row, warnings);
        clip(raw, 0.0, 30.0) as i32
    }
}
