// ==========================================
// 零售库存分配决策支持系统 - 商品导入器
// ==========================================
// 职责: 解析 → 校验 → 清洗 → 类型化商品表的全流程编排
// 输出: Vec<ProductRecord> + 校验报告（警告不阻断导入）
// 红线: total_stock 在导入时一次性推导，下游绝不改写
// ==========================================

use crate::domain::product::ProductRecord;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use crate::importer::validator::{ValidationReport, Validator};
use std::path::Path;
use tracing::{info, instrument, warn};

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug)]
pub struct ImportOutcome {
    pub products: Vec<ProductRecord>,
    pub report: ValidationReport,
}

// ==========================================
// ProductImporter - 导入编排
// ==========================================
pub struct ProductImporter {
    cleaner: DataCleaner,
}

impl ProductImporter {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 从文件导入商品表
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportOutcome> {
        let records = UniversalFileParser.parse(path.as_ref())?;
        info!(rows = records.len(), "文件解析完成");
        self.import_records(records)
    }

    /// 从原始行集导入（文件解析与编排解耦，便于测试）
    pub fn import_records(&self, records: Vec<RawRecord>) -> ImportResult<ImportOutcome> {
        let mut report = Validator.validate_columns(&records);
        if !report.is_ok() {
            return Err(ImportError::ValidationFailed(report.errors.join("; ")));
        }

        let mut products = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            // 行号按 1 起算（表头为第 0 行）
            let row = idx + 1;
            products.push(self.clean_record(record, row, &mut report.warnings));
        }

        for warning in &report.warnings {
            warn!("{}", warning);
        }
        info!(products = products.len(), warnings = report.warnings.len(), "商品导入完成");

        Ok(ImportOutcome { products, report })
    }

    fn clean_record(
        &self,
        record: &RawRecord,
        row: usize,
        warnings: &mut Vec<String>,
    ) -> ProductRecord {
        let cleaner = &self.cleaner;

        let stock_akyazi = cleaner.numeric(record, "stock_akyazi", row, warnings);
        let stock_ana_depo = cleaner.numeric(record, "stock_ana_depo", row, warnings);
        let stock_oms_total = cleaner.numeric(record, "stock_oms_total", row, warnings);

        ProductRecord {
            sku: cleaner.text(record, "sku"),
            product_name: cleaner.text(record, "product_name"),
            category: cleaner.text(record, "category"),
            tip: cleaner.tip(record, row, warnings),
            price: cleaner.numeric(record, "price", row, warnings),
            margin_pct: cleaner.optional_numeric(record, "margin_pct", 40.0, row, warnings),
            stock_akyazi,
            stock_ana_depo,
            stock_oms_total,
            total_stock: stock_akyazi + stock_ana_depo + stock_oms_total,
            daily_sales_avg_30d: cleaner.numeric(record, "daily_sales_avg_30d", row, warnings),
            daily_sales_avg_7d: cleaner.numeric(record, "daily_sales_avg_7d", row, warnings),
            daily_sales_yesterday: cleaner.numeric(record, "daily_sales_yesterday", row, warnings),
            view_count_7d: cleaner.count(record, "view_count_7d", 0, row, warnings),
            add_to_cart_7d: cleaner.count(record, "add_to_cart_7d", 0, row, warnings),
            favorites_7d: cleaner.count(record, "favorites_7d", 0, row, warnings),
            avg_rating: cleaner.rating(record, 4.0, row, warnings),
            review_count: cleaner.count(record, "review_count", 0, row, warnings),
            stock_out_days_last_30d: cleaner.stockout_days(record, row, warnings),
            campaign_flag: cleaner.flag(record, "campaign_flag"),
        }
    }
}

impl Default for ProductImporter {
    fn default() -> Self {
        Self::new()
    }
}
