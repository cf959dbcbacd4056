// ==========================================
// 零售库存分配决策支持系统 - 导入层
// ==========================================
// 流程: 文件解析 → 列校验 → 字段清洗 → 类型化商品表
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod product_importer;
pub mod validator;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawRecord, UniversalFileParser};
pub use product_importer::{ImportOutcome, ProductImporter};
pub use validator::{ValidationReport, Validator, OPTIONAL_COLUMN_DEFAULTS, REQUIRED_COLUMNS};
