// ==========================================
// 零售库存分配决策支持系统 - API 层
// ==========================================
// 职责: 流水线编排 / 报表查询 / CSV 导出的外部入口
// 架构: API 层 → 引擎层，配置以不可变值下传
// ==========================================

pub mod error;
pub mod export_api;
pub mod pipeline_api;
pub mod report_api;

pub use error::{ApiError, ApiResult};
pub use export_api::ExportApi;
pub use pipeline_api::PipelineApi;
pub use report_api::ReportApi;
