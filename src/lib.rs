// ==========================================
// 零售库存分配决策支持系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (人工最终控制权)
// 流水线: 导入 → 指标 → 定段 → 分配 → 告警 → 报表/导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 数值工具
pub mod util;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertCategory, AlertLevel, Depot, MarkdownAdvice, Segment};

// 领域实体
pub use domain::{
    AlertRecord, AlertSummary, AllocationRecord, CategoryPerformance, ProductMetrics,
    ProductRecord, ScoredProduct, SegmentSummary, SegmentedProduct, TransferSimulation,
};

// 配置
pub use config::{AnalysisConfig, MetricWeights, RiskThresholds, SegmentPolicy, SegmentPolicyMap};

// 引擎
pub use engine::{
    AlertEngine, AllocationEngine, DemandEstimator, MetricEngine, SeasonalForecaster,
    SegmentationEngine, TransferPriority, TrendDemandEstimator,
};

// 导入与 API
pub use api::{ApiError, ApiResult, ExportApi, PipelineApi, ReportApi};
pub use importer::{ImportError, ProductImporter, ValidationReport};

/// 应用名称
pub const APP_NAME: &str = "inventory-dss";

/// 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
