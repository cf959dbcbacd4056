// ==========================================
// 零售库存分配决策支持系统 - 分析引擎层
// ==========================================
// 四级流水线: 指标计算 → 生命周期定段 → 分配规划 → 告警生成
// 每级是 (输入表, 配置) → 新表 的纯函数，绝不改写上游输出
// ==========================================

pub mod alerts;
pub mod allocation;
pub mod forecast;
pub mod metrics;
pub mod seasonal;
pub mod segmentation;

pub use alerts::AlertEngine;
pub use allocation::{AllocationEngine, AllocationError, TransferPriority};
pub use forecast::{DemandEstimator, SeasonalDemandEstimator, TrendDemandEstimator};
pub use metrics::MetricEngine;
pub use seasonal::{SeasonalError, SeasonalForecaster, SeasonalReportRow};
pub use segmentation::SegmentationEngine;
