// ==========================================
// 零售库存分配决策支持系统 - 领域层
// ==========================================
// 实体与类型定义，不含业务规则
// ==========================================

pub mod alert;
pub mod allocation;
pub mod product;
pub mod summary;
pub mod types;

pub use alert::{AlertRecord, AlertSummary};
pub use allocation::{
    AllocationRecord, MarkdownCandidate, ReallocationAction, ReallocationAdvice,
    ReorderRecommendation, TransferSimulation, TransferSummaryStats,
};
pub use product::{ProductMetrics, ProductRecord, ScoredProduct, SegmentedProduct};
pub use summary::{CategoryPerformance, SegmentSummary};
pub use types::{AlertCategory, AlertLevel, Depot, MarkdownAdvice, Segment};
