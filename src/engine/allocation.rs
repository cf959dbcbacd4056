// ==========================================
// 零售库存分配决策支持系统 - 分配规划器
// ==========================================
// 职责: 按段位策略计算三仓目标分布、调拨量与补货/降价建议
// 输入: 定段后的商品表 + 段位策略 + 调拨 lead time
// 输出: AllocationRecord 表（整表重建）
// 红线: 只做假设性调拨计算，绝不改写输入库存列
// ==========================================

mod core;
mod queries;
mod simulation;


pub use core::AllocationEngine;
pub use queries::TransferPriority;
pub use simulation::AllocationError;
