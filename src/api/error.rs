// ==========================================
// 零售库存分配决策支持系统 - API 层错误类型
// ==========================================
// 职责: 流水线编排与导出的调用方错误
// ==========================================

use crate::engine::AllocationError;
use crate::importer::ImportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("流水线尚未运行: {0}")]
    NotReady(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("分配计算失败: {0}")]
    Allocation(#[from] AllocationError),

    #[error("导出失败: {0}")]
    ExportError(String),

    #[error("配置序列化失败: {0}")]
    ConfigSnapshot(#[from] serde_json::Error),
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
