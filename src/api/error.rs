// ==========================================
// 应募者ランキング - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将各层错误转换为用户可读的提示
// 约定: 任何错误都不改变已加载的记录与页码
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::ranking::{PriorityError, RankingServiceError, SortError};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 导入错误
    // ==========================================
    /// 不支持的文件类型（仅提示，不视为失败）
    #[error("{0}")]
    UnsupportedFile(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 排序错误
    // ==========================================
    #[error("{0}")]
    PriorityConflict(String),

    #[error("已有排序请求进行中，请稍后重试")]
    SortInProgress,

    #[error("{0}")]
    SortFailed(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 是否为仅提示类错误（界面以警告展示）
    pub fn is_warning(&self) -> bool {
        matches!(self, ApiError::UnsupportedFile(_) | ApiError::PriorityConflict(_))
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::UnsupportedFormat(_) => ApiError::UnsupportedFile(err.to_string()),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 SortError 转换
// ==========================================
impl From<SortError> for ApiError {
    fn from(err: SortError) -> Self {
        match err {
            SortError::AlreadyInProgress => ApiError::SortInProgress,
            SortError::Remote(RankingServiceError::Config(e)) => ApiError::ConfigError(e.to_string()),
            other => ApiError::SortFailed(other.to_string()),
        }
    }
}

impl From<PriorityError> for ApiError {
    fn from(err: PriorityError) -> Self {
        ApiError::PriorityConflict(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<RankingServiceError> for ApiError {
    fn from(err: RankingServiceError) -> Self {
        match err {
            RankingServiceError::Config(e) => e.into(),
            other => ApiError::SortFailed(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
