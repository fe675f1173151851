// ==========================================
// 应募者ランキング - 排序模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 非成功状态 / 网络失败 / 响应无法解析 对调用方统一表现为"排序失败"
// ==========================================

use crate::config::ConfigError;
use crate::domain::types::SortKey;
use thiserror::Error;

/// 远程排序服务错误
#[derive(Error, Debug)]
pub enum RankingServiceError {
    #[error("排序服务配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("排序服务返回非成功状态: HTTP {status}")]
    Status { status: u16, body: String },

    #[error("排序服务请求失败: {0}")]
    Transport(String),

    #[error("排序服务响应解析失败: {0}")]
    Decode(String),
}

/// 排序编排错误
#[derive(Error, Debug)]
pub enum SortError {
    #[error("已有排序请求进行中，请等待其完成后重试")]
    AlreadyInProgress,

    #[error("排序失败: {0}")]
    Remote(#[from] RankingServiceError),

    #[error("排序失败: 协议错误，请求 {expected} 条记录，响应 {actual} 条")]
    RecordCountMismatch { expected: usize, actual: usize },
}

/// 优先级选择错误（需提示用户）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    #[error("该优先级已被选择: {0}")]
    Duplicate(SortKey),

    #[error("优先级槽位不存在: {index}（共 {slots} 个）")]
    SlotOutOfRange { index: usize, slots: usize },
}
