// ==========================================
// 应募者ランキング - API 层
// ==========================================
// 职责: 提供导入、浏览、排序接口,供界面或命令行调用
// ==========================================

pub mod candidate_api;
pub mod error;

// 重导出核心类型
pub use candidate_api::{CandidateApi, LoadSummary};
pub use error::{ApiError, ApiResult};
