// ==========================================
// 应募者ランキング - 排序层
// ==========================================
// 职责: 优先级选择、远程排序服务调用、排序结果回写
// ==========================================

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod priority;

pub use client::{HttpRankingService, RankingService};
pub use error::{PriorityError, RankingServiceError, SortError};
pub use orchestrator::{build_request, reintegrate, SortOrchestrator, SortOutcome};
pub use priority::{PriorityList, PrioritySelector};
