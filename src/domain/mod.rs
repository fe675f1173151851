// ==========================================
// 应募者ランキング - 领域模型层
// ==========================================
// 职责: 定义规范记录、传输记录、基础类型
// 红线: 不含 I/O, 不含远程调用
// ==========================================

pub mod candidate;
pub mod transport;
pub mod types;

// 重导出核心类型
pub use candidate::{CandidateField, CandidateRecord, NOT_APPLICABLE};
pub use transport::{RankingRequest, RankingResponse, TransportRecord};
pub use types::{FieldValue, SortKey, SourceKind};
