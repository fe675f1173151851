// ==========================================
// 应募者ランキング - 核心库
// ==========================================
// 流程: 文件导入 → 规范化 → 分页表格 → 远程优先级排序
// 技术栈: Rust + tokio + reqwest
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 导入层 - CSV / Excel
pub mod importer;

// 视图层 - 分页表格
pub mod view;

// 排序层 - 优先级与远程排序
pub mod ranking;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FieldValue, SortKey, SourceKind};

// 领域实体
pub use domain::{CandidateField, CandidateRecord, TransportRecord};

// 导入
pub use importer::{CandidateImporter, ImportError, ImportedCandidates};

// 视图
pub use view::{PageView, TableViewModel, PAGE_SIZE};

// 排序
pub use ranking::{
    HttpRankingService, PriorityList, PrioritySelector, RankingService, SortError,
    SortOrchestrator,
};

// 配置
pub use config::RankerConfig;

// API
pub use api::{ApiError, CandidateApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "応募者ランキング";
