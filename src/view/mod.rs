// ==========================================
// 应募者ランキング - 视图层
// ==========================================
// 职责: 表格视图模型（分页）；不含渲染
// ==========================================

pub mod table_view;

pub use table_view::{PageView, TableViewModel, PAGE_SIZE};
