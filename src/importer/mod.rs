// ==========================================
// 应募者ランキング - 导入层
// ==========================================
// 职责: 外部文件导入,生成规范记录
// 支持: CSV, Excel (xlsx / xls)
// ==========================================

// 模块声明
pub mod candidate_importer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use candidate_importer::{CandidateImporter, ImportedCandidates};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
