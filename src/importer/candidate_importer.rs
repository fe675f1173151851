// ==========================================
// 应募者ランキング - 候选人导入器
// ==========================================
// 职责: 整合导入流程
// 流程: 扩展名识别 → 读取 → 解析（后台线程）→ 规范化
// ==========================================

use crate::domain::candidate::CandidateRecord;
use crate::domain::types::SourceKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use std::path::Path;
use tracing::{debug, info, instrument};

/// 导入结果
#[derive(Debug, Clone)]
pub struct ImportedCandidates {
    /// 来源类型
    pub source_kind: SourceKind,
    /// 解析得到的原始行数
    pub raw_rows: usize,
    /// 规范化后的记录（已过滤、已编号）
    pub records: Vec<CandidateRecord>,
}

impl ImportedCandidates {
    /// 被过滤掉的行数（仅 Excel 来源可能非 0）
    pub fn dropped_rows(&self) -> usize {
        self.raw_rows.saturating_sub(self.records.len())
    }
}

pub struct CandidateImporter {
    file_parser: UniversalFileParser,
    field_mapper: FieldMapper,
}

impl Default for CandidateImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateImporter {
    pub fn new() -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper: FieldMapper,
        }
    }

    /// 从文件路径导入
    ///
    /// 扩展名不受支持时不读取文件，直接返回 UnsupportedFormat
    #[instrument(skip(self, file_path))]
    pub async fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportedCandidates> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "开始导入候选人数据");
        let kind = self.file_parser.detect(path)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
            _ => ImportError::FileReadError(format!("{}: {}", path.display(), e)),
        })?;
        debug!(bytes = bytes.len(), "文件读取完成");

        self.import_bytes(kind, bytes).await
    }

    /// 从上传的文件名 + 内容导入
    pub async fn import_named(&self, file_name: &str, bytes: Vec<u8>) -> ImportResult<ImportedCandidates> {
        let kind = self.file_parser.detect(file_name)?;
        self.import_bytes(kind, bytes).await
    }

    /// 解析并规范化已知来源类型的内容
    ///
    /// 解析在阻塞线程池执行，调用方任务在此处让出
    pub async fn import_bytes(&self, kind: SourceKind, bytes: Vec<u8>) -> ImportResult<ImportedCandidates> {
        let parser = self.file_parser.parser_for(kind);
        debug!(parser = %parser.source_kind(), bytes = bytes.len(), "开始解析");

        let rows = tokio::task::spawn_blocking(move || parser.parse_bytes(&bytes)).await??;

        let records = self.field_mapper.normalize(kind, &rows);

        let imported = ImportedCandidates {
            source_kind: kind,
            raw_rows: rows.len(),
            records,
        };

        info!(
            source = %kind,
            raw_rows = imported.raw_rows,
            kept = imported.records.len(),
            dropped = imported.dropped_rows(),
            "候选人数据导入完成"
        );

        Ok(imported)
    }
}
