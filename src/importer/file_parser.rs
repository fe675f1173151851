// ==========================================
// 应募者ランキング - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: CSV (.csv) / Excel (.xlsx/.xls)
// ==========================================

use crate::domain::types::{FieldValue, SourceKind};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// 原始行记录: 源列名 → 单元格值
pub type RawRow = HashMap<String, FieldValue>;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析器对应的来源类型
    fn source_kind(&self) -> SourceKind;

    /// 解析文件内容为原始行记录（保持文件中的行顺序）
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
// - UTF-8 解码（非法字节替换，不报错）
// - 首行为表头，空行跳过
// - 行尾缺失的字段不出现在 RawRow 中；多余字段忽略
pub struct CsvParser;

impl FileParser for CsvParser {
    fn source_kind(&self) -> SourceKind {
        SourceKind::DelimitedText
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let text = String::from_utf8_lossy(bytes);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;

            // 跳过空行
            if record.len() == 1 && record.get(0).map(str::is_empty).unwrap_or(true) {
                continue;
            }

            let mut row = RawRow::new();
            for (col_idx, value) in record.iter().enumerate() {
                match headers.get(col_idx) {
                    Some(header) if !header.is_empty() => {
                        row.insert(header.clone(), FieldValue::from(value));
                    }
                    _ => {}
                }
            }
            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// - 只读取第一个工作表（按位置，不按名称）
// - 缺失单元格填充空字符串（键存在）
// - 完全空白的行跳过
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Spreadsheet
    }

    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))??;

        // 提取表头（第一行）；空表返回空结果
        let mut rows = range.rows();
        let header_row = match rows.next() {
            Some(row) => row,
            None => return Ok(Vec::new()),
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_value(cell).to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row = RawRow::new();
            for (col_idx, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = data_row
                    .get(col_idx)
                    .map(cell_value)
                    .unwrap_or_else(|| FieldValue::from(""));
                row.insert(header.clone(), value);
            }

            // 跳过完全空白的行
            if row.values().all(FieldValue::is_blank) {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

/// 单元格 → 字段值（数字与日期保持数值，其余转文本）
fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty => FieldValue::from(""),
        Data::String(s) => FieldValue::from(s.as_str()),
        Data::Int(i) => FieldValue::from(*i),
        Data::Float(f) => FieldValue::from_f64(*f),
        Data::Bool(b) => FieldValue::from(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => FieldValue::from(s.as_str()),
        // 日期保留 Excel 序列值（数值），与其他数值单元格一致
        Data::DateTime(dt) => FieldValue::from_f64(dt.as_f64()),
        Data::Error(_) => FieldValue::from(cell.to_string()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 根据文件名识别来源类型
    pub fn detect<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<SourceKind> {
        let ext = file_path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        SourceKind::from_extension(&ext).ok_or(ImportError::UnsupportedFormat(ext))
    }

    /// 获取来源类型对应的解析器
    pub fn parser_for(&self, kind: SourceKind) -> Box<dyn FileParser> {
        match kind {
            SourceKind::DelimitedText => Box::new(CsvParser),
            SourceKind::Spreadsheet => Box::new(ExcelParser),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_csv_parser_valid_content() {
        let content = "ID,年齢,学校名\nC-001,24,東京大学\nC-002,27,京都大学\n";

        let records = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ID"), Some(&FieldValue::from("C-001")));
        assert_eq!(records[1].get("学校名"), Some(&FieldValue::from("京都大学")));
    }

    #[test]
    fn test_csv_parser_skip_empty_lines() {
        let content = "ID,年齢\nC-001,24\n\n\nC-002,27\n";

        let records = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_parser_missing_trailing_fields_are_absent() {
        let content = "ID,年齢,学校名\nC-001,24\n";

        let records = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("年齢"), Some(&FieldValue::from("24")));
        assert!(!records[0].contains_key("学校名"));
    }

    #[test]
    fn test_csv_parser_header_only() {
        let records = CsvParser.parse_bytes("ID,年齢\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_csv_parser_invalid_utf8_is_replaced() {
        let mut content = b"ID,name\nC-001,".to_vec();
        content.extend_from_slice(&[0xff, 0xfe]);
        content.push(b'\n');

        let records = CsvParser.parse_bytes(&content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("ID"), Some(&FieldValue::from("C-001")));
    }

    #[test]
    fn test_excel_parser_corrupt_content() {
        let result = ExcelParser.parse_bytes(b"this is not a workbook");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_excel_date_cell_keeps_serial_number() {
        let cell = Data::DateTime(ExcelDateTime::new(36526.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_value(&cell), FieldValue::from(36526));

        let cell = Data::DateTime(ExcelDateTime::new(36526.5, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_value(&cell), FieldValue::from_f64(36526.5));
    }

    #[test]
    fn test_cell_value_scalars() {
        assert_eq!(cell_value(&Data::Empty), FieldValue::from(""));
        assert_eq!(cell_value(&Data::Float(24.0)), FieldValue::from(24));
        assert_eq!(cell_value(&Data::Int(7)), FieldValue::from(7));
        assert_eq!(cell_value(&Data::Bool(true)), FieldValue::from("true"));
    }

    #[test]
    fn test_universal_parser_detect() {
        assert_eq!(
            UniversalFileParser.detect("applicants.CSV").unwrap(),
            SourceKind::DelimitedText
        );
        assert_eq!(
            UniversalFileParser.detect("applicants.xls").unwrap(),
            SourceKind::Spreadsheet
        );
        match UniversalFileParser.detect("candidates.pdf") {
            Err(ImportError::UnsupportedFormat(ext)) => assert_eq!(ext, "pdf"),
            other => panic!("期望 UnsupportedFormat, 实际 {:?}", other),
        }
        assert!(matches!(
            UniversalFileParser.detect("applicants"),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parser_for_source_kind() {
        for kind in [SourceKind::DelimitedText, SourceKind::Spreadsheet] {
            assert_eq!(UniversalFileParser.parser_for(kind).source_kind(), kind);
        }
    }
}
