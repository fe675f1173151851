// ==========================================
// 应募者ランキング - 字段映射器（规范化）
// ==========================================
// 职责: 源列名 → 规范记录；Excel 来源剔除不完整行
// 性质: 纯函数，无 I/O，不修改输入
// ==========================================

use crate::domain::candidate::{or_not_applicable, CandidateField, CandidateRecord};
use crate::domain::types::{FieldValue, SourceKind};
use crate::importer::file_parser::RawRow;

pub struct FieldMapper;

impl FieldMapper {
    /// 规范化一批原始行
    ///
    /// # 参数
    /// - kind: 来源类型（决定过滤策略）
    /// - rows: 解析器输出的原始行（文件顺序）
    ///
    /// # 返回
    /// - 规范记录；序号为过滤后的 1 起位置（被剔除的行不留空号）
    pub fn normalize(&self, kind: SourceKind, rows: &[RawRow]) -> Vec<CandidateRecord> {
        rows.iter()
            .filter(|row| !kind.drops_incomplete_rows() || self.has_required_fields(row))
            .enumerate()
            .map(|(idx, row)| self.map_row(row, idx as u32 + 1))
            .collect()
    }

    /// 将单行原始记录映射为规范记录
    pub fn map_row(&self, row: &RawRow, no: u32) -> CandidateRecord {
        CandidateRecord {
            no,
            id: self.get_value(row, CandidateField::Id),
            age: self.get_value(row, CandidateField::Age),
            birthday: self.get_value(row, CandidateField::Birthday),
            current_affiliation: self.get_value(row, CandidateField::CurrentAffiliation),
            japanese_level: self.get_value(row, CandidateField::JapaneseLevel),
            jlpt: self.get_value(row, CandidateField::Jlpt),
            english_level: self.get_value(row, CandidateField::EnglishLevel),
            school_location: self.get_value(row, CandidateField::SchoolLocation),
            school_name: self.get_value(row, CandidateField::SchoolName),
            faculty: or_not_applicable(self.get_value(row, CandidateField::Faculty)),
            specialization: or_not_applicable(self.get_value(row, CandidateField::Specialization)),
        }
    }

    /// Excel 必填字段（年齢/現在の所属/日本語レベル/能力試験JLPT/学校名）是否全部非空
    pub fn has_required_fields(&self, row: &RawRow) -> bool {
        CandidateField::REQUIRED_IN_SPREADSHEET.iter().all(|field| {
            self.get_value(row, *field)
                .map(|v| !v.is_blank())
                .unwrap_or(false)
        })
    }

    /// 按规范字段的源列名取值（键不存在返回 None）
    fn get_value(&self, row: &RawRow, field: CandidateField) -> Option<FieldValue> {
        row.get(field.header()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
            .collect()
    }

    fn complete_row(id: &str) -> RawRow {
        row(&[
            ("ID", id),
            ("年齢", "24"),
            ("現在の所属", "大学4年"),
            ("日本語レベル", "ビジネス"),
            ("能力試験JLPT", "N1"),
            ("学校名", "ハノイ工科大学"),
        ])
    }

    #[test]
    fn test_field_mapper_basic() {
        let mut raw = complete_row("C-001");
        raw.insert("学部・学科・専攻".to_string(), FieldValue::from("情報工学"));
        raw.insert("不要な列".to_string(), FieldValue::from("x"));

        let record = FieldMapper.map_row(&raw, 7);

        assert_eq!(record.no, 7);
        assert_eq!(record.id, Some(FieldValue::from("C-001")));
        assert_eq!(record.jlpt, Some(FieldValue::from("N1")));
        assert_eq!(record.faculty, FieldValue::from("情報工学"));
        assert_eq!(record.specialization, FieldValue::from("N/A"));
        assert_eq!(record.english_level, None);
    }

    #[test]
    fn test_csv_keeps_incomplete_rows() {
        let rows = vec![complete_row("C-001"), row(&[("ID", "C-002")]), complete_row("C-003")];

        let records = FieldMapper.normalize(SourceKind::DelimitedText, &rows);

        assert_eq!(records.len(), 3);
        let numbers: Vec<u32> = records.iter().map(|r| r.no).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(records[1].age, None);
    }

    #[test]
    fn test_spreadsheet_drops_incomplete_rows_and_closes_gaps() {
        let mut missing_school = complete_row("C-002");
        missing_school.insert("学校名".to_string(), FieldValue::from(""));
        let rows = vec![complete_row("C-001"), missing_school, complete_row("C-003")];

        let records = FieldMapper.normalize(SourceKind::Spreadsheet, &rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].no, 1);
        assert_eq!(records[1].no, 2);
        assert_eq!(records[1].id, Some(FieldValue::from("C-003")));
        assert!(records.iter().all(CandidateRecord::has_required_fields));
    }

    #[test]
    fn test_required_fields_accept_numbers() {
        let mut raw = complete_row("C-001");
        raw.insert("年齢".to_string(), FieldValue::from(24));

        assert!(FieldMapper.has_required_fields(&raw));

        raw.remove("日本語レベル");
        assert!(!FieldMapper.has_required_fields(&raw));
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(FieldMapper.normalize(SourceKind::Spreadsheet, &[]).is_empty());
    }
}
