// ==========================================
// 应募者ランキング - 候选人领域模型
// ==========================================
// 职责: 规范字段集合 + 规范记录 (CandidateRecord)
// 说明: 表头使用日文源列名，与上传文件列名一致
// ==========================================

use crate::domain::types::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 学部/研究分野缺失时的占位值
pub const NOT_APPLICABLE: &str = "N/A";

// ==========================================
// CandidateField - 规范字段
// ==========================================
// 顺序即表格列顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateField {
    No,
    Id,
    Age,
    Birthday,
    CurrentAffiliation,
    JapaneseLevel,
    Jlpt,
    EnglishLevel,
    SchoolLocation,
    SchoolName,
    Faculty,
    Specialization,
}

impl CandidateField {
    pub const ALL: [CandidateField; 12] = [
        CandidateField::No,
        CandidateField::Id,
        CandidateField::Age,
        CandidateField::Birthday,
        CandidateField::CurrentAffiliation,
        CandidateField::JapaneseLevel,
        CandidateField::Jlpt,
        CandidateField::EnglishLevel,
        CandidateField::SchoolLocation,
        CandidateField::SchoolName,
        CandidateField::Faculty,
        CandidateField::Specialization,
    ];

    /// Excel 导入时必须非空的字段
    pub const REQUIRED_IN_SPREADSHEET: [CandidateField; 5] = [
        CandidateField::Age,
        CandidateField::CurrentAffiliation,
        CandidateField::JapaneseLevel,
        CandidateField::Jlpt,
        CandidateField::SchoolName,
    ];

    /// 表头（同时也是源文件列名）
    pub fn header(&self) -> &'static str {
        match self {
            CandidateField::No => "No",
            CandidateField::Id => "ID",
            CandidateField::Age => "年齢",
            CandidateField::Birthday => "誕生日",
            CandidateField::CurrentAffiliation => "現在の所属",
            CandidateField::JapaneseLevel => "日本語レベル",
            CandidateField::Jlpt => "能力試験JLPT",
            CandidateField::EnglishLevel => "英語レベル",
            CandidateField::SchoolLocation => "学校所在国",
            CandidateField::SchoolName => "学校名",
            CandidateField::Faculty => "学部・学科・専攻",
            CandidateField::Specialization => "研究・専門分野",
        }
    }

    /// 排序服务中的字段名
    pub fn transport_name(&self) -> &'static str {
        match self {
            CandidateField::No => "no",
            CandidateField::Id => "id",
            CandidateField::Age => "age",
            CandidateField::Birthday => "birthday",
            CandidateField::CurrentAffiliation => "currentAffiliation",
            CandidateField::JapaneseLevel => "japaneseLevel",
            CandidateField::Jlpt => "jlpt",
            CandidateField::EnglishLevel => "englishLevel",
            CandidateField::SchoolLocation => "schoolLocation",
            CandidateField::SchoolName => "schoolName",
            CandidateField::Faculty => "faculty",
            CandidateField::Specialization => "specialization",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

// ==========================================
// CandidateRecord - 规范记录
// ==========================================
// 用途: 表格视图持有的唯一数据形态，与来源格式无关
// 红线: no 是当前显示顺序的 1 起连续序号，不是稳定标识
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub no: u32,                                   // 序号
    pub id: Option<FieldValue>,                    // ID
    pub age: Option<FieldValue>,                   // 年齢
    pub birthday: Option<FieldValue>,              // 誕生日
    pub current_affiliation: Option<FieldValue>,   // 現在の所属
    pub japanese_level: Option<FieldValue>,        // 日本語レベル
    pub jlpt: Option<FieldValue>,                  // 能力試験JLPT
    pub english_level: Option<FieldValue>,         // 英語レベル
    pub school_location: Option<FieldValue>,       // 学校所在国
    pub school_name: Option<FieldValue>,           // 学校名
    pub faculty: FieldValue,                       // 学部・学科・専攻（缺省 N/A）
    pub specialization: FieldValue,                // 研究・専門分野（缺省 N/A）
}

impl CandidateRecord {
    /// 按字段取值（序号转为数字值）
    pub fn value(&self, field: CandidateField) -> Option<FieldValue> {
        match field {
            CandidateField::No => Some(FieldValue::from(i64::from(self.no))),
            CandidateField::Id => self.id.clone(),
            CandidateField::Age => self.age.clone(),
            CandidateField::Birthday => self.birthday.clone(),
            CandidateField::CurrentAffiliation => self.current_affiliation.clone(),
            CandidateField::JapaneseLevel => self.japanese_level.clone(),
            CandidateField::Jlpt => self.jlpt.clone(),
            CandidateField::EnglishLevel => self.english_level.clone(),
            CandidateField::SchoolLocation => self.school_location.clone(),
            CandidateField::SchoolName => self.school_name.clone(),
            CandidateField::Faculty => Some(self.faculty.clone()),
            CandidateField::Specialization => Some(self.specialization.clone()),
        }
    }

    /// 表格单元格文本（缺失字段显示为空）
    pub fn cell_text(&self, field: CandidateField) -> String {
        self.value(field).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Excel 必填字段是否齐全
    pub fn has_required_fields(&self) -> bool {
        CandidateField::REQUIRED_IN_SPREADSHEET
            .iter()
            .all(|f| self.value(*f).map(|v| !v.is_blank()).unwrap_or(false))
    }
}

/// 学部/研究分野缺省替换：缺失或空值 → N/A
pub fn or_not_applicable(value: Option<FieldValue>) -> FieldValue {
    match value {
        Some(v) if !v.is_blank() => v,
        _ => FieldValue::from(NOT_APPLICABLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_unique_and_ordered() {
        let headers: Vec<&str> = CandidateField::ALL.iter().map(|f| f.header()).collect();
        assert_eq!(headers.first(), Some(&"No"));
        assert_eq!(headers.last(), Some(&"研究・専門分野"));

        let mut dedup = headers.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), headers.len());
    }

    #[test]
    fn test_or_not_applicable() {
        assert_eq!(or_not_applicable(None), FieldValue::from("N/A"));
        assert_eq!(or_not_applicable(Some(FieldValue::from(""))), FieldValue::from("N/A"));
        assert_eq!(
            or_not_applicable(Some(FieldValue::from("情報工学"))),
            FieldValue::from("情報工学")
        );
    }
}
