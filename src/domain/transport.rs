// ==========================================
// 应募者ランキング - 排序服务传输模型
// ==========================================
// 职责: 规范记录 ⇄ 排序服务字段名（一一对应的重命名）
// 格式: JSON, camelCase 字段名；缺失字段不输出
// ==========================================

use crate::domain::candidate::{or_not_applicable, CandidateRecord};
use crate::domain::types::{FieldValue, SortKey};
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// TransportRecord - 传输记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRecord {
    /// 序号；服务端可能回传字符串或浮点数，回写时按新顺序重新编号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_affiliation: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese_level: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jlpt: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_level: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_location: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<FieldValue>,
}

impl From<&CandidateRecord> for TransportRecord {
    fn from(record: &CandidateRecord) -> Self {
        TransportRecord {
            no: Some(FieldValue::from(i64::from(record.no))),
            id: record.id.clone(),
            age: record.age.clone(),
            birthday: record.birthday.clone(),
            current_affiliation: record.current_affiliation.clone(),
            japanese_level: record.japanese_level.clone(),
            jlpt: record.jlpt.clone(),
            english_level: record.english_level.clone(),
            school_location: record.school_location.clone(),
            school_name: record.school_name.clone(),
            faculty: Some(or_not_applicable(Some(record.faculty.clone()))),
            specialization: Some(or_not_applicable(Some(record.specialization.clone()))),
        }
    }
}

impl From<TransportRecord> for CandidateRecord {
    fn from(record: TransportRecord) -> Self {
        CandidateRecord {
            no: sequence_number(record.no.as_ref()),
            id: record.id,
            age: record.age,
            birthday: record.birthday,
            current_affiliation: record.current_affiliation,
            japanese_level: record.japanese_level,
            jlpt: record.jlpt,
            english_level: record.english_level,
            school_location: record.school_location,
            school_name: record.school_name,
            faculty: or_not_applicable(record.faculty),
            specialization: or_not_applicable(record.specialization),
        }
    }
}

/// 传输序号 → 规范序号（无法识别时为 0）
fn sequence_number(value: Option<&FieldValue>) -> u32 {
    match value {
        Some(FieldValue::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Some(FieldValue::Text(s)) => s.trim().parse::<f64>().map_or(0, |f| {
            if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
                f as u32
            } else {
                0
            }
        }),
        None => 0,
    }
}

// ==========================================
// 排序服务请求/响应
// ==========================================

/// 排序请求: 全部候选人 + 优先级列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    pub candidates: Vec<TransportRecord>,
    pub priorities: Vec<SortKey>,
}

/// 排序响应
///
/// priorities 为服务端回显，可缺省，核心流程不使用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    pub candidates: Vec<TransportRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub priorities: Vec<String>,
}

/// 回显字段为 null 时按空列表处理
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
