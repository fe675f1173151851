// ==========================================
// 应募者ランキング - 领域类型定义
// ==========================================
// 职责: 标量字段值、数据来源类型、排序键
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 字段值 (Field Value)
// ==========================================
// 源文件中的单元格只有两种形态: 文本 或 数字
// 序列化格式: 无标签（JSON 中直接是 string / number）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// 由浮点数构造；整数值的浮点数保存为整数（24.0 → 24）
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            return FieldValue::Number(serde_json::Number::from(value as i64));
        }
        match serde_json::Number::from_f64(value) {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Text(value.to_string()),
        }
    }

    /// 是否为空值（空字符串或纯空白）
    ///
    /// 数字永远不视为空（包括 0）。
    /// 注意: 与旧版前端的真值过滤不同，旧版会剔除数值 0、保留纯空白文本；
    /// 这里反过来，0 是有效值，纯空白文本按缺失处理。
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(serde_json::Number::from(value))
    }
}

// ==========================================
// 数据来源类型 (Source Kind)
// ==========================================
// 由文件扩展名一次性解析；过滤策略挂在来源类型上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    DelimitedText, // CSV
    Spreadsheet,   // xlsx / xls
}

impl SourceKind {
    /// 根据扩展名识别来源类型（大小写不敏感）
    ///
    /// # 返回
    /// - Some(SourceKind): csv / xlsx / xls
    /// - None: 不支持的扩展名
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().to_lowercase().as_str() {
            "csv" => Some(SourceKind::DelimitedText),
            "xlsx" | "xls" => Some(SourceKind::Spreadsheet),
            _ => None,
        }
    }

    /// 是否剔除必填字段缺失的行
    ///
    /// CSV 导入保留全部行；Excel 导入剔除不完整行。
    /// 两条导入路径的验收口径不同，不可合并。
    pub fn drops_incomplete_rows(&self) -> bool {
        matches!(self, SourceKind::Spreadsheet)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::DelimitedText => write!(f, "DELIMITED_TEXT"),
            SourceKind::Spreadsheet => write!(f, "SPREADSHEET"),
        }
    }
}

// ==========================================
// 排序键 (Sort Key)
// ==========================================
// 远程排序服务识别的优先级键；线上格式为规范表头
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "能力試験JLPT")]
    Jlpt,
    #[serde(rename = "学校名")]
    SchoolName,
}

impl SortKey {
    /// 可选排序键（顺序即优先级选择器的选项顺序）
    pub const ALL: [SortKey; 2] = [SortKey::Jlpt, SortKey::SchoolName];

    /// 线上标识（发送给排序服务）
    pub fn wire_id(&self) -> &'static str {
        match self {
            SortKey::Jlpt => "能力試験JLPT",
            SortKey::SchoolName => "学校名",
        }
    }

    /// 选择器显示文案
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Jlpt => "能力試験 JLPT",
            SortKey::SchoolName => "学校名",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_id())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        for key in SortKey::ALL {
            if key.wire_id() == trimmed {
                return Ok(key);
            }
        }
        match trimmed.to_lowercase().as_str() {
            "jlpt" => Ok(SortKey::Jlpt),
            "school-name" | "school_name" | "schoolname" => Ok(SortKey::SchoolName),
            _ => Err(format!("未知的排序键: {}", trimmed)),
        }
    }
}
