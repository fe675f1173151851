// ==========================================
// 应募者ランキング - 排序优先级
// ==========================================
// 职责: 优先级列表（有序、无重复）+ 优先级选择器
// 红线: 传给排序编排器的列表不含重复键、不含空槽位
// ==========================================

use crate::domain::types::SortKey;
use crate::ranking::error::PriorityError;
use serde::Serialize;
use tracing::warn;

// ==========================================
// PriorityList - 优先级列表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PriorityList(Vec<SortKey>);

impl PriorityList {
    /// 构造优先级列表；出现重复键时拒绝
    pub fn new(keys: Vec<SortKey>) -> Result<Self, PriorityError> {
        for (idx, key) in keys.iter().enumerate() {
            if keys[..idx].contains(key) {
                return Err(PriorityError::Duplicate(*key));
            }
        }
        Ok(Self(keys))
    }

    /// 空列表（无优先级的排序请求同样有效）
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<SortKey>> for PriorityList {
    type Error = PriorityError;

    fn try_from(keys: Vec<SortKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

// ==========================================
// PrioritySelector - 优先级选择器
// ==========================================
// 槽位数 = 可选排序键数；每个槽位可为空
#[derive(Debug, Clone)]
pub struct PrioritySelector {
    slots: Vec<Option<SortKey>>,
}

impl Default for PrioritySelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PrioritySelector {
    pub fn new() -> Self {
        Self {
            slots: vec![None; SortKey::ALL.len()],
        }
    }

    /// 按顺序依次选择（用于命令行等非交互入口）
    pub fn from_keys(keys: &[SortKey]) -> Result<Self, PriorityError> {
        let mut selector = Self::new();
        for (index, key) in keys.iter().enumerate() {
            selector.select(index, *key)?;
        }
        Ok(selector)
    }

    /// 可选项
    pub fn options(&self) -> &'static [SortKey] {
        &SortKey::ALL
    }

    pub fn slots(&self) -> &[Option<SortKey>] {
        &self.slots
    }

    /// 为槽位选择排序键
    ///
    /// 该键已被其他槽位选中时拒绝，所有槽位保持不变
    pub fn select(&mut self, index: usize, key: SortKey) -> Result<(), PriorityError> {
        self.check_index(index)?;

        let taken = self
            .slots
            .iter()
            .enumerate()
            .any(|(i, slot)| i != index && *slot == Some(key));
        if taken {
            warn!(slot = index + 1, key = %key, "优先级重复选择，已拒绝");
            return Err(PriorityError::Duplicate(key));
        }

        self.slots[index] = Some(key);
        Ok(())
    }

    /// 清空槽位
    pub fn clear(&mut self, index: usize) -> Result<(), PriorityError> {
        self.check_index(index)?;
        self.slots[index] = None;
        Ok(())
    }

    /// 提交: 去掉空槽位，按槽位顺序生成优先级列表
    pub fn freeze(&self) -> PriorityList {
        PriorityList(self.slots.iter().flatten().copied().collect())
    }

    fn check_index(&self, index: usize) -> Result<(), PriorityError> {
        if index >= self.slots.len() {
            return Err(PriorityError::SlotOutOfRange {
                index,
                slots: self.slots.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_list_rejects_duplicates() {
        let result = PriorityList::new(vec![SortKey::Jlpt, SortKey::Jlpt]);
        assert_eq!(result, Err(PriorityError::Duplicate(SortKey::Jlpt)));

        let list = PriorityList::new(vec![SortKey::SchoolName, SortKey::Jlpt]).unwrap();
        assert_eq!(list.keys(), &[SortKey::SchoolName, SortKey::Jlpt]);
    }

    #[test]
    fn test_selector_rejects_key_taken_by_other_slot() {
        let mut selector = PrioritySelector::new();
        selector.select(0, SortKey::Jlpt).unwrap();

        let result = selector.select(1, SortKey::Jlpt);

        assert_eq!(result, Err(PriorityError::Duplicate(SortKey::Jlpt)));
        assert_eq!(selector.slots(), &[Some(SortKey::Jlpt), None]);
    }

    #[test]
    fn test_selector_reselect_same_slot_and_swap() {
        let mut selector = PrioritySelector::new();
        selector.select(0, SortKey::Jlpt).unwrap();
        selector.select(0, SortKey::Jlpt).unwrap();

        selector.select(0, SortKey::SchoolName).unwrap();
        selector.select(1, SortKey::Jlpt).unwrap();

        assert_eq!(
            selector.freeze().keys(),
            &[SortKey::SchoolName, SortKey::Jlpt]
        );
    }

    #[test]
    fn test_freeze_drops_blank_slots() {
        let mut selector = PrioritySelector::new();
        selector.select(1, SortKey::SchoolName).unwrap();

        let list = selector.freeze();
        assert_eq!(list.keys(), &[SortKey::SchoolName]);

        selector.clear(1).unwrap();
        assert!(selector.freeze().is_empty());
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut selector = PrioritySelector::new();
        assert_eq!(
            selector.select(2, SortKey::Jlpt),
            Err(PriorityError::SlotOutOfRange { index: 2, slots: 2 })
        );
    }

    #[test]
    fn test_from_keys() {
        let selector = PrioritySelector::from_keys(&[SortKey::Jlpt]).unwrap();
        assert_eq!(selector.freeze().keys(), &[SortKey::Jlpt]);

        let result = PrioritySelector::from_keys(&[SortKey::Jlpt, SortKey::Jlpt]);
        assert!(matches!(result, Err(PriorityError::Duplicate(SortKey::Jlpt))));
    }
}
