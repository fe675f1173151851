// ==========================================
// 应募者ランキング - 表格视图模型
// ==========================================
// 职责: 持有当前记录集与表头，计算分页
// 红线: 记录集为空时表头为空、总页数为 0，任何访问都不得 panic
// ==========================================

use crate::domain::candidate::{CandidateField, CandidateRecord};
use serde::Serialize;

/// 每页行数（固定，不对用户开放配置）
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct TableViewModel {
    records: Vec<CandidateRecord>,
    headers: Vec<CandidateField>,
    current_page: usize,
}

/// 当前页快照（供渲染层使用）
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub headers: Vec<&'static str>,
    pub rows: Vec<CandidateRecord>,
}

impl Default for TableViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TableViewModel {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            headers: Vec::new(),
            current_page: 1,
        }
    }

    /// 替换全部记录，重算表头，页码重置为 1
    pub fn set_records(&mut self, records: Vec<CandidateRecord>) {
        // 表头来自首条记录；没有记录时为"无数据"状态
        self.headers = if records.is_empty() {
            Vec::new()
        } else {
            CandidateField::ALL.to_vec()
        };
        self.records = records;
        self.current_page = 1;
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn headers(&self) -> &[CandidateField] {
        &self.headers
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// 总页数 = ceil(记录数 / 10)，无记录时为 0
    pub fn total_pages(&self) -> usize {
        self.records.len().div_ceil(PAGE_SIZE)
    }

    /// 第 n 页的记录切片 [(n-1)*10, n*10)；越界返回空切片
    pub fn page(&self, n: usize) -> &[CandidateRecord] {
        if n == 0 {
            return &[];
        }
        let start = (n - 1).saturating_mul(PAGE_SIZE);
        if start >= self.records.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(self.records.len());
        &self.records[start..end]
    }

    pub fn current_page_records(&self) -> &[CandidateRecord] {
        self.page(self.current_page())
    }

    /// 下一页；已在最后一页时不变
    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    /// 上一页；已在第一页时不变
    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// 跳转到指定页（夹紧到 [1, 总页数]）
    pub fn go_to_page(&mut self, n: usize) {
        self.current_page = n.clamp(1, self.total_pages().max(1));
    }

    pub fn snapshot(&self) -> PageView {
        PageView {
            current_page: self.current_page(),
            total_pages: self.total_pages(),
            total_records: self.records.len(),
            headers: self.headers.iter().map(|h| h.header()).collect(),
            rows: self.current_page_records().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FieldValue;

    fn records(count: usize) -> Vec<CandidateRecord> {
        (1..=count)
            .map(|i| CandidateRecord {
                no: i as u32,
                id: Some(FieldValue::from(format!("C-{:03}", i))),
                age: None,
                birthday: None,
                current_affiliation: None,
                japanese_level: None,
                jlpt: None,
                english_level: None,
                school_location: None,
                school_name: None,
                faculty: FieldValue::from("N/A"),
                specialization: FieldValue::from("N/A"),
            })
            .collect()
    }

    #[test]
    fn test_total_pages() {
        let mut view = TableViewModel::new();
        assert_eq!(view.total_pages(), 0);

        for (size, pages) in [(1, 1), (10, 1), (11, 2), (25, 3), (30, 3)] {
            view.set_records(records(size));
            assert_eq!(view.total_pages(), pages, "size={}", size);
        }
    }

    #[test]
    fn test_page_slices() {
        let mut view = TableViewModel::new();
        view.set_records(records(25));

        assert_eq!(view.page(1).len(), 10);
        assert_eq!(view.page(1)[0].no, 1);
        assert_eq!(view.page(2)[9].no, 20);
        assert_eq!(view.page(3).len(), 5);
        assert_eq!(view.page(3)[0].no, 21);
        assert!(view.page(4).is_empty());
        assert!(view.page(0).is_empty());
    }

    #[test]
    fn test_navigation_boundaries() {
        let mut view = TableViewModel::new();
        view.set_records(records(25));

        view.prev_page();
        assert_eq!(view.current_page(), 1);

        view.next_page();
        view.next_page();
        assert_eq!(view.current_page(), 3);

        view.next_page();
        assert_eq!(view.current_page(), 3);
        assert_eq!(view.current_page_records().len(), 5);

        view.go_to_page(99);
        assert_eq!(view.current_page(), 3);
        view.go_to_page(0);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_set_records_resets_page_and_headers() {
        let mut view = TableViewModel::new();
        view.set_records(records(25));
        view.next_page();
        assert_eq!(view.current_page(), 2);

        view.set_records(records(12));
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.headers().len(), 12);
        assert_eq!(view.headers()[0].header(), "No");
    }

    #[test]
    fn test_empty_state() {
        let mut view = TableViewModel::new();
        view.set_records(records(3));
        view.set_records(Vec::new());

        assert!(view.is_empty());
        assert!(view.headers().is_empty());
        assert_eq!(view.total_pages(), 0);
        assert!(view.current_page_records().is_empty());

        view.next_page();
        view.prev_page();
        assert_eq!(view.current_page(), 1);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.total_pages, 0);
        assert!(snapshot.headers.is_empty());
    }
}
