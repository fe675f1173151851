// ==========================================
// 应募者ランキング - 候选人API
// ==========================================
// 职责: 界面/命令行驱动的唯一入口，持有视图模型与排序编排器
// 约定: 导入或排序失败时，记录集与页码保持不变
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::RankerConfig;
use crate::domain::types::{SortKey, SourceKind};
use crate::importer::{CandidateImporter, ImportError, ImportedCandidates};
use crate::ranking::{
    HttpRankingService, PriorityList, PrioritySelector, RankingService, RankingServiceError,
    SortOrchestrator, SortOutcome,
};
use crate::view::{PageView, TableViewModel};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn};

/// 导入结果摘要
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub source_kind: SourceKind,
    pub loaded: usize,
    pub dropped: usize,
    pub total_pages: usize,
}

/// 候选人API
pub struct CandidateApi<S: RankingService = HttpRankingService> {
    importer: CandidateImporter,
    view: TableViewModel,
    selector: PrioritySelector,
    /// 未配置排序服务时为 None（导入与翻页不受影响）
    sort_orchestrator: Option<SortOrchestrator<S>>,
}

impl CandidateApi<HttpRankingService> {
    /// 根据配置创建（未配置服务地址时排序不可用）
    pub fn from_config(config: &RankerConfig) -> ApiResult<Self> {
        let sort_orchestrator = match HttpRankingService::new(&config.ranking_service) {
            Ok(service) => {
                info!(endpoint = %service.endpoint_url(), "排序服务已配置");
                Some(SortOrchestrator::new(service))
            }
            Err(RankingServiceError::Config(e)) => {
                warn!(reason = %e, "排序服务未配置，排序功能不可用");
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::with_orchestrator(sort_orchestrator))
    }
}

impl<S: RankingService> CandidateApi<S> {
    /// 使用指定的排序服务创建
    pub fn new(service: S) -> Self {
        Self::with_orchestrator(Some(SortOrchestrator::new(service)))
    }

    fn with_orchestrator(sort_orchestrator: Option<SortOrchestrator<S>>) -> Self {
        Self {
            importer: CandidateImporter::new(),
            view: TableViewModel::new(),
            selector: PrioritySelector::new(),
            sort_orchestrator,
        }
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 从文件路径加载
    pub async fn load_file<P: AsRef<Path>>(&mut self, file_path: P) -> ApiResult<LoadSummary> {
        let result = self.importer.import_file(file_path).await;
        self.apply_import(result)
    }

    /// 从文件名 + 内容加载（上传场景）
    pub async fn load_named(&mut self, file_name: &str, bytes: Vec<u8>) -> ApiResult<LoadSummary> {
        let result = self.importer.import_named(file_name, bytes).await;
        self.apply_import(result)
    }

    fn apply_import(
        &mut self,
        result: Result<ImportedCandidates, ImportError>,
    ) -> ApiResult<LoadSummary> {
        let imported = match result {
            Ok(imported) => imported,
            Err(e) if e.is_warning() => {
                warn!(reason = %e, "文件类型不支持，保留当前记录");
                return Err(e.into());
            }
            Err(e) => {
                error!(error = %e, "文件解析失败，保留当前记录");
                return Err(e.into());
            }
        };

        let source_kind = imported.source_kind;
        let dropped = imported.dropped_rows();
        self.view.set_records(imported.records);

        Ok(LoadSummary {
            source_kind,
            loaded: self.view.records().len(),
            dropped,
            total_pages: self.view.total_pages(),
        })
    }

    // ==========================================
    // 浏览
    // ==========================================

    pub fn view(&self) -> &TableViewModel {
        &self.view
    }

    pub fn snapshot(&self) -> PageView {
        self.view.snapshot()
    }

    pub fn next_page(&mut self) -> PageView {
        self.view.next_page();
        self.view.snapshot()
    }

    pub fn prev_page(&mut self) -> PageView {
        self.view.prev_page();
        self.view.snapshot()
    }

    pub fn go_to_page(&mut self, page: usize) -> PageView {
        self.view.go_to_page(page);
        self.view.snapshot()
    }

    // ==========================================
    // 排序优先级
    // ==========================================

    pub fn priority_slots(&self) -> &[Option<SortKey>] {
        self.selector.slots()
    }

    /// 为槽位选择排序键；与其他槽位重复时返回提示，槽位不变
    pub fn select_priority(&mut self, slot: usize, key: SortKey) -> ApiResult<()> {
        Ok(self.selector.select(slot, key)?)
    }

    /// 按顺序整体设置优先级（命令行入口）；有重复时槽位不变
    pub fn set_priorities(&mut self, keys: &[SortKey]) -> ApiResult<()> {
        self.selector = PrioritySelector::from_keys(keys)?;
        Ok(())
    }

    pub fn clear_priority(&mut self, slot: usize) -> ApiResult<()> {
        Ok(self.selector.clear(slot)?)
    }

    // ==========================================
    // 排序
    // ==========================================

    pub fn is_sorting(&self) -> bool {
        self.sort_orchestrator
            .as_ref()
            .is_some_and(SortOrchestrator::is_sorting)
    }

    /// 按当前选择器中的优先级排序
    pub async fn sort_selected(&mut self) -> ApiResult<SortOutcome> {
        let priorities = self.selector.freeze();
        self.sort(&priorities).await
    }

    /// 按给定优先级排序；成功后回到第 1 页
    pub async fn sort(&mut self, priorities: &PriorityList) -> ApiResult<SortOutcome> {
        let orchestrator = self
            .sort_orchestrator
            .as_ref()
            .ok_or_else(|| ApiError::from(crate::config::ConfigError::MissingBaseUrl))?;

        Ok(orchestrator.sort(&mut self.view, priorities).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transport::{RankingRequest, RankingResponse};
    use async_trait::async_trait;

    struct ReversingService;

    #[async_trait]
    impl RankingService for ReversingService {
        async fn rank(&self, request: &RankingRequest) -> Result<RankingResponse, RankingServiceError> {
            let mut candidates = request.candidates.clone();
            candidates.reverse();
            Ok(RankingResponse {
                candidates,
                priorities: Vec::new(),
            })
        }
    }

    struct FailingService;

    #[async_trait]
    impl RankingService for FailingService {
        async fn rank(&self, _request: &RankingRequest) -> Result<RankingResponse, RankingServiceError> {
            Err(RankingServiceError::Transport("connection reset".to_string()))
        }
    }

    fn csv(rows: usize) -> Vec<u8> {
        let mut content = String::from("ID,年齢,能力試験JLPT,学校名\n");
        for i in 1..=rows {
            content.push_str(&format!("C-{:03},{},N{},大学{}\n", i, 20 + i % 10, i % 5 + 1, i));
        }
        content.into_bytes()
    }

    #[tokio::test]
    async fn test_load_named_and_paging() {
        let mut api = CandidateApi::new(ReversingService);

        let summary = api.load_named("list.csv", csv(15)).await.unwrap();
        assert_eq!(summary.loaded, 15);
        assert_eq!(summary.total_pages, 2);

        assert_eq!(api.next_page().current_page, 2);
        assert_eq!(api.next_page().current_page, 2);
        assert_eq!(api.snapshot().rows.len(), 5);
        assert_eq!(api.prev_page().current_page, 1);
    }

    #[tokio::test]
    async fn test_unsupported_file_keeps_records() {
        let mut api = CandidateApi::new(ReversingService);
        api.load_named("list.csv", csv(12)).await.unwrap();
        api.next_page();

        let err = api.load_named("list.pdf", b"%PDF".to_vec()).await.unwrap_err();

        assert!(err.is_warning());
        assert_eq!(api.view().records().len(), 12);
        assert_eq!(api.view().current_page(), 2);
    }

    #[tokio::test]
    async fn test_parse_failure_keeps_records() {
        let mut api = CandidateApi::new(ReversingService);
        api.load_named("list.csv", csv(3)).await.unwrap();

        let err = api
            .load_named("list.xlsx", b"not a workbook".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::ImportError(_)));
        assert_eq!(api.view().records().len(), 3);
    }

    #[tokio::test]
    async fn test_sort_selected() {
        let mut api = CandidateApi::new(ReversingService);
        api.load_named("list.csv", csv(12)).await.unwrap();
        api.next_page();

        api.select_priority(0, SortKey::Jlpt).unwrap();
        let err = api.select_priority(1, SortKey::Jlpt).unwrap_err();
        assert!(err.is_warning());
        assert_eq!(api.priority_slots(), &[Some(SortKey::Jlpt), None]);

        let outcome = api.sort_selected().await.unwrap();

        assert_eq!(outcome.priorities, vec![SortKey::Jlpt]);
        assert_eq!(api.view().current_page(), 1);
        let first = &api.snapshot().rows[0];
        assert_eq!(first.no, 1);
        assert_eq!(first.cell_text(crate::domain::CandidateField::Id), "C-012");
        assert!(!api.is_sorting());
    }

    #[test]
    fn test_set_priorities() {
        let mut api = CandidateApi::new(ReversingService);

        api.set_priorities(&[SortKey::SchoolName, SortKey::Jlpt]).unwrap();
        assert_eq!(
            api.priority_slots(),
            &[Some(SortKey::SchoolName), Some(SortKey::Jlpt)]
        );

        let err = api.set_priorities(&[SortKey::Jlpt, SortKey::Jlpt]).unwrap_err();
        assert!(err.is_warning());
        assert_eq!(
            api.priority_slots(),
            &[Some(SortKey::SchoolName), Some(SortKey::Jlpt)]
        );
    }

    #[tokio::test]
    async fn test_sort_failure_keeps_state() {
        let mut api = CandidateApi::new(FailingService);
        api.load_named("list.csv", csv(12)).await.unwrap();
        api.next_page();
        let before = api.view().records().to_vec();

        let err = api.sort(&PriorityList::empty()).await.unwrap_err();

        assert!(matches!(err, ApiError::SortFailed(_)));
        assert_eq!(api.view().records(), before.as_slice());
        assert_eq!(api.view().current_page(), 2);
    }

    #[tokio::test]
    async fn test_sort_without_service_is_config_error() {
        let mut api = CandidateApi::from_config(&RankerConfig::default()).unwrap();
        api.load_named("list.csv", csv(2)).await.unwrap();

        let err = api.sort(&PriorityList::empty()).await.unwrap_err();

        assert!(matches!(err, ApiError::ConfigError(_)));
        assert_eq!(api.view().records().len(), 2);
    }
}
