// ==========================================
// 应募者ランキング - 排序编排器
// ==========================================
// 流程: 规范记录 → 传输记录 → 远程排序 → 传输记录 → 规范记录 → 回写视图
// 红线:
// - 记录数在排序前后不变；响应条数不一致视为协议错误，不截断、不补齐
// - 失败时视图的记录与页码保持不变
// - 同一时刻只允许一个排序请求在途
// ==========================================

use crate::domain::candidate::CandidateRecord;
use crate::domain::transport::{RankingRequest, RankingResponse, TransportRecord};
use crate::domain::types::SortKey;
use crate::ranking::client::RankingService;
use crate::ranking::error::SortError;
use crate::ranking::priority::PriorityList;
use crate::view::TableViewModel;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// 一次成功排序的摘要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOutcome {
    pub request_id: Uuid,
    pub record_count: usize,
    pub priorities: Vec<SortKey>,
}

pub struct SortOrchestrator<S: RankingService> {
    service: S,
    in_flight: AtomicBool,
}

/// 在途标记；离开作用域（完成、失败或 future 被丢弃）时释放
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<S: RankingService> SortOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// 是否有排序请求在途
    pub fn is_sorting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 按优先级请求远程排序，并将结果写回视图（页码重置为 1）
    ///
    /// # 返回
    /// - Ok(SortOutcome): 视图已替换为新顺序
    /// - Err(SortError): 视图未做任何修改
    pub async fn sort(
        &self,
        view: &mut TableViewModel,
        priorities: &PriorityList,
    ) -> Result<SortOutcome, SortError> {
        let _guard = self.begin()?;

        let request_id = Uuid::new_v4();
        let span = info_span!("candidate_sort", %request_id);

        async {
            let request = build_request(view.records(), priorities);
            let expected = request.candidates.len();
            info!(
                candidates = expected,
                priorities = ?priorities.keys(),
                "开始远程排序"
            );

            let response = self.service.rank(&request).await.map_err(|e| {
                error!(error = %e, "远程排序失败，保留当前记录");
                SortError::from(e)
            })?;

            let records = reintegrate(expected, response)?;
            view.set_records(records);

            info!(candidates = expected, "排序结果已回写，返回第 1 页");
            Ok(SortOutcome {
                request_id,
                record_count: expected,
                priorities: priorities.keys().to_vec(),
            })
        }
        .instrument(span)
        .await
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, SortError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("已有排序请求进行中，拒绝新的排序请求");
            return Err(SortError::AlreadyInProgress);
        }
        Ok(InFlightGuard {
            flag: &self.in_flight,
        })
    }
}

/// 构造排序请求（规范记录 → 传输记录）
pub fn build_request(records: &[CandidateRecord], priorities: &PriorityList) -> RankingRequest {
    RankingRequest {
        candidates: records.iter().map(TransportRecord::from).collect(),
        priorities: priorities.keys().to_vec(),
    }
}

/// 解析排序响应（传输记录 → 规范记录），按新顺序重新编号
pub fn reintegrate(
    expected: usize,
    response: RankingResponse,
) -> Result<Vec<CandidateRecord>, SortError> {
    let actual = response.candidates.len();
    if actual != expected {
        error!(expected, actual, "排序响应记录数与请求不一致");
        return Err(SortError::RecordCountMismatch { expected, actual });
    }

    Ok(response
        .candidates
        .into_iter()
        .enumerate()
        .map(|(idx, transport)| {
            let mut record = CandidateRecord::from(transport);
            record.no = idx as u32 + 1;
            record
        })
        .collect())
}
