// ==========================================
// 应募者ランキング - 远程排序服务客户端
// ==========================================
// 协议: POST {base_url}/candidate-file-processor, JSON 请求/响应
// 说明: 排序算法由远程服务负责，本地只负责收发
// ==========================================

use crate::config::RankingServiceConfig;
use crate::domain::transport::{RankingRequest, RankingResponse};
use crate::ranking::error::RankingServiceError;
use async_trait::async_trait;
use tracing::{debug, error};

// ==========================================
// RankingService Trait
// ==========================================
// 实现者: HttpRankingService（测试中可替换为内存实现）
#[async_trait]
pub trait RankingService: Send + Sync {
    /// 提交一次排序请求，单次完成（成功或失败）
    async fn rank(&self, request: &RankingRequest) -> Result<RankingResponse, RankingServiceError>;
}

// ==========================================
// HttpRankingService - HTTP 实现
// ==========================================
#[derive(Debug, Clone)]
pub struct HttpRankingService {
    http_client: reqwest::Client,
    endpoint_url: String,
}

impl HttpRankingService {
    /// 根据配置创建客户端
    ///
    /// 不设置超时：远程调用视为最终必然返回一次
    pub fn new(config: &RankingServiceConfig) -> Result<Self, RankingServiceError> {
        let endpoint_url = config.endpoint_url()?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| RankingServiceError::Transport(format!("HTTP 客户端创建失败: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint_url,
        })
    }

    /// 使用外部构建的 HTTP 客户端（代理、TLS 等由调用方决定）
    pub fn with_client(
        http_client: reqwest::Client,
        config: &RankingServiceConfig,
    ) -> Result<Self, RankingServiceError> {
        Ok(Self {
            http_client,
            endpoint_url: config.endpoint_url()?,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl RankingService for HttpRankingService {
    async fn rank(&self, request: &RankingRequest) -> Result<RankingResponse, RankingServiceError> {
        debug!(
            endpoint = %self.endpoint_url,
            candidates = request.candidates.len(),
            priorities = ?request.priorities,
            "发送排序请求"
        );

        let response = self
            .http_client
            .post(&self.endpoint_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "排序服务请求失败");
                RankingServiceError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "排序服务返回非成功状态");
            return Err(RankingServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.json::<RankingResponse>().await.map_err(|e| {
            error!(error = %e, "排序服务响应解析失败");
            RankingServiceError::Decode(e.to_string())
        })?;

        debug!(candidates = payload.candidates.len(), "收到排序响应");
        Ok(payload)
    }
}
