// ==========================================
// 应募者ランキング - 运行配置
// ==========================================
// 职责: 排序服务地址等配置的加载与覆写
// 优先级(低→高): 内置默认 → TOML 文件 → 环境变量 → 命令行参数
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 排序服务默认路径
pub const DEFAULT_ENDPOINT_PATH: &str = "/candidate-file-processor";

/// 环境变量: 排序服务基础地址
pub const ENV_API_BASE_URL: &str = "CANDIDATE_RANKER_API_BASE_URL";

/// 环境变量: 配置文件路径
pub const ENV_CONFIG_PATH: &str = "CANDIDATE_RANKER_CONFIG";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败: {0}")]
    ReadError(String),

    #[error("配置文件格式错误: {0}")]
    ParseError(String),

    #[error("未配置排序服务地址（配置文件 ranking_service.base_url 或环境变量 CANDIDATE_RANKER_API_BASE_URL）")]
    MissingBaseUrl,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

// ==========================================
// RankerConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub ranking_service: RankingServiceConfig,
}

// ==========================================
// RankingServiceConfig - 排序服务配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingServiceConfig {
    /// 基础地址，例如 https://ranker.example.com
    pub base_url: Option<String>,
    /// 接口路径
    pub endpoint_path: String,
}

impl Default for RankingServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
        }
    }
}

impl RankingServiceConfig {
    /// 拼接完整接口地址
    pub fn endpoint_url(&self) -> Result<String, ConfigError> {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        let path = self.endpoint_path.trim();
        let path = path.strip_prefix('/').unwrap_or(path);
        Ok(format!("{}/{}", base.trim_end_matches('/'), path))
    }
}

impl RankerConfig {
    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 从 TOML 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// 默认配置文件路径: 用户配置目录/candidate-ranker/config.toml
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("candidate-ranker").join("config.toml"))
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行显式指定的配置文件（必须存在）
    ///
    /// # 逻辑
    /// 1. 显式路径 > 环境变量 CANDIDATE_RANKER_CONFIG > 默认路径（存在时才读取）
    /// 2. 叠加环境变量覆写
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var(ENV_CONFIG_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let mut config = match explicit_path.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                info!(config_path = %path.display(), "加载配置文件");
                Self::from_file(&path)?
            }
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => {
                    info!(config_path = %path.display(), "加载默认配置文件");
                    Self::from_file(&path)?
                }
                None => {
                    debug!("未找到配置文件，使用内置默认值");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 叠加环境变量覆写（lookup 便于测试注入）
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.ranking_service.base_url = Some(trimmed.to_string());
            }
        }
    }

    /// 命令行覆写排序服务地址
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.ranking_service.base_url = Some(url);
        }
        self
    }
}
