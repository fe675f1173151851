// ==========================================
// 应募者ランキング - 配置层
// ==========================================
// 职责: 运行配置加载,支持文件/环境变量/命令行多级覆写
// ==========================================

pub mod ranker_config;

// 重导出核心配置
pub use ranker_config::{
    ConfigError, RankerConfig, RankingServiceConfig, DEFAULT_ENDPOINT_PATH, ENV_API_BASE_URL,
    ENV_CONFIG_PATH,
};
