/// イベントバス接続設定
///
/// プロセス起動時に一度だけ環境変数から読み込む。
use thiserror::Error;

/// 名前空間を指定する環境変数名
pub const EVENT_BUS_NAMESPACE_ENV: &str = "EVENT_BUS_NAMESPACE";

/// イベントバス設定のエラー型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },
}

/// イベントバス設定
///
/// 名前空間はデプロイ単位のSNS ARNプレフィックス
/// （例: `arn:aws:sns:ap-northeast-1:123456789012`）。
/// トピック名はこの名前空間の下でARNに解決される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBusConfig {
    namespace: String,
}

impl EventBusConfig {
    /// 環境変数`EVENT_BUS_NAMESPACE`から設定を作成
    pub fn from_env() -> Result<Self, ConfigError> {
        let namespace = std::env::var(EVENT_BUS_NAMESPACE_ENV)
            .map_err(|_| ConfigError::MissingEnvVar(EVENT_BUS_NAMESPACE_ENV.to_string()))?;

        Self::new(namespace)
    }

    /// 明示的な名前空間で設定を作成
    ///
    /// 前後の空白と末尾の`:`は取り除く。
    pub fn new(namespace: impl Into<String>) -> Result<Self, ConfigError> {
        let namespace = namespace.into();
        let namespace = namespace.trim().trim_end_matches(':');

        if namespace.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                name: EVENT_BUS_NAMESPACE_ENV.to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            namespace: namespace.to_string(),
        })
    }

    /// 名前空間を取得
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// トピック名をトピックARNに解決
    pub fn topic_arn(&self, topic: &str) -> String {
        format!("{}:{}", self.namespace, topic)
    }
}
