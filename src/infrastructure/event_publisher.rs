//! イベント発行モジュール
//!
//! エンベロープのバイト列をSNSトピックに発行する。
//! トピック名は`EventBusConfig`の名前空間でARNに解決する。

use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use thiserror::Error;
use tracing::{info, warn};

use super::EventBusConfig;

/// イベント発行のエラー型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PublishError {
    /// AWS SDK エラー
    #[error("AWS SNS APIエラー: {0}")]
    AwsSdkError(String),
    /// ペイロードがUTF-8として不正（SNSメッセージは文字列のみ）
    #[error("ペイロードがUTF-8ではありません: {0}")]
    InvalidPayload(String),
    /// リクエスト期限内に発行が完了しなかった
    #[error("発行がタイムアウトしました")]
    DeadlineExceeded,
}

/// イベント発行トレイト（テスト用の抽象化）
///
/// 実装はプロセス内で一度だけ構築し、複数の呼び出しから共有される。
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// ペイロードをトピックに発行する
    ///
    /// # 引数
    /// * `topic` - トピック名（例: `events`）
    /// * `payload` - 発行するバイト列（JSON）
    ///
    /// # 戻り値
    /// * `Ok(String)` - バスが採番したメッセージID
    /// * `Err(PublishError)` - エラー
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<String, PublishError>;
}

/// 実際のAWS SNS SDKを使用した発行実装
pub struct AwsSnsEventPublisher {
    client: SnsClient,
    config: EventBusConfig,
}

impl AwsSnsEventPublisher {
    /// 新しいAwsSnsEventPublisherを作成
    pub fn new(client: SnsClient, config: EventBusConfig) -> Self {
        Self { client, config }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config(config: EventBusConfig) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = SnsClient::new(&aws_config);
        Self::new(client, config)
    }
}

#[async_trait]
impl EventPublisher for AwsSnsEventPublisher {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<String, PublishError> {
        let topic_arn = self.config.topic_arn(topic);
        let message = std::str::from_utf8(payload)
            .map_err(|e| PublishError::InvalidPayload(e.to_string()))?;

        info!(
            topic_arn = %topic_arn,
            message_length = message.len(),
            "SNSメッセージ発行開始"
        );

        let result = self
            .client
            .publish()
            .topic_arn(&topic_arn)
            .message(message)
            .send()
            .await;

        match result {
            Ok(response) => {
                let message_id = response.message_id().unwrap_or("unknown").to_string();

                info!(
                    topic_arn = %topic_arn,
                    message_id = %message_id,
                    "SNS Publish成功"
                );

                Ok(message_id)
            }
            Err(err) => {
                warn!(
                    topic_arn = %topic_arn,
                    error = %err,
                    "SNS Publishエラー"
                );
                Err(PublishError::AwsSdkError(err.to_string()))
            }
        }
    }
}
