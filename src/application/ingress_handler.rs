/// イベント受付ハンドラー
///
/// HTTPリクエストボディをエンベロープとしてデコード・検証し、
/// 正規形に再エンコードして`events`トピックに発行する。
use std::time::{Duration, SystemTime};

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use lambda_http::http::{self, StatusCode};
use lambda_http::{Body, Response};
use tracing::{error, info, warn};

use crate::domain::{EnvelopeValidator, EventEnvelope};
use crate::infrastructure::{EventPublisher, PublishError};

/// 発行先トピック名
pub const EVENTS_TOPIC: &str = "events";

/// 受付ハンドラーの応答（ステータスコードと本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngressResponse {
    pub status: StatusCode,
    pub body: String,
}

impl IngressResponse {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// プレーンテキストのHTTPレスポンスに変換
    pub fn into_http_response(self) -> Result<Response<Body>, http::Error> {
        Response::builder()
            .status(self.status)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))
            .header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"))
            .body(Body::Text(self.body))
    }
}

/// 期限までの残り時間を計算（過ぎていればゼロ）
pub fn remaining_until(deadline: SystemTime, now: SystemTime) -> Duration {
    deadline.duration_since(now).unwrap_or(Duration::ZERO)
}

/// HTTP経由のイベントを受け付けて発行するハンドラー
///
/// 発行者はプロセス起動時に一度だけ構築したものを共有参照で受け取る。
pub struct IngressHandler<P>
where
    P: EventPublisher,
{
    publisher: P,
}

impl<P> IngressHandler<P>
where
    P: EventPublisher,
{
    /// 新しいIngressHandlerを作成
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// リクエストボディを処理
    ///
    /// # 処理フロー
    /// 1. エンベロープとしてデコード（失敗: 400）
    /// 2. `event`/`message`が空でないことを検証（失敗: 400）
    /// 3. 正規形に再エンコード（失敗: 500）
    /// 4. `events`トピックに発行（失敗: 500、成功: 200）
    ///
    /// # 引数
    /// * `body` - HTTPリクエストボディ
    /// * `time_budget` - 発行に使える残り時間（`None`なら無制限）
    pub async fn handle(&self, body: &[u8], time_budget: Option<Duration>) -> IngressResponse {
        let envelope = match EventEnvelope::decode(body) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, body_length = body.len(), "リクエストボディのパースに失敗");
                return IngressResponse::new(StatusCode::BAD_REQUEST, "Error parsing request");
            }
        };

        if let Err(err) = EnvelopeValidator::validate_outbound(&envelope) {
            warn!(error = %err, "必須パラメータが不足");
            return IngressResponse::new(StatusCode::BAD_REQUEST, err.to_string());
        }

        let payload = match envelope.encode() {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "エンベロープのエンコードに失敗");
                return IngressResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error encoding json",
                );
            }
        };

        match self.publish(&payload, time_budget).await {
            Ok(message_id) => {
                info!(
                    event_type = %envelope.event,
                    message_id = %message_id,
                    topic = EVENTS_TOPIC,
                    "イベントを発行"
                );
                IngressResponse::new(
                    StatusCode::OK,
                    format!("Message published: {}", message_id),
                )
            }
            Err(err) => {
                // 詳細はログのみに残し、応答本文には含めない
                error!(error = %err, topic = EVENTS_TOPIC, "イベント発行に失敗");
                IngressResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error publishing message",
                )
            }
        }
    }

    async fn publish(
        &self,
        payload: &[u8],
        time_budget: Option<Duration>,
    ) -> Result<String, PublishError> {
        let publish = self.publisher.publish(EVENTS_TOPIC, payload);

        match time_budget {
            Some(budget) => tokio::time::timeout(budget, publish)
                .await
                .map_err(|_| PublishError::DeadlineExceeded)?,
            None => publish.await,
        }
    }
}
