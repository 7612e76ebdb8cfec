/// イベント購読ハンドラー
///
/// メッセージバスから配信されたペイロードをデコードしてログ出力する。
/// デコードできない場合は処理を続行せず、呼び出し元（Lambda）に
/// 失敗を返して再配信・デッドレターの判断をプラットフォームに委ねる。
use thiserror::Error;
use tracing::{error, info};

use crate::domain::{DecodeError, EventEnvelope};

/// 購読ハンドラーのエラー型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EgressError {
    /// 配信ペイロードのデコードに失敗
    #[error("could not decode message: {0}")]
    Decode(#[from] DecodeError),
}

/// 配信されたイベントをログ出力するハンドラー
#[derive(Debug, Default, Clone, Copy)]
pub struct EgressHandler;

impl EgressHandler {
    pub fn new() -> Self {
        Self
    }

    /// 配信ペイロードを処理
    ///
    /// 受信側では空の`event`/`message`も受け入れてそのまま記録する。
    pub fn handle(&self, payload: &[u8]) -> Result<EventEnvelope, EgressError> {
        let envelope = EventEnvelope::decode(payload).inspect_err(|err| {
            error!(error = %err, payload_length = payload.len(), "配信メッセージのデコードに失敗");
        })?;

        info!(
            event_type = %envelope.event,
            event_message = %envelope.message,
            "Event: type = {}, message = {}",
            envelope.event,
            envelope.message
        );

        Ok(envelope)
    }
}
