/// 発行前のエンベロープバリデーション
///
/// トランスポートに依存しない純粋関数として、
/// `event`と`message`が空でないことを検証する。
use thiserror::Error;

use super::EventEnvelope;

/// エンベロープのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `event`が空
    #[error("missing 'event' parameter")]
    MissingEvent,
    /// `message`が空
    #[error("missing 'message' parameter")]
    MissingMessage,
    /// 両方が空
    #[error("missing 'event' and 'message' parameters")]
    MissingEventAndMessage,
}

/// 発行用エンベロープのバリデータ
pub struct EnvelopeValidator;

impl EnvelopeValidator {
    /// 発行可能なエンベロープかどうかを検証
    ///
    /// 受信側のエンベロープには適用しない（空でもログ出力のみ行う）。
    pub fn validate_outbound(envelope: &EventEnvelope) -> Result<(), ValidationError> {
        match (envelope.event.is_empty(), envelope.message.is_empty()) {
            (false, false) => Ok(()),
            (true, false) => Err(ValidationError::MissingEvent),
            (false, true) => Err(ValidationError::MissingMessage),
            (true, true) => Err(ValidationError::MissingEventAndMessage),
        }
    }
}
