/// イベントエンベロープとJSONコーデック
///
/// 受付（HTTP）・発行（SNS）・購読（SNS配信）のすべてで共通の
/// `{"event": "...", "message": "..."}` 形式を扱う。
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// デコードエラー
///
/// 入力がJSONとして構造的に不正な場合のみ発生する。
/// フィールドの欠落はエラーにならない。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// JSONとしてパースできない
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    /// トップレベルがJSONオブジェクトでない
    #[error("envelope must be a JSON object")]
    NotObject,
    /// フィールドの型が文字列でない
    #[error("field '{0}' must be a string")]
    InvalidFieldType(&'static str),
}

/// エンコードエラー
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to encode envelope: {0}")]
pub struct EncodeError(pub String);

/// イベントエンベロープ
///
/// `event`はイベント種別のラベル、`message`は任意のテキスト。
/// 空文字列も保持できる（発行可否の判定は`EnvelopeValidator`が行う）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventEnvelope {
    pub event: String,
    pub message: String,
}

/// デコード用の中間表現（欠落とnullを区別せず空文字列として扱う）
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl EventEnvelope {
    /// 新しいエンベロープを作成
    pub fn new(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            message: message.into(),
        }
    }

    /// バイト列からエンベロープをデコード
    ///
    /// # 戻り値
    /// * `Ok(EventEnvelope)` - 欠落フィールドは空文字列
    /// * `Err(DecodeError)` - パース不能、オブジェクト以外、文字列以外のフィールド
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

        let obj = value.as_object().ok_or(DecodeError::NotObject)?;

        // 型不一致はフィールド名付きで報告する
        for field in ["event", "message"] {
            if let Some(v) = obj.get(field) {
                if !(v.is_string() || v.is_null()) {
                    return Err(DecodeError::InvalidFieldType(field));
                }
            }
        }

        let raw: RawEnvelope =
            serde_json::from_value(value).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

        Ok(Self {
            event: raw.event.unwrap_or_default(),
            message: raw.message.unwrap_or_default(),
        })
    }

    /// エンベロープを正規形のJSONバイト列にエンコード
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec(self).map_err(|e| EncodeError(e.to_string()))
    }
}
