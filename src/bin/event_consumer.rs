/// イベント購読Lambdaエントリポイント
///
/// SNSの`events`トピックからトリガーされ、配信された
/// エンベロープをログ出力する。デコードできないメッセージは
/// エラーとして返し、SNSの再配信・デッドレターに委ねる。
use aws_lambda_events::event::sns::SnsEvent;
use event_relay::application::EgressHandler;
use event_relay::infrastructure::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{info, info_span};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // Lambda関数を初期化して実行
    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. SNSレコードを順に取り出す
/// 2. `Sns.Message`をエンベロープとしてデコードしてログ出力
/// 3. デコードに失敗した時点でエラーを返す（以降のレコードは処理しない）
async fn handler(event: LambdaEvent<SnsEvent>) -> Result<(), Error> {
    let records = event.payload.records;

    info!(record_count = records.len(), "SNSイベントを受信");

    let consumer = EgressHandler::new();

    for record in &records {
        let span = info_span!(
            "sns_record",
            message_id = %record.sns.message_id,
            topic_arn = %record.sns.topic_arn
        );
        let _guard = span.enter();

        consumer.handle(record.sns.message.as_bytes())?;
    }

    Ok(())
}
