/// イベント受付HTTP Lambdaエントリポイント
///
/// HTTP POSTで受け取った`{"event", "message"}`を検証し、
/// SNSの`events`トピックに発行する。
use std::time::{Duration, SystemTime};

use event_relay::application::{remaining_until, IngressHandler};
use event_relay::infrastructure::{
    init_logging, AwsSnsEventPublisher, EventBusConfig, EventPublisher,
};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 設定が読めなければリクエストを受け付けずに終了する
    let config = EventBusConfig::from_env().inspect_err(|err| {
        error!(error = %err, "イベントバス設定読み込み失敗");
    })?;

    info!(namespace = config.namespace(), "イベント受付Lambda関数を初期化");

    // SNSクライアントはプロセス内で一度だけ構築し、全呼び出しで共有する
    let publisher = AwsSnsEventPublisher::from_config(config).await;
    let ingress = IngressHandler::new(publisher);
    let ingress = &ingress;

    run(service_fn(move |request: Request| async move {
        handler(ingress, request).await
    }))
    .await
}

/// HTTPリクエストハンドラー
///
/// 発行の待ち時間はLambda呼び出しの残り時間で打ち切る。
async fn handler<P>(ingress: &IngressHandler<P>, request: Request) -> Result<Response<Body>, Error>
where
    P: EventPublisher,
{
    let time_budget = request.lambda_context_ref().map(|ctx| {
        let deadline = SystemTime::UNIX_EPOCH + Duration::from_millis(ctx.deadline);
        remaining_until(deadline, SystemTime::now())
    });

    let response = ingress.handle(request.body().as_ref(), time_budget).await;

    info!(status = response.status.as_u16(), "イベント受付レスポンス送信");

    Ok(response.into_http_response()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use event_relay::infrastructure::PublishError;
    use lambda_http::http::Request as HttpRequest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 呼び出し回数だけを記録するテスト用発行者
    struct CountingPublisher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingPublisher {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl EventPublisher for CountingPublisher {
        async fn publish(&self, _topic: &str, _payload: &[u8]) -> Result<String, PublishError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(PublishError::AwsSdkError("throttled".to_string()))
            } else {
                Ok("4e3f0b52-1c1a-5d57-9b4c-000000000001".to_string())
            }
        }
    }

    fn post(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/json")
            .body(Body::Text(body.to_string()))
            .unwrap()
    }

    fn body_text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
            Body::Empty => String::new(),
            _ => panic!("予期しないBody型"),
        }
    }

    #[tokio::test]
    async fn test_handler_returns_200_with_message_id() {
        let ingress = IngressHandler::new(CountingPublisher::new(false));

        let response = handler(&ingress, post(r#"{"event":"build","message":"ok"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            body_text(&response),
            "Message published: 4e3f0b52-1c1a-5d57-9b4c-000000000001"
        );
    }

    #[tokio::test]
    async fn test_handler_returns_400_for_malformed_json() {
        let publisher = CountingPublisher::new(false);
        let ingress = IngressHandler::new(publisher);

        let response = handler(&ingress, post("{oops")).await.unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(body_text(&response), "Error parsing request");
    }

    #[tokio::test]
    async fn test_handler_returns_400_for_empty_body() {
        let ingress = IngressHandler::new(CountingPublisher::new(false));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::Empty)
            .unwrap();

        let response = handler(&ingress, request).await.unwrap();

        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_handler_returns_400_for_missing_parameter() {
        let ingress = IngressHandler::new(CountingPublisher::new(false));

        let response = handler(&ingress, post(r#"{"event":"build","message":""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(body_text(&response), "missing 'message' parameter");
    }

    #[tokio::test]
    async fn test_handler_returns_500_on_publish_failure() {
        let ingress = IngressHandler::new(CountingPublisher::new(true));

        let response = handler(&ingress, post(r#"{"event":"build","message":"ok"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        assert_eq!(body_text(&response), "Error publishing message");
    }

    #[tokio::test]
    async fn test_handler_accepts_binary_body() {
        let ingress = IngressHandler::new(CountingPublisher::new(false));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::Binary(br#"{"event":"build","message":"ok"}"#.to_vec()))
            .unwrap();

        let response = handler(&ingress, request).await.unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_handler_sets_plain_text_content_type() {
        let ingress = IngressHandler::new(CountingPublisher::new(false));

        let response = handler(&ingress, post(r#"{"event":"build","message":"ok"}"#))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
