// アプリケーション層モジュール
pub mod egress_handler;
pub mod ingress_handler;

// 再エクスポート
pub use egress_handler::{EgressError, EgressHandler};
pub use ingress_handler::{remaining_until, IngressHandler, IngressResponse, EVENTS_TOPIC};
