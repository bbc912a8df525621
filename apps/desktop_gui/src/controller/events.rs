//! UI/backend events and backend worker status.

use client_core::FormEvent;

#[derive(Debug)]
pub enum UiEvent {
    Form(FormEvent),
    BackendReady,
    BackendFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Starting,
    Ready,
    Failed(String),
}

impl BackendStatus {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Starting => Some("正在连接…"),
            Self::Ready => None,
            Self::Failed(_) => Some("后台服务启动失败"),
        }
    }
}
