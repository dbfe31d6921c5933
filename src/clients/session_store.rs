//! 登录会话存储
//!
//! 只负责读写 auth blob，不解释其中的角色含义

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::Session;

/// 会话存储
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 读取会话；不存在时返回 `None`
    async fn load(&self) -> AppResult<Option<Session>>;

    async fn save(&self, session: &Session) -> AppResult<()>;

    async fn clear(&self) -> AppResult<()>;
}

/// 以 JSON 文件保存会话
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!("会话文件不存在: {}", self.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::file_read_failed(self.display(), e))?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(self.display(), e))
    }

    async fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::file_write_failed(self.display(), e)),
        }
    }
}
