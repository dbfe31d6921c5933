//! 批量草稿处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量草稿的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、读取登录会话（缺失时按配置登录）、创建后端客户端
//! 2. **批量加载**：扫描并加载所有待提交的草稿（`Vec<DraftFile>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量，分批处理
//! 4. **全局统计**：汇总所有草稿的提交结果

use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::clients::{ConfizioClient, FileSessionStore, SessionStore};
use crate::config::Config;
use crate::error::ConfigError;
use crate::models::{load_all_drafts, DraftFile, Session};
use crate::orchestrator::draft_processor::{self, Backends};
use crate::utils::logging;
use crate::workflow::{LoginFlow, SubmitOutcome};

/// 应用主结构
pub struct App {
    config: Config,
    session: Arc<Session>,
    backends: Backends,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config.api_base_url, config.max_concurrent_drafts);

        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session_file));
        let session = match store.load().await.context("无法读取登录会话")? {
            Some(session) => session,
            None => Self::login(&config, store).await?,
        };
        info!(
            "👤 当前用户: {} <{}> (角色 {} 个)",
            session.user.name,
            session.email(),
            session.roles.len()
        );

        let client = ConfizioClient::new(&config)?.with_session(&session);

        Ok(Self::with_backends(config, session, Backends::shared(client)))
    }

    /// 会话文件缺失时用配置中的凭据登录，会话随即写入会话文件
    async fn login(config: &Config, store: Arc<dyn SessionStore>) -> Result<Session> {
        let Some((email, password)) = config.login_credentials() else {
            return Err(ConfigError::SessionMissing {
                path: config.session_file.clone(),
            }
            .into());
        };

        info!("🔑 未找到登录会话，使用 {} 登录", email);
        let mut flow = LoginFlow::new(Arc::new(ConfizioClient::new(config)?), store);
        let form = flow.form_mut();
        form.email = email.to_string();
        form.password = password.to_string();

        match flow.submit().await? {
            SubmitOutcome::Submitted { .. } => {}
            other => anyhow::bail!("登录失败: {}", other.message().unwrap_or_default()),
        }
        flow.session()
            .map(|session| session.as_ref().clone())
            .context("登录后没有可用的会话")
    }

    /// 使用给定的后端创建应用
    pub fn with_backends(config: Config, session: Session, backends: Backends) -> Self {
        Self {
            config,
            session: Arc::new(session),
            backends,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描待提交的草稿...");
        let drafts = load_all_drafts(&self.config.draft_folder).await?;

        if drafts.is_empty() {
            warn!("⚠️ 没有找到待提交的TOML草稿，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_drafts_loaded(drafts.len(), self.config.max_concurrent_drafts);

        let stats = self.process_all_drafts(drafts).await?;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 分批处理所有草稿
    async fn process_all_drafts(&self, drafts: Vec<DraftFile>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_drafts.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total = drafts.len();
        let total_batches = total.div_ceil(batch_size);
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        for (batch_idx, batch) in drafts.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            logging::log_batch_start(
                batch_idx + 1,
                total_batches,
                batch_start + 1,
                batch_start + batch.len(),
            );

            let mut handles = Vec::with_capacity(batch.len());
            for (idx, draft) in batch.iter().enumerate() {
                let draft_index = batch_start + idx + 1;
                let permit = semaphore.clone().acquire_owned().await?;
                let backends = self.backends.clone();
                let session = self.session.clone();
                let config = self.config.clone();
                let draft = draft.clone();

                let handle = tokio::spawn(async move {
                    let _permit = permit;
                    draft_processor::process_draft(&backends, session, draft, draft_index, &config)
                        .await
                });
                handles.push((draft_index, handle));
            }

            let (indices, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
            for (draft_index, joined) in indices.into_iter().zip(join_all(handles).await) {
                match joined {
                    Ok(Ok(true)) => stats.success += 1,
                    Ok(Ok(false)) => stats.failed += 1,
                    Ok(Err(e)) => {
                        error!("[草稿 {}] ❌ 处理过程中发生错误: {:#}", draft_index, e);
                        stats.failed += 1;
                    }
                    Err(e) => {
                        error!("[草稿 {}] 任务执行失败: {}", draft_index, e);
                        stats.failed += 1;
                    }
                }
            }
        }

        Ok(stats)
    }
}
