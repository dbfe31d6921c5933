use crate::error::FileError;
use crate::models::conference::ConferenceForm;
use crate::models::paper::{AuthorEntry, PaperFile, PaperForm, PDF_MIME};
use crate::models::review::{ReviewScores, ReviewTarget};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 待提交的草稿，按 `kind` 区分表单类型
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Draft {
    Conference(ConferenceForm),
    Paper(PaperDraft),
    Review(ReviewDraft),
}

impl Draft {
    pub fn kind(&self) -> &'static str {
        match self {
            Draft::Conference(_) => "conference",
            Draft::Paper(_) => "paper",
            Draft::Review(_) => "review",
        }
    }
}

/// 论文草稿
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDraft {
    pub conference_id: String,
    pub conference_acronym: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: String,
    /// 通讯作者（邮箱始终取自登录会话）
    #[serde(default)]
    pub corresponding_author: AuthorEntry,
    #[serde(default)]
    pub co_authors: Vec<AuthorEntry>,
    /// 稿件路径，相对路径以草稿所在目录为基准
    pub file: PathBuf,
}

impl PaperDraft {
    pub fn form(&self) -> PaperForm {
        PaperForm {
            title: self.title.clone(),
            abstract_text: self.abstract_text.clone(),
            keywords: self.keywords.clone(),
        }
    }
}

/// 评审草稿
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub paper_id: String,
    pub reviewer_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub scores: ReviewScores,
}

impl ReviewDraft {
    pub fn target(&self) -> ReviewTarget {
        ReviewTarget {
            paper_id: self.paper_id.clone(),
            reviewer_id: self.reviewer_id.clone(),
            title: self.title.clone(),
        }
    }
}

/// 已加载的草稿及其来源文件
#[derive(Debug, Clone)]
pub struct DraftFile {
    pub path: PathBuf,
    pub draft: Draft,
}

impl DraftFile {
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 解析草稿中引用的相对路径
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            return relative.to_path_buf();
        }
        self.path
            .parent()
            .map(|dir| dir.join(relative))
            .unwrap_or_else(|| relative.to_path_buf())
    }
}

/// 解析单个草稿文本
pub fn parse_draft(content: &str) -> Result<Draft> {
    toml::from_str(content).context("无法解析草稿内容")
}

/// 从 TOML 文件加载草稿
pub async fn load_draft(path: &Path) -> Result<DraftFile> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取草稿文件: {}", path.display()))?;

    let draft: Draft = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: path.display().to_string(),
        source: Box::new(e),
    })?;

    Ok(DraftFile {
        path: path.to_path_buf(),
        draft,
    })
}

/// 从文件夹中加载所有草稿（按文件名排序）
pub async fn load_all_drafts(folder_path: &str) -> Result<Vec<DraftFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut drafts = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_draft(&path).await {
            Ok(draft) => {
                tracing::info!("成功加载 {} 草稿", draft.draft.kind());
                drafts.push(draft);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(drafts)
}

/// 读取稿件文件，类型由扩展名推断
pub async fn load_paper_file(path: &Path) -> Result<PaperFile> {
    if !path.is_file() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let bytes = fs::read(path)
        .await
        .with_context(|| format!("无法读取稿件: {}", path.display()))?;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(PaperFile::new(file_name, mime_for(path), bytes))
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => PDF_MIME,
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
