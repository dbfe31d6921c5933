use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 流程状态错误
    #[error("流程错误: {0}")]
    Workflow(#[from] WorkflowError),
}

/// 本地校验错误
///
/// `Display` 输出即为展示给用户的提示文本，校验失败的表单永远不会触达网络。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Conference Name is required.")]
    ConferenceNameRequired,
    #[error("Acronym is required.")]
    AcronymRequired,
    #[error("Start and End dates are required.")]
    StartEndRequired,
    #[error("Please select a Review Mode.")]
    ReviewModeRequired,
    #[error("At least one expertise is required.")]
    ExpertiseRequired,
    #[error("All date fields must be filled.")]
    AllDatesRequired,
    #[error("Invalid date for {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("Dates must not be in the past.")]
    DateInPast,
    #[error("End date must be greater than start date.")]
    EndBeforeStart,
    #[error("Abstract registration deadline must be before conference end date.")]
    AbstractDeadlineAfterEnd,
    #[error("Submission deadline must lie between start and end date.")]
    SubmissionOutsideRange,

    #[error("Abstract must be between 100 and 300 words.")]
    AbstractLength { words: usize },
    #[error("Title must be at least 3 words.")]
    TitleTooShort { words: usize },
    #[error("Keywords should not be more than 8.")]
    TooManyKeywords { count: usize },
    #[error("At least one author must have mandatory details filled.")]
    AuthorDetailsMissing,
    #[error("Paper submission is not allowed for organizers or reviewers")]
    RoleNotAllowed,
    #[error("Please upload your paper before submitting.")]
    PaperFileRequired,
    #[error("Please upload a PDF file only.")]
    NotPdf { mime_type: String },

    #[error("Please select an overall recommendation.")]
    RecommendationRequired,
    #[error("Comments for authors are required.")]
    AuthorCommentsRequired,
    #[error("Comments for organizers are required.")]
    OrganizerCommentsRequired,
    #[error("Score for {criterion} must be between 1 and 10.")]
    ScoreOutOfRange { criterion: &'static str, value: u8 },

    #[error("{field} is required")]
    FieldRequired { field: &'static str },
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("At least 6 characters")]
    PasswordTooShort,
    #[error("Password must be at least 6 characters")]
    LoginPasswordTooShort,
    #[error("Must be at least 6 characters")]
    NewPasswordTooShort,
    #[error("Expertise '{option}' is not offered by this conference.")]
    ExpertiseNotOffered { option: String },
}

/// 列表编辑器的前置条件错误
///
/// 只作为信号返回，不会修改状态，也不是致命错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("You can add up to 2 authors only.")]
    AuthorLimitReached,
    #[error("作者索引 {index} 超出范围 [0, {len})")]
    AuthorIndexOutOfRange { index: usize, len: usize },
    #[error("主题索引 {index} 超出范围 [0, {slots})")]
    TopicIndexOutOfRange { index: usize, slots: usize },
}

/// 后端协作方错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status:?}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: Option<u16>,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建带后端消息的错误响应
    pub fn rejected(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        ApiError::BadResponse {
            endpoint: endpoint.into(),
            status: Some(status),
            message: Some(message.into()),
        }
    }

    /// 后端返回的原始提示（如果有）
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::BadResponse { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// 面向用户的提示：优先使用后端消息，否则使用给定的默认文案
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("未找到登录会话: {path}")]
    SessionMissing { path: String },
}

/// 提交状态机的误用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("已有提交正在进行中")]
    SubmissionInFlight,
    #[error("正在等待用户确认")]
    ConfirmationPending,
    #[error("当前没有待确认的提交")]
    NothingToConfirm,
    #[error("操作已取消")]
    Cancelled,
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 单条校验规则的结果
pub type ValidationResult = Result<(), ValidationError>;
