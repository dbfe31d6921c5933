use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 地址
    pub api_base_url: String,
    /// 登录会话文件（auth blob）
    pub session_file: String,
    /// 会话文件缺失时用于登录的邮箱
    pub login_email: Option<String>,
    pub login_password: Option<String>,
    /// 待提交草稿（TOML）存放目录
    pub draft_folder: String,
    /// 同时处理的草稿数量
    pub max_concurrent_drafts: usize,
    /// 合规度低于阈值时是否仍然确认提交
    pub confirm_low_compliance: bool,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 提交成功后是否删除草稿文件
    pub remove_submitted_drafts: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            session_file: "auth.json".to_string(),
            login_email: None,
            login_password: None,
            draft_folder: "drafts".to_string(),
            max_concurrent_drafts: 4,
            confirm_low_compliance: false,
            request_timeout_secs: 30,
            remove_submitted_drafts: false,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: env_or("CONFIZIO_API_BASE_URL", default.api_base_url),
            session_file: env_or("CONFIZIO_SESSION_FILE", default.session_file),
            login_email: std::env::var("CONFIZIO_LOGIN_EMAIL").ok(),
            login_password: std::env::var("CONFIZIO_LOGIN_PASSWORD").ok(),
            draft_folder: env_or("CONFIZIO_DRAFT_FOLDER", default.draft_folder),
            max_concurrent_drafts: env_parse(
                "CONFIZIO_MAX_CONCURRENT_DRAFTS",
                default.max_concurrent_drafts,
            )
            .max(1),
            confirm_low_compliance: env_parse(
                "CONFIZIO_CONFIRM_LOW_COMPLIANCE",
                default.confirm_low_compliance,
            ),
            request_timeout_secs: env_parse(
                "CONFIZIO_REQUEST_TIMEOUT_SECS",
                default.request_timeout_secs,
            ),
            remove_submitted_drafts: env_parse(
                "CONFIZIO_REMOVE_SUBMITTED_DRAFTS",
                default.remove_submitted_drafts,
            ),
            verbose_logging: env_parse("VERBOSE_LOGGING", default.verbose_logging),
            output_log_file: env_or("OUTPUT_LOG_FILE", default.output_log_file),
        }
    }

    /// 同时配置了邮箱和密码时返回登录凭据
    pub fn login_credentials(&self) -> Option<(&str, &str)> {
        match (&self.login_email, &self.login_password) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

/// 读取并解析环境变量，缺失或无法解析时使用默认值
fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
