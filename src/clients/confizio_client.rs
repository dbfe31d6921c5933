/// Confizio 后端 API 客户端
///
/// 封装所有与后端 REST 接口相关的调用逻辑
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{AuthApi, AuthorApi, ConferenceApi, ReviewerApi};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    ApiMessage, AssignedPapersResponse, ComplianceReport, ComplianceResponse, ConferenceDetails,
    ConferencePayload, LoginForm, LoginResponse, PaperFile, PaperPayload, PasswordResetForm,
    PendingConference, ProfileForm, ProfileResponse, RegisterPayload, RegisteredConference,
    ReviewPayload, Session,
};

const CREATE_CONFERENCE: &str = "api/conference/create-conference";
const GET_CONFERENCE: &str = "api/conference/get-conference";
const PENDING_CONFERENCES: &str = "api/conference/pending";
const APPROVE_CONFERENCE: &str = "api/conference/approve";
const REJECT_CONFERENCE: &str = "api/conference/reject";
const ALL_CONFERENCES: &str = "api/conference/all-reg-conferences";
const CHECK_COMPLIANCE: &str = "api/author/check-compliance";
const SUBMIT_PAPER: &str = "api/author/submit-paper";
const SUBMIT_REVIEW: &str = "api/reviewer/submit-reviewform";
const ASSIGNED_PAPERS: &str = "api/reviewer/assigned-papers/reviewer";
const REGISTER: &str = "api/auth/register";
const LOGIN: &str = "api/auth/login";
const FORGOT_PASSWORD: &str = "api/auth/forgot-password";
const PROFILE: &str = "api/auth/profile";

/// Confizio API 客户端
#[derive(Clone)]
pub struct ConfizioClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ConfizioClient {
    /// 创建新的客户端（未登录）
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::request_failed(&config.api_base_url, e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// 携带登录会话的 token
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.token.clone());
        self
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        self.authorize(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))
    }

    /// 读取响应体；非 2xx 时提取后端的 `message`
    async fn read_body(endpoint: &str, response: Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        debug!("{} 返回 {} ({} 字节)", endpoint, status, body.len());

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiMessage>(&body)
                .ok()
                .and_then(|m| m.message);
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(body.to_vec())
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let body = Self::read_body(endpoint, response).await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source: Box::new(e),
        })
    }

    fn file_part(endpoint: &str, file: &PaperFile) -> Result<Part, ApiError> {
        Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ApiError::request_failed(endpoint, e))
    }

    /// 构建论文提交的 multipart 表单
    fn paper_form(payload: &PaperPayload) -> Result<Form, ApiError> {
        let authors = payload.authors_json().map_err(|e| ApiError::JsonParseFailed {
            endpoint: SUBMIT_PAPER.to_string(),
            source: Box::new(e),
        })?;

        Ok(Form::new()
            .text("title", payload.title.clone())
            .text("abstract", payload.abstract_text.clone())
            .text("keywords", payload.keywords.clone())
            .part("paper", Self::file_part(SUBMIT_PAPER, &payload.paper)?)
            .text("authors", authors)
            .text("conferenceId", payload.conference_id.clone())
            .text("conferenceAcronym", payload.conference_acronym.clone())
            .text("conferenceName", payload.conference_name.clone())
            .text("userId", payload.user_id.clone()))
    }
}

#[async_trait]
impl ConferenceApi for ConfizioClient {
    async fn fetch_conference(&self, conference_id: &str) -> Result<ConferenceDetails, ApiError> {
        let endpoint = format!("{}/{}", GET_CONFERENCE, conference_id);
        let response = self.send(&endpoint, self.http.get(self.url(&endpoint))).await?;
        Self::decode(&endpoint, response).await
    }

    async fn submit_conference(&self, payload: &ConferencePayload) -> Result<ApiMessage, ApiError> {
        debug!("创建会议 Payload: {:?}", payload);
        let request = self.http.post(self.url(CREATE_CONFERENCE)).json(payload);
        let response = self.send(CREATE_CONFERENCE, request).await?;
        Self::decode(CREATE_CONFERENCE, response).await
    }

    async fn pending_conferences(&self) -> Result<Vec<PendingConference>, ApiError> {
        let request = self.http.get(self.url(PENDING_CONFERENCES));
        let response = self.send(PENDING_CONFERENCES, request).await?;
        Self::decode(PENDING_CONFERENCES, response).await
    }

    async fn approve_conference(&self, conference_id: &str) -> Result<(), ApiError> {
        let endpoint = format!("{}/{}", APPROVE_CONFERENCE, conference_id);
        let response = self.send(&endpoint, self.http.put(self.url(&endpoint))).await?;
        Self::read_body(&endpoint, response).await.map(|_| ())
    }

    async fn reject_conference(&self, conference_id: &str) -> Result<(), ApiError> {
        let endpoint = format!("{}/{}", REJECT_CONFERENCE, conference_id);
        let response = self.send(&endpoint, self.http.put(self.url(&endpoint))).await?;
        Self::read_body(&endpoint, response).await.map(|_| ())
    }

    async fn registered_conferences(&self) -> Result<Vec<RegisteredConference>, ApiError> {
        let request = self.http.get(self.url(ALL_CONFERENCES));
        let response = self.send(ALL_CONFERENCES, request).await?;
        Self::decode(ALL_CONFERENCES, response).await
    }
}

#[async_trait]
impl AuthorApi for ConfizioClient {
    async fn check_compliance(&self, file: &PaperFile) -> Result<ComplianceReport, ApiError> {
        debug!("合规检查: {:?}", file);
        let form = Form::new().part("paper", Self::file_part(CHECK_COMPLIANCE, file)?);
        let request = self.http.post(self.url(CHECK_COMPLIANCE)).multipart(form);
        let response = self.send(CHECK_COMPLIANCE, request).await?;
        let body: ComplianceResponse = Self::decode(CHECK_COMPLIANCE, response).await?;
        Ok(body.compliance_report)
    }

    async fn submit_paper(&self, payload: &PaperPayload) -> Result<ApiMessage, ApiError> {
        debug!(
            "提交论文: {} ({} 位作者, 会议 {})",
            payload.title,
            payload.authors.len(),
            payload.conference_acronym
        );
        let request = self
            .http
            .post(self.url(SUBMIT_PAPER))
            .multipart(Self::paper_form(payload)?);
        let response = self.send(SUBMIT_PAPER, request).await?;
        Self::decode(SUBMIT_PAPER, response).await
    }
}

#[async_trait]
impl ReviewerApi for ConfizioClient {
    async fn submit_review(&self, payload: &ReviewPayload) -> Result<ApiMessage, ApiError> {
        debug!("提交评审 Payload: {:?}", payload);
        let request = self.http.post(self.url(SUBMIT_REVIEW)).json(payload);
        let response = self.send(SUBMIT_REVIEW, request).await?;
        Self::decode(SUBMIT_REVIEW, response).await
    }

    async fn assigned_papers(
        &self,
        reviewer_id: &str,
    ) -> Result<AssignedPapersResponse, ApiError> {
        let endpoint = format!("{}/{}", ASSIGNED_PAPERS, reviewer_id);
        let response = self.send(&endpoint, self.http.get(self.url(&endpoint))).await?;
        Self::decode(&endpoint, response).await
    }
}

#[async_trait]
impl AuthApi for ConfizioClient {
    async fn register(&self, payload: &RegisterPayload) -> Result<ApiMessage, ApiError> {
        debug!("注册用户: {} (角色 {:?})", payload.email, payload.role);
        let request = self.http.post(self.url(REGISTER)).json(payload);
        let response = self.send(REGISTER, request).await?;
        Self::decode(REGISTER, response).await
    }

    async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        debug!("登录: {}", form.email);
        let request = self.http.post(self.url(LOGIN)).json(form);
        let response = self.send(LOGIN, request).await?;
        Self::decode(LOGIN, response).await
    }

    async fn forgot_password(&self, form: &PasswordResetForm) -> Result<ApiMessage, ApiError> {
        debug!("重设密码: {}", form.email);
        let request = self.http.post(self.url(FORGOT_PASSWORD)).json(form);
        let response = self.send(FORGOT_PASSWORD, request).await?;
        Self::decode(FORGOT_PASSWORD, response).await
    }

    async fn update_profile(&self, form: &ProfileForm) -> Result<ProfileResponse, ApiError> {
        debug!("更新资料: {}", form.email);
        let request = self.http.put(self.url(PROFILE)).json(form);
        let response = self.send(PROFILE, request).await?;
        Self::decode(PROFILE, response).await
    }
}
