#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use confizio_submit::clients::{AuthApi, AuthorApi, ConferenceApi, ReviewerApi};
use confizio_submit::error::ApiError;
use confizio_submit::models::{
    ApiMessage, AssignedPaper, AssignedPapersResponse, ComplianceReport, ConferenceDetails,
    ConferencePayload, ConferenceStatus, LoginForm, LoginResponse, PaperFile, PaperPayload,
    PasswordResetForm, PendingConference, ProfileForm, ProfileResponse, RegisterPayload,
    RegisteredConference, ReviewPayload, Role, RoleRecord, Session, SessionUser,
};

/// 预设的后端返回
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    /// 非 2xx，带后端 `message`
    Rejected(String),
    /// 非 2xx，没有可用的消息
    Down,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self, endpoint: &str) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Rejected(message) => Err(ApiError::rejected(endpoint, 400, message.clone())),
            Reply::Down => Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: Some(500),
                message: None,
            }),
        }
    }
}

/// 内存中的后端，记录每一次调用
pub struct MockBackend {
    pub conference: Mutex<Reply<ConferenceDetails>>,
    pub create: Mutex<Reply<ApiMessage>>,
    pub pending: Mutex<Reply<Vec<PendingConference>>>,
    pub decision: Mutex<Reply<()>>,
    pub compliance: Mutex<Reply<ComplianceReport>>,
    pub paper: Mutex<Reply<ApiMessage>>,
    pub review: Mutex<Reply<ApiMessage>>,
    pub register: Mutex<Reply<ApiMessage>>,
    pub login: Mutex<Reply<LoginResponse>>,
    pub reset: Mutex<Reply<ApiMessage>>,
    pub profile: Mutex<Reply<ProfileResponse>>,
    pub assigned: Mutex<Reply<AssignedPapersResponse>>,
    pub registered: Mutex<Reply<Vec<RegisteredConference>>>,
    /// 为 true 时所有提交调用永不返回
    pub stall_submissions: AtomicBool,

    pub compliance_calls: AtomicUsize,
    pub conferences_sent: Mutex<Vec<ConferencePayload>>,
    pub papers_sent: Mutex<Vec<PaperPayload>>,
    pub reviews_sent: Mutex<Vec<ReviewPayload>>,
    pub registrations_sent: Mutex<Vec<RegisterPayload>>,
    pub decisions_sent: Mutex<Vec<(String, &'static str)>>,
    pub logins_sent: Mutex<Vec<LoginForm>>,
    pub resets_sent: Mutex<Vec<PasswordResetForm>>,
    pub profiles_sent: Mutex<Vec<ProfileForm>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            conference: Mutex::new(Reply::Ok(ConferenceDetails {
                id: "c1".into(),
                conference_name: "Rust Systems Summit".into(),
                acronym: "RSS".into(),
                expertise: vec!["Compilers".into(), "Kernels".into()],
            })),
            create: Mutex::new(Reply::Ok(ApiMessage::ok("created"))),
            pending: Mutex::new(Reply::Ok(vec![
                pending("p1", "RustConf"),
                pending("p2", "KernelCon"),
            ])),
            decision: Mutex::new(Reply::Ok(())),
            compliance: Mutex::new(Reply::Ok(report(80.0))),
            paper: Mutex::new(Reply::Ok(ApiMessage::ok("Paper received"))),
            review: Mutex::new(Reply::Ok(ApiMessage {
                success: Some(true),
                message: None,
            })),
            register: Mutex::new(Reply::Ok(ApiMessage::ok("Registered"))),
            login: Mutex::new(Reply::Ok(login_reply())),
            reset: Mutex::new(Reply::Ok(ApiMessage::ok("Password Reset Successfully"))),
            profile: Mutex::new(Reply::Ok(ProfileResponse {
                error: None,
                updated_user: Some(SessionUser {
                    id: "u1".into(),
                    name: "Ada King".into(),
                    email: "ada@uni.edu".into(),
                    phone: "555-0199".into(),
                    address: "London".into(),
                    ..SessionUser::default()
                }),
            })),
            assigned: Mutex::new(Reply::Ok(AssignedPapersResponse {
                success: Some(true),
                data: vec![assigned("p1", &[]), assigned("p2", &["u1"])],
            })),
            registered: Mutex::new(Reply::Ok(Vec::new())),
            stall_submissions: AtomicBool::new(false),
            compliance_calls: AtomicUsize::new(0),
            conferences_sent: Mutex::new(Vec::new()),
            papers_sent: Mutex::new(Vec::new()),
            reviews_sent: Mutex::new(Vec::new()),
            registrations_sent: Mutex::new(Vec::new()),
            decisions_sent: Mutex::new(Vec::new()),
            logins_sent: Mutex::new(Vec::new()),
            resets_sent: Mutex::new(Vec::new()),
            profiles_sent: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_compliance(&self, reply: Reply<ComplianceReport>) {
        *self.compliance.lock().unwrap() = reply;
    }

    pub fn set_paper(&self, reply: Reply<ApiMessage>) {
        *self.paper.lock().unwrap() = reply;
    }

    pub fn set_create(&self, reply: Reply<ApiMessage>) {
        *self.create.lock().unwrap() = reply;
    }

    pub fn set_review(&self, reply: Reply<ApiMessage>) {
        *self.review.lock().unwrap() = reply;
    }

    pub fn set_register(&self, reply: Reply<ApiMessage>) {
        *self.register.lock().unwrap() = reply;
    }

    pub fn set_decision(&self, reply: Reply<()>) {
        *self.decision.lock().unwrap() = reply;
    }

    pub fn set_login(&self, reply: Reply<LoginResponse>) {
        *self.login.lock().unwrap() = reply;
    }

    pub fn set_reset(&self, reply: Reply<ApiMessage>) {
        *self.reset.lock().unwrap() = reply;
    }

    pub fn set_profile(&self, reply: Reply<ProfileResponse>) {
        *self.profile.lock().unwrap() = reply;
    }

    pub fn set_assigned(&self, reply: Reply<AssignedPapersResponse>) {
        *self.assigned.lock().unwrap() = reply;
    }

    pub fn set_registered(&self, reply: Reply<Vec<RegisteredConference>>) {
        *self.registered.lock().unwrap() = reply;
    }

    pub fn stall(&self) {
        self.stall_submissions.store(true, Ordering::SeqCst);
    }

    pub fn compliance_calls(&self) -> usize {
        self.compliance_calls.load(Ordering::SeqCst)
    }

    pub fn papers_sent(&self) -> Vec<PaperPayload> {
        self.papers_sent.lock().unwrap().clone()
    }

    pub fn conferences_sent(&self) -> Vec<ConferencePayload> {
        self.conferences_sent.lock().unwrap().clone()
    }

    pub fn reviews_sent(&self) -> Vec<ReviewPayload> {
        self.reviews_sent.lock().unwrap().clone()
    }

    async fn maybe_stall(&self) {
        if self.stall_submissions.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl ConferenceApi for MockBackend {
    async fn fetch_conference(&self, _conference_id: &str) -> Result<ConferenceDetails, ApiError> {
        let reply = self.conference.lock().unwrap().clone();
        reply.resolve("get-conference")
    }

    async fn submit_conference(&self, payload: &ConferencePayload) -> Result<ApiMessage, ApiError> {
        self.maybe_stall().await;
        self.conferences_sent.lock().unwrap().push(payload.clone());
        let reply = self.create.lock().unwrap().clone();
        reply.resolve("create-conference")
    }

    async fn pending_conferences(&self) -> Result<Vec<PendingConference>, ApiError> {
        let reply = self.pending.lock().unwrap().clone();
        reply.resolve("pending")
    }

    async fn approve_conference(&self, conference_id: &str) -> Result<(), ApiError> {
        self.decisions_sent
            .lock()
            .unwrap()
            .push((conference_id.to_string(), "approve"));
        let reply = self.decision.lock().unwrap().clone();
        reply.resolve("approve")
    }

    async fn reject_conference(&self, conference_id: &str) -> Result<(), ApiError> {
        self.decisions_sent
            .lock()
            .unwrap()
            .push((conference_id.to_string(), "reject"));
        let reply = self.decision.lock().unwrap().clone();
        reply.resolve("reject")
    }

    async fn registered_conferences(&self) -> Result<Vec<RegisteredConference>, ApiError> {
        let reply = self.registered.lock().unwrap().clone();
        reply.resolve("all-reg-conferences")
    }
}

#[async_trait]
impl AuthorApi for MockBackend {
    async fn check_compliance(&self, _file: &PaperFile) -> Result<ComplianceReport, ApiError> {
        self.compliance_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.compliance.lock().unwrap().clone();
        reply.resolve("check-compliance")
    }

    async fn submit_paper(&self, payload: &PaperPayload) -> Result<ApiMessage, ApiError> {
        self.maybe_stall().await;
        self.papers_sent.lock().unwrap().push(payload.clone());
        let reply = self.paper.lock().unwrap().clone();
        reply.resolve("submit-paper")
    }
}

#[async_trait]
impl ReviewerApi for MockBackend {
    async fn submit_review(&self, payload: &ReviewPayload) -> Result<ApiMessage, ApiError> {
        self.maybe_stall().await;
        self.reviews_sent.lock().unwrap().push(payload.clone());
        let reply = self.review.lock().unwrap().clone();
        reply.resolve("submit-reviewform")
    }

    async fn assigned_papers(
        &self,
        _reviewer_id: &str,
    ) -> Result<AssignedPapersResponse, ApiError> {
        let reply = self.assigned.lock().unwrap().clone();
        reply.resolve("assigned-papers")
    }
}

#[async_trait]
impl AuthApi for MockBackend {
    async fn register(&self, payload: &RegisterPayload) -> Result<ApiMessage, ApiError> {
        self.maybe_stall().await;
        self.registrations_sent.lock().unwrap().push(payload.clone());
        let reply = self.register.lock().unwrap().clone();
        reply.resolve("register")
    }

    async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        self.maybe_stall().await;
        self.logins_sent.lock().unwrap().push(form.clone());
        let reply = self.login.lock().unwrap().clone();
        reply.resolve("login")
    }

    async fn forgot_password(&self, form: &PasswordResetForm) -> Result<ApiMessage, ApiError> {
        self.maybe_stall().await;
        self.resets_sent.lock().unwrap().push(form.clone());
        let reply = self.reset.lock().unwrap().clone();
        reply.resolve("forgot-password")
    }

    async fn update_profile(&self, form: &ProfileForm) -> Result<ProfileResponse, ApiError> {
        self.maybe_stall().await;
        self.profiles_sent.lock().unwrap().push(form.clone());
        let reply = self.profile.lock().unwrap().clone();
        reply.resolve("profile")
    }
}

// ========== 测试数据 ==========

pub fn report(percentage: f64) -> ComplianceReport {
    ComplianceReport {
        percentage,
        details: Vec::new(),
    }
}

pub fn pending(id: &str, name: &str) -> PendingConference {
    PendingConference {
        id: id.into(),
        conference_name: name.into(),
        acronym: String::new(),
        start_date: None,
        end_date: None,
        venue: String::new(),
        mode: None,
    }
}

pub fn login_reply() -> LoginResponse {
    LoginResponse {
        success: Some(true),
        message: Some("Login successfully".into()),
        token: Some("jwt".into()),
        user: Some(session().user.clone()),
        roles: vec![RoleRecord::for_conference(Role::Reviewer, "c1")],
    }
}

pub fn assigned(paper_id: &str, reviewed_by: &[&str]) -> AssignedPaper {
    AssignedPaper {
        paper_id: paper_id.into(),
        title: format!("Paper {}", paper_id),
        conference_acronym: "RSS".into(),
        is_reviewed_by: reviewed_by.iter().map(|id| id.to_string()).collect(),
        ..AssignedPaper::default()
    }
}

pub fn registered(id: &str, status: ConferenceStatus, deadline: &str) -> RegisteredConference {
    RegisteredConference {
        id: id.into(),
        conference_name: format!("Conference {}", id),
        acronym: id.to_uppercase(),
        submission_deadline: Some(deadline.into()),
        status,
        ..RegisteredConference::default()
    }
}

pub fn session_with_roles(roles: Vec<RoleRecord>) -> Arc<Session> {
    Arc::new(Session {
        token: "tok".into(),
        user: SessionUser {
            id: "u1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@uni.edu".into(),
            access_level: 0,
            ..SessionUser::default()
        },
        roles,
    })
}

pub fn session() -> Arc<Session> {
    session_with_roles(vec![RoleRecord::new(Role::User)])
}

pub fn pdf() -> PaperFile {
    PaperFile::new("paper.pdf", "application/pdf", b"%PDF-1.7".to_vec())
}

pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}
