pub mod auth;
pub mod conference;
pub mod loaders;
pub mod paper;
pub mod registration;
pub mod response;
pub mod review;
pub mod session;

pub use auth::{LoginForm, LoginResponse, PasswordResetForm, ProfileForm, ProfileResponse};
pub use conference::{
    ConferenceDates, ConferenceDetails, ConferenceForm, ConferencePayload, ConferenceStatus,
    ConferenceTarget, PendingConference, RegisteredConference, ReviewMode,
};
pub use loaders::{load_all_drafts, load_draft, load_paper_file, Draft, DraftFile};
pub use paper::{
    AuthorEntry, AuthorField, ComplianceDetail, ComplianceReport, FieldEvent, PaperFile,
    PaperForm, PaperPayload,
};
pub use registration::{RegisterPayload, RegistrationForm, RegistrationInvite};
pub use response::{ApiMessage, ComplianceResponse};
pub use review::{
    AssignedPaper, AssignedPapersResponse, Criterion, Recommendation, ReviewPayload, ReviewScores,
    ReviewTarget,
};
pub use session::{has_role, Role, RoleRecord, Session, SessionUser};
