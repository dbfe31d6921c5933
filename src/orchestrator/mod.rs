//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量草稿处理器
//! - 管理应用生命周期（初始化、运行）
//! - 读取登录会话、创建后端客户端
//! - 批量加载草稿（Vec<DraftFile>），控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `draft_processor` - 单个草稿处理器
//! - 按草稿类型创建流程并填充表单
//! - 提交并记录结果，按配置清理草稿文件
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<DraftFile>)
//!     ↓
//! draft_processor (处理单个草稿)
//!     ↓
//! workflow (ConferenceFlow / PaperFlow / ReviewFlow)
//!     ↓
//! validation + clients
//! ```

pub mod batch_processor;
pub mod draft_processor;

pub use batch_processor::{App, ProcessingStats};
pub use draft_processor::{process_draft, Backends};
