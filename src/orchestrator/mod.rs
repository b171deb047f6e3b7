//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 在后台执行用例层的异步获取，把结果一次性交给会话适配器。
//!
//! ## 层次关系
//!
//! ```text
//! session_loader (后台获取 → 一次性 set_questions)
//!     ↓
//! services::LearningSetSource (用例层：本地 / 远程)
//!     ↓
//! quiz::QuizQuestionAdapter (会话核心)
//!     ↓
//! workflow::AnswerRecorder (作答回调)
//! ```

pub mod session_loader;

pub use session_loader::{Catalog, LoadedSet, SessionLoader};
