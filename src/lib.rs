//! # Learning Quiz
//!
//! 学习集测验会话引擎：下载学习集（题集 + 词汇表），把题目渲染为
//! 与界面无关的条目，收集每道题的作答并控制提示显示。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `clients/` - 远程学习集 API 的 HTTP 客户端
//! - `infrastructure/terminal` - 终端文本界面
//!
//! ### ② 用例层（Services）
//! - `LearningSetSource` - 获取题集 / 词汇表 / 学习集（本地 TOML 或远程 HTTP）
//! - `mappers` - 远程数据 → 领域模型
//!
//! ### ③ 会话核心（Quiz）
//! - `ItemVariant` - 题目类型 → 渲染形态
//! - `render` - 文本输入题 / 选择题渲染
//! - `QuizQuestionAdapter` - 题目列表、答案缓存、提示开关
//!
//! ### ④ 流程与编排（Workflow / Orchestration）
//! - `AnswerRecorder` - 作答回调，决定是否记录
//! - `SessionLoader` - 后台获取并一次性载入适配器
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod quiz;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, FetchError, FetchResult};
pub use models::{Answer, Glossary, LearningSet, Question, QuestionSet, QuestionType};
pub use orchestrator::SessionLoader;
pub use quiz::{AnswerCallback, AnswerDecision, ItemVariant, QuizQuestionAdapter, RenderedItem};
pub use services::{LearningSetSource, LocalLearningSetSource, RemoteLearningSetSource};
pub use workflow::AnswerRecorder;
