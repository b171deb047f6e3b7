//! 会话加载器 - 编排层
//!
//! 在后台获取题目，成功后一次性交给适配器；失败时适配器保持原状。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppResult, FetchError, FetchResult};
use crate::models::{Glossary, QuestionSet};
use crate::quiz::{AnswerCallback, QuizQuestionAdapter};
use crate::services::LearningSetSource;
use crate::utils::logging::log_set_loaded;

/// 题集与词汇表目录
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub question_sets: Vec<QuestionSet>,
    pub glossaries: Vec<Glossary>,
}

/// 已载入的学习集概要
#[derive(Debug, Clone)]
pub struct LoadedSet {
    pub id: String,
    pub name: String,
    pub question_count: usize,
    pub glossary: Glossary,
}

/// 会话加载器
pub struct SessionLoader<S: LearningSetSource> {
    source: Arc<S>,
    timeout: Duration,
}

impl<S: LearningSetSource + 'static> SessionLoader<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source: Arc::new(source),
            timeout: config.request_timeout(),
        }
    }

    /// 并发获取题集和词汇表
    pub async fn fetch_catalog(&self) -> FetchResult<Catalog> {
        let (question_sets, glossaries) = futures::try_join!(
            self.with_timeout("fetch_question_sets", self.source.fetch_question_sets()),
            self.with_timeout("fetch_glossaries", self.source.fetch_glossaries()),
        )?;

        info!(
            "✓ 目录获取完成: {} 个题集, {} 个词汇表",
            question_sets.len(),
            glossaries.len()
        );
        Ok(Catalog {
            question_sets,
            glossaries,
        })
    }

    /// 获取题目并载入适配器，返回题目数量
    ///
    /// 获取在后台任务中执行；失败时不修改适配器
    pub async fn load_questions<C: AnswerCallback>(
        &self,
        adapter: &mut QuizQuestionAdapter<C>,
        set_id: &str,
    ) -> AppResult<usize> {
        let source = Arc::clone(&self.source);
        let id = set_id.to_string();
        let fetch = async move { source.fetch_questions(&id).await };

        match self.spawn_with_timeout("fetch_questions", fetch).await {
            Ok(questions) => {
                let count = questions.len();
                adapter.set_questions(questions);
                Ok(count)
            }
            Err(e) => {
                error!("❌ 获取题集 {} 失败，保留当前题目: {}", set_id, e);
                Err(e.into())
            }
        }
    }

    /// 下载学习集，把题目载入适配器并返回词汇表
    pub async fn load_learning_set<C: AnswerCallback>(
        &self,
        adapter: &mut QuizQuestionAdapter<C>,
        set_id: &str,
    ) -> AppResult<LoadedSet> {
        let source = Arc::clone(&self.source);
        let id = set_id.to_string();
        let fetch = async move { source.download_learning_set(&id).await };

        let set = match self.spawn_with_timeout("download_learning_set", fetch).await {
            Ok(set) => set,
            Err(e) => {
                error!("❌ 下载学习集 {} 失败，保留当前题目: {}", set_id, e);
                return Err(e.into());
            }
        };

        let question_set = set.question_set;
        log_set_loaded(
            &question_set.id,
            &question_set.name,
            question_set.questions.len(),
            set.glossary.terms.len(),
        );

        let loaded = LoadedSet {
            id: question_set.id,
            name: question_set.name,
            question_count: question_set.questions.len(),
            glossary: set.glossary,
        };
        adapter.set_questions(question_set.questions);
        Ok(loaded)
    }

    /// 在 tokio 工作线程上执行获取，不阻塞调用方所在的线程
    ///
    /// 超时后中止后台任务
    async fn spawn_with_timeout<T, F>(&self, operation: &str, fetch: F) -> FetchResult<T>
    where
        T: Send + 'static,
        F: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let mut handle = tokio::spawn(fetch);
        match tokio::time::timeout(self.timeout, &mut handle).await {
            Ok(joined) => joined.map_err(|e| FetchError::Task {
                message: e.to_string(),
            })?,
            Err(_) => {
                handle.abort();
                Err(self.timeout_error(operation))
            }
        }
    }

    async fn with_timeout<T, F>(&self, operation: &str, fetch: F) -> FetchResult<T>
    where
        F: Future<Output = FetchResult<T>>,
    {
        tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| self.timeout_error(operation))?
    }

    fn timeout_error(&self, operation: &str) -> FetchError {
        FetchError::Timeout {
            operation: operation.to_string(),
            seconds: self.timeout.as_secs(),
        }
    }
}
