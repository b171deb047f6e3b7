//! 学习集来源 - 用例层
//!
//! 只负责"获取题集 / 词汇表 / 学习集"能力，不持有任何会话状态。
//! 所有操作都是异步的，由调用方在后台任务中执行。

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::clients::LearningSetClient;
use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{self, Glossary, LearningSet, Question, QuestionSet};
use crate::services::mappers::{self, RawGlossary, RawLearningSet, RawQuestionSet};

/// 学习集来源
#[async_trait]
pub trait LearningSetSource: Send + Sync {
    /// 获取所有题集
    async fn fetch_question_sets(&self) -> FetchResult<Vec<QuestionSet>>;

    /// 获取所有词汇表
    async fn fetch_glossaries(&self) -> FetchResult<Vec<Glossary>>;

    /// 下载指定 id 的学习集（题集 + 词汇表）
    async fn download_learning_set(&self, set_id: &str) -> FetchResult<LearningSet>;

    /// 获取指定题集的题目列表
    async fn fetch_questions(&self, set_id: &str) -> FetchResult<Vec<Question>> {
        Ok(self.download_learning_set(set_id).await?.question_set.questions)
    }
}

#[async_trait]
impl<T: LearningSetSource + ?Sized> LearningSetSource for Box<T> {
    async fn fetch_question_sets(&self) -> FetchResult<Vec<QuestionSet>> {
        (**self).fetch_question_sets().await
    }

    async fn fetch_glossaries(&self) -> FetchResult<Vec<Glossary>> {
        (**self).fetch_glossaries().await
    }

    async fn download_learning_set(&self, set_id: &str) -> FetchResult<LearningSet> {
        (**self).download_learning_set(set_id).await
    }

    async fn fetch_questions(&self, set_id: &str) -> FetchResult<Vec<Question>> {
        (**self).fetch_questions(set_id).await
    }
}

/// 根据配置选择来源：配置了 API 地址时使用远程，否则使用本地目录
pub fn source_from_config(config: &Config) -> FetchResult<Box<dyn LearningSetSource>> {
    match &config.learning_set_api_url {
        Some(url) => Ok(Box::new(RemoteLearningSetSource::new(url.clone(), config)?)),
        None => Ok(Box::new(LocalLearningSetSource::new(
            config.learning_set_dir.clone(),
        ))),
    }
}

/// 本地目录来源：每个 TOML 文件是一个学习集
pub struct LocalLearningSetSource {
    folder: PathBuf,
}

impl LocalLearningSetSource {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

#[async_trait]
impl LearningSetSource for LocalLearningSetSource {
    async fn fetch_question_sets(&self) -> FetchResult<Vec<QuestionSet>> {
        let sets = models::load_all_learning_sets(&self.folder).await?;
        Ok(sets.into_iter().map(|s| s.question_set).collect())
    }

    async fn fetch_glossaries(&self) -> FetchResult<Vec<Glossary>> {
        let sets = models::load_all_learning_sets(&self.folder).await?;
        Ok(sets.into_iter().map(|s| s.glossary).collect())
    }

    async fn download_learning_set(&self, set_id: &str) -> FetchResult<LearningSet> {
        // 逐个解析，请求的学习集解析失败时直接返回错误而不是跳过
        for path in models::loaders::list_toml_files(&self.folder).await? {
            let set = models::load_learning_set(&path).await;
            match set {
                Ok(set) if set.id() == set_id => {
                    info!("✓ 已从 {} 加载学习集 {}", path.display(), set_id);
                    return Ok(set);
                }
                Ok(_) => {}
                Err(e) => {
                    if path.file_stem().and_then(|s| s.to_str()) == Some(set_id) {
                        return Err(e);
                    }
                    debug!("跳过无法解析的文件 {}: {}", path.display(), e);
                }
            }
        }

        Err(FetchError::NotFound {
            set_id: set_id.to_string(),
        })
    }
}

/// 远程 HTTP 来源
pub struct RemoteLearningSetSource {
    client: LearningSetClient,
}

impl RemoteLearningSetSource {
    pub fn new(base_url: impl Into<String>, config: &Config) -> FetchResult<Self> {
        Ok(Self {
            client: LearningSetClient::new(base_url, config)?,
        })
    }

    async fn get_list<T: serde::de::DeserializeOwned>(&self, path: &str) -> FetchResult<Vec<T>> {
        self.client
            .get_json::<Vec<T>>(path)
            .await?
            .ok_or_else(|| FetchError::Status {
                endpoint: format!("{}{}", self.client.base_url(), path),
                status: 404,
            })
    }
}

#[async_trait]
impl LearningSetSource for RemoteLearningSetSource {
    async fn fetch_question_sets(&self) -> FetchResult<Vec<QuestionSet>> {
        let raw: Vec<RawQuestionSet> = self.get_list("/question-sets").await?;
        raw.iter().map(mappers::map_question_set).collect()
    }

    async fn fetch_glossaries(&self) -> FetchResult<Vec<Glossary>> {
        let raw: Vec<RawGlossary> = self.get_list("/glossaries").await?;
        raw.iter().map(mappers::map_glossary).collect()
    }

    async fn download_learning_set(&self, set_id: &str) -> FetchResult<LearningSet> {
        let path = format!("/learning-sets/{}", set_id);
        let raw: RawLearningSet = self
            .client
            .get_json(&path)
            .await?
            .ok_or_else(|| FetchError::NotFound {
                set_id: set_id.to_string(),
            })?;

        let set = mappers::map_learning_set(&raw)?;
        set.ensure_paired(&format!("{}{}", self.client.base_url(), path), Some(set_id))?;
        info!(
            "✓ 已下载学习集 {} ({} 道题目, {} 个词条)",
            set.id(),
            set.question_set.questions.len(),
            set.glossary.terms.len()
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionType;
    use tempfile::TempDir;

    fn write_set(dir: &TempDir, file: &str, id: &str, question_count: usize) {
        let mut content = format!("[question_set]\nid = \"{id}\"\nname = \"{id}\"\n");
        for i in 0..question_count {
            content.push_str(&format!(
                "\n[[question_set.questions]]\ntext = \"Q{i}\"\ntype = \"FREE_FORM\"\n"
            ));
        }
        content.push_str(&format!("\n[glossary]\nid = \"{id}\"\nname = \"{id}\"\n"));
        std::fs::write(dir.path().join(file), content).unwrap();
    }

    #[tokio::test]
    async fn test_local_fetch_question_sets_and_glossaries() {
        let dir = TempDir::new().unwrap();
        write_set(&dir, "a.toml", "n5", 2);
        write_set(&dir, "b.toml", "n4", 1);
        let source = LocalLearningSetSource::new(dir.path());

        let sets = source.fetch_question_sets().await.unwrap();
        let ids: Vec<_> = sets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["n5", "n4"]);
        assert_eq!(source.fetch_glossaries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_local_fetch_questions() {
        let dir = TempDir::new().unwrap();
        write_set(&dir, "n5.toml", "n5", 3);
        let source = LocalLearningSetSource::new(dir.path());

        let questions = source.fetch_questions("n5").await.unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].question_type, QuestionType::FreeForm);
    }

    #[tokio::test]
    async fn test_local_unknown_set_is_not_found() {
        let dir = TempDir::new().unwrap();
        write_set(&dir, "n5.toml", "n5", 1);
        let source = LocalLearningSetSource::new(dir.path());

        let err = source.download_learning_set("n1").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_local_broken_requested_set_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("n3.toml"), "[question_set\n").unwrap();
        let source = LocalLearningSetSource::new(dir.path());

        let err = source.download_learning_set("n3").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_remote_download_learning_set() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/learning-sets/n5")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"questionSet":{"id":"n5","name":"N5","questions":[{"text":"ねこ","type":"SINGLE_INPUT","transcript":"neko"}]},
                    "glossary":{"id":"n5","name":"N5","terms":[]}}"#,
            )
            .create_async()
            .await;

        let source = RemoteLearningSetSource::new(server.url(), &Config::default()).unwrap();
        let questions = source.fetch_questions("n5").await.unwrap();

        mock.assert_async().await;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].transcript, "neko");
    }

    #[tokio::test]
    async fn test_remote_missing_set_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/learning-sets/n0")
            .with_status(404)
            .create_async()
            .await;

        let source = RemoteLearningSetSource::new(server.url(), &Config::default()).unwrap();
        let err = source.download_learning_set("n0").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remote_rejects_mismatched_ids() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/learning-sets/n5")
            .with_status(200)
            .with_body(
                r#"{"questionSet":{"id":"n4","name":"N4","questions":[]},
                    "glossary":{"id":"n3","name":"N3","terms":[]}}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/learning-sets/n2")
            .with_status(200)
            .with_body(
                r#"{"questionSet":{"id":"n1","name":"N1","questions":[]},
                    "glossary":{"id":"n1","name":"N1","terms":[]}}"#,
            )
            .create_async()
            .await;

        let source = RemoteLearningSetSource::new(server.url(), &Config::default()).unwrap();

        let err = source.download_learning_set("n5").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));

        let err = source.download_learning_set("n2").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { ref message, .. } if message.contains("n2")));
    }

    #[tokio::test]
    async fn test_remote_server_error_and_bad_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/question-sets")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/glossaries")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let source = RemoteLearningSetSource::new(server.url(), &Config::default()).unwrap();

        let err = source.fetch_question_sets().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        assert!(err.is_network());

        let err = source.fetch_glossaries().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }
}
