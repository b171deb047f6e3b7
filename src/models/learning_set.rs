use serde::{Deserialize, Serialize};

use crate::error::{FetchError, FetchResult};
use crate::models::question::Question;

/// 题集
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// 词汇表条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub definition: String,
}

/// 词汇表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glossary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub terms: Vec<GlossaryTerm>,
}

/// 学习集：同一 id 的题集与词汇表，作为整体下载
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningSet {
    pub question_set: QuestionSet,
    pub glossary: Glossary,
    /// 来源文件路径（仅本地加载时设置）
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl LearningSet {
    pub fn id(&self) -> &str {
        &self.question_set.id
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    /// 校验题集与词汇表 id 一致
    ///
    /// # 参数
    /// - `origin`: 数据来源（文件路径或接口地址），用于错误信息
    /// - `requested_id`: 请求的学习集 id，给定时两者都必须与之相同
    pub fn ensure_paired(&self, origin: &str, requested_id: Option<&str>) -> FetchResult<()> {
        if self.question_set.id != self.glossary.id {
            return Err(FetchError::parse(
                origin,
                format!(
                    "题集 id '{}' 与词汇表 id '{}' 不一致",
                    self.question_set.id, self.glossary.id
                ),
            ));
        }
        if let Some(requested) = requested_id {
            if self.question_set.id != requested {
                return Err(FetchError::parse(
                    origin,
                    format!("请求学习集 '{}'，返回的却是 '{}'", requested, self.question_set.id),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learning_set(question_set_id: &str, glossary_id: &str) -> LearningSet {
        LearningSet {
            question_set: QuestionSet {
                id: question_set_id.to_string(),
                name: "N5".to_string(),
                questions: Vec::new(),
            },
            glossary: Glossary {
                id: glossary_id.to_string(),
                name: "N5".to_string(),
                terms: Vec::new(),
            },
            file_path: None,
        }
    }

    #[test]
    fn test_ensure_paired() {
        assert!(learning_set("n5", "n5").ensure_paired("n5.toml", None).is_ok());
        assert!(learning_set("n5", "n5").ensure_paired("api", Some("n5")).is_ok());
        assert!(matches!(
            learning_set("n5", "n4").ensure_paired("n5.toml", None),
            Err(FetchError::Parse { .. })
        ));
        assert!(matches!(
            learning_set("n4", "n4").ensure_paired("api", Some("n5")),
            Err(FetchError::Parse { .. })
        ));
    }
}
