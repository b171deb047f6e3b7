//! 远程数据 → 领域模型的映射
//!
//! 远程接口的字段都可能缺失，映射过程只对缺失的 id 报错，其余字段取默认值

use std::sync::OnceLock;

use phf::phf_map;
use regex::Regex;
use serde::Deserialize;

use crate::error::{FetchError, FetchResult};
use crate::models::{Answer, Glossary, GlossaryTerm, LearningSet, Question, QuestionSet, QuestionType};

/// 题目类型代码表（小写，分隔符统一为 `_`）
static QUESTION_TYPE_CODES: phf::Map<&'static str, QuestionType> = phf_map! {
    "single_input" => QuestionType::SingleInput,
    "input" => QuestionType::SingleInput,
    "short" => QuestionType::SingleInput,
    "free_form" => QuestionType::FreeForm,
    "long" => QuestionType::FreeForm,
    "essay" => QuestionType::FreeForm,
    "multiple_choice" => QuestionType::MultipleChoice,
    "choice" => QuestionType::MultipleChoice,
    "mc" => QuestionType::MultipleChoice,
};

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-]+").expect("constant regex"))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswer {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub text: Option<String>,
    pub transcript: Option<String>,
    #[serde(rename = "type")]
    pub type_code: Option<String>,
    pub answers: Option<Vec<RawAnswer>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestionSet {
    pub id: Option<String>,
    pub name: Option<String>,
    pub questions: Option<Vec<RawQuestion>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGlossaryTerm {
    pub term: Option<String>,
    pub transcript: Option<String>,
    pub definition: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGlossary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub terms: Option<Vec<RawGlossaryTerm>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLearningSet {
    pub question_set: RawQuestionSet,
    pub glossary: RawGlossary,
}

/// 解析题目类型代码，无法识别时返回 `Unknown`
pub fn parse_question_type(code: Option<&str>) -> QuestionType {
    let Some(code) = code else {
        return QuestionType::Unknown;
    };
    let normalized = separator_regex()
        .replace_all(code.trim(), "_")
        .to_lowercase();

    QUESTION_TYPE_CODES
        .get(normalized.as_str())
        .copied()
        .unwrap_or(QuestionType::Unknown)
}

/// 合并连续空白并去除首尾空白
pub fn normalize_text(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn map_answer(raw: &RawAnswer) -> Answer {
    Answer::new(normalize_text(raw.text.as_deref()))
}

pub fn map_question(raw: &RawQuestion) -> Question {
    Question {
        text: normalize_text(raw.text.as_deref()),
        transcript: normalize_text(raw.transcript.as_deref()),
        question_type: parse_question_type(raw.type_code.as_deref()),
        answers: raw
            .answers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(map_answer)
            .collect(),
    }
}

pub fn map_question_set(raw: &RawQuestionSet) -> FetchResult<QuestionSet> {
    let id = required_id(raw.id.as_deref(), "question_set")?;
    Ok(QuestionSet {
        name: normalize_text(raw.name.as_deref()),
        questions: raw
            .questions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(map_question)
            .collect(),
        id,
    })
}

pub fn map_glossary(raw: &RawGlossary) -> FetchResult<Glossary> {
    let id = required_id(raw.id.as_deref(), "glossary")?;
    Ok(Glossary {
        name: normalize_text(raw.name.as_deref()),
        terms: raw
            .terms
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|t| GlossaryTerm {
                term: normalize_text(t.term.as_deref()),
                transcript: normalize_text(t.transcript.as_deref()),
                definition: normalize_text(t.definition.as_deref()),
            })
            .collect(),
        id,
    })
}

pub fn map_learning_set(raw: &RawLearningSet) -> FetchResult<LearningSet> {
    Ok(LearningSet {
        question_set: map_question_set(&raw.question_set)?,
        glossary: map_glossary(&raw.glossary)?,
        file_path: None,
    })
}

fn required_id(id: Option<&str>, origin: &str) -> FetchResult<String> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(FetchError::parse(origin, "缺少 id 字段")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_type_codes() {
        assert_eq!(parse_question_type(Some("SINGLE_INPUT")), QuestionType::SingleInput);
        assert_eq!(parse_question_type(Some("free-form")), QuestionType::FreeForm);
        assert_eq!(parse_question_type(Some("Multiple Choice")), QuestionType::MultipleChoice);
        assert_eq!(parse_question_type(Some(" mc ")), QuestionType::MultipleChoice);
        assert_eq!(parse_question_type(Some("drawing")), QuestionType::Unknown);
        assert_eq!(parse_question_type(None), QuestionType::Unknown);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(Some("  capital   of\n France ")), "capital of France");
        assert_eq!(normalize_text(None), "");
    }

    #[test]
    fn test_map_question_defaults() {
        let raw: RawQuestion = serde_json::from_str(r#"{"text":"Q1"}"#).unwrap();
        let question = map_question(&raw);
        assert_eq!(question.text, "Q1");
        assert_eq!(question.transcript, "");
        assert_eq!(question.question_type, QuestionType::Unknown);
        assert!(question.answers.is_empty());
    }

    #[test]
    fn test_map_learning_set() {
        let raw: RawLearningSet = serde_json::from_str(
            r#"{
                "questionSet": {
                    "id": "n5",
                    "name": "JLPT  N5",
                    "questions": [
                        {"text": "山", "type": "choice", "answers": [{"text": "やま"}, {"text": "かわ"}]}
                    ]
                },
                "glossary": {"id": "n5", "terms": [{"term": "山", "definition": "mountain"}]}
            }"#,
        )
        .unwrap();

        let set = map_learning_set(&raw).unwrap();
        assert_eq!(set.question_set.name, "JLPT N5");
        assert_eq!(set.question_set.questions[0].answers.len(), 2);
        assert_eq!(set.glossary.name, "");
        assert_eq!(set.glossary.terms[0].transcript, "");
    }

    #[test]
    fn test_missing_id_is_parse_error() {
        let raw = RawQuestionSet::default();
        assert!(matches!(
            map_question_set(&raw),
            Err(FetchError::Parse { .. })
        ));
    }
}
