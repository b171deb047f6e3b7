use serde::{Deserialize, Serialize};

/// 题目类型
///
/// 无法识别的类型一律反序列化为 `Unknown`，不会报错
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// 单行输入
    SingleInput,
    /// 多行自由作答
    FreeForm,
    /// 选择题
    MultipleChoice,
    /// 未知类型
    #[default]
    #[serde(other)]
    Unknown,
}

impl QuestionType {
    /// 所有取值（含 Unknown）
    pub const ALL: [QuestionType; 4] = [
        QuestionType::SingleInput,
        QuestionType::FreeForm,
        QuestionType::MultipleChoice,
        QuestionType::Unknown,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::SingleInput => "SINGLE_INPUT",
            QuestionType::FreeForm => "FREE_FORM",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 答案
///
/// 既可以是选择题的候选项，也可以是用户提交的文本
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 题目
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Question {
    /// 题干
    pub text: String,
    /// 提示 / 讲解，仅在开启提示时显示
    #[serde(default)]
    pub transcript: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    /// 候选答案，仅对选择题有意义
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            text: text.into(),
            question_type,
            ..Default::default()
        }
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    pub fn with_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers = answers.into_iter().map(Answer::new).collect();
        self
    }
}
