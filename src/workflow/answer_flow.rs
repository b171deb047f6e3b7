//! 作答处理 - 流程层
//!
//! 核心职责：接收适配器发出的作答事件，决定是否记录。
//! 校验规则只在这里实现，适配器本身不做任何校验。

use chrono::{DateTime, Duration, Local};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{Answer, Question};
use crate::quiz::{AnswerCallback, AnswerDecision};
use crate::utils::logging::truncate_text;

/// 一次作答事件
#[derive(Debug, Clone)]
pub struct AnswerEvent {
    pub question: Question,
    pub answer: Answer,
    pub decision: AnswerDecision,
    pub answered_at: DateTime<Local>,
}

/// 作答统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerStats {
    pub submitted: usize,
    pub recorded: usize,
    pub rejected: usize,
}

/// 作答记录器
pub struct AnswerRecorder {
    reject_blank_answers: bool,
    history: Vec<AnswerEvent>,
}

impl AnswerRecorder {
    pub fn new(config: &Config) -> Self {
        Self {
            reject_blank_answers: config.reject_blank_answers,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[AnswerEvent] {
        &self.history
    }

    pub fn stats(&self) -> AnswerStats {
        self.history
            .iter()
            .fold(AnswerStats::default(), |mut stats, event| {
                stats.submitted += 1;
                match event.decision {
                    AnswerDecision::Record => stats.recorded += 1,
                    AnswerDecision::Discard => stats.rejected += 1,
                }
                stats
            })
    }

    /// 第一次到最后一次作答之间的用时，没有作答时返回 None
    pub fn answering_span(&self) -> Option<Duration> {
        let first = self.history.first()?;
        let last = self.history.last()?;
        Some(last.answered_at - first.answered_at)
    }

    fn decide(&self, answer: &Answer) -> AnswerDecision {
        if self.reject_blank_answers && answer.text.trim().is_empty() {
            AnswerDecision::Discard
        } else {
            AnswerDecision::Record
        }
    }
}

impl AnswerCallback for AnswerRecorder {
    fn on_answer(&mut self, question: &Question, answer: &Answer) -> AnswerDecision {
        let decision = self.decide(answer);
        match decision {
            AnswerDecision::Record => info!(
                "✓ 已记录答案 \"{}\" (题目: {})",
                truncate_text(&answer.text, 40),
                truncate_text(&question.text, 40)
            ),
            AnswerDecision::Discard => warn!(
                "⚠️ 空白答案被拒绝，请重新作答 (题目: {})",
                truncate_text(&question.text, 40)
            ),
        }

        self.history.push(AnswerEvent {
            question: question.clone(),
            answer: answer.clone(),
            decision,
            answered_at: Local::now(),
        });
        decision
    }
}
