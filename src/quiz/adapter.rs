//! 题目列表适配器 - 会话核心
//!
//! 持有当前题目列表、按位置缓存的答案以及全局提示开关。
//! 每次影响渲染的状态变更都会显式通知观察者做一次完整重绘。
//!
//! 状态流转：
//! 1. 空（未设置题目）
//! 2. `set_questions` → 已加载（答案缓存清空）
//! 3. `set_show_hint` / 记录答案 → 仍为已加载
//! 4. 再次 `set_questions` → 重新开始，旧答案全部失效

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::models::{Answer, Question};
use crate::quiz::render::{self, EditorAction, RenderedItem};
use crate::quiz::variant::ItemVariant;

/// 回调对一次作答的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerDecision {
    /// 记录到答案缓存
    Record,
    /// 不记录（例如校验失败，需要重新作答）
    Discard,
}

/// 作答回调
///
/// 用户提交或选择答案时同步调用，由回调决定是否记录
pub trait AnswerCallback {
    fn on_answer(&mut self, question: &Question, answer: &Answer) -> AnswerDecision;
}

impl<F> AnswerCallback for F
where
    F: FnMut(&Question, &Answer) -> AnswerDecision,
{
    fn on_answer(&mut self, question: &Question, answer: &Answer) -> AnswerDecision {
        self(question, answer)
    }
}

/// 数据变更观察者，收到通知后应重绘全部条目
pub trait DataSetObserver {
    fn on_data_set_changed(&mut self, revision: u64);
}

/// 会话状态
///
/// 三个字段总是一起读写；`replace_questions` 同时替换题目并清空答案
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    questions: Vec<Question>,
    user_answers: HashMap<usize, Answer>,
    show_hint: bool,
}

impl SessionState {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn user_answers(&self) -> &HashMap<usize, Answer> {
        &self.user_answers
    }

    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    fn replace_questions(&mut self, questions: Vec<Question>) {
        self.user_answers.clear();
        self.questions = questions;
    }

    fn question_at(&self, position: usize) -> &Question {
        assert!(
            position < self.questions.len(),
            "题目位置 {} 超出范围 [0, {})",
            position,
            self.questions.len()
        );
        &self.questions[position]
    }
}

/// 题目列表适配器
pub struct QuizQuestionAdapter<C: AnswerCallback> {
    callback: C,
    state: SessionState,
    observers: Vec<Box<dyn DataSetObserver>>,
    revision: u64,
}

impl<C: AnswerCallback> QuizQuestionAdapter<C> {
    /// 创建空的适配器
    pub fn new(callback: C) -> Self {
        Self {
            callback,
            state: SessionState::default(),
            observers: Vec::new(),
            revision: 0,
        }
    }

    /// 注册数据变更观察者
    pub fn register_observer(&mut self, observer: Box<dyn DataSetObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> &[Question] {
        self.state.questions()
    }

    pub fn user_answers(&self) -> &HashMap<usize, Answer> {
        self.state.user_answers()
    }

    pub fn show_hint(&self) -> bool {
        self.state.show_hint()
    }

    pub fn is_empty(&self) -> bool {
        self.state.questions.is_empty()
    }

    /// 已发出的重绘通知次数
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }

    pub fn into_callback(self) -> C {
        self.callback
    }

    /// 替换题目列表，清空答案缓存并重绘
    pub fn set_questions(&mut self, questions: Vec<Question>) {
        info!(
            "📋 载入 {} 道题目，清空 {} 条已有答案",
            questions.len(),
            self.state.user_answers.len()
        );
        self.state.replace_questions(questions);
        self.notify_data_set_changed();
    }

    /// 切换提示显示并重绘
    pub fn set_show_hint(&mut self, show_hint: bool) {
        debug!("提示显示: {} → {}", self.state.show_hint, show_hint);
        self.state.show_hint = show_hint;
        self.notify_data_set_changed();
    }

    /// 记录某个位置的答案，覆盖旧值
    ///
    /// 不触发重绘
    pub fn record_answer(&mut self, position: usize, answer: Answer) {
        self.state.question_at(position);
        self.state.user_answers.insert(position, answer);
    }

    pub fn item_count(&self) -> usize {
        self.state.questions.len()
    }

    pub fn question(&self, position: usize) -> &Question {
        self.state.question_at(position)
    }

    /// 某个位置的渲染形态
    pub fn item_variant(&self, position: usize) -> ItemVariant {
        ItemVariant::for_type(self.state.question_at(position).question_type)
    }

    /// 某个位置的稳定形态标识
    pub fn item_view_type(&self, position: usize) -> u8 {
        self.item_variant(position).view_type()
    }

    /// 渲染单个位置
    pub fn render(&self, position: usize) -> RenderedItem {
        let question = self.state.question_at(position);
        render::render_item(
            position,
            question,
            ItemVariant::for_type(question.question_type),
            self.state.show_hint,
            self.state.user_answers.get(&position),
        )
    }

    /// 渲染全部位置
    pub fn render_all(&self) -> Vec<RenderedItem> {
        (0..self.item_count()).map(|p| self.render(p)).collect()
    }

    /// 通过提交按钮提交文本答案
    ///
    /// 非文本输入题返回 `None`
    pub fn submit_text(&mut self, position: usize, text: &str) -> Option<AnswerDecision> {
        if !self.item_variant(position).is_text_input() {
            warn!("[题目 {}] ⚠️ 非文本输入题，忽略文本提交", position);
            return None;
        }
        Some(self.dispatch_answer(position, Answer::new(text)))
    }

    /// 输入法动作
    ///
    /// 只有单行输入题的 "完成" 动作会触发提交
    pub fn editor_action(
        &mut self,
        position: usize,
        action: EditorAction,
        text: &str,
    ) -> Option<AnswerDecision> {
        if self.item_variant(position) != ItemVariant::SINGLE_LINE || action != EditorAction::Done {
            return None;
        }
        Some(self.dispatch_answer(position, Answer::new(text)))
    }

    /// 点击选择题的第 `slot` 个格子
    ///
    /// 占位格及非选择题返回 `None`
    pub fn select_choice(&mut self, position: usize, slot: usize) -> Option<AnswerDecision> {
        if self.item_variant(position) != ItemVariant::MultiChoice {
            warn!("[题目 {}] ⚠️ 非选择题，忽略选项点击", position);
            return None;
        }
        let answer = self.state.questions[position].answers.get(slot)?.clone();
        Some(self.dispatch_answer(position, answer))
    }

    fn dispatch_answer(&mut self, position: usize, answer: Answer) -> AnswerDecision {
        let question = &self.state.questions[position];
        let decision = self.callback.on_answer(question, &answer);
        debug!("[题目 {}] 作答 {:?} → {:?}", position, answer.text, decision);

        if decision == AnswerDecision::Record {
            self.state.user_answers.insert(position, answer);
        }
        decision
    }

    fn notify_data_set_changed(&mut self) {
        self.revision += 1;
        for observer in &mut self.observers {
            observer.on_data_set_changed(self.revision);
        }
    }
}
