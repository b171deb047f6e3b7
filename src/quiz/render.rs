//! 渲染层
//!
//! 把一道题目渲染成与界面无关的描述。渲染结果只取决于
//! (题目, 位置, 是否显示提示, 已有答案)，不读取任何其他状态。

use tracing::warn;

use crate::models::{Answer, Question};
use crate::quiz::variant::ItemVariant;

/// 选择题网格的固定容量
pub const MAX_MULTIPLE_CHOICE_ANSWERS: usize = 6;

/// 多行输入的最大可见行数
pub const MULTI_LINE_MAX_LINES: u8 = 3;

/// 可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// 显示
    Visible,
    /// 不显示但占位
    Invisible,
    /// 不显示也不占位
    Gone,
}

/// 输入法首字母大写策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capitalization {
    None,
    Sentences,
}

/// 输入法动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Done,
    Next,
    Other,
}

/// 提示文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub visibility: Visibility,
}

impl Transcript {
    fn new(question: &Question, show_hint: bool) -> Self {
        Self {
            text: question.transcript.clone(),
            visibility: if show_hint {
                Visibility::Visible
            } else {
                Visibility::Gone
            },
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// 文本输入框
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    /// 预填内容
    pub text: String,
    pub max_lines: u8,
    pub horizontally_scrolling: bool,
    pub capitalization: Capitalization,
    /// 输入法 "完成" 动作是否触发提交
    pub submit_on_done: bool,
}

impl InputField {
    fn single_line(text: String) -> Self {
        Self {
            text,
            max_lines: 1,
            horizontally_scrolling: true,
            capitalization: Capitalization::Sentences,
            submit_on_done: true,
        }
    }

    fn multi_line(text: String) -> Self {
        Self {
            text,
            max_lines: MULTI_LINE_MAX_LINES,
            horizontally_scrolling: false,
            capitalization: Capitalization::None,
            submit_on_done: false,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.max_lines > 1
    }
}

/// 文本输入题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputItem {
    pub position: usize,
    pub prompt: String,
    pub transcript: Transcript,
    pub input: InputField,
}

/// 选择题网格中的一个格子
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceSlot {
    /// 真实选项
    Choice(Answer),
    /// 占位格：禁用且不可见
    Filler,
}

impl ChoiceSlot {
    pub fn answer(&self) -> Option<&Answer> {
        match self {
            ChoiceSlot::Choice(answer) => Some(answer),
            ChoiceSlot::Filler => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ChoiceSlot::Choice(_))
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            ChoiceSlot::Choice(_) => Visibility::Visible,
            ChoiceSlot::Filler => Visibility::Invisible,
        }
    }
}

/// 选择题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiChoiceItem {
    pub position: usize,
    pub prompt: String,
    pub transcript: Transcript,
    pub slots: Vec<ChoiceSlot>,
}

impl MultiChoiceItem {
    pub fn choice_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_enabled()).count()
    }

    pub fn filler_count(&self) -> usize {
        self.slots.len() - self.choice_count()
    }
}

/// 一道题目的渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedItem {
    TextInput(TextInputItem),
    MultiChoice(MultiChoiceItem),
}

impl RenderedItem {
    pub fn position(&self) -> usize {
        match self {
            RenderedItem::TextInput(item) => item.position,
            RenderedItem::MultiChoice(item) => item.position,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            RenderedItem::TextInput(item) => &item.prompt,
            RenderedItem::MultiChoice(item) => &item.prompt,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        match self {
            RenderedItem::TextInput(item) => &item.transcript,
            RenderedItem::MultiChoice(item) => &item.transcript,
        }
    }

    pub fn variant(&self) -> ItemVariant {
        match self {
            RenderedItem::TextInput(item) => ItemVariant::TextInput {
                multiline: item.input.is_multiline(),
            },
            RenderedItem::MultiChoice(_) => ItemVariant::MultiChoice,
        }
    }
}

/// 占位格数量：`6 - n`，不会为负
pub fn filler_slots_needed(answer_count: usize) -> usize {
    MAX_MULTIPLE_CHOICE_ANSWERS.saturating_sub(answer_count)
}

/// 渲染文本输入题
pub fn render_text_input(
    position: usize,
    question: &Question,
    multiline: bool,
    show_hint: bool,
    existing_answer: Option<&Answer>,
) -> TextInputItem {
    let text = existing_answer.map(|a| a.text.clone()).unwrap_or_default();
    TextInputItem {
        position,
        prompt: question.text.clone(),
        transcript: Transcript::new(question, show_hint),
        input: if multiline {
            InputField::multi_line(text)
        } else {
            InputField::single_line(text)
        },
    }
}

/// 渲染选择题
pub fn render_multi_choice(position: usize, question: &Question, show_hint: bool) -> MultiChoiceItem {
    if question.answers.len() > MAX_MULTIPLE_CHOICE_ANSWERS {
        warn!(
            "[题目 {}] ⚠️ 选项数 {} 超过网格容量 {}",
            position,
            question.answers.len(),
            MAX_MULTIPLE_CHOICE_ANSWERS
        );
    }

    let fillers = filler_slots_needed(question.answers.len());
    let slots = question
        .answers
        .iter()
        .cloned()
        .map(ChoiceSlot::Choice)
        .chain(std::iter::repeat(ChoiceSlot::Filler).take(fillers))
        .collect();

    MultiChoiceItem {
        position,
        prompt: question.text.clone(),
        transcript: Transcript::new(question, show_hint),
        slots,
    }
}

/// 按形态渲染一道题目
pub fn render_item(
    position: usize,
    question: &Question,
    variant: ItemVariant,
    show_hint: bool,
    existing_answer: Option<&Answer>,
) -> RenderedItem {
    match variant {
        ItemVariant::TextInput { multiline } => RenderedItem::TextInput(render_text_input(
            position,
            question,
            multiline,
            show_hint,
            existing_answer,
        )),
        ItemVariant::MultiChoice => {
            RenderedItem::MultiChoice(render_multi_choice(position, question, show_hint))
        }
    }
}
