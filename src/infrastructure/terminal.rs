//! 终端界面 - 基础设施层
//!
//! 把渲染结果输出为纯文本，并解析用户在终端输入的一行内容。
//! 不认识会话状态，只处理 `RenderedItem` 和字符串。

use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;

use crate::quiz::render::MULTI_LINE_MAX_LINES;
use crate::quiz::{ChoiceSlot, DataSetObserver, ItemVariant, RenderedItem};

/// 终端中的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    /// 切换提示
    ToggleHint,
    /// 跳过当前题目
    Skip,
    /// 结束测验
    Quit,
    /// 提交多行输入
    Submit,
    /// 一行文本
    Text(String),
    /// 选择第 n 个格子（0-based）
    Choice(usize),
    /// 无法识别
    Invalid(String),
}

/// 一行输入对应的会话动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Quit,
    Skip,
    ToggleHint,
    /// 显式提交文本
    SubmitText(String),
    /// 输入法“完成”动作
    EditorDone(String),
    SelectChoice(usize),
    /// 已加入多行草稿，当前行数
    Buffered(usize),
    /// 不改变会话，只给用户提示
    Notice(String),
}

/// 多行题目的输入草稿
///
/// 只有 `:submit` 才会取出草稿提交，行数达到上限后拒绝继续输入
#[derive(Debug, Clone, Default)]
pub struct MultiLineDraft {
    lines: Vec<String>,
}

impl MultiLineDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一行，已满时返回 false
    pub fn push(&mut self, line: String) -> bool {
        if self.lines.len() >= MULTI_LINE_MAX_LINES as usize {
            return false;
        }
        self.lines.push(line);
        true
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// 取出草稿内容，草稿为空时返回 None
    pub fn take(&mut self) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        let text = self.lines.join("\n");
        self.lines.clear();
        Some(text)
    }
}

/// 把解析后的输入转换为会话动作
///
/// # 参数
/// - `input`: 解析后的一行输入
/// - `variant`: 当前题目的渲染形态
/// - `draft`: 当前题目的多行草稿
pub fn route_input(input: TerminalInput, variant: ItemVariant, draft: &mut MultiLineDraft) -> SessionAction {
    match input {
        TerminalInput::Quit => SessionAction::Quit,
        TerminalInput::Skip => {
            draft.clear();
            SessionAction::Skip
        }
        TerminalInput::ToggleHint => SessionAction::ToggleHint,
        TerminalInput::Submit => match variant {
            ItemVariant::TextInput { multiline: true } => match draft.take() {
                Some(text) => SessionAction::SubmitText(text),
                None => SessionAction::Notice("请先输入内容再 :submit".to_string()),
            },
            ItemVariant::TextInput { multiline: false } => {
                SessionAction::Notice("单行题目请直接输入答案并回车".to_string())
            }
            ItemVariant::MultiChoice => SessionAction::Notice("请输入选项编号".to_string()),
        },
        TerminalInput::Text(text) => match variant {
            ItemVariant::TextInput { multiline: true } => {
                if draft.push(text) {
                    SessionAction::Buffered(draft.len())
                } else {
                    SessionAction::Notice(format!(
                        "最多 {} 行，请输入 :submit 提交",
                        MULTI_LINE_MAX_LINES
                    ))
                }
            }
            ItemVariant::TextInput { multiline: false } => SessionAction::EditorDone(text),
            ItemVariant::MultiChoice => SessionAction::Notice("请输入选项编号".to_string()),
        },
        TerminalInput::Choice(slot) => SessionAction::SelectChoice(slot),
        TerminalInput::Invalid(input) => SessionAction::Notice(format!("无法识别的输入: {}", input)),
    }
}

/// 重绘标记
///
/// 适配器通知数据变更后置位，界面取走后清零
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出并清除标记
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl DataSetObserver for RedrawFlag {
    fn on_data_set_changed(&mut self, _revision: u64) {
        self.0.set(true);
    }
}

/// 渲染为纯文本
pub fn render_to_text(item: &RenderedItem, total: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── 题目 {}/{} ──", item.position() + 1, total);
    let _ = writeln!(out, "{}", item.prompt());

    let transcript = item.transcript();
    if transcript.is_visible() && !transcript.text.is_empty() {
        let _ = writeln!(out, "💡 {}", transcript.text);
    }

    match item {
        RenderedItem::TextInput(text_item) => {
            let hint = if text_item.input.is_multiline() {
                format!("(最多 {} 行，输入 :submit 提交)", text_item.input.max_lines)
            } else {
                "(回车提交)".to_string()
            };
            if text_item.input.text.is_empty() {
                let _ = writeln!(out, "> {}", hint);
            } else {
                let _ = writeln!(out, "> [{}] {}", text_item.input.text, hint);
            }
        }
        RenderedItem::MultiChoice(choice_item) => {
            for (index, slot) in choice_item.slots.iter().enumerate() {
                // 占位格不可见，但保留编号
                if let ChoiceSlot::Choice(answer) = slot {
                    let _ = writeln!(out, "  {}. {}", index + 1, answer.text);
                }
            }
        }
    }
    out
}

/// 解析一行输入
pub fn parse_input(line: &str, variant: ItemVariant) -> TerminalInput {
    let trimmed = line.trim();
    match trimmed {
        ":hint" => return TerminalInput::ToggleHint,
        ":skip" => return TerminalInput::Skip,
        ":quit" | ":q" => return TerminalInput::Quit,
        ":submit" => return TerminalInput::Submit,
        _ => {}
    }

    match variant {
        ItemVariant::MultiChoice => match trimmed.parse::<usize>() {
            Ok(n) if n >= 1 => TerminalInput::Choice(n - 1),
            _ => TerminalInput::Invalid(trimmed.to_string()),
        },
        ItemVariant::TextInput { .. } => TerminalInput::Text(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}
