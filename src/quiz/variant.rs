//! 题目类型 → 渲染形态

use crate::models::QuestionType;

/// 渲染形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemVariant {
    /// 文本输入，`multiline` 为真时是多行输入
    TextInput { multiline: bool },
    /// 选择题按钮网格
    MultiChoice,
}

impl ItemVariant {
    /// 单行输入
    pub const SINGLE_LINE: ItemVariant = ItemVariant::TextInput { multiline: false };
    /// 多行输入
    pub const MULTI_LINE: ItemVariant = ItemVariant::TextInput { multiline: true };

    /// 根据题目类型选择渲染形态
    ///
    /// 未知类型退化为单行输入
    pub fn for_type(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::SingleInput | QuestionType::Unknown => Self::SINGLE_LINE,
            QuestionType::FreeForm => Self::MULTI_LINE,
            QuestionType::MultipleChoice => ItemVariant::MultiChoice,
        }
    }

    /// 稳定的形态标识，交给渲染层复用视图
    pub fn view_type(self) -> u8 {
        match self {
            ItemVariant::TextInput { multiline: false } => 1,
            ItemVariant::MultiChoice => 2,
            ItemVariant::TextInput { multiline: true } => 3,
        }
    }

    pub fn is_text_input(self) -> bool {
        matches!(self, ItemVariant::TextInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_type_maps_to_a_variant() {
        assert_eq!(ItemVariant::for_type(QuestionType::SingleInput), ItemVariant::SINGLE_LINE);
        assert_eq!(ItemVariant::for_type(QuestionType::FreeForm), ItemVariant::MULTI_LINE);
        assert_eq!(ItemVariant::for_type(QuestionType::MultipleChoice), ItemVariant::MultiChoice);
        assert_eq!(
            ItemVariant::for_type(QuestionType::Unknown),
            ItemVariant::for_type(QuestionType::SingleInput)
        );
    }

    #[test]
    fn test_view_types_are_distinct() {
        let variants = [ItemVariant::SINGLE_LINE, ItemVariant::MULTI_LINE, ItemVariant::MultiChoice];
        let ids: HashSet<u8> = variants.iter().map(|v| v.view_type()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ItemVariant::SINGLE_LINE.view_type(), 1);
        assert_eq!(ItemVariant::MultiChoice.view_type(), 2);
        assert_eq!(ItemVariant::MULTI_LINE.view_type(), 3);
    }

    #[test]
    fn test_lookup_is_stable() {
        for question_type in QuestionType::ALL {
            let first = ItemVariant::for_type(question_type).view_type();
            for _ in 0..3 {
                assert_eq!(ItemVariant::for_type(question_type).view_type(), first);
            }
        }
    }
}
