pub mod adapter;
pub mod render;
pub mod variant;

pub use adapter::{AnswerCallback, AnswerDecision, DataSetObserver, QuizQuestionAdapter, SessionState};
pub use render::{
    ChoiceSlot, EditorAction, MultiChoiceItem, RenderedItem, TextInputItem, Visibility,
    MAX_MULTIPLE_CHOICE_ANSWERS,
};
pub use variant::ItemVariant;
