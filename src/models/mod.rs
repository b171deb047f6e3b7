pub mod learning_set;
pub mod loaders;
pub mod question;

pub use learning_set::{Glossary, GlossaryTerm, LearningSet, QuestionSet};
pub use loaders::{load_all_learning_sets, load_learning_set};
pub use question::{Answer, Question, QuestionType};
