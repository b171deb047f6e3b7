pub mod answer_flow;

pub use answer_flow::{AnswerEvent, AnswerRecorder, AnswerStats};
