pub mod learning_set_source;
pub mod mappers;

pub use learning_set_source::{
    source_from_config, LearningSetSource, LocalLearningSetSource, RemoteLearningSetSource,
};
