pub mod learning_set_client;

pub use learning_set_client::LearningSetClient;
