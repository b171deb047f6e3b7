pub mod terminal;

pub use terminal::{MultiLineDraft, RedrawFlag, SessionAction, TerminalInput};
