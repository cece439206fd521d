mod types;

pub use types::{QuizSession, SessionError};
