pub mod contact;
mod lenient;
pub mod personal_info;
pub mod question;

pub use contact::{ContactReply, ContactSubmission};
pub use personal_info::PersonalInfo;
pub use question::{AnswerReply, ChatEntry, ErrorReply, QuestionRequest};
