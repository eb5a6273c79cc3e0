mod user;

pub use user::{User, UserDraft, UserId};
