mod models;
mod permissions;
mod settings;
pub mod audit;
pub mod templates;

pub use models::{
    Actor, Comment, Decision, DenialReason, InvalidSubredditName, ModPermission, PinRequest,
    PinnedComment, Post, Role, SubredditName,
};
pub use permissions::resolve;
pub use settings::SpotlightSettings;
