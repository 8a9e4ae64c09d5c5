mod driver;
mod types;

pub use driver::{RedditConfig, RedditDriver};
