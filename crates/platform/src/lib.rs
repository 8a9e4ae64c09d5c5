mod error;
mod traits;
pub mod webhook;
pub mod wiki;

mod drivers;

pub use drivers::http::{RedditConfig, RedditDriver};
pub use error::PlatformError;
pub use traits::{PlatformApi, UserFlair, WikiPage};
pub use webhook::{AlertDispatcher, AlertEvent, DeliveryError};
pub use wiki::append_wiki_log;
