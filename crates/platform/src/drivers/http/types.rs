//! Serde envelopes for the platform's REST responses. Only the fields the
//! driver reads are declared.

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<Thing<T>>,
}

#[derive(Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

#[derive(Deserialize)]
pub struct CommentInfo {
    pub name: String,
    pub link_id: String,
    pub author: String,
    #[serde(default)]
    pub body: String,
    pub permalink: String,
}

#[derive(Deserialize)]
pub struct PostInfo {
    pub name: String,
    pub author: String,
    pub permalink: String,
}

// The moderator listing nests its entries directly, without a Thing wrapper.
#[derive(Deserialize)]
pub struct ModeratorListing {
    pub data: ModeratorListingData,
}

#[derive(Deserialize)]
pub struct ModeratorListingData {
    pub children: Vec<ModeratorInfo>,
}

#[derive(Deserialize)]
pub struct ModeratorInfo {
    pub name: String,
    #[serde(default)]
    pub mod_permissions: Vec<String>,
}

#[derive(Deserialize)]
pub struct SubmitResponse {
    pub json: SubmitJson,
}

#[derive(Deserialize)]
pub struct SubmitJson {
    #[serde(default)]
    pub errors: Vec<Vec<serde_json::Value>>,
    pub data: Option<SubmitData>,
}

#[derive(Deserialize)]
pub struct SubmitData {
    pub things: Vec<Thing<NewCommentInfo>>,
}

#[derive(Deserialize)]
pub struct NewCommentInfo {
    pub name: String,
    pub permalink: String,
}

#[derive(Deserialize)]
pub struct WikiResponse {
    pub data: WikiData,
}

#[derive(Deserialize)]
pub struct WikiData {
    pub content_md: String,
}

#[derive(Deserialize)]
pub struct ConversationResponse {
    pub conversation: ConversationInfo,
}

#[derive(Deserialize)]
pub struct ConversationInfo {
    pub id: String,
}
