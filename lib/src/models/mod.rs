pub mod bookmark;
pub mod errors;
pub mod message;
