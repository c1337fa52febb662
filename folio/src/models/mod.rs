pub mod article;
pub mod like_counter;
pub mod slug;
