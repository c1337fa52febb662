//! Client side of the like counter: the per-session like budget, the debounced batcher
//! and the transports it can flush through.

pub mod batcher;
pub mod like_client;
pub mod session_likes;

pub use batcher::{BatchPhase, LikeBatcher};
pub use like_client::{HttpLikeClient, LikeClient};
pub use session_likes::SessionLikes;
