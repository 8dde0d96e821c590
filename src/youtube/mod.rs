pub mod video_id;

pub use video_id::{resolve, Rejected, VideoId};
