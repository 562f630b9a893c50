//! Decoding of externally fetched geolocation feeds.
//!
//! The core never performs network I/O; whatever fetch layer the embedder
//! uses hands the response body to this crate and receives typed points.

pub mod point_feed;

pub use point_feed::{FeedError, TimedPoint, decode_point_feed, path_order};
