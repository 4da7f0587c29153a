//! Twitter surface: market requests arriving as mentions on the filtered stream.

pub mod stream;
pub mod tweet;

pub use stream::TwitterListener;
