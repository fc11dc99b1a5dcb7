pub mod config;
pub mod http;
pub mod logging;
pub mod message;

pub use http::codec::{CodecEntry, CodecRegistry, Format};
pub use message::{Message, Reply};
