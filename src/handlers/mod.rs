pub mod fallback;
pub mod health;
pub mod index;
pub mod kv;

pub use fallback::not_found_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use kv::{delete_handler, get_handler, put_handler};
