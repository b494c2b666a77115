pub mod extract;
pub mod generate;
pub mod health;
pub mod info;

pub use extract::extract_handler;
pub use generate::generate_handler;
pub use health::health_handler;
pub use info::{info_handler, root_handler};
