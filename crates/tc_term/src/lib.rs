pub mod error;
pub mod render;
pub mod table;

pub use error::Error;
pub use render::{BufferedRenderer, Renderer, TerminalRenderer, format_message};
