pub mod colors;
pub mod prompt;
pub mod spinner;
pub mod streaming;

pub use colors::*;
pub use prompt::*;
pub use spinner::*;
pub use streaming::*;
