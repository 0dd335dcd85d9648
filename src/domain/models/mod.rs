mod audio;
mod backend;
mod error;
mod mode;
mod prompt;
mod slash_commands;
mod transition;
mod view;
mod word;

pub use audio::*;
pub use backend::*;
pub use error::*;
pub use mode::*;
pub use prompt::*;
pub use slash_commands::*;
pub use transition::*;
pub use view::*;
pub use word::*;
