pub mod args;
pub mod input;
pub mod menu;
pub mod session;

pub use args::Args;
pub use input::{InputSource, LineInput, TerminalInput};
pub use menu::MenuChoice;
pub use session::{Session, SessionError, Transition};
