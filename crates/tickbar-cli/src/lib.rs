//! # tickbar-cli
//!
//! Terminal integration for tickbar: width query, resize watching,
//! frame rendering, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod resize;
pub mod terminal;
pub mod ui;

pub use presenter::ConsolePresenter;
pub use resize::ResizeWatcher;
pub use terminal::terminal_width;
