//! Drive interactive terminal programs inside tmux and assert on their screen.
//!
//! A [`Session`] owns one tmux window running a shell. Tests type into it with
//! [`Session::send_keys`], poll the visible screen with [`Session::until`], and
//! collect whatever the program wrote to disk with [`read_once`].

pub mod cli;
pub mod config;
pub mod error;
pub mod launch;
pub mod poll;
pub mod temp;
pub mod tmux;

pub use config::HarnessConfig;
pub use error::{HarnessError, Result};
pub use launch::LaunchCommand;
pub use temp::{read_once, TempChannel};
pub use tmux::{Key, Multiplexer, Screen, Session, Shell, Tmux};
