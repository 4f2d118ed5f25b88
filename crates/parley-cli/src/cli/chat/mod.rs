//! Interactive terminal chat.
//!
//! Collects the profile, opens the session, then runs the input loop with a
//! typing spinner, formatted replies and slash commands. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod export;
pub mod input;
pub mod loop_runner;
pub mod profile;
pub mod renderer;
