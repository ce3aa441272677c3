//! Bullet-point assistant: generate, enhance and extend resume bullets.

pub mod bullets;
pub mod handlers;
pub mod prompts;
