//! Core types for the chat core

pub mod conversation;
pub mod document;

pub use conversation::{ChatResponse, ConversationTurn, Role};
pub use document::{Chunk, Document};
