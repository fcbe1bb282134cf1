//! External AI chat capability behind an explicit client interface

pub mod client;

pub use client::{
    ChatClient, ChatConfig, ChatError, ChatMessage, ChatRequest, ChatResponse, HttpChatClient,
};
