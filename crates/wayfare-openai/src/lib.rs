// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible adapters for Wayfare.
//!
//! [`OpenAiGeneration`] speaks the chat completions API, including tool
//! calls; [`OpenAiEmbedding`] speaks the embeddings API. Both share the
//! retrying HTTP client in [`client`]. Any service exposing the same wire
//! format works by pointing `openai.base_url` at it.

pub mod client;
pub mod embedding;
pub mod generation;
pub mod types;

pub use client::OpenAiClient;
pub use embedding::OpenAiEmbedding;
pub use generation::OpenAiGeneration;
