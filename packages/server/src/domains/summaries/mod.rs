//! Speakable summary generation and storage.

pub mod generator;
pub mod jobs;
pub mod markup;
