// Speakable Summaries - service core
//
// Generates a speakable summary of an article when it is published and keeps
// it as metadata alongside the article. Host-owned stores (content, settings,
// summary metadata, job scheduling) are injected as traits so the service can
// run against in-memory implementations or host-backed adapters.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::Config;
