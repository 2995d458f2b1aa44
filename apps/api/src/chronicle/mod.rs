// Space Chronicle content: daily events, insights, articles and space weather.
// Generated content goes through pipeline::generate, which always returns a
// payload; articles and chat call the provider directly and may fail.

pub mod calendar;
pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod history;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
