//! External services integration

pub mod postmark;

pub use postmark::{PostmarkClient, TemplateApi};
