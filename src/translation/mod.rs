mod client;
mod language;
mod policy;

pub use client::{DEFAULT_ENDPOINT, GoogleTranslator, Translator};
pub use language::{LANG_MAP, SOURCE_LANGUAGE, api_language};
pub use policy::{retry, with_timeout};
