//! Filling missing destination messages through the translator.

use futures_util::{StreamExt, stream};
use std::path::PathBuf;

use crate::config::Project;
use crate::error::{Error, Result};
use crate::format::Formatter;
use crate::importer::{reconcile, write_reconciled};
use crate::messages::{FlatMessages, MessageStore};
use crate::translation::{Translator, retry};

/// Knobs for a sync run.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Maximum number of translation calls in flight.
    pub concurrency: usize,
    /// Attempts per message, including the first.
    pub retries: usize,
}

/// What happened to one destination locale.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub translated: usize,
    /// Keys whose translation failed after all attempts.
    pub failed: Vec<(String, Error)>,
    pub written: Vec<PathBuf>,
}

/// Source messages whose key is absent from the destination.
pub fn missing_messages(source: &FlatMessages, destination: &FlatMessages) -> FlatMessages {
    source
        .iter()
        .filter(|(key, _)| !destination.contains_key(*key))
        .map(|(key, message)| (key.clone(), message.clone()))
        .collect()
}

/// Translates every message into `lang`, keeping at most
/// `options.concurrency` calls in flight. `on_done` runs once per message.
pub async fn translate_all<T, P>(
    translator: &T,
    messages: &FlatMessages,
    lang: &str,
    options: SyncOptions,
    on_done: P,
) -> (FlatMessages, Vec<(String, Error)>)
where
    T: Translator + Sync,
    P: Fn(),
{
    let results: Vec<(String, Result<String>)> = stream::iter(messages)
        .map(|(key, text)| async move {
            let result = retry(|| translator.translate(text, lang), options.retries).await;
            (key.clone(), result)
        })
        .buffer_unordered(options.concurrency.max(1))
        .inspect(|_| on_done())
        .collect()
        .await;

    let mut translated = FlatMessages::new();
    let mut failed = Vec::new();
    for (key, result) in results {
        match result {
            Ok(text) => {
                translated.insert(key, text);
            }
            Err(e) => failed.push((key, e)),
        }
    }
    failed.sort_by(|a, b| a.0.cmp(&b.0));
    (translated, failed)
}

/// Translates the messages `lang` is missing and rewrites its files.
pub async fn sync_lang<T, P>(
    project: &Project,
    translator: &T,
    lang: &str,
    options: SyncOptions,
    formatter: &dyn Formatter,
    on_done: P,
) -> Result<SyncReport>
where
    T: Translator + Sync,
    P: Fn(),
{
    let store = MessageStore::for_project(project);
    let src_lang = &project.config.src_lang;
    let (source, destination) = load_source_and_destination(&store, src_lang, lang)?;

    let missing = missing_messages(&source, &destination);
    if missing.is_empty() {
        return Ok(SyncReport::default());
    }

    let (translated, failed) = translate_all(translator, &missing, lang, options, on_done).await;
    let translated_count = translated.len();
    let reconciled = reconcile(translated, &source);
    let written = write_reconciled(&store, src_lang, lang, &reconciled, formatter)?;

    Ok(SyncReport {
        translated: translated_count,
        failed,
        written,
    })
}

/// Number of messages `lang` is missing, for sizing progress output.
pub fn count_missing(project: &Project, lang: &str) -> Result<usize> {
    let store = MessageStore::for_project(project);
    let (source, destination) =
        load_source_and_destination(&store, &project.config.src_lang, lang)?;
    Ok(missing_messages(&source, &destination).len())
}

/// A destination locale without a directory yet has no messages.
fn load_source_and_destination(
    store: &MessageStore,
    src_lang: &str,
    lang: &str,
) -> Result<(FlatMessages, FlatMessages)> {
    let source = store.get_all_messages(src_lang)?;
    let destination = if store.lang_dir(lang).is_dir() {
        store.get_all_messages(lang)?
    } else {
        FlatMessages::new()
    };
    Ok((source, destination))
}
