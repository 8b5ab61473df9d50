use anyhow::{Context, Result, bail};

use super::{load_project, target_langs};
use crate::format::formatter_for;
use crate::sync::{SyncOptions, count_missing, sync_lang};
use crate::translation::GoogleTranslator;
use crate::ui::{Progress, Style};

pub struct SyncCommandOptions {
    pub lang: Option<String>,
    pub retries: usize,
    pub api_key: Option<String>,
}

pub async fn run_sync(options: SyncCommandOptions) -> Result<()> {
    let project = load_project()?;

    let mut pending = Vec::new();
    for lang in target_langs(&project, options.lang.as_deref()) {
        let missing = count_missing(&project, &lang)
            .with_context(|| format!("Failed to read messages for {lang}"))?;
        if missing > 0 {
            pending.push((lang, missing));
        }
    }

    if pending.is_empty() {
        println!("All locales are up to date");
        return Ok(());
    }

    let translator = GoogleTranslator::from_project(&project, options.api_key.as_deref())?;
    if !translator.has_api_key() {
        bail!(
            "No translation API key configured\n\n\
             Set 'googleApiKey' in the config file or pass --api-key."
        );
    }

    let sync_options = SyncOptions {
        concurrency: project.config.translate_options.concurrent_limit,
        retries: options.retries,
    };
    let formatter = formatter_for(&project.config);

    let mut failures = 0;
    for (lang, missing) in pending {
        let progress = Progress::new(missing, &format!("Translating {lang}"));
        let report = sync_lang(
            &project,
            &translator,
            &lang,
            sync_options,
            formatter.as_ref(),
            || progress.inc(),
        )
        .await
        .with_context(|| format!("Failed to sync {lang}"))?;
        progress.finish();

        for (key, error) in &report.failed {
            crate::warn!(
                "{} {}: {error}",
                Style::warning("Failed to translate"),
                Style::key(key)
            );
        }
        for path in &report.written {
            crate::status!("{} {}", Style::success("Wrote"), Style::path(path.display()));
        }

        failures += report.failed.len();
        println!(
            "Translated {} messages into {}",
            report.translated,
            Style::code(&lang)
        );
    }

    if failures > 0 {
        crate::status!(
            "{}",
            Style::hint(format!(
                "{failures} messages were not translated; run 'kiwi sync' again to retry."
            ))
        );
    }
    Ok(())
}
