//! # kiwi - Localization resource CLI
//!
//! `kiwi` manages the message files of a multi-locale project. Messages live
//! as nested JSON trees under a resource directory, one subdirectory per
//! locale, and are addressed by dotted keys such as `common.button.ok`.
//!
//! ## Features
//!
//! - **Import**: Merge a TSV file of translated messages into a locale
//! - **Export**: Write the messages a locale has not translated yet to TSV
//! - **Sync**: Fill missing messages through a machine translation API
//! - **Unused**: Find source messages no project file references
//!
//! ## Quick Start
//!
//! ```bash
//! # Create .kiwi/kiwi-config.json and a sample source file
//! kiwi init
//!
//! # Hand untranslated messages to a translator
//! kiwi export en-US
//!
//! # Bring the translations back
//! kiwi import export-en-US.tsv en-US
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `kiwi-config.toml` or `kiwi-config.json`, found
//! anywhere below the project root:
//!
//! ```toml
//! kiwiDir = "./.kiwi"
//! srcLang = "zh-CN"
//! distLangs = ["en-US", "zh-TW"]
//! ignoreDir = ["node_modules", "dist"]
//! ignoreFile = ".test.ts"
//! formatCommand = ["prettier", "--parser", "json"]
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Project configuration discovery and defaults.
pub mod config;

pub mod error;

/// Untranslated message export to TSV.
pub mod exporter;

/// Formatting of written message files.
pub mod format;

/// File system utilities.
pub mod fs;

/// TSV import and message file reconciliation.
pub mod importer;

/// Message trees and the per-locale file store.
pub mod messages;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// Project source file discovery.
pub mod scanner;

/// Machine translation of missing messages.
pub mod sync;

/// Translation client with timeout and retry policies.
pub mod translation;

/// Terminal UI components (progress, colors).
pub mod ui;

/// Detection of unreferenced messages.
pub mod unused;

pub use error::{Error, Result};
