mod config;
mod daily;
mod error;
mod fuzzy;
mod moment;
mod mutate;
mod paths;
mod scan;
mod url;
mod vault;

pub use crate::config::{
    DEFAULT_DAILY_FORMAT, DEFAULT_URL_SCHEME, PERIODIC_NOTES_PLUGIN, VaultConfig,
};
pub use crate::daily::{DailyNoteConfig, DailyNoteSource, DailyPath};
pub use crate::error::{Error, Result};
pub use crate::fuzzy::{FuzzyScorer, MAX_SCORE, NucleoScorer, RankedPath, rank};
pub use crate::moment::translate as translate_moment_format;
pub use crate::paths::{display_name, vault_name, with_md_extension};
pub use crate::scan::{Note, ScanMode, star_count, star_rating};
pub use crate::url::{UrlMode, build_url, build_url_with_scheme};
pub use crate::vault::Vault;
