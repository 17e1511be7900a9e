//! Turn a router NVRAM dump into a short, re-runnable `nvram set` script.
//!
//! The heavy lifting lives in `nvram-core`; this crate supplies what sits
//! around it:
//!
//! - [`categories`]: category rules from TOML, embedded or from a file
//! - [`credentials`]: web GUI certificate and key recovered from the
//!   `https_crt_file` archive
//! - [`report`]: terminal output for the CLI
//!
//! # Examples
//!
//! ```ignore
//! use nvram_core::{assemble, diff, organize, parse_file, ScriptOptions};
//! use nvram_script::categories::default_rules;
//!
//! let input = parse_file("nvram.txt".as_ref())?;
//! let base = parse_file("defaults.txt".as_ref())?;
//! let changed = diff(&input, Some(&base));
//! let opts = ScriptOptions::default();
//! let (groups, _) = organize(&changed, &default_rules()?, &opts);
//! print!("{}", assemble(&groups, None, &opts.large));
//! ```

pub mod categories;
pub mod credentials;
pub mod report;
