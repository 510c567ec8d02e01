//! Built document discovery for wikidex.
//!
//! Walks a directory of already-built pages and returns one
//! [`SourceDocument`] per file, with the output URL the page is served at.
//! Documents come back in a stable order (entries sorted by name within each
//! directory) so that index trees built from them are reproducible.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use wikidex_source::Scanner;
//!
//! let scanner = Scanner::new(PathBuf::from("site"));
//! for doc in scanner.scan()? {
//!     println!("{} -> {}", doc.source_path.display(), doc.url);
//! }
//! # Ok::<(), wikidex_source::ScanError>(())
//! ```

mod scanner;

pub use scanner::{ScanError, Scanner, SourceDocument};
