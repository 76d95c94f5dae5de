//! # Sweep Core
//!
//! Locate and remove leftover debugging statements from source text.
//!
//! ## Philosophy
//!
//! Removal must never corrupt the surrounding program:
//! - Only code that really is a debug call is touched (strings and comments are skipped
//!   whenever the buffer parses)
//! - Removing a statement also removes the whitespace and separators it leaves behind
//! - Text that contains nothing to remove comes back byte-for-byte unchanged
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> Dialect Detection (from extension/editor hint)
//!     │
//!     ├──> Statement Discovery
//!     │    ├─> Tree-sitter parse → walk call/debugger nodes
//!     │    └─> on parse failure: regex scan with paren balancing
//!     │
//!     ├──> Filter (RemovalConfig switches per kind/method)
//!     │
//!     └──> Surgery
//!          ├─> Classify each statement's line context
//!          ├─> Cut right-to-left over the original offsets
//!          └─> Normalise blank runs and line endings
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sweep_core::{RemovalConfig, Sweeper};
//!
//! let sweeper = Sweeper::new(RemovalConfig::default()).unwrap();
//!
//! let code = "function add(a, b) {\n  console.log(a, b);\n  return a + b;\n}\n";
//!
//! let outcome = sweeper.clean_str(code, Some("math.js"));
//! assert_eq!(outcome.result.clean_text, "function add(a, b) {\n  return a + b;\n}\n");
//! println!("{}", outcome.report);
//! ```

mod config;
mod dialect;
mod error;
mod filter;
mod lexical;
mod lines;
mod report;
mod scanner;
mod surgeon;
mod sweeper;
mod types;
mod whitespace;

pub use config::RemovalConfig;
pub use dialect::{Dialect, Grammar};
pub use error::{Result, SweepError};
pub use filter::filter;
pub use lexical::scan_lexical;
pub use lines::LineIndex;
pub use report::{preview, report, PreviewAction, PreviewEntry, Report};
pub use scanner::{scan, StructuralScanner};
pub use surgeon::{remove_all, LineContext};
pub use sweeper::{find_statements, SweepOutcome, Sweeper};
pub use types::{
    CleanResult, ConsoleMethod, DebugStatement, ScanMethod, ScanOutcome, StatementKind,
};
pub use whitespace::normalize;
