//! Tagex Locator
//!
//! Scans markup text for tag pairs and picks the pair a cursor or selection
//! is aiming at. Handles attribute opacity (brackets inside quoted attribute
//! values never start a tag), same-name nesting depth, and the two search
//! strategies used by the expander: innermost-under-cursor and
//! first-inside-selection.
//!
//! # Example
//!
//! ```
//! use tagex_locator::{locate, Strategy};
//!
//! let text = r##"<a href="#">bla bla bla</a>"##;
//! let tag = locate(text, 0..text.chars().count(), &Strategy::Cursor(0)).unwrap();
//! assert_eq!(tag.name, "a");
//! ```

pub mod locate;
pub mod scanner;
pub mod token;

pub use locate::{locate, Strategy, Tag};
pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};
