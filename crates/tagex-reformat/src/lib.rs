//! Tagex Reformat
//!
//! Turns a located tag pair into its multi-line form: opening tag, content
//! and closing tag on their own lines, content one indent level deeper,
//! nested tags expanded recursively in the same pass.
//!
//! ```text
//! region text + Tag → reformat() → Reformatted { first_line, last_line, lines }
//! ```
//!
//! The replacement always covers whole lines, from the line holding the
//! opening tag through the line holding the closing tag; everything is
//! computed in memory before the caller touches its buffer.

pub mod content;
pub mod indent;
pub mod reformat;

pub use content::Piece;
pub use indent::IndentUnit;
pub use reformat::{reformat, Reformatted};
