//! Markdown primitives shared by every store: the line buffer, the
//! section locator, and the entry line parser.

pub mod document;
pub mod entries;
pub mod section;

pub use document::{has_line_break, is_blank, trim_eol, Document};
pub use section::{first_paragraph, locate_section, split_sections, SectionBlock, SectionSpan};
