//! # docstyle
//!
//! A CSS style model and cascade engine for moving word-processor styles to
//! and from stylesheets.
//!
//! ## Features
//!
//! - Parse stylesheet text into styles keyed by base selector
//! - Expand shorthands (`margin`, `border`, `text-decoration`, ...) on input and
//!   collapse them again on output
//! - Resolve style inheritance through the `-uxwrite-parent` property
//! - Drop properties that only repeat an ancestor's value
//! - Toggle automatic heading numbering
//!
//! ## Quick Start
//!
//! ```
//! use docstyle::{Lookup, Stylesheet};
//!
//! let mut sheet = Stylesheet::from_css_text(
//!     "p.Normal { margin: 0pt; color: black }\n\
//!      p.Quote { -uxwrite-parent: \"p.Normal\"; color: black; font-style: italic }",
//! );
//!
//! // The repeated color was recognised as inherited.
//! let quote = sheet.get("p.Quote").unwrap();
//! assert_eq!(quote.base_rule().get("color"), None);
//!
//! // Output is flattened and collapsed again.
//! let rules = sheet.rules();
//! assert_eq!(rules["p.Quote"].get("margin"), Some("0pt"));
//!
//! sheet
//!     .lookup_selector("span.Strong", Lookup::Add)
//!     .unwrap()
//!     .rule()
//!     .set_bold(true);
//! assert!(sheet.css_text().contains("span.Strong {\n    font-weight: bold;\n}"));
//! ```

pub mod css;
pub mod error;
pub mod util;

pub use css::{
    ContentPart, ContentPartKind, CssLength, Lookup, PropertySet, Style, StyleFamily, Stylesheet,
    TableComponent, Tag, Units,
};
pub use error::{Error, Result};
