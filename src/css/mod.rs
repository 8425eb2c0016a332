//! CSS style model and cascade engine.
//!
//! Word-processor styles are represented as a [`Stylesheet`] of [`Style`]s,
//! each identified by a **base selector** (`p`, `h1.Appendix`, `table.Grid`)
//! and holding one [`PropertySet`] per selector **suffix** (`""` for the style
//! itself, `::before`, or one of the fixed table-part suffixes).
//!
//! Properties are always stored **expanded**: shorthands such as `margin`,
//! `border` and `text-decoration` are split into longhands on the way in
//! ([`expand_properties`]) and merged back on the way out
//! ([`collapse_properties`]). Inheritance between styles is recorded in the
//! private `-uxwrite-parent` property and resolved by
//! [`Stylesheet::flattened_style`].

mod content;
mod ident;
mod length;
mod parser;
mod properties;
mod selector;
mod serialize;
mod sheet;
mod shorthand;
mod style;
mod syntax;
mod values;

/// Macro for defining CSS keyword enums.
///
/// Generates `as_str`, `from_css` and a `Display` impl that writes the
/// keyword.
///
/// ```ignore
/// enum_property! {
///     /// Border style keyword.
///     pub enum BorderStyle {
///         None => "none",
///         Solid => "solid",
///     }
/// }
/// ```
macro_rules! enum_property {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $css:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Returns the CSS keyword for this value.
            #[inline]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $css,)*
                }
            }

            /// Parse a CSS keyword into this enum.
            #[inline]
            pub fn from_css(s: &str) -> Option<Self> {
                match s {
                    $($css => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use enum_property;

pub use content::{ContentPart, ContentPartKind, parse_content};
pub use ident::{escape_ident, unescape_ident};
pub use length::{CssLength, Units};
pub use parser::{parse_properties, parse_rules, parse_selectors};
pub use properties::{ChangeCallback, PropertySet};
pub use selector::{
    StyleFamily, Tag, class_name, element_name, has_class_name, heading_level, is_heading,
    make_selector, parse_selector, selector_family, selector_tag,
};
pub use serialize::stylesheet_text_from_rules;
pub use sheet::{Lookup, Stylesheet, is_builtin_selector};
pub use shorthand::{collapse_properties, expand_properties};
pub use style::{Style, TableComponent};
pub use syntax::{
    is_border_color, is_border_style, is_border_width, is_color, is_length, is_number,
};
pub use values::{
    ListStyleType, PageSize, decode_font_family, encode_font_family, hex_color,
    is_inline_property, parse_page_size, quote, unquote,
};
