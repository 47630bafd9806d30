//! mathbox - LaTeX math typesetting to measured box trees
//!
//! The crate turns math-mode markup into a renderer-agnostic tree of
//! positioned, measured boxes in three stages: a total lexer
//! ([`lexer::Lexer`]), an error-recovering parser ([`parser::parse`])
//! producing an [`atom::MathList`], and a layout engine
//! ([`layout::layout`]) applying the TeX composition rules against a
//! pluggable [`metrics::FontMetrics`] provider. Every stage is a pure
//! function; errors come back as data next to a best-effort result.
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::panic)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::ref_patterns)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::single_call_fn)]
#![allow(clippy::module_name_repetitions)]

pub mod atom;
pub mod boxes;
pub mod commands;
pub mod error;
pub mod layout;
pub mod lexer;
pub mod metrics;
pub mod options;
pub mod parser;
pub mod style;
pub mod token;

pub use atom::MathList;
pub use boxes::LayoutBox;
pub use error::{LayoutError, ParseError};
pub use layout::{layout, LayoutOutcome};
pub use metrics::{FontMetrics, UniformMetrics};
pub use options::LayoutOptions;
pub use parser::{parse, ParseOutcome};

/// The result of running both stages over one input string.
#[derive(Debug)]
pub struct TypesetOutcome {
    /// The measured box tree for the best-effort parse.
    pub root: LayoutBox,
    /// Errors from the parsing stage, ordered by source position.
    pub parse_errors: Vec<ParseError>,
    /// Diagnostics from the layout stage, in encounter order.
    pub layout_errors: Vec<LayoutError>,
}

impl TypesetOutcome {
    /// True if both stages finished without errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.parse_errors.is_empty() && self.layout_errors.is_empty()
    }
}

/// Parses `input` and lays the result out in one call.
#[must_use]
pub fn typeset(
    input: &str,
    options: &LayoutOptions,
    metrics: &dyn FontMetrics,
) -> TypesetOutcome {
    let parsed = parse(input);
    let laid_out = layout(&parsed.list, options, metrics);
    TypesetOutcome {
        root: laid_out.root,
        parse_errors: parsed.errors,
        layout_errors: laid_out.errors,
    }
}
