//! Computes the replacement edit for a simplified expression.

use std::ops::Range;

use crate::model::BoolExpr;

/// A text edit replacing one span of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    /// Half-open byte range of the original text to replace.
    pub span: Range<usize>,
    /// Replacement text.
    pub new_text: String,
}

impl SourceEdit {
    /// Applies the edit to the source text it was computed for.
    ///
    /// Returns the source unchanged when the span does not fall on
    /// character boundaries, which cannot happen for edits produced by
    /// [`produce_edit`] against the same source.
    #[must_use]
    pub fn apply(&self, source: &str) -> String {
        let (Some(before), Some(after)) =
            (source.get(..self.span.start), source.get(self.span.end..))
        else {
            return source.to_owned();
        };
        format!("{before}{}{after}", self.new_text)
    }
}

/// Produces the edit replacing a matched expression with its simplified
/// form, or `None` when the two are structurally equal.
///
/// The span is anchored immediately after the token preceding the
/// matched expression, folding the expression's leading whitespace into
/// the replacement; the replacement re-emits a single space so spacing
/// stays canonical. A match at the very start of the file has no
/// preceding token, so its span and spacing are left untouched.
#[must_use]
pub fn produce_edit(
    source: &str,
    matched: Range<usize>,
    original: &BoolExpr,
    simplified: &BoolExpr,
) -> Option<SourceEdit> {
    if simplified == original {
        return None;
    }

    let rendered = simplified.render();
    let preceding = source
        .get(..matched.start)
        .and_then(|prefix| {
            prefix
                .char_indices()
                .rev()
                .find(|(_, c)| !c.is_whitespace())
        })
        .map(|(index, c)| index.saturating_add(c.len_utf8()));

    let edit = match preceding {
        Some(start) => SourceEdit {
            span: start..matched.end,
            new_text: format!(" {rendered}"),
        },
        None => SourceEdit {
            span: matched,
            new_text: rendered,
        },
    };
    Some(edit)
}
