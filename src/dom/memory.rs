use super::DocumentSink;
use crate::error::{RenderError, Result};
use crate::path::PathId;

/// In-memory document holding the mounted markup.
///
/// Besides acting as the default sink it records the path of every
/// replacement, so tests can assert how often (and where) wholesale
/// rebuilds happened.
pub struct MemoryDocument {
    markup: String,
    replaced: Vec<PathId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            markup: String::new(),
            replaced: Vec::new(),
        }
    }

    /// The current document markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Paths of every replacement performed, in order.
    pub fn replacements(&self) -> &[PathId] {
        &self.replaced
    }

    pub fn clear_replacements(&mut self) {
        self.replaced.clear();
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for MemoryDocument {
    fn write_root(&mut self, markup: &str) {
        self.markup = markup.to_string();
    }

    fn replace(&mut self, path: &PathId, markup: &str) -> Result<()> {
        let (start, end) =
            content_span(&self.markup, path).ok_or_else(|| RenderError::PathNotFound {
                path: path.clone(),
            })?;
        self.markup.replace_range(start..end, markup);
        self.replaced.push(path.clone());
        tracing::debug!("replaced content at {}", path);
        Ok(())
    }
}

/// Byte offset of the first tag carrying `data-reactid` equal to `path`,
/// in document order, accepting both the quoted and the bare form.
fn locate_tag(markup: &str, path: &PathId) -> Option<usize> {
    let quoted = format!("data-reactid=\"{path}\"");
    let bare = format!("data-reactid={path}");

    let quoted_at = markup.find(&quoted);

    // the bare form must end at a delimiter, otherwise the match is a
    // prefix of a longer id ("0.1" inside "0.10")
    let mut bare_at = None;
    let mut from = 0;
    while let Some(rel) = markup[from..].find(&bare) {
        let pos = from + rel;
        let end = pos + bare.len();
        match markup.as_bytes().get(end) {
            Some(b' ') | Some(b'>') => {
                bare_at = Some(pos);
                break;
            }
            _ => from = end,
        }
    }

    match (quoted_at, bare_at) {
        (Some(q), Some(b)) => Some(q.min(b)),
        (Some(q), None) => Some(q),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Span of the content between the opening and closing tag of the node
/// tagged with `path`. The markup is trusted engine output: every element
/// is emitted as an open/close pair and text never contains `<`.
fn content_span(markup: &str, path: &PathId) -> Option<(usize, usize)> {
    let attr = locate_tag(markup, path)?;
    let open_end = attr + markup[attr..].find('>')?;
    let start = open_end + 1;

    let mut depth = 1usize;
    let mut cursor = start;
    loop {
        let lt = cursor + markup[cursor..].find('<')?;
        if markup[lt..].starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Some((start, lt));
            }
        } else {
            depth += 1;
        }
        cursor = lt + markup[lt..].find('>')? + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(markup: &str) -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.write_root(markup);
        doc
    }

    #[test]
    fn test_replace_swaps_inner_content() {
        let mut doc = doc_with(
            "<div data-reactid=0> <span data-reactid=\"0.0\">old</span></div>",
        );
        doc.replace(&PathId::new("0.0"), "new").unwrap();
        assert_eq!(
            doc.markup(),
            "<div data-reactid=0> <span data-reactid=\"0.0\">new</span></div>"
        );
        assert_eq!(doc.replacements(), &[PathId::new("0.0")]);
    }

    #[test]
    fn test_replace_spans_nested_children() {
        let mut doc = doc_with(
            "<div data-reactid=0> <div data-reactid=0.0> <span data-reactid=\"0.0.0\">a</span></div></div>",
        );
        doc.replace(&PathId::new("0.0"), "<b data-reactid=0.0>x</b>")
            .unwrap();
        assert_eq!(
            doc.markup(),
            "<div data-reactid=0> <div data-reactid=0.0><b data-reactid=0.0>x</b></div></div>"
        );
    }

    #[test]
    fn test_replace_unknown_path_fails() {
        let mut doc = doc_with("<div data-reactid=0></div>");
        let err = doc.replace(&PathId::new("7"), "x").unwrap_err();
        assert!(matches!(
            err,
            RenderError::PathNotFound { path } if path == PathId::new("7")
        ));
    }

    #[test]
    fn test_bare_id_match_respects_delimiters() {
        let mut doc = doc_with(
            "<div data-reactid=0> <i data-reactid=0.10>ten</i> <i data-reactid=0.1>one</i></div>",
        );
        doc.replace(&PathId::new("0.1"), "ONE").unwrap();
        assert_eq!(
            doc.markup(),
            "<div data-reactid=0> <i data-reactid=0.10>ten</i> <i data-reactid=0.1>ONE</i></div>"
        );
    }

    #[test]
    fn test_first_tag_in_document_order_wins() {
        let mut doc = doc_with(
            "<div data-reactid=1><span data-reactid=\"1\">inner</span></div>",
        );
        // the outer (bare) tag comes first, so its content is replaced
        doc.replace(&PathId::new("1"), "swapped").unwrap();
        assert_eq!(doc.markup(), "<div data-reactid=1>swapped</div>");
    }
}
