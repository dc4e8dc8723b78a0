//! Error page display logic.
//!
//! The oops page shows whatever message the previous request left in the
//! query string. The whole query is the message: it is percent-decoded as-is,
//! never parsed into key/value pairs. The display only fires for locations
//! whose path ends in the `oops` suffix, so the same logic can be applied
//! blindly to any rendered page.

use std::borrow::Cow;

/// Id of the element the decoded message is appended into.
pub const ERROR_CONTAINER_ID: &str = "error-message";

/// Path suffix that marks a location as an error page.
pub const ERROR_PAGE_SUFFIX: &str = "oops";

/// The location of the page being rendered, injected by the caller rather
/// than read from any ambient request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    path: String,
    query: Option<String>,
}

impl PageLocation {
    pub fn new(path: impl Into<String>, query: Option<impl Into<String>>) -> Self {
        Self {
            path: path.into(),
            query: query.map(Into::into),
        }
    }

    /// Split an origin-form target (`/path?query`) on the first `?`.
    pub fn from_target(target: &str) -> Self {
        match target.split_once('?') {
            Some((path, query)) => Self::new(path, Some(query)),
            None => Self::new(target, None::<String>),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query with the leading `?` stripped, empty when absent.
    pub fn raw_query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }
}

/// Where displayed messages land. Production uses [`ErrorContainer`]; tests
/// can substitute any recording sink.
pub trait MessageSink {
    fn append_paragraph(&mut self, text: &str);
}

/// Buffers appended paragraphs and renders them as `<p>` children of the
/// `error-message` div, escaping text the way a DOM text node would.
#[derive(Debug, Default)]
pub struct ErrorContainer {
    paragraphs: Vec<String>,
}

impl MessageSink for ErrorContainer {
    fn append_paragraph(&mut self, text: &str) {
        self.paragraphs.push(text.to_string());
    }
}

impl ErrorContainer {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn render(&self) -> String {
        let mut html = format!("<div id=\"{ERROR_CONTAINER_ID}\">");
        for paragraph in &self.paragraphs {
            html.push_str("<p>");
            html.push_str(&escape_text(paragraph));
            html.push_str("</p>");
        }
        html.push_str("</div>");
        html
    }
}

/// Percent-decode a raw query. Malformed escape sequences fall back to the
/// raw string instead of erroring.
pub fn decode_message(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or_else(|_| Cow::Borrowed(raw))
}

/// Append the location's decoded query to the sink when the path ends in
/// the error page suffix. Any other path leaves the sink untouched. An empty
/// query still appends an empty paragraph, and repeated calls append
/// repeated paragraphs.
pub fn display_error(location: &PageLocation, sink: &mut dyn MessageSink) {
    if !location.path().ends_with(ERROR_PAGE_SUFFIX) {
        return;
    }

    let message = decode_message(location.raw_query());
    sink.append_paragraph(&message);
}

fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        appended: Vec<String>,
    }

    impl MessageSink for RecordingSink {
        fn append_paragraph(&mut self, text: &str) {
            self.appended.push(text.to_string());
        }
    }

    #[test]
    fn test_non_oops_path_appends_nothing() {
        let mut sink = RecordingSink::default();
        display_error(
            &PageLocation::from_target("/other?hello%20world"),
            &mut sink,
        );
        assert!(sink.appended.is_empty());
    }

    #[test]
    fn test_oops_path_appends_decoded_query() {
        let mut sink = RecordingSink::default();
        display_error(&PageLocation::from_target("/oops?hello%20world"), &mut sink);
        assert_eq!(sink.appended, vec!["hello world"]);
    }

    #[test]
    fn test_whole_query_is_the_message() {
        // The query is used verbatim, not parsed into parameters.
        let mut sink = RecordingSink::default();
        display_error(
            &PageLocation::from_target("/oops?message=Not%20Found"),
            &mut sink,
        );
        assert_eq!(sink.appended, vec!["message=Not Found"]);
    }

    #[test]
    fn test_nested_oops_path_with_empty_query() {
        let mut sink = RecordingSink::default();
        display_error(&PageLocation::from_target("/app/oops"), &mut sink);
        assert_eq!(sink.appended, vec![""]);
    }

    #[test]
    fn test_two_invocations_append_two_paragraphs() {
        let mut sink = RecordingSink::default();
        let location = PageLocation::from_target("/oops?again");
        display_error(&location, &mut sink);
        display_error(&location, &mut sink);
        assert_eq!(sink.appended, vec!["again", "again"]);
    }

    #[test]
    fn test_malformed_escape_falls_back_to_raw() {
        // %ff is not valid UTF-8 once decoded.
        assert_eq!(decode_message("bad%ffescape"), "bad%ffescape");
    }

    #[test]
    fn test_only_first_separator_splits_the_target() {
        let location = PageLocation::from_target("/oops?a?b%20c");
        assert_eq!(location.path(), "/oops");
        assert_eq!(location.raw_query(), "a?b%20c");
    }

    #[test]
    fn test_container_renders_escaped_paragraphs() {
        let mut container = ErrorContainer::default();
        display_error(
            &PageLocation::from_target("/oops?%3Cb%3Eboom%3C%2Fb%3E"),
            &mut container,
        );
        assert_eq!(
            container.render(),
            "<div id=\"error-message\"><p>&lt;b&gt;boom&lt;/b&gt;</p></div>"
        );
    }

    #[test]
    fn test_empty_container_renders_empty_div() {
        let container = ErrorContainer::default();
        assert!(container.is_empty());
        assert_eq!(container.render(), "<div id=\"error-message\"></div>");
    }
}
