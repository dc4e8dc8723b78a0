//! Server-rendered pages.
//!
//! Page bodies are compiled into the binary so rendering never touches the
//! filesystem; only assets under `/static` are served from disk.

use crate::error_page::{display_error, ErrorContainer, PageLocation};

pub const INDEX_HTML: &str = include_str!("../static/index.html");
pub const THANKS_HTML: &str = include_str!("../static/thanks.html");

const OOPS_TEMPLATE: &str = include_str!("../static/oops.html");

/// The empty error container as it appears in the oops template.
const CONTAINER_PLACEHOLDER: &str = "<div id=\"error-message\"></div>";

/// Render the oops page for the given location.
pub fn render_oops(location: &PageLocation) -> String {
    render_oops_into(OOPS_TEMPLATE, location)
}

/// Splice the displayed error into a page template. A template without the
/// container placeholder is served unchanged.
fn render_oops_into(template: &str, location: &PageLocation) -> String {
    let mut container = ErrorContainer::default();
    display_error(location, &mut container);

    if !template.contains(CONTAINER_PLACEHOLDER) {
        return template.to_string();
    }

    template.replacen(CONTAINER_PLACEHOLDER, &container.render(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oops_template_carries_the_container() {
        assert!(OOPS_TEMPLATE.contains(CONTAINER_PLACEHOLDER));
    }

    #[test]
    fn test_render_oops_decodes_the_query() {
        let page = render_oops(&PageLocation::from_target("/oops?hello%20world"));
        assert!(page.contains("<p>hello world</p>"));
    }

    #[test]
    fn test_render_oops_with_empty_query_appends_empty_paragraph() {
        let page = render_oops(&PageLocation::from_target("/oops"));
        assert!(page.contains("<div id=\"error-message\"><p></p></div>"));
    }

    #[test]
    fn test_missing_container_serves_template_unchanged() {
        let template = "<html><body><h1>Oops!</h1></body></html>";
        let page = render_oops_into(template, &PageLocation::from_target("/oops?ignored"));
        assert_eq!(page, template);
    }

    #[test]
    fn test_non_oops_location_leaves_container_empty() {
        let page = render_oops_into(
            OOPS_TEMPLATE,
            &PageLocation::from_target("/other?hello%20world"),
        );
        assert_eq!(page, OOPS_TEMPLATE);
    }
}
