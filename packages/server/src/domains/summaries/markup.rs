//! Markup stripping for article bodies.

use scraper::Html;

/// Strip HTML markup, returning whitespace-normalized plain text.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: Vec<&str> = fragment.root_element().text().collect();

    text.join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(
            strip_markup("<p>Hallo <b>wereld</b></p>"),
            "Hallo wereld"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("Gewone tekst."), "Gewone tekst.");
    }

    #[test]
    fn normalizes_whitespace_across_blocks() {
        let html = "<article>\n  <h1>Kop</h1>\n  <p>Eerste  alinea.</p>\n  <p>Tweede.</p>\n</article>";
        assert_eq!(strip_markup(html), "Kop Eerste alinea. Tweede.");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(strip_markup("vis &amp; chips"), "vis & chips");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(strip_markup(""), "");
    }
}
