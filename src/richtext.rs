use lazy_static::lazy_static;
use regex::Regex;

// Lines at least this long are never treated as headings
const MAX_HEADING_CHARS: usize = 80;

lazy_static! {
    static ref BLOCK_SEPARATOR: Regex = Regex::new(r"\n\s*\n").unwrap();
    static ref UNORDERED_MARKER: Regex = Regex::new(r"^[•\-]\s*").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\d+[.)]\s").unwrap();
    static ref ORDERED_MARKER: Regex = Regex::new(r"^\d+[.)]\s*").unwrap();
}

#[derive(Debug, Eq, PartialEq)]
enum Element<'a> {
    Heading(&'a str),
    UnorderedList(Vec<&'a str>),
    OrderedList(Vec<&'a str>),
    Paragraph(&'a str),
}

fn is_heading(line: &str) -> bool {
    line.ends_with(':') && line.chars().count() < MAX_HEADING_CHARS
}

fn is_unordered_item(line: &str) -> bool {
    line.starts_with('•') || line.starts_with("- ")
}

fn is_ordered_item(line: &str) -> bool {
    ORDERED_ITEM.is_match(line)
}

// Strip the list marker from the start of a line
fn strip_marker<'a>(marker: &Regex, line: &'a str) -> &'a str {
    match marker.find(line) {
        Some(found) => &line[found.end()..],
        None => line,
    }
}

/// Escape the characters that are significant in HTML
/// Quotes become `&quot;` and `&#x27;`, and `/` is left alone, unlike askama's escaper.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for char in text.chars() {
        match char {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(char),
        }
    }
    escaped
}

// Classify the trimmed, non-empty lines of a single block
fn parse_block<'a>(lines: &[&'a str]) -> Vec<Element<'a>> {
    let mut elements = Vec::new();
    let mut cursor = 0;
    while let Some(&line) = lines.get(cursor) {
        if is_heading(line) {
            elements.push(Element::Heading(&line[..line.len() - 1]));
            cursor += 1;
        } else if is_unordered_item(line) {
            let run = lines[cursor..]
                .iter()
                .take_while(|line| is_unordered_item(line))
                .map(|&line| strip_marker(&UNORDERED_MARKER, line))
                .collect::<Vec<_>>();
            cursor += run.len();
            elements.push(Element::UnorderedList(run));
        } else if is_ordered_item(line) {
            let run = lines[cursor..]
                .iter()
                .take_while(|line| is_ordered_item(line))
                .map(|&line| strip_marker(&ORDERED_MARKER, line))
                .collect::<Vec<_>>();
            cursor += run.len();
            elements.push(Element::OrderedList(run));
        } else {
            elements.push(Element::Paragraph(line));
            cursor += 1;
        }
    }
    elements
}

fn list_items(items: &[&str]) -> String {
    items.iter().map(|item| format!("<li>{item}</li>")).collect()
}

impl Element<'_> {
    fn to_html(&self) -> String {
        match self {
            Self::Heading(text) => format!(r#"<h4 class="rich-heading">{text}</h4>"#),
            Self::UnorderedList(items) => {
                format!(r#"<ul class="rich-list">{}</ul>"#, list_items(items))
            }
            Self::OrderedList(items) => {
                format!(r#"<ol class="rich-list">{}</ol>"#, list_items(items))
            }
            Self::Paragraph(text) => format!("<p>{text}</p>"),
        }
    }
}

/// Convert loosely structured plain text into HTML
///
/// Blocks are separated by blank lines. Within a block, short lines ending in
/// a colon become headings, runs of `•`/`- ` lines become unordered lists,
/// runs of `1.`/`1)` lines become ordered lists, and everything else becomes a
/// paragraph. The input is escaped before parsing, so the result is safe to
/// output without any further escaping.
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape(text);
    BLOCK_SEPARATOR
        .split(escaped.trim())
        .flat_map(|block| {
            let lines = block
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>();
            parse_block(&lines)
                .iter()
                .map(Element::to_html)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(render(""), "");
        assert_eq!(render("  \n\n  "), "");
    }

    #[test]
    fn test_single_paragraph() {
        assert_eq!(render("Just some text"), "<p>Just some text</p>");
    }

    #[test]
    fn test_heading_then_paragraphs() {
        assert_eq!(
            render("A:\nB\nC"),
            "<h4 class=\"rich-heading\">A</h4>\n<p>B</p>\n<p>C</p>"
        );
    }

    #[test]
    fn test_long_colon_line_is_paragraph() {
        let line = format!("{}:", "x".repeat(79));
        assert_eq!(render(&line), format!("<p>{line}</p>"));

        let line = format!("{}:", "x".repeat(78));
        assert_eq!(
            render(&line),
            format!("<h4 class=\"rich-heading\">{}</h4>", "x".repeat(78))
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            render("• one\n• two\n• three"),
            "<ul class=\"rich-list\"><li>one</li><li>two</li><li>three</li></ul>"
        );
        assert_eq!(
            render("- one\n•two"),
            "<ul class=\"rich-list\"><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_dash_without_space_is_paragraph() {
        assert_eq!(render("-5 degrees"), "<p>-5 degrees</p>");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            render("1. first\n2. second"),
            "<ol class=\"rich-list\"><li>first</li><li>second</li></ol>"
        );
        assert_eq!(
            render("10) tenth"),
            "<ol class=\"rich-list\"><li>tenth</li></ol>"
        );
        assert_eq!(render("2024.was a year"), "<p>2024.was a year</p>");
    }

    #[test]
    fn test_run_ends_on_other_line() {
        assert_eq!(
            render("• a\n• b\nafter\n1. c"),
            "<ul class=\"rich-list\"><li>a</li><li>b</li></ul>\n<p>after</p>\n<ol class=\"rich-list\"><li>c</li></ol>"
        );
    }

    #[test]
    fn test_heading_wins_over_list() {
        assert_eq!(
            render("• Goals:\n• ship it"),
            "<h4 class=\"rich-heading\">• Goals</h4>\n<ul class=\"rich-list\"><li>ship it</li></ul>"
        );
    }

    #[test]
    fn test_blocks() {
        assert_eq!(
            render("First paragraph\n\n\n  \nSecond:\n  indented line  \n"),
            "<p>First paragraph</p>\n<h4 class=\"rich-heading\">Second</h4>\n<p>indented line</p>"
        );
    }

    #[test]
    fn test_escapes_markup() {
        let html = render("<script>alert('x')</script>");
        assert!(!html.contains("<script>"));
        assert_eq!(
            html,
            "<p>&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_escaping_counts_toward_heading_length() {
        // 20 ampersands escape to 100 characters
        let line = format!("{}:", "&".repeat(20));
        assert!(render(&line).starts_with("<p>"));
    }

    #[test]
    fn test_parse_block() {
        assert_eq!(
            parse_block(&["Intro:", "- a", "1. b", "text"]),
            vec![
                Element::Heading("Intro"),
                Element::UnorderedList(vec!["a"]),
                Element::OrderedList(vec!["b"]),
                Element::Paragraph("text"),
            ]
        );
    }
}
