use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// All descendant text, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text nodes joined by a single space with whitespace runs collapsed.
pub fn spaced_text_of(el: ElementRef<'_>) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    WHITESPACE_RE.replace_all(&joined, " ").trim().to_string()
}

/// Elements that come after `anchor`'s opening tag in document order,
/// starting with its own descendants.
pub fn elements_after<'a>(
    doc: &'a Html,
    anchor: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let id = anchor.id();
    doc.tree
        .root()
        .descendants()
        .skip_while(move |node| node.id() != id)
        .skip(1)
        .filter_map(ElementRef::wrap)
}

/// Following sibling elements of `el` with tag `name`.
pub fn next_siblings_named<'a>(
    el: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(move |sib| sib.value().name() == name)
}

pub fn is_tag(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().name() == name
}
