use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use super::HarvestError;

pub const TABLE_CSS: &str = "table.table.table-striped";

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(TABLE_CSS).unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Detail-page URLs from a day's listing, in table order.
///
/// The first row is the table header and is skipped. Every link in a row
/// counts; relative hrefs resolve against `listing_url`.
pub fn detail_links(listing_url: &str, html: &str) -> Result<Vec<String>, HarvestError> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(&TABLE)
        .next()
        .ok_or_else(|| HarvestError::MissingElement {
            url: listing_url.to_string(),
            selector: TABLE_CSS,
        })?;

    let base = Url::parse(listing_url).map_err(|source| HarvestError::BadUrl {
        url: listing_url.to_string(),
        source,
    })?;

    let mut links = Vec::new();
    for row in table.select(&ROW).skip(1) {
        for anchor in row.select(&LINK) {
            let href = anchor.value().attr("href").unwrap_or_default().trim();
            let resolved = base.join(href).map_err(|source| HarvestError::BadUrl {
                url: href.to_string(),
                source,
            })?;
            links.push(resolved.to_string());
        }
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_URL: &str = "https://meetings.test/meetings?tsml-day=0";

    #[test]
    fn listing_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/listing.html").unwrap();
        let links = detail_links(LISTING_URL, &html).unwrap();
        assert_eq!(
            links,
            vec![
                "https://meetings.test/meetings/sunday-serenity/",
                "https://meetings.test/meetings/back-bay-beginners/",
                "https://meetings.test/meetings/online-big-book/",
            ]
        );
    }

    #[test]
    fn header_row_links_are_ignored() {
        let html = r#"<table class="table table-striped">
            <tr><th><a href="/sort?by=time">Time</a></th></tr>
            <tr><td><a href="/meetings/a/">A</a></td></tr>
        </table>"#;
        let links = detail_links(LISTING_URL, html).unwrap();
        assert_eq!(links, vec!["https://meetings.test/meetings/a/"]);
    }

    #[test]
    fn header_only_table_is_empty() {
        let html = r#"<table class="table table-striped"><tr><th>Time</th></tr></table>"#;
        assert!(detail_links(LISTING_URL, html).unwrap().is_empty());
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = detail_links(LISTING_URL, "<html><body><p>Down for maintenance</p></body></html>")
            .unwrap_err();
        assert!(matches!(err, HarvestError::MissingElement { selector: TABLE_CSS, .. }));
    }
}
