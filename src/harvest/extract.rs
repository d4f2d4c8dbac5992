use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::dom::{elements_after, is_tag, next_siblings_named, spaced_text_of, text_of};
use super::record::{Meeting, MeetingTimes, ZoomConnection};
use super::times::{parse_times, TimeParseError};
use super::HarvestError;

pub const MEETING_TIME_CSS: &str = "p.meeting-time";
const ZOOM_LABEL: &str = "Join with Zoom";
const ONLINE_HEADING: &str = "Online Meeting";
const CONTACT_HEADING: &str = "Contact Information";

static MEETING_TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(MEETING_TIME_CSS).unwrap());
static ATTENDANCE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.attendance-option").unwrap());
static LOCATION_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.list-group-item-location").unwrap());
static ADDRESS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.location-address").unwrap());
static RULE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("hr").unwrap());
static ZOOM_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.btn.btn-default.btn-block").unwrap());
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.list-group-item-heading").unwrap());
static LOCATION_NOTES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.location-notes p").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Build the record for one detail page.
///
/// Only the meeting time is required; every other field degrades to absent.
pub fn extract_meeting(day: &str, url: &str, html: &str) -> Result<Meeting, HarvestError> {
    let doc = Html::parse_document(html);

    let mut meeting = Meeting::new(day, meeting_times(&doc, url)?);
    meeting.attendance_options = expect_field(attendance_options(&doc), "attendance_options", url);
    meeting.venue = expect_field(venue(&doc), "venue", url);
    meeting.address = expect_field(address(&doc), "address", url);
    meeting.format = expect_field(format_tags(&doc), "format", url);
    meeting.zoom_connection = zoom_connection(&doc);
    meeting.zoom_info = online_section(&doc);
    meeting.venue_notes = venue_notes(&doc);
    meeting.email = contact_email(&doc);

    Ok(meeting)
}

/// Log a miss on a field most pages carry. Misses are not failures.
fn expect_field<T>(value: Option<T>, field: &str, url: &str) -> Option<T> {
    if value.is_none() {
        debug!(field, url, "field not found on detail page");
    }
    value
}

fn meeting_times(doc: &Html, url: &str) -> Result<MeetingTimes, HarvestError> {
    let label = doc
        .select(&MEETING_TIME)
        .next()
        .map(text_of)
        .ok_or_else(|| HarvestError::MissingElement {
            url: url.to_string(),
            selector: MEETING_TIME_CSS,
        })?;

    match parse_times(&label) {
        Ok(times) => Ok(times),
        Err(TimeParseError::Unsupported { tokens, .. }) => {
            warn!(url, label = %label, "unsupported time label, keeping start only");
            Ok(MeetingTimes {
                start: tokens.into_iter().next().unwrap_or_default(),
                end: None,
            })
        }
        Err(source) => Err(HarvestError::Time {
            url: url.to_string(),
            source,
        }),
    }
}

pub fn attendance_options(doc: &Html) -> Option<Vec<String>> {
    let label = doc.select(&ATTENDANCE).next().map(text_of)?;
    Some(split_attendance(&label))
}

/// `"In Person and Online"` -> `["In Person", "Online"]`.
pub fn split_attendance(label: &str) -> Vec<String> {
    let label = label.trim();
    match label.split_once(" and ") {
        Some((first, second)) => vec![first.trim().to_string(), second.trim().to_string()],
        None => vec![label.to_string()],
    }
}

/// Location name: the first element after the location link.
pub fn venue(doc: &Html) -> Option<String> {
    let link = doc.select(&LOCATION_LINK).next()?;
    elements_after(doc, link).next().map(text_of)
}

pub fn address(doc: &Html) -> Option<String> {
    doc.select(&ADDRESS).next().map(spaced_text_of)
}

/// Format tags are the `li` run that follows the first `<hr>`.
pub fn format_tags(doc: &Html) -> Option<Vec<String>> {
    let rule = doc.select(&RULE).next()?;
    let first = elements_after(doc, rule).find(|el| is_tag(el, "li"))?;
    let tags = std::iter::once(first)
        .chain(next_siblings_named(first, "li"))
        .map(text_of)
        .collect();
    Some(tags)
}

pub fn zoom_connection(doc: &Html) -> Option<ZoomConnection> {
    let button = doc.select(&ZOOM_BUTTON).next()?;
    if text_of(button) != ZOOM_LABEL {
        return None;
    }
    let details = elements_after(doc, button).find(|el| is_tag(el, "p"))?;
    parse_zoom_text(&text_of(details))
}

/// Pull meeting id and passcode out of `"Meeting ID: <id>, Passcode: <pw>"`.
///
/// Only text with exactly two colons is trusted. The id block is cut at the
/// first `p`, which drops "passcode" or a trailing duration note.
pub fn parse_zoom_text(text: &str) -> Option<ZoomConnection> {
    if text.matches(':').count() != 2 {
        return None;
    }
    let mut parts = text.split(':').skip(1);
    let id_block = parts.next()?.to_lowercase();
    let passcode = parts.next()?.trim().to_string();
    let meeting_id = id_block
        .split('p')
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| c.is_whitespace() || c == ',')
        .to_string();
    Some(ZoomConnection {
        meeting_id,
        passcode,
    })
}

fn heading<'a>(doc: &'a Html, title: &str) -> Option<ElementRef<'a>> {
    doc.select(&HEADING).filter(|h| text_of(*h) == title).last()
}

/// Raw markup of the "Online Meeting" section.
pub fn online_section(doc: &Html) -> Option<String> {
    let heading = heading(doc, ONLINE_HEADING)?;
    let section = heading.parent().and_then(ElementRef::wrap)?;
    Some(section.html())
}

pub fn venue_notes(doc: &Html) -> Option<String> {
    doc.select(&LOCATION_NOTES).next().map(text_of)
}

/// Contact email, looked up only when the page has a contact section.
pub fn contact_email(doc: &Html) -> Option<String> {
    heading(doc, CONTACT_HEADING)?;
    doc.select(&LINK)
        .filter(|a| a.value().attr("href").is_some_and(|h| h.contains("mailto")))
        .last()
        .map(text_of)
}

// ── Tests ──
