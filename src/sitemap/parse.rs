//! Sitemap XML decoding.
//!
//! Walks the document with `quick_xml` and checks well-formedness itself
//! (single root, nothing outside it, every element closed), so a truncated
//! or non-XML body is rejected instead of yielding a partial list.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::SitemapEntry;
use crate::error_handling::ParseError;

/// Decoded sitemap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SitemapDocument {
    /// `<urlset>`: the page entries, in document order.
    UrlSet(Vec<SitemapEntry>),
    /// `<sitemapindex>`: locations of child sitemaps, in document order.
    Index(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootKind {
    UrlSet,
    Index,
}

impl RootKind {
    fn item_name(self) -> &'static str {
        match self {
            RootKind::UrlSet => "url",
            RootKind::Index => "sitemap",
        }
    }
}

#[derive(Default)]
struct PendingItem {
    loc: Option<String>,
    lastmod: Option<String>,
}

fn parse_error(position: u64, message: impl Into<String>) -> ParseError {
    ParseError {
        position,
        message: message.into(),
    }
}

fn check_attributes(start: &BytesStart<'_>, position: u64) -> Result<(), ParseError> {
    // Duplicate names are caught too, the iterator checks by default
    for attribute in start.attributes() {
        attribute.map_err(|err| parse_error(position, format!("malformed attribute: {err}")))?;
    }
    Ok(())
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn root_kind(name: &str, position: u64) -> Result<RootKind, ParseError> {
    match name {
        "urlset" => Ok(RootKind::UrlSet),
        "sitemapindex" => Ok(RootKind::Index),
        other => Err(parse_error(
            position,
            format!("expected <urlset> or <sitemapindex> root element, found <{other}>"),
        )),
    }
}

/// Parses a sitemap or sitemap index document.
pub(crate) fn parse_sitemap(xml: &str) -> Result<SitemapDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<RootKind> = None;
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<PendingItem> = None;
    let mut text = String::new();
    let mut entries = Vec::new();
    let mut children = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                check_attributes(&e, position)?;
                let name = local_name(e.local_name().as_ref());
                if stack.is_empty() {
                    if root.is_some() {
                        return Err(parse_error(position, "multiple root elements"));
                    }
                    root = Some(root_kind(&name, position)?);
                } else if stack.len() == 1
                    && root.is_some_and(|kind| kind.item_name() == name)
                {
                    current = Some(PendingItem::default());
                }
                text.clear();
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                check_attributes(&e, position)?;
                if stack.is_empty() {
                    let name = local_name(e.local_name().as_ref());
                    if root.is_some() {
                        return Err(parse_error(position, "multiple root elements"));
                    }
                    root = Some(root_kind(&name, position)?);
                }
            }
            Ok(Event::Text(e)) => {
                let value = e
                    .unescape()
                    .map_err(|err| parse_error(position, err.to_string()))?;
                if stack.is_empty() {
                    if !value.trim().is_empty() {
                        return Err(parse_error(position, "text outside of the root element"));
                    }
                } else {
                    text.push_str(&value);
                }
            }
            Ok(Event::CData(e)) => {
                if stack.is_empty() {
                    return Err(parse_error(position, "CDATA outside of the root element"));
                }
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) => {
                // quick_xml rejects mismatched end tags itself
                let depth = stack.len();
                let name = local_name(e.local_name().as_ref());
                stack.pop();
                match (depth, name.as_str()) {
                    (3, "loc") => {
                        if let Some(item) = current.as_mut() {
                            item.loc = Some(text.trim().to_string());
                        }
                    }
                    (3, "lastmod") => {
                        if let Some(item) = current.as_mut() {
                            item.lastmod = Some(text.trim().to_string());
                        }
                    }
                    (2, _) => {
                        if let Some(item) = current.take() {
                            match item.loc.filter(|loc| !loc.is_empty()) {
                                Some(loc) => match root {
                                    Some(RootKind::UrlSet) => entries.push(SitemapEntry {
                                        loc,
                                        lastmod: item.lastmod.filter(|l| !l.is_empty()),
                                    }),
                                    _ => children.push(loc),
                                },
                                None => log::debug!("Skipping sitemap item without <loc>"),
                            }
                        }
                    }
                    _ => {}
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, processing instructions, doctype
            Ok(_) => {}
            Err(err) => return Err(parse_error(position, err.to_string())),
        }
    }

    if let Some(open) = stack.last() {
        return Err(parse_error(
            reader.buffer_position() as u64,
            format!("unexpected end of document, <{open}> is not closed"),
        ));
    }

    match root {
        Some(RootKind::UrlSet) => Ok(SitemapDocument::UrlSet(entries)),
        Some(RootKind::Index) => Ok(SitemapDocument::Index(children)),
        None => Err(parse_error(0, "document has no root element")),
    }
}
