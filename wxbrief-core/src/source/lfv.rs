//! Scraper for the LFV AIS briefing pages carrying METAR and TAF text.
//!
//! The pages are plain server-rendered markup, so the extraction is a
//! small hand-rolled scan rather than a full HTML parser: case-insensitive
//! tag detection, class-token matching and local scanning within known
//! blocks. Parsing is pure and testable offline against fixtures.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;

use super::ReportSource;
use crate::model::ReportMap;

const METAR_URL: &str = "https://aro.lfv.se/Links/Link/ViewLink?TorLinkId=314&type=MET";
const TAF_URL: &str = "https://aro.lfv.se/Links/Link/ViewLink?TorLinkId=315&type=MET";

// Row containers come styled and unstyled ("tor-link-text-row" and
// "tor-link-text-row no-background"); matching on the shared token covers
// both variants.
const ROW_CLASS: &str = "tor-link-text-row";
const ITEM_CLASS: &str = "tor-link-text-row-item";

#[derive(Debug, Clone, Default)]
pub struct LfvReports {
    http: Client,
}

impl LfvReports {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<ReportMap> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read report page body from {url}"))?;

        if !status.is_success() {
            bail!("Report page {url} answered with status {status}");
        }

        Ok(parse_text_rows(&body))
    }
}

#[async_trait]
impl ReportSource for LfvReports {
    async fn metar(&self) -> Result<ReportMap> {
        self.fetch(METAR_URL).await
    }

    async fn taf(&self) -> Result<ReportMap> {
        self.fetch(TAF_URL).await
    }
}

/// Extract label -> report text pairs from a briefing page.
///
/// Each report sits in a `<div>` row tagged with the `tor-link-text-row`
/// class, holding `<span class="tor-link-text-row-item">` items. Only rows
/// with exactly two items carry a report (label, text); anything else is
/// skipped. A label seen twice keeps its last value.
pub fn parse_text_rows(html: &str) -> ReportMap {
    let mut data = HashMap::new();

    for row in element_blocks(html, "div", ROW_CLASS) {
        let items: Vec<String> = element_blocks(&row, "span", ITEM_CLASS)
            .iter()
            .map(|inner| text_content(inner))
            .collect();

        if let [label, value] = items.as_slice() {
            data.insert(label.clone(), value.clone());
        }
    }

    data
}

/// Inner markup of every `tag` element whose class tokens contain `class`.
fn element_blocks(html: &str, tag: &str, class: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{tag}");
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_tag_open(&lower, &open, pos) {
        let Some(end_rel) = lower[start..].find('>') else {
            break;
        };
        let tag_end = start + end_rel;
        let attrs = &html[start + open.len()..tag_end];
        let inner_start = tag_end + 1;

        // Self-closing elements carry no content.
        if attrs.trim_end().ends_with('/') {
            pos = inner_start;
            continue;
        }

        let Some(inner_end) = matching_close(&lower, tag, inner_start) else {
            break;
        };

        if class_list(attrs).iter().any(|token| token == class) {
            blocks.push(html[inner_start..inner_end].to_string());
        }

        // Continue just past the opening tag so nested matches are seen too.
        pos = inner_start;
    }

    blocks
}

/// Next occurrence of `open` (e.g. `<div`) at a real tag boundary, so that
/// longer tag names sharing the prefix do not match.
fn find_tag_open(lower: &str, open: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lower[pos..].find(open) {
        let start = pos + rel;
        let after = start + open.len();
        if after == lower.len() || lower[after..].starts_with([' ', '\t', '\n', '\r', '>', '/']) {
            return Some(start);
        }
        pos = after;
    }
    None
}

/// Position of the close tag matching the element whose content starts at
/// `from`, tracking nesting of the same tag name.
fn matching_close(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut depth = 0;
    let mut pos = from;

    loop {
        let close_at = pos + lower[pos..].find(&close)?;
        if let Some(open_at) = find_tag_open(lower, &open, pos) {
            if open_at < close_at {
                depth += 1;
                pos = open_at + open.len();
                continue;
            }
        }
        if depth == 0 {
            return Some(close_at);
        }
        depth -= 1;
        pos = close_at + close.len();
    }
}

fn class_list(attrs: &str) -> Vec<String> {
    attr_value(attrs, "class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Value of an attribute within a tag's attribute string. Handles single
/// and double quotes as well as unquoted values, case-insensitively.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let needle = name.to_ascii_lowercase();
    let mut pos = 0;

    while let Some(rel) = lower[pos..].find(&needle) {
        let start = pos + rel;
        let boundary = start == 0 || bytes[start - 1].is_ascii_whitespace();

        let mut i = start + needle.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        if boundary && i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() {
                return None;
            }
            if bytes[i] == b'"' || bytes[i] == b'\'' {
                let quote = bytes[i] as char;
                let val_start = i + 1;
                return attrs[val_start..]
                    .find(quote)
                    .map(|end| attrs[val_start..val_start + end].to_string());
            }
            let end = attrs[i..]
                .find(|c: char| c.is_ascii_whitespace())
                .map_or(attrs.len(), |e| i + e);
            return Some(attrs[i..end].to_string());
        }

        pos = start + needle.len();
    }

    None
}

/// Text content of a markup fragment: nested tags stripped, common
/// entities decoded, whitespace collapsed.
fn text_content(inner: &str) -> String {
    let mut text = String::with_capacity(inner.len());
    let mut in_tag = false;
    for ch in inner.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let decoded = decode_entities(&text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
