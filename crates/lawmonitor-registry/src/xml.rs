//! Decoding of the registry's XML responses.
//!
//! Search (`lawSearch.do`) returns a `<LawSearch>` root with one `<law>`
//! element per hit. Detail (`lawService.do`) returns a `<법령>` root with a
//! `<기본정보>` header and the article tree under `<조문>`. An unknown serial
//! number yields a short message document saying so; other header-less
//! documents (key rejection, maintenance notices, truncated bodies) are errors.

use std::collections::HashMap;

use chrono::NaiveDate;
use lawmonitor_core::{LawDetail, LawSummary};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::RegistryError;

/// Revision kind the registry uses for a repealed law.
const REPEALED: &str = "폐지";

/// Message the registry sends instead of a law for an unknown serial number.
const NO_MATCH: &str = "일치하는 법령이 없습니다";

/// Leaf elements that carry article text, at every level of the article tree.
const ARTICLE_TEXT: [&str; 4] = ["조문내용", "항내용", "호내용", "목내용"];

enum Node<'a> {
    Open,
    Text(&'a str),
    Close,
}

/// Stream the document, calling `f` with the element path at each node.
fn walk(xml: &str, mut f: impl FnMut(&[String], Node<'_>)) -> Result<(), RegistryError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(element_name(e.name().as_ref())?);
                f(&path, Node::Open);
            }
            Event::Empty(e) => {
                path.push(element_name(e.name().as_ref())?);
                f(&path, Node::Open);
                f(&path, Node::Close);
                path.pop();
            }
            Event::End(_) => {
                f(&path, Node::Close);
                path.pop();
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| RegistryError::Xml(e.to_string()))?;
                f(&path, Node::Text(&text));
            }
            Event::CData(c) => {
                let text =
                    std::str::from_utf8(&c).map_err(|e| RegistryError::Xml(e.to_string()))?;
                f(&path, Node::Text(text));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

fn element_name(raw: &[u8]) -> Result<String, RegistryError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| RegistryError::Xml(e.to_string()))
}

fn parent(path: &[String]) -> Option<&str> {
    path.len()
        .checked_sub(2)
        .map(|i| path[i].as_str())
}

fn registry_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d").ok()
}

fn non_blank(fields: &mut HashMap<String, String>, key: &str) -> Option<String> {
    fields.remove(key).filter(|v| !v.trim().is_empty())
}

/// Decode a `lawSearch.do` response. Entries without a serial number or a
/// name are skipped.
pub fn parse_search(xml: &str) -> Result<Vec<LawSummary>, RegistryError> {
    let mut laws = Vec::new();
    let mut current: Option<HashMap<String, String>> = None;

    walk(xml, |path, node| match node {
        Node::Open if path.last().is_some_and(|n| n == "law") => {
            current = Some(HashMap::new());
        }
        Node::Text(text) if parent(path) == Some("law") => {
            if let (Some(fields), Some(name)) = (current.as_mut(), path.last()) {
                fields.insert(name.clone(), text.to_string());
            }
        }
        Node::Close if path.last().is_some_and(|n| n == "law") => {
            let Some(mut fields) = current.take() else {
                return;
            };
            if let (Some(law_id), Some(law_name)) = (
                non_blank(&mut fields, "법령일련번호"),
                non_blank(&mut fields, "법령명한글"),
            ) {
                laws.push(LawSummary {
                    law_id,
                    law_name,
                    law_type: non_blank(&mut fields, "법령구분명"),
                    ministry: non_blank(&mut fields, "소관부처명"),
                    promulgated_date: fields.get("공포일자").and_then(|d| registry_date(d)),
                    enforced_date: fields.get("시행일자").and_then(|d| registry_date(d)),
                    revision_kind: non_blank(&mut fields, "제개정구분명"),
                });
            }
        }
        _ => {}
    })?;

    Ok(laws)
}

/// Decode a `lawService.do` response for serial number `law_id`.
///
/// Returns `None` only for the registry's explicit no-match message. Any other
/// document without a law header is an [`RegistryError::Xml`]. Article text
/// is flattened to one line per article, paragraph, item, and sub-item in
/// document order.
pub fn parse_detail(xml: &str, law_id: &str) -> Result<Option<LawDetail>, RegistryError> {
    let mut header: HashMap<String, String> = HashMap::new();
    let mut lines: Vec<String> = Vec::new();
    let mut message: Option<String> = None;

    walk(xml, |path, node| {
        let Node::Text(text) = node else { return };
        if message.is_none() && !text.trim().is_empty() {
            message = Some(text.trim().to_string());
        }
        let Some(name) = path.last() else { return };

        if parent(path) == Some("기본정보") {
            header
                .entry(name.clone())
                .or_insert_with(|| text.trim().to_string());
        } else if ARTICLE_TEXT.contains(&name.as_str()) && path.iter().any(|p| p == "조문") {
            lines.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
            );
        }
    })?;

    let Some(law_name) = non_blank(&mut header, "법령명_한글") else {
        return match message {
            Some(m) if m.contains(NO_MATCH) => Ok(None),
            Some(m) => Err(RegistryError::Xml(format!(
                "no law header in response: {}",
                m.chars().take(120).collect::<String>()
            ))),
            None => Err(RegistryError::Xml("empty response".into())),
        };
    };

    Ok(Some(LawDetail {
        law_id: law_id.to_string(),
        law_name,
        law_type: non_blank(&mut header, "법종구분"),
        ministry: non_blank(&mut header, "소관부처"),
        enforced_date: header.get("시행일자").and_then(|d| registry_date(d)),
        promulgated_date: header.get("공포일자").and_then(|d| registry_date(d)),
        content: lines.join("\n"),
        repealed: header.get("제개정구분").is_some_and(|k| k == REPEALED),
    }))
}
