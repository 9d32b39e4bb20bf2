//! # Page Positions
//!
//! Page ids are stable but unwieldy to type. Interactive clients refer to
//! dossier pages by position instead:
//!
//! - `c` is the cover;
//! - `1`, `2`, … are content pages in their current order;
//! - `2-4` expands to `2 3 4`.
//!
//! Ranges are checked against the dossier's page count before they are
//! expanded.
//!
//! Positions are resolved to ids against a dossier snapshot right before a
//! command runs. After that, everything works on ids.

use crate::error::{DossierError, Result};
use crate::id::Id;
use crate::model::{Dossier, DossierPage};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagePosition {
    Cover,
    Content(usize),
}

impl std::fmt::Display for PagePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PagePosition::Cover => write!(f, "c"),
            PagePosition::Content(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for PagePosition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("c") || s.eq_ignore_ascii_case("cover") {
            return Ok(PagePosition::Cover);
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Page positions start at 1".to_string()),
            Ok(n) => Ok(PagePosition::Content(n)),
            Err(_) => Err(format!("Invalid page position: {}", s)),
        }
    }
}

/// A dossier page paired with the position a user would type for it.
#[derive(Debug, Clone, Copy)]
pub struct IndexedPage<'a> {
    pub position: PagePosition,
    pub page: DossierPage<'a>,
}

pub fn index_pages(dossier: &Dossier) -> Vec<IndexedPage<'_>> {
    dossier
        .pages()
        .enumerate()
        .map(|(i, page)| IndexedPage {
            position: match page {
                DossierPage::Cover(_) => PagePosition::Cover,
                DossierPage::Content(_) => PagePosition::Content(i),
            },
            page,
        })
        .collect()
}

/// Parses either a single position or a range of content positions.
///
/// `content_count` is the number of content pages a range may reach.
pub fn parse_position_or_range(
    s: &str,
    content_count: usize,
) -> std::result::Result<Vec<PagePosition>, String> {
    if let Some((start, end)) = s.split_once('-') {
        if !start.is_empty() {
            let start = PagePosition::from_str(start)?;
            let end = PagePosition::from_str(end)?;
            return expand_range(start, end, content_count);
        }
    }
    PagePosition::from_str(s).map(|pos| vec![pos])
}

fn expand_range(
    start: PagePosition,
    end: PagePosition,
    content_count: usize,
) -> std::result::Result<Vec<PagePosition>, String> {
    match (start, end) {
        (PagePosition::Content(s), PagePosition::Content(e)) => {
            if s > e {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    s, e
                ));
            }
            if e > content_count {
                return Err(format!(
                    "Invalid range: {}-{} (only {} pages)",
                    s, e, content_count
                ));
            }
            Ok((s..=e).map(PagePosition::Content).collect())
        }
        _ => Err(format!(
            "Invalid range: {}-{} (the cover cannot be part of a range)",
            start, end
        )),
    }
}

/// Parses a list of inputs, each a position or a range, into a flat list.
pub fn parse_positions<I: AsRef<str>>(
    inputs: &[I],
    content_count: usize,
) -> Result<Vec<PagePosition>> {
    let mut positions = Vec::new();
    for input in inputs {
        let parsed = parse_position_or_range(input.as_ref(), content_count)
            .map_err(DossierError::InvalidIndex)?;
        positions.extend(parsed);
    }
    Ok(positions)
}

/// Maps positions to page ids in `dossier`. Unknown positions are an error:
/// they come from user input, not from a stale view.
pub fn resolve_positions(
    dossier: &Dossier,
    positions: &[PagePosition],
) -> Result<Vec<(PagePosition, Id)>> {
    let indexed = index_pages(dossier);
    positions
        .iter()
        .map(|pos| {
            indexed
                .iter()
                .find(|ip| &ip.position == pos)
                .map(|ip| (*pos, ip.page.id().clone()))
                .ok_or_else(|| {
                    DossierError::InvalidIndex(format!(
                        "Position {} not found in dossier {}",
                        pos,
                        dossier.name()
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dossier(pages: u32) -> Dossier {
        let mut dossier = Dossier::create("Política").unwrap();
        for n in 1..=pages {
            dossier.add_content_page(Id::from("doc-1"), n);
        }
        dossier
    }

    #[test]
    fn parses_single_positions() {
        assert_eq!("c".parse::<PagePosition>(), Ok(PagePosition::Cover));
        assert_eq!("Cover".parse::<PagePosition>(), Ok(PagePosition::Cover));
        assert_eq!("3".parse::<PagePosition>(), Ok(PagePosition::Content(3)));
        assert!("0".parse::<PagePosition>().is_err());
        assert!("x".parse::<PagePosition>().is_err());
    }

    #[test]
    fn expands_ranges() {
        assert_eq!(
            parse_position_or_range("2-4", 5).unwrap(),
            vec![
                PagePosition::Content(2),
                PagePosition::Content(3),
                PagePosition::Content(4)
            ]
        );
        assert!(parse_position_or_range("4-2", 5).is_err());
        assert!(parse_position_or_range("c-2", 5).is_err());
    }

    #[test]
    fn ranges_past_the_last_page_are_rejected() {
        assert!(parse_position_or_range("2-6", 5).is_err());
        assert!(matches!(
            parse_positions(&["1-99999999999999"], 3),
            Err(DossierError::InvalidIndex(_))
        ));
        assert_eq!(parse_positions(&["1-3"], 3).unwrap().len(), 3);
    }

    #[test]
    fn indexes_cover_then_content() {
        let dossier = dossier(2);
        let positions: Vec<PagePosition> =
            index_pages(&dossier).iter().map(|ip| ip.position).collect();
        assert_eq!(
            positions,
            vec![
                PagePosition::Cover,
                PagePosition::Content(1),
                PagePosition::Content(2)
            ]
        );
    }

    #[test]
    fn resolves_positions_to_ids() {
        let dossier = dossier(3);
        let positions = parse_positions(&["3", "1"], dossier.content_count()).unwrap();
        let resolved = resolve_positions(&dossier, &positions).unwrap();
        assert_eq!(resolved[0].1, dossier.content_pages()[2].id);
        assert_eq!(resolved[1].1, dossier.content_pages()[0].id);
    }

    #[test]
    fn unknown_position_is_an_error() {
        let dossier = dossier(1);
        let result = resolve_positions(&dossier, &[PagePosition::Content(5)]);
        assert!(matches!(result, Err(DossierError::InvalidIndex(_))));
    }
}
