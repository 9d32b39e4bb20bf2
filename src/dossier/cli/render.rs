//! # Rendering
//!
//! Turns `CmdResult` payloads into terminal text. Functions return strings so
//! the output can be tested; `commands.rs` does the printing.
//!
//! Layout (widths, truncation) is computed here with Unicode-aware widths.
//! Colors come from `colored`, which honours `NO_COLOR` and `CLICOLOR`.

use chrono::{DateTime, Utc};
use colored::Colorize;
use dossier::api::{
    CmdMessage, DocumentSummary, DossierSummary, DossierView, MessageLevel, PagePreview,
    PageRender, ViewEntry,
};
use dossier::catalog::RenderableHandle;
use dossier::config::DossierConfig;
use dossier::source::TextPage;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const SELECTED_MARKER: &str = "▸";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn render_documents(documents: &[DocumentSummary]) -> String {
    let mut out = String::new();
    for doc in documents {
        let pages = match (doc.page_count, &doc.failure) {
            (Some(n), _) => format!("{} pages", n),
            (None, Some(_)) => "unreadable".red().to_string(),
            (None, None) => String::new(),
        };
        out.push_str(&format!(
            "{} {}. {}  {}\n",
            selection_prefix(doc.is_selected),
            doc.position,
            doc.name.bold(),
            pages.dimmed()
        ));
    }
    out
}

pub fn render_dossiers(dossiers: &[DossierSummary]) -> String {
    let mut out = String::new();
    for dossier in dossiers {
        let count = format!("({} pages)", dossier.content_count);
        out.push_str(&format!(
            "{} {}. {}  {}  {}\n",
            selection_prefix(dossier.is_selected),
            dossier.position,
            dossier.name.bold(),
            count,
            format_time_ago(dossier.created_at).dimmed()
        ));
    }
    out
}

/// Renders a dossier: a cover card followed by one card per content page.
///
/// `scale` sizes the page thumbnail relative to the line width.
pub fn render_dossier_view(view: &DossierView, scale: f32) -> String {
    let thumb_width = thumbnail_width(scale);
    let mut out = String::new();

    for entry in &view.entries {
        match entry {
            ViewEntry::Cover { title, subtitle } => {
                let rule = "═".repeat(thumb_width.max(title.width() + 4));
                out.push_str(&format!("  c. {}\n", "Cover".yellow()));
                out.push_str(&format!("     {}\n", rule));
                out.push_str(&format!("       {}\n", title.to_uppercase().bold()));
                if !subtitle.is_empty() {
                    out.push_str(&format!("       {}\n", subtitle.italic()));
                }
                out.push_str(&format!("     {}\n", rule));
            }
            ViewEntry::Content {
                position,
                document_name,
                page_number,
                markers,
                render,
                ..
            } => {
                let source = document_name.as_deref().unwrap_or("Document");
                out.push_str(&format!(
                    "  {}. {} · Page {}\n",
                    position,
                    source.bold(),
                    page_number
                ));
                out.push_str(&format!("     {}\n", render_thumbnail(render, thumb_width)));
                if markers.is_empty() {
                    out.push_str(&format!("     {}\n", "No markers".dimmed()));
                } else {
                    let chips: Vec<String> = markers
                        .iter()
                        .enumerate()
                        .map(|(i, m)| format!("[{}] {}", i + 1, m.text))
                        .collect();
                    out.push_str(&format!("     Markers: {}\n", chips.join("  ").cyan()));
                }
            }
        }
    }
    out
}

pub fn render_previews(document_name: &str, pages: &[PagePreview], scale: f32) -> String {
    let thumb_width = thumbnail_width(scale);
    let mut out = format!("{}\n", document_name.bold());
    for preview in pages {
        out.push_str(&format!(
            "  Page {:<4} {}\n",
            preview.page_number,
            render_thumbnail(&preview.render, thumb_width)
        ));
    }
    out
}

pub fn render_config(config: &DossierConfig) -> String {
    config
        .list_all()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

fn render_thumbnail(render: &PageRender, width: usize) -> String {
    match render {
        PageRender::Available(handle) => truncate_to_width(&caption(handle), width),
        PageRender::Unavailable(reason) => reason.red().to_string(),
    }
}

fn caption(handle: &RenderableHandle) -> String {
    match handle.downcast_ref::<TextPage>() {
        Some(page) => page.headline().unwrap_or("(blank page)").to_string(),
        None => format!("[page {}]", handle.page_number()),
    }
}

fn thumbnail_width(scale: f32) -> usize {
    let width = (LINE_WIDTH as f32 * scale.clamp(0.1, 1.0)).round() as usize;
    width.max(10)
}

fn selection_prefix(selected: bool) -> String {
    if selected {
        SELECTED_MARKER.yellow().to_string()
    } else {
        " ".to_string()
    }
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier::id::Id;
    use dossier::index::PagePosition;
    use dossier::model::Marker;

    fn summary(position: usize, name: &str, selected: bool) -> DossierSummary {
        DossierSummary {
            position,
            id: Id::from(format!("dossier-{}", position)),
            name: name.to_string(),
            content_count: 2,
            created_at: Utc::now(),
            is_selected: selected,
        }
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("hola", 10), "hola");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn dossier_list_shows_counts_and_selection() {
        colored::control::set_override(false);
        let out = render_dossiers(&[summary(1, "Política", false), summary(2, "Deportes", true)]);
        assert!(out.contains("1. Política  (2 pages)"));
        assert!(out.contains(&format!("{} 2. Deportes", SELECTED_MARKER)));
    }

    #[test]
    fn view_shows_cover_pages_markers_and_unavailable() {
        colored::control::set_override(false);
        let view = DossierView {
            id: Id::from("dossier-1"),
            name: "Economía".to_string(),
            entries: vec![
                ViewEntry::Cover {
                    title: "Economía".to_string(),
                    subtitle: "Dossier de prensa".to_string(),
                },
                ViewEntry::Content {
                    position: PagePosition::Content(1),
                    page_id: Id::from("page-1"),
                    document_id: Id::from("doc-gone"),
                    document_name: None,
                    page_number: 4,
                    markers: vec![Marker {
                        id: Id::from("marker-1"),
                        text: "bolsa".to_string(),
                    }],
                    render: PageRender::Unavailable("Document unavailable".to_string()),
                },
            ],
        };

        let out = render_dossier_view(&view, 0.45);
        assert!(out.contains("ECONOMÍA"));
        assert!(out.contains("Dossier de prensa"));
        assert!(out.contains("1. Document · Page 4"));
        assert!(out.contains("Document unavailable"));
        assert!(out.contains("[1] bolsa"));
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config(&DossierConfig::default());
        assert!(out.contains("default-dossiers = Política, Deportes, Economía"));
        assert!(out.contains("thumbnail-scale = 0.45"));
        assert!(out.contains("id-strategy = random"));
    }
}
