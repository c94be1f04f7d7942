// Plain-text renderings of flow results for the terminal.

use crate::core::bulk::BulkTranslationFlow;
use crate::core::navigation::{ConverterMode, Navigation, Tab};
use crate::core::star::{BadgeCategory, StarView};
use crate::domain::model::{TargetDomain, TranslationResult};
use std::fmt::Write;

pub fn badges<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("[{}]", item.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_translation(result: &TranslationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Translation Result");
    let _ = writeln!(out, "Translated Point:");
    let _ = writeln!(out, "  {}", result.translated_point);
    let _ = writeln!(out, "Domain Alignment: {}", badges(&result.domain_alignment));
    let _ = write!(out, "Preserved Elements: {}", badges(&result.preserved_elements));
    out
}

pub fn bulk_progress(flow: &BulkTranslationFlow) -> String {
    format!("Processing {} points...", flow.submitted_count())
}

/// One numbered row per result; the expanded row also lists its details.
pub fn render_bulk(flow: &BulkTranslationFlow) -> String {
    let mut out = String::from("Results");
    for (index, row) in flow.rows().iter().enumerate() {
        let _ = write!(
            out,
            "\n{:>3}. {}\n     -> {}",
            index + 1,
            row.item.original,
            row.item.translated
        );
        if flow.is_expanded(row.id) {
            let _ = write!(
                out,
                "\n     Domain Alignment: {}\n     Preserved Elements: {}",
                badges(&row.item.domain_alignment),
                badges(&row.item.preserved_elements)
            );
        }
    }
    out
}

fn category_marker(category: BadgeCategory) -> &'static str {
    match category {
        BadgeCategory::Situation => "S",
        BadgeCategory::Task => "T",
        BadgeCategory::Action => "A",
        BadgeCategory::Result => "R",
        BadgeCategory::General => "*",
    }
}

pub fn render_star(view: &StarView<'_>) -> String {
    let mut out = String::new();
    match view {
        StarView::Compliant { message, .. } => {
            let _ = writeln!(out, "{}", message);
        }
        StarView::NeedsWork { missing, .. } => {
            let labels: Vec<String> = missing
                .iter()
                .map(|badge| format!("{}:{}", category_marker(badge.category), badge.label))
                .collect();
            let _ = writeln!(out, "Missing STAR Elements: {}", badges(&labels));
        }
    }
    let _ = writeln!(out, "STAR Format Result:");
    let _ = write!(out, "  {}", view.transformed_point());
    out
}

/// Tab list with the active tab marked; the converter tab lists its modes.
pub fn render_navigation(navigation: &Navigation) -> String {
    let mut lines = Vec::new();
    for tab in navigation.tabs() {
        let marker = if *tab == navigation.active() { ">" } else { " " };
        let status = if tab.is_available() { "" } else { " (coming soon)" };
        lines.push(format!("{} {}{}", marker, tab.name(), status));

        if *tab == Tab::CvPointConverter {
            for mode in ConverterMode::ALL {
                let marker = if mode == navigation.converter_mode() { "*" } else { " " };
                lines.push(format!("    {} {}", marker, mode.name()));
            }
        }
    }
    lines.join("\n")
}

/// Accepted `--domain` values next to their display labels.
pub fn render_domains() -> String {
    TargetDomain::ALL
        .iter()
        .map(|domain| format!("  {:<20} {}", domain.as_str(), domain.label()))
        .collect::<Vec<_>>()
        .join("\n")
}
