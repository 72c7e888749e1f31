//! Fixed-template PDF rendering of an assembled update.
//!
//! Layout order is fixed: brand header, title, generation date, four metric
//! tiles, two chart sketches (revenue trend and growth vs target) drawn as
//! point-to-point segments, the present text sections, and a footer
//! attribution line. Content is assumed to fit one page; overflowing section
//! lines are dropped rather than paginated.

use super::assemble::AssembledUpdate;
use super::pdf_writer::{build_document, Font, Page, Rgb};
use crate::charts::ChartSeries;
use crate::constants::{BRAND_NAME, FOOTER_ATTRIBUTION};

const PRIMARY: Rgb = Rgb::new(0.15, 0.39, 0.92);
const TEXT: Rgb = Rgb::new(0.12, 0.16, 0.22);
const MUTED: Rgb = Rgb::new(0.42, 0.45, 0.50);
const GREEN: Rgb = Rgb::new(0.02, 0.59, 0.41);
const AMBER: Rgb = Rgb::new(0.85, 0.47, 0.02);
const TILE_FILL: Rgb = Rgb::new(0.94, 0.97, 1.0);

const MARGIN: f64 = 50.0;
const BODY_WIDTH_CHARS: usize = 95;
const LINE_HEIGHT: f64 = 12.0;
const FOOTER_Y: f64 = 812.0;
const CONTENT_FLOOR: f64 = 790.0;

/// Renders the one-page investor update document.
pub fn render_pdf(view: &AssembledUpdate, charts: &ChartSeries) -> Vec<u8> {
    let mut page = Page::new();

    page.text(MARGIN, 60.0, 24.0, Font::Bold, PRIMARY, BRAND_NAME);
    page.text(MARGIN, 95.0, 18.0, Font::Bold, TEXT, &view.title);
    page.text(
        MARGIN,
        115.0,
        11.0,
        Font::Regular,
        MUTED,
        &format!("Generated on {}", view.generated_at.format("%-d %B %Y")),
    );

    draw_metric_tiles(&mut page, view);

    page.text(MARGIN, 250.0, 14.0, Font::Bold, TEXT, "Performance Analytics");

    let revenue: Vec<f64> = charts.revenue_trend.iter().map(|p| p.revenue).collect();
    let revenue_months: Vec<&str> = charts
        .revenue_trend
        .iter()
        .map(|p| p.month.as_str())
        .collect();
    draw_chart_box(
        &mut page,
        270.0,
        "Revenue Growth Trend",
        &revenue,
        &revenue_months,
        PRIMARY,
        None,
    );

    let growth: Vec<f64> = charts.growth_trajectory.iter().map(|p| p.growth).collect();
    let growth_months: Vec<&str> = charts
        .growth_trajectory
        .iter()
        .map(|p| p.month.as_str())
        .collect();
    let target = charts.growth_trajectory.first().map(|p| p.target);
    draw_chart_box(
        &mut page,
        410.0,
        "Growth Trajectory vs Target",
        &growth,
        &growth_months,
        GREEN,
        target,
    );

    let mut y = 560.0;
    for section in &view.sections {
        if y + LINE_HEIGHT > CONTENT_FLOOR {
            break;
        }
        page.text(MARGIN, y, 13.0, Font::Bold, TEXT, &section.heading);
        y += 16.0;
        for line in wrap_text(&section.body, BODY_WIDTH_CHARS) {
            if y > CONTENT_FLOOR {
                break;
            }
            page.text(MARGIN, y, 10.0, Font::Regular, MUTED, &line);
            y += LINE_HEIGHT;
        }
        y += 10.0;
    }

    page.text(MARGIN, FOOTER_Y, 8.0, Font::Regular, MUTED, FOOTER_ATTRIBUTION);

    build_document(&[page])
}

fn draw_metric_tiles(page: &mut Page, view: &AssembledUpdate) {
    let tile_y = 140.0;
    let tile_w = 115.0;
    let tile_h = 60.0;
    let spacing = 127.0;
    let value_colors = [PRIMARY, GREEN, AMBER, PRIMARY];

    for (i, tile) in view.tiles.iter().enumerate() {
        let x = MARGIN + spacing * i as f64;
        page.rect_filled(x, tile_y, tile_w, tile_h, TILE_FILL);
        page.text(
            x + 10.0,
            tile_y + 28.0,
            14.0,
            Font::Bold,
            value_colors[i % value_colors.len()],
            &tile.value,
        );
        page.text(x + 10.0, tile_y + 45.0, 8.0, Font::Regular, MUTED, &tile.label);
    }
}

/// Draws one chart sketch: labelled box, point-to-point polyline with dot
/// markers, first/last month labels, and an optional dashed target line.
fn draw_chart_box(
    page: &mut Page,
    y_top: f64,
    label: &str,
    values: &[f64],
    months: &[&str],
    color: Rgb,
    target: Option<f64>,
) {
    let w = 320.0;
    let h = 90.0;

    page.text(MARGIN, y_top - 8.0, 10.0, Font::Regular, MUTED, label);
    page.rect_stroked(MARGIN, y_top, w, h, 1.0, MUTED);

    if values.is_empty() {
        return;
    }

    // Scale against the largest plotted value so the line fills the box.
    let mut max = values.iter().cloned().fold(0.0f64, f64::max);
    if let Some(t) = target {
        max = max.max(t);
    }
    let max = max.max(1.0);

    let inset_x = 15.0;
    let inset_y = 12.0;
    let step = (w - 2.0 * inset_x) / (values.len().saturating_sub(1).max(1)) as f64;
    let scale_y = |v: f64| y_top + h - inset_y - (v / max) * (h - 2.0 * inset_y);

    if let Some(t) = target {
        let ty = scale_y(t);
        page.dashed_line(MARGIN + inset_x, ty, MARGIN + w - inset_x, ty, 1.0, MUTED);
        page.text(MARGIN + 8.0, y_top + h + 12.0, 8.0, Font::Regular, MUTED, "Target");
        page.text(MARGIN + 48.0, y_top + h + 12.0, 8.0, Font::Regular, color, "Actual");
    }

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (MARGIN + inset_x + step * i as f64, scale_y(*v)))
        .collect();

    for pair in points.windows(2) {
        page.line(pair[0].0, pair[0].1, pair[1].0, pair[1].1, 2.0, color);
    }
    for (x, y) in &points {
        page.dot(*x, *y, 2.0, color);
    }

    if let (Some(first), Some(last)) = (months.first(), months.last()) {
        page.text(MARGIN + inset_x - 8.0, y_top + h + 12.0, 8.0, Font::Regular, MUTED, first);
        page.text(MARGIN + w - inset_x - 8.0, y_top + h + 12.0, 8.0, Font::Regular, MUTED, last);
    }
}

/// Word-wraps text to a fixed column width in characters. Words longer than
/// the width get a line of their own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}
