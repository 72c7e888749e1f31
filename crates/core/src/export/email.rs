//! Plain-text email rendering.

use super::assemble::AssembledUpdate;
use crate::narrative;

/// Renders an assembled update as an email-ready text block.
///
/// The first line is a literal `Subject:` header; the body is plain text with
/// the metric tiles as a bullet block and each present section as a plain
/// heading followed by its email-formatted content.
pub fn render_email(view: &AssembledUpdate) -> String {
    let mut out = String::new();

    out.push_str(&format!("Subject: {}\n\n", view.title));
    out.push_str("Dear Investors,\n\n");
    out.push_str(&format!(
        "I hope this message finds you well. Here is our latest update: {}.\n\n",
        view.title
    ));

    out.push_str("Key Metrics\n");
    for tile in &view.tiles {
        out.push_str(&format!("\u{2022} {}: {}\n", tile.label, tile.value));
    }
    out.push('\n');

    for section in &view.sections {
        out.push_str(&format!("{}\n", section.heading));
        out.push_str(&narrative::format_for_email(&section.body));
        out.push_str("\n\n");
    }

    out.push_str(
        "Thank you for your continued support. Please don't hesitate to reach out \
         if you have any questions.\n\nBest regards\n",
    );

    collapse_blank_runs(&out)
}

fn collapse_blank_runs(input: &str) -> String {
    let mut out = input.to_string();
    while out.contains("\n\n\n") {
        out = out.replace("\n\n\n", "\n\n");
    }
    out
}
