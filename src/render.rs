use colored::{ColoredString, Colorize};

use crate::color::Color;
use crate::panels::CollectionKind;
use crate::record::ColorRecord;

const SWATCH_WIDTH: usize = 9;

/// A block of terminal background in `color`, labelled with its hex in a
/// readable foreground.
pub fn swatch(color: Color) -> ColoredString {
    let fg = color.readable_text();
    format!("{:^width$}", color.to_hex(), width = SWATCH_WIDTH)
        .truecolor(fg.r, fg.g, fg.b)
        .on_truecolor(color.r, color.g, color.b)
}

/// Small unlabelled swatch for inline use.
fn chip(hex: &str) -> String {
    match Color::from_hex(hex) {
        Ok(c) => format!("{} {}", "  ".on_truecolor(c.r, c.g, c.b), hex),
        Err(_) => hex.to_string(),
    }
}

fn title(record: &ColorRecord) -> String {
    record.name.clone().unwrap_or_else(|| record.hex.clone())
}

/// Multi-line detail view of a single record.
///
/// RGB and HSL are computed locally when the record does not carry them.
pub fn record(record: &ColorRecord) -> String {
    let color = Color::from_hex(&record.hex).ok();
    let mut lines = Vec::new();

    let head = match color {
        Some(c) => format!("{} {}", swatch(c), title(record).bold()),
        None => title(record).bold().to_string(),
    };
    lines.push(head);
    lines.push(format!("  {:<10}{}", "id", record.id));
    lines.push(format!("  {:<10}{}", "hex", record.hex));

    let rgb = record
        .rgb
        .clone()
        .or_else(|| color.map(Color::to_rgb_string));
    let hsl = record
        .hsl
        .clone()
        .or_else(|| color.map(Color::to_hsl_string));
    if let Some(rgb) = rgb {
        lines.push(format!("  {:<10}{}", "rgb", rgb));
    }
    if let Some(hsl) = hsl {
        lines.push(format!("  {:<10}{}", "hsl", hsl));
    }
    if let Some(cmyk) = &record.cmyk {
        lines.push(format!("  {:<10}{}", "cmyk", cmyk));
    }
    if let Some(contrast) = &record.contrast {
        lines.push(format!("  {:<10}{}", "contrast", chip(contrast)));
    }
    if let Some(searched) = &record.searched {
        lines.push(format!("  {:<10}{}", "searched", searched));
    }
    if record.is_mix() {
        let inputs: Vec<String> = record.source_inputs.iter().map(|h| chip(h)).collect();
        lines.push(format!(
            "  {:<10}{} = {}",
            "mix",
            inputs.join(" + "),
            chip(&record.hex)
        ));
    }
    if let Some(created_at) = &record.created_at {
        lines.push(format!("  {:<10}{}", "created", created_at));
    }

    lines.join("\n")
}

/// One line per saved record, or a hint when the collection is empty.
pub fn list(kind: CollectionKind, records: &[ColorRecord]) -> String {
    if records.is_empty() {
        let hint = match kind {
            CollectionKind::Names => "No saved colors yet. Search a name and save it.",
            CollectionKind::Mixes => "No saved mixes yet. Mix two colors and save the result.",
            CollectionKind::Api => "No saved API colors yet. Look one up and save it.",
        };
        return hint.dimmed().to_string();
    }

    records
        .iter()
        .map(|r| {
            let lead = match Color::from_hex(&r.hex) {
                Ok(c) => swatch(c).to_string(),
                Err(_) => format!("{:^width$}", r.hex, width = SWATCH_WIDTH),
            };
            let detail = if r.is_mix() {
                format!(
                    "{} = {}",
                    r.source_inputs.join(" + "),
                    r.hex
                )
            } else {
                title(r)
            };
            let mut line = format!("{lead} {:>14}  {detail}", r.id.to_string().dimmed());
            if let Some(created_at) = &r.created_at {
                line.push_str(&format!("  ({created_at})"));
            } else if let Some(searched) = &r.searched {
                line.push_str(&format!("  (searched: {searched})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
