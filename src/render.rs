use console::{Alignment, Style, measure_text_width, pad_str};

use crate::table::TruthTable;

fn mark(value: bool, color: bool) -> String {
    let (text, style) = if value {
        ("T", Style::new().green())
    } else {
        ("F", Style::new().red())
    };
    let style = if color { style } else { style.force_styling(false) };
    style.apply_to(text).to_string()
}

/// Formats `table` with one column per variable and a last column headed by
/// `formula`. `T`/`F` are green/red when `color` is set and the terminal allows.
pub fn render(formula: &str, table: &TruthTable<'_>, color: bool) -> String {
    let widths: Vec<usize> = table
        .variables
        .iter()
        .map(|name| measure_text_width(name))
        .chain([measure_text_width(formula)])
        .collect();

    let line_width = widths.iter().map(|width| width + 3).sum::<usize>() + 1;
    let separator = "-".repeat(line_width);

    let row = |cells: Vec<String>| {
        let cells: String = cells.iter().map(|cell| format!(" {cell} |")).collect();
        format!("|{cells}\n")
    };

    let header = table
        .variables
        .iter()
        .copied()
        .chain([formula])
        .map(str::to_string)
        .collect();

    let mut out = row(header);
    out.push_str(&separator);
    out.push('\n');

    for values in &table.rows {
        let cells = values
            .values
            .iter()
            .chain([&values.result])
            .zip(&widths)
            .map(|(value, width)| {
                pad_str(&mark(*value, color), *width, Alignment::Center, None).into_owned()
            })
            .collect();
        out.push_str(&row(cells));
    }

    out.push_str(&separator);
    out.push('\n');
    out
}

/// One line for the single evaluation variant.
pub fn render_value(formula: &str, value: bool, color: bool) -> String {
    format!("{formula} = {}", mark(value, color))
}
