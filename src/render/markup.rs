use super::table::{Cell, GridTable, KeyValueTable, ListBlock, OrderView};
use crate::messages;

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

pub fn error_paragraph(text: &str) -> String {
    format!(
        "<p style=\"color: red;\">{}: {}</p>",
        messages::ERROR_PREFIX,
        escape_html(text)
    )
}

pub fn key_value_table(table: &KeyValueTable) -> String {
    let mut out = String::new();
    out.push_str("<table style=\"width: 100%; border-collapse: collapse; margin-bottom: 10px;\">\n");
    if let Some(caption) = table.caption.as_deref() {
        out.push_str(&format!(
            "  <caption><strong>{}</strong></caption>\n",
            escape_html(caption)
        ));
    }
    for (key, cell) in &table.rows {
        out.push_str(&format!(
            "  <tr><td><strong>{}:</strong></td><td>{}</td></tr>\n",
            escape_html(key),
            cell_markup(cell)
        ));
    }
    out.push_str("</table>\n");
    out
}

fn cell_markup(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => escape_html(text),
        Cell::Table(table) => key_value_table(table),
        Cell::List(block) => list_block(block),
    }
}

pub fn list_block(block: &ListBlock) -> String {
    match block {
        ListBlock::Empty => messages::EMPTY_LIST.to_string(),
        ListBlock::Grid(grid) => grid_table(grid),
    }
}

pub fn grid_table(grid: &GridTable) -> String {
    let mut out = String::new();
    out.push_str(
        "<table style=\"width: 100%; border-collapse: collapse; margin: 5px 0; font-size: 0.9em;\">\n",
    );
    if let Some(caption) = grid.caption.as_deref() {
        out.push_str(&format!(
            "  <caption><strong>{}</strong></caption>\n",
            escape_html(caption)
        ));
    }
    if !grid.headers.is_empty() {
        out.push_str("  <thead>\n    <tr>");
        for h in &grid.headers {
            out.push_str(&format!(
                "<th style=\"text-align: left; border-bottom: 1px solid #ddd;\">{}</th>",
                escape_html(h)
            ));
        }
        out.push_str("</tr>\n  </thead>\n");
    }
    out.push_str("  <tbody>\n");
    for row in &grid.rows {
        out.push_str("    <tr>");
        for value in row {
            out.push_str(&format!(
                "<td style=\"padding: 4px 8px; border-bottom: 1px solid #eee;\">{}</td>",
                escape_html(value)
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");
    out
}

pub fn order_view(view: &OrderView) -> String {
    let mut out = String::new();
    out.push_str("<div style=\"font-family: Arial, sans-serif; max-width: 1000px;\">\n");
    if let Some(heading) = view.heading.as_deref() {
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(heading)));
    }
    out.push_str(&key_value_table(&view.main));
    if let Some(delivery) = view.delivery.as_ref() {
        out.push_str(&key_value_table(delivery));
    }
    if let Some(payment) = view.payment.as_ref() {
        out.push_str(&key_value_table(payment));
    }
    if let Some(items) = view.items.as_ref() {
        out.push_str(&list_block(items));
        out.push('\n');
    }
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn error_paragraph_is_red_and_escaped() {
        let html = error_paragraph("<404>");
        assert_eq!(html, "<p style=\"color: red;\">Ошибка: &lt;404&gt;</p>");
    }

    #[test]
    fn key_value_rows_escape_keys_and_values() {
        let table = KeyValueTable {
            caption: None,
            rows: vec![("<k>".to_string(), Cell::Text("a&b".to_string()))],
        };
        let html = key_value_table(&table);
        assert!(!html.contains("<caption>"));
        assert!(html.contains("<tr><td><strong>&lt;k&gt;:</strong></td><td>a&amp;b</td></tr>"));
    }

    #[test]
    fn headerless_grid_has_no_thead() {
        let grid = GridTable {
            caption: None,
            headers: Vec::new(),
            rows: vec![vec!["a".to_string()]],
        };
        let html = grid_table(&grid);
        assert!(!html.contains("<thead>"));
        assert_eq!(html.matches("<td").count(), 1);
    }
}
