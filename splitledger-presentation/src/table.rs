use std::{borrow::Cow, fmt::Write};

const FONT_SIZE: u32 = 14;
const CELL_PADDING: u32 = 10;
const LINE_HEIGHT: u32 = FONT_SIZE + CELL_PADDING * 2;
const HEADER_BG: &str = "#2d3748";
const HEADER_TEXT: &str = "#ffffff";
const ROW_BG_EVEN: &str = "#f7fafc";
const ROW_BG_ODD: &str = "#edf2f7";
const ROW_TEXT: &str = "#1a202c";
const BORDER_COLOR: &str = "#cbd5e0";
const FONT_FAMILY: &str = "DejaVu Sans Mono, Noto Sans CJK JP, monospace";
const CHAR_WIDTH: f32 = 8.5;
const TEXT_COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// One table, rendered either as monospaced text or as SVG.
#[derive(Default)]
pub struct TableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

impl<'a, Seq> TableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Header, a dashed rule, then one line per row. Cells past the header
    /// count are dropped.
    pub fn to_text(&self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in col_widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(display_width(cell));
            }
        }

        let mut text = String::new();
        self.push_text_line(&mut text, self.headers, &col_widths);
        let rule: Vec<String> = col_widths.iter().map(|w| "-".repeat(*w)).collect();
        text.push_str(&rule.join(TEXT_COLUMN_GAP));
        text.push('\n');
        for row in &self.rows {
            self.push_text_line(&mut text, row.as_ref(), &col_widths);
        }
        text
    }

    fn push_text_line(&self, out: &mut String, cells: &[Cow<'a, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (i, width) in col_widths.iter().enumerate() {
            if i > 0 {
                line.push_str(TEXT_COLUMN_GAP);
            }
            let cell: &str = cells.get(i).map_or("", |cell| cell.as_ref());
            let fill = width.saturating_sub(display_width(cell));
            let (left, right) = match self.alignment(i) {
                Alignment::Left => (0, fill),
                Alignment::Center => (fill / 2, fill - fill / 2),
                Alignment::Right => (fill, 0),
            };
            line.push_str(&" ".repeat(left));
            line.push_str(cell);
            line.push_str(&" ".repeat(right));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    pub fn to_svg(&self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<u32> = self
            .headers
            .iter()
            .map(|h| estimate_text_width(h))
            .collect();

        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate() {
                if i < col_widths.len() {
                    col_widths[i] = col_widths[i].max(estimate_text_width(cell));
                }
            }
        }

        let total_width: u32 =
            col_widths.iter().sum::<u32>() + (col_count as u32 + 1) * CELL_PADDING;
        let total_height: u32 = LINE_HEIGHT * (1 + self.rows.len() as u32) + 2;

        let mut svg = String::with_capacity(4096);
        let _ = writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{total_height}" viewBox="0 0 {total_width} {total_height}">"#
        );
        let _ = writeln!(
            &mut svg,
            r#"<style>text {{ font-family: {FONT_FAMILY}; font-size: {FONT_SIZE}px; }}</style>"#
        );
        let _ = writeln!(
            &mut svg,
            r#"<rect width="{total_width}" height="{total_height}" fill="{BORDER_COLOR}" rx="4" />"#
        );
        let _ = writeln!(
            &mut svg,
            r#"<rect x="1" y="1" width="{}" height="{LINE_HEIGHT}" fill="{HEADER_BG}" rx="3" />"#,
            total_width - 2
        );

        self.push_svg_cells(&mut svg, self.headers, &col_widths, 0, HEADER_TEXT);

        for (row_idx, row) in self.rows.iter().enumerate() {
            let y = LINE_HEIGHT * (1 + row_idx as u32) + 1;
            let bg = if row_idx % 2 == 0 {
                ROW_BG_EVEN
            } else {
                ROW_BG_ODD
            };
            let _ = writeln!(
                &mut svg,
                r#"<rect x="1" y="{y}" width="{}" height="{LINE_HEIGHT}" fill="{bg}" />"#,
                total_width - 2
            );
            self.push_svg_cells(&mut svg, row.as_ref(), &col_widths, y, ROW_TEXT);
        }

        svg.push_str("</svg>");
        svg
    }

    fn push_svg_cells(
        &self,
        svg: &mut String,
        cells: &[Cow<'a, str>],
        col_widths: &[u32],
        y: u32,
        fill: &str,
    ) {
        let mut x = CELL_PADDING;
        for (i, (cell, width)) in cells.iter().zip(col_widths).enumerate() {
            let alignment = self.alignment(i);
            let text_x = compute_text_x(x, *width, alignment);
            let anchor = alignment_anchor(alignment);
            let _ = writeln!(
                svg,
                r#"<text x="{text_x}" y="{}" fill="{fill}" text-anchor="{anchor}">{}</text>"#,
                y + LINE_HEIGHT / 2 + FONT_SIZE / 2 - 2,
                escape_xml(cell)
            );
            x += width + CELL_PADDING;
        }
    }
}

// Wide (non-ASCII) characters take two terminal columns.
fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn estimate_text_width(text: &str) -> u32 {
    let width = display_width(text) as f32 * CHAR_WIDTH;
    (width.ceil() as u32).max(20) + CELL_PADDING * 2
}

fn compute_text_x(cell_x: u32, cell_width: u32, alignment: Alignment) -> u32 {
    match alignment {
        Alignment::Left => cell_x + CELL_PADDING,
        Alignment::Center => cell_x + cell_width / 2,
        Alignment::Right => cell_x + cell_width - CELL_PADDING,
    }
}

fn alignment_anchor(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "start",
        Alignment::Center => "middle",
        Alignment::Right => "end",
    }
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Stacks standalone SVG tables into one document, centred horizontally.
pub fn combine_svgs_vertically(svgs: &[&str]) -> Option<String> {
    if svgs.is_empty() {
        return None;
    }

    const SPACING: u32 = 20;

    let mut svg_data = Vec::with_capacity(svgs.len());
    for svg in svgs {
        let width = extract_svg_dimension(svg, "width")?;
        let height = extract_svg_dimension(svg, "height")?;
        let content = extract_svg_content(svg)?;
        svg_data.push((width, height, content));
    }

    let max_width = svg_data.iter().map(|(width, _, _)| *width).max()?;
    let total_height = svg_data.iter().map(|(_, height, _)| *height).sum::<u32>()
        + SPACING * (svg_data.len() as u32 - 1);

    let mut combined = String::with_capacity(svgs.iter().map(|s| s.len()).sum::<usize>() + 512);
    let _ = writeln!(
        &mut combined,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{max_width}" height="{total_height}" viewBox="0 0 {max_width} {total_height}">"#
    );
    let _ = writeln!(
        &mut combined,
        r#"<style>text {{ font-family: {FONT_FAMILY}; font-size: {FONT_SIZE}px; }}</style>"#
    );

    let mut y_offset = 0u32;
    for (width, height, content) in svg_data {
        let x_offset = (max_width - width) / 2;
        let _ = writeln!(
            &mut combined,
            r#"<g transform="translate({x_offset}, {y_offset})">"#
        );
        combined.push_str(&content);
        combined.push_str("</g>\n");
        y_offset += height + SPACING;
    }

    combined.push_str("</svg>");
    Some(combined)
}

fn extract_svg_dimension(svg: &str, attr: &str) -> Option<u32> {
    let pattern = format!("{attr}=\"");
    let start = svg.find(&pattern)? + pattern.len();
    let end = svg[start..].find('"')? + start;
    svg[start..end].parse().ok()
}

fn extract_svg_content(svg: &str) -> Option<String> {
    const STYLE_TAG_OPEN: &str = "<style>";
    const STYLE_TAG_CLOSE: &str = "</style>";

    let start = svg.find('>')? + 1;
    let end = svg.rfind("</svg>")?;
    let content = &svg[start..end];

    match (content.find(STYLE_TAG_OPEN), content.find(STYLE_TAG_CLOSE)) {
        (Some(style_start), Some(style_end)) if style_start < style_end => Some(format!(
            "{}{}",
            &content[..style_start],
            &content[style_end + STYLE_TAG_CLOSE.len()..]
        )),
        _ => Some(content.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn balance_table() -> TableBuilder<'static, [Cow<'static, str>; 2]> {
        TableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed("Member"), Cow::Borrowed("Balance")])
            .row([Cow::Borrowed("Alex"), Cow::Borrowed("+24.00")])
            .row([Cow::Borrowed("Sara"), Cow::Borrowed("-12.00")])
    }

    #[rstest]
    fn text_table_aligns_columns() {
        let text = balance_table().to_text();

        assert_eq!(
            text,
            "Member  Balance\n------  -------\nAlex     +24.00\nSara     -12.00\n"
        );
    }

    #[rstest]
    fn text_table_counts_wide_characters_twice() {
        let text = TableBuilder::new()
            .headers(&[Cow::Borrowed("Name"), Cow::Borrowed("X")])
            .row([Cow::Borrowed("太郎"), Cow::Borrowed("1")])
            .row([Cow::Borrowed("Al"), Cow::Borrowed("2")])
            .to_text();

        assert_eq!(text, "Name  X\n----  -\n太郎  1\nAl    2\n");
    }

    #[rstest]
    fn svg_table_contains_cells() {
        let svg = balance_table().to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">Alex</text>"));
        assert!(svg.contains(">+24.00</text>"));
        assert!(svg.contains(r#"text-anchor="end""#));
    }

    #[rstest]
    fn empty_headers_render_nothing() {
        let builder: TableBuilder<'_, [Cow<'_, str>; 0]> = TableBuilder::new();
        assert!(builder.to_text().is_empty());
        assert!(builder.to_svg().is_empty());
    }

    #[rstest]
    #[case::escapes_all("<test & 'value'>", "&lt;test &amp; &#39;value&#39;&gt;")]
    #[case::keeps_plain("plain", "plain")]
    fn escapes_xml(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_xml(input), expected);
    }

    #[rstest]
    fn combines_svgs_vertically() {
        let svg1 = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><text>First</text></svg>"#;
        let svg2 = r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="60"><text>Second</text></svg>"#;

        let combined = combine_svgs_vertically(&[svg1, svg2]).expect("combined svg");

        assert!(combined.contains("First"));
        assert!(combined.contains("Second"));
        assert!(combined.contains("width=\"120\""));
        assert!(combined.contains("height=\"130\""));
        assert!(combined.contains("translate(10, 0)"));
    }

    #[rstest]
    fn combining_nothing_yields_none() {
        assert!(combine_svgs_vertically(&[]).is_none());
    }
}
