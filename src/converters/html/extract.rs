//! The element classifier and extractor: a single traversal in document
//! order over the typed DOM snapshot that classifies each element, emits a
//! slide-description record for it, and marks consumed subtrees so no
//! element contributes twice.

use std::collections::HashSet;

use log::debug;

use super::constants::{INLINE_TEXT_TAGS, MANUAL_BULLET_GLYPHS, TEXT_TAGS};
use super::runs::{flatten_runs, has_inline_formatting, plain_text, trim_run_sequence};
use super::units::{
    background_color_or_white, corrected_position, first_font_family, is_bold_weight,
    normalize_align, parse_box_shadow, parse_color, parse_line_spacing, parse_px, parse_rotation,
    px_to_in, px_to_pt,
};
use crate::errors::Result;
use crate::host::{evaluate_json, PageHost};
use crate::models::background::{Background, BackgroundStyle};
use crate::models::common::{Position, VAlign};
use crate::models::dom::{DomChild, DomNode, DomSnapshot};
use crate::models::elements::{
    BgImageElement, ImageElement, ImageStyle, LineElement, ListElement, ShapeElement, SlideElement,
    SvgElement, TableElement, TextElement,
};
use crate::models::list::ListStyle;
use crate::models::placeholder::PlaceholderRegion;
use crate::models::shape::{ShapeStyle, StrokeStyle};
use crate::models::table::{CellBorder, CellOptions, TableCell};
use crate::models::text::{Bullet, Run, TextContent, TextStyle, TextTag};
use crate::models::SlideDescription;

/// The in-page serializer. Kept self-contained so hosts can inject it as-is.
pub(crate) const SNAPSHOT_JS: &str = include_str!("snapshot.js");

/// Evaluates the snapshot script against the page and decodes the result.
pub(crate) fn snapshot_page(page: &mut dyn PageHost) -> Result<DomSnapshot> {
    let value = evaluate_json(page, SNAPSHOT_JS)?;
    Ok(serde_json::from_value(value)?)
}

/// Extracts the slide description from a snapshot. Content-rule violations
/// are accumulated on the description; the validator decides the outcome.
pub(crate) fn extract(snapshot: &DomSnapshot) -> SlideDescription {
    let mut extractor = Extractor {
        processed: HashSet::new(),
        elements: Vec::new(),
        placeholders: Vec::new(),
        errors: Vec::new(),
    };

    let background = extractor.extract_background(&snapshot.root);
    let ctx = Context {
        parent_display: snapshot.root.style.display.clone(),
        inside_text_tag: false,
    };
    for child in snapshot.root.child_elements() {
        extractor.visit(child, &ctx);
    }

    debug!(
        "extracted {} elements, {} placeholders, {} errors",
        extractor.elements.len(),
        extractor.placeholders.len(),
        extractor.errors.len()
    );

    SlideDescription {
        background,
        elements: extractor.elements,
        placeholders: extractor.placeholders,
        errors: extractor.errors,
    }
}

#[derive(Clone)]
struct Context {
    parent_display: String,
    inside_text_tag: bool,
}

struct Extractor {
    processed: HashSet<usize>,
    elements: Vec<SlideElement>,
    placeholders: Vec<PlaceholderRegion>,
    errors: Vec<String>,
}

impl Extractor {
    fn visit(&mut self, node: &DomNode, ctx: &Context) {
        if !self.processed.contains(&node.index) {
            self.classify(node, ctx);
        }
        let child_ctx = Context {
            parent_display: node.style.display.clone(),
            inside_text_tag: ctx.inside_text_tag || TEXT_TAGS.contains(&node.tag.as_str()),
        };
        for child in node.child_elements() {
            self.visit(child, &child_ctx);
        }
    }

    /// Dispatches one element to its emission category. First match wins.
    fn classify(&mut self, node: &DomNode, ctx: &Context) {
        // 1. Pseudo-element content is unsupported outright.
        if has_pseudo_content(&node.before_content) || has_pseudo_content(&node.after_content) {
            self.errors.push(format!(
                "Element <{}>{} uses ::before/::after content, which is not supported",
                node.tag,
                id_suffix(node)
            ));
            return;
        }

        // 2. Text tags must not carry visual container styling.
        if TEXT_TAGS.contains(&node.tag.as_str()) && has_visual_styling(node) {
            self.errors.push(format!(
                "Text element <{}>{} has a background, border, or shadow; \
                 wrap it in a <div> and style that instead",
                node.tag,
                id_suffix(node)
            ));
            return;
        }

        // 3. Placeholder regions swallow their subtree.
        if node.tag != "table" && has_class(node, "placeholder") {
            if node.rect.width > 0.0 && node.rect.height > 0.0 {
                self.placeholders.push(PlaceholderRegion {
                    id: node.id.clone(),
                    x: px_to_in(node.rect.left),
                    y: px_to_in(node.rect.top),
                    w: px_to_in(node.rect.width),
                    h: px_to_in(node.rect.height),
                });
            } else {
                self.errors.push(format!(
                    "Placeholder '{}' has zero width or height",
                    node.id
                ));
            }
            self.mark_processed(node);
            return;
        }

        match node.tag.as_str() {
            "img" => {
                if node.rect.width > 0.0 && node.rect.height > 0.0 {
                    self.elements.push(SlideElement::Image(ImageElement {
                        src: node.src.clone().unwrap_or_default(),
                        position: rect_position(node),
                        style: Some(ImageStyle {
                            object_fit: node.style.object_fit.clone(),
                            object_position: node.style.object_position.clone(),
                            border_radius: node.style.border_radius.clone(),
                        }),
                    }));
                }
                self.mark_processed(node);
            }
            "svg" => {
                if node.rect.width > 0.0 && node.rect.height > 0.0 {
                    self.elements.push(SlideElement::Svg(SvgElement {
                        svg: node.outer_html.clone().unwrap_or_default(),
                        position: rect_position(node),
                    }));
                }
                self.mark_processed(node);
            }
            "span" if is_layout_container(&ctx.parent_display) && !ctx.inside_text_tag => {
                // A flex/grid child span is an independent text block.
                if let Some(element) = self.build_text_element(node, TextTag::Div, true) {
                    self.elements.push(SlideElement::Text(element));
                }
                self.mark_processed(node);
            }
            "table" => {
                self.build_table(node);
                self.mark_processed(node);
            }
            "div" if self.is_inline_text_div(node) => {
                self.check_raw_text_children(node);
                if let Some(element) = self.build_text_element(node, TextTag::Div, true) {
                    self.elements.push(SlideElement::Text(element));
                }
                self.mark_processed(node);
            }
            "div" if has_visual_styling(node) => {
                self.build_styled_container(node);
            }
            "ul" | "ol" if !is_layout_container(&node.style.display) => {
                self.build_list(node);
                self.mark_processed(node);
            }
            "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if node.raw_text().trim().is_empty() {
                    return;
                }
                if let Some(tag) = TextTag::from_tag(&node.tag) {
                    if let Some(element) = self.build_text_element(node, tag, false) {
                        self.elements.push(SlideElement::Text(element));
                    }
                    self.processed.insert(node.index);
                }
            }
            // Unstyled containers contribute nothing themselves; their
            // children are considered on their own.
            _ => {}
        }
    }

    fn extract_background(&mut self, body: &DomNode) -> Background {
        let style = &body.style;
        if style.background_image != "none" {
            let bg_style = BackgroundStyle {
                background_image: style.background_image.clone(),
                background_repeat: style.background_repeat.clone(),
                background_size: style.background_size.clone(),
                background_position: style.background_position.clone(),
                background_color: style.background_color.clone(),
            };
            if style.background_image.contains("gradient(") {
                Background::Gradient {
                    value: style.background_image.clone(),
                    style: Some(bg_style),
                }
            } else {
                Background::Css { style: bg_style }
            }
        } else {
            Background::Color {
                value: background_color_or_white(&style.background_color).hex,
            }
        }
    }

    /// A `<div>` qualifies as an inline text container when it has no visual
    /// styling, no layout display, some text, and only whitelisted inline
    /// element children.
    fn is_inline_text_div(&self, node: &DomNode) -> bool {
        if has_visual_styling(node) || is_layout_container(&node.style.display) {
            return false;
        }
        if node.raw_text().trim().is_empty() {
            return false;
        }
        node.child_elements()
            .all(|el| INLINE_TEXT_TAGS.contains(&el.tag.as_str()))
    }

    /// DIVs must not carry raw text nodes directly; each text must be
    /// wrapped in a text tag. The element is still emitted afterwards.
    fn check_raw_text_children(&mut self, node: &DomNode) {
        let has_raw_text = node.children.iter().any(|c| match c {
            DomChild::Text { text } => !text.trim().is_empty(),
            DomChild::Element(_) => false,
        });
        if has_raw_text {
            self.errors.push(format!(
                "DIV{} contains raw text; wrap text in <p>, a heading, or a <span>",
                id_suffix(node)
            ));
        }
    }

    fn build_text_element(
        &mut self,
        node: &DomNode,
        tag: TextTag,
        block_aware: bool,
    ) -> Option<TextElement> {
        let style = &node.style;
        let rotation = parse_rotation(&style.transform, &style.writing_mode);
        let position =
            corrected_position(&node.rect, node.offset_width, node.offset_height, rotation);
        if position.w <= 0.0 || position.h <= 0.0 {
            return None;
        }

        let font_size = px_to_pt(parse_px(&style.font_size));
        let family = first_font_family(&style.font_family);
        let color = parse_color(&style.color);
        let mut line_spacing = parse_line_spacing(&style.line_height);

        let formatted = has_inline_formatting(node);
        let text = if formatted {
            let runs = flatten_runs(node, block_aware, &mut self.errors);
            if runs.is_empty() {
                return None;
            }
            // Keep the CSS line-height ratio when a run enlarges the font.
            if let Some(spacing) = line_spacing {
                let max_size = runs
                    .iter()
                    .filter_map(|r| r.options.font_size)
                    .fold(font_size, f64::max);
                if max_size > font_size && font_size > 0.0 {
                    line_spacing = Some(spacing * max_size / font_size);
                }
            }
            TextContent::Runs(runs)
        } else {
            let plain = plain_text(node);
            if plain.trim().is_empty() {
                return None;
            }
            TextContent::Plain(plain)
        };

        if let Some(glyph) = leading_manual_bullet(&text) {
            self.errors.push(format!(
                "Text element <{}>{} starts with a manual bullet '{}'; use a list instead",
                node.tag,
                id_suffix(node),
                glyph
            ));
            return None;
        }

        let (bold, italic, underline) = match &text {
            TextContent::Plain(_) => (
                Some(is_bold_weight(&style.font_weight, &family)),
                Some(style.font_style == "italic"),
                Some(style.text_decoration_line.contains("underline")),
            ),
            TextContent::Runs(_) => (None, None, None),
        };

        Some(TextElement {
            tag,
            text,
            position,
            style: TextStyle {
                font_size,
                font_face: family,
                color: color.as_ref().map(|c| c.hex.clone()).unwrap_or_else(|| "000000".to_string()),
                align: normalize_align(&style.text_align),
                line_spacing,
                para_space_before: px_to_pt(parse_px(&style.margin_top)),
                para_space_after: px_to_pt(parse_px(&style.margin_bottom)),
                margin: padding_margins(node),
                bold,
                italic,
                underline,
                rotate: rotation,
                transparency: color.and_then(|c| {
                    if c.transparency > 0 {
                        Some(c.transparency)
                    } else {
                        None
                    }
                }),
                valign: None,
            },
        })
    }

    /// Styled containers emit, in order: the shape body, the background
    /// image, synthesized border lines, and finally any inline text on top.
    fn build_styled_container(&mut self, node: &DomNode) {
        let style = &node.style;
        let bg = parse_color(&style.background_color);
        let has_bg = bg.is_some();
        let has_bg_image = style.background_image != "none";
        let widths = [
            parse_px(&style.border_top_width),
            parse_px(&style.border_right_width),
            parse_px(&style.border_bottom_width),
            parse_px(&style.border_left_width),
        ];
        let any_border = widths.iter().any(|w| *w > 0.0);
        let uniform_border =
            any_border && widths.iter().all(|w| (w - widths[0]).abs() < f64::EPSILON);
        let shadow = parse_box_shadow(&style.box_shadow);
        let position = rect_position(node);
        if position.w <= 0.0 || position.h <= 0.0 {
            self.processed.insert(node.index);
            return;
        }

        if has_bg || (uniform_border && !has_bg_image) {
            let line = if uniform_border && !has_bg_image {
                Some(StrokeStyle {
                    color: border_color(&style.border_top_color),
                    width: px_to_pt(widths[0]),
                })
            } else {
                None
            };
            self.elements.push(SlideElement::Shape(ShapeElement {
                position,
                shape: ShapeStyle {
                    fill: bg.as_ref().map(|c| c.hex.clone()),
                    transparency: bg.as_ref().and_then(|c| {
                        if c.transparency > 0 {
                            Some(c.transparency)
                        } else {
                            None
                        }
                    }),
                    line,
                    rect_radius: resolve_corner_radius(&style.border_radius, node),
                    shadow,
                },
            }));
        }

        if has_bg_image {
            self.elements.push(SlideElement::BgImage(BgImageElement {
                position,
                style: BackgroundStyle {
                    background_image: style.background_image.clone(),
                    background_repeat: style.background_repeat.clone(),
                    background_size: style.background_size.clone(),
                    background_position: style.background_position.clone(),
                    background_color: style.background_color.clone(),
                },
            }));
        }

        if has_bg_image || (any_border && !uniform_border) {
            self.emit_border_lines(node, widths);
        }

        let all_inline = node
            .child_elements()
            .all(|el| INLINE_TEXT_TAGS.contains(&el.tag.as_str()));
        if all_inline && !node.raw_text().trim().is_empty() {
            self.check_raw_text_children(node);
            if let Some(element) = self.build_text_element(node, TextTag::Div, true) {
                self.elements.push(SlideElement::Text(element));
            }
            self.mark_processed(node);
        } else {
            // Descendant text inside wrapper elements is still examined on
            // its own; only the container itself is consumed.
            self.processed.insert(node.index);
        }
    }

    /// One line per non-zero edge, inset by half its own thickness so the
    /// stroke centres on the box edge. Order: top, right, bottom, left.
    fn emit_border_lines(&mut self, node: &DomNode, widths: [f64; 4]) {
        let r = &node.rect;
        let style = &node.style;
        let edges = [
            // (width, color, x1, y1, x2, y2)
            (
                widths[0],
                &style.border_top_color,
                r.left,
                r.top + widths[0] / 2.0,
                r.left + r.width,
                r.top + widths[0] / 2.0,
            ),
            (
                widths[1],
                &style.border_right_color,
                r.left + r.width - widths[1] / 2.0,
                r.top,
                r.left + r.width - widths[1] / 2.0,
                r.top + r.height,
            ),
            (
                widths[2],
                &style.border_bottom_color,
                r.left,
                r.top + r.height - widths[2] / 2.0,
                r.left + r.width,
                r.top + r.height - widths[2] / 2.0,
            ),
            (
                widths[3],
                &style.border_left_color,
                r.left + widths[3] / 2.0,
                r.top,
                r.left + widths[3] / 2.0,
                r.top + r.height,
            ),
        ];
        for (width, color, x1, y1, x2, y2) in edges {
            if width > 0.0 {
                self.elements.push(SlideElement::Line(LineElement {
                    x1: px_to_in(x1),
                    y1: px_to_in(y1),
                    x2: px_to_in(x2),
                    y2: px_to_in(y2),
                    width: px_to_pt(width),
                    color: border_color(color),
                }));
            }
        }
    }

    fn build_table(&mut self, node: &DomNode) {
        let mut row_nodes = Vec::new();
        collect_descendants(node, "tr", &mut row_nodes);

        let mut rows: Vec<Vec<TableCell>> = Vec::new();
        let mut first_row_cells: Vec<&DomNode> = Vec::new();
        for (i, tr) in row_nodes.iter().enumerate() {
            let cell_nodes: Vec<&DomNode> = tr
                .child_elements()
                .filter(|el| el.tag == "td" || el.tag == "th")
                .collect();
            if i == 0 {
                first_row_cells = cell_nodes.clone();
            }
            rows.push(
                cell_nodes
                    .iter()
                    .map(|cell| self.build_cell(cell))
                    .collect(),
            );
        }

        let total_cells: usize = rows.iter().map(|r| r.len()).sum();
        if total_cells == 0 {
            self.errors
                .push(format!("Table{} has no cells", id_suffix(node)));
            return;
        }
        if node.rect.width <= 0.0 || node.rect.height <= 0.0 {
            self.errors
                .push(format!("Table{} has zero width or height", id_suffix(node)));
            return;
        }

        // Column widths from the first row, repeated per spanned column,
        // then both axes scaled to sum exactly to the table's own rect.
        let mut col_w: Vec<f64> = Vec::new();
        for cell in &first_row_cells {
            let span = cell.col_span.unwrap_or(1).max(1);
            let width = cell.rect.width / f64::from(span);
            for _ in 0..span {
                col_w.push(width);
            }
        }
        let mut row_h: Vec<f64> = row_nodes.iter().map(|tr| tr.rect.height).collect();
        scale_to_total(&mut col_w, node.rect.width);
        scale_to_total(&mut row_h, node.rect.height);

        self.elements.push(SlideElement::Table(TableElement {
            rows,
            position: rect_position(node),
            col_w: col_w.into_iter().map(px_to_in).collect(),
            row_h: row_h.into_iter().map(px_to_in).collect(),
        }));
    }

    fn build_cell(&mut self, cell: &DomNode) -> TableCell {
        let style = &cell.style;
        let family = first_font_family(&style.font_family);
        let color = parse_color(&style.color);

        let text = if has_inline_formatting(cell) {
            TextContent::Runs(flatten_runs(cell, true, &mut self.errors))
        } else {
            TextContent::Plain(plain_text(cell))
        };

        let borders = cell_borders(cell);
        TableCell {
            text,
            options: CellOptions {
                font_size: px_to_pt(parse_px(&style.font_size)),
                font_face: family.clone(),
                color: color
                    .as_ref()
                    .map(|c| c.hex.clone())
                    .unwrap_or_else(|| "000000".to_string()),
                bold: is_bold_weight(&style.font_weight, &family).then_some(true),
                italic: (style.font_style == "italic").then_some(true),
                underline: style
                    .text_decoration_line
                    .contains("underline")
                    .then_some(true),
                align: normalize_align(&style.text_align),
                valign: match style.vertical_align.as_str() {
                    "middle" => VAlign::Middle,
                    "bottom" => VAlign::Bottom,
                    _ => VAlign::Top,
                },
                line_spacing: parse_line_spacing(&style.line_height),
                margin: Some(padding_margins(cell)),
                fill: parse_color(&style.background_color).map(|c| c.hex),
                border: borders,
                colspan: cell.col_span.filter(|s| *s > 1),
                rowspan: cell.row_span.filter(|s| *s > 1),
                transparency: color.and_then(|c| {
                    if c.transparency > 0 {
                        Some(c.transparency)
                    } else {
                        None
                    }
                }),
            },
        }
    }

    fn build_list(&mut self, node: &DomNode) {
        if node.rect.width <= 0.0 || node.rect.height <= 0.0 {
            return;
        }
        let items: Vec<&DomNode> = node
            .child_elements()
            .filter(|el| el.tag == "li")
            .collect();

        let padding_left = px_to_pt(parse_px(&node.style.padding_left));
        let bullets_enabled = node.style.list_style_type != "none";
        // The list's left padding splits evenly between the marker margin on
        // the block and the text indent after each bullet.
        let (marker_margin, indent) = if bullets_enabled {
            (padding_left / 2.0, padding_left / 2.0)
        } else {
            (padding_left, 0.0)
        };

        let mut item_runs = Vec::new();
        for li in &items {
            let mut runs = flatten_runs(li, true, &mut self.errors);
            if runs.is_empty() {
                continue;
            }
            strip_manual_bullet(&mut runs);
            if runs.is_empty() {
                continue;
            }
            if bullets_enabled {
                runs[0].options.bullet = Some(Bullet { indent });
            }
            item_runs.push(runs);
        }
        if item_runs.is_empty() {
            return;
        }

        let first_li = items[0];
        let count = item_runs.len();
        let mut flat = Vec::new();
        for (i, mut runs) in item_runs.into_iter().enumerate() {
            if i < count - 1 {
                if let Some(last) = runs.last_mut() {
                    last.options.break_line = Some(true);
                }
            }
            flat.extend(runs);
        }

        let li_style = &first_li.style;
        self.elements.push(SlideElement::List(ListElement {
            items: flat,
            position: rect_position(node),
            style: ListStyle {
                font_size: px_to_pt(parse_px(&li_style.font_size)),
                font_face: first_font_family(&li_style.font_family),
                color: parse_color(&li_style.color)
                    .map(|c| c.hex)
                    .unwrap_or_else(|| "000000".to_string()),
                align: normalize_align(&li_style.text_align),
                line_spacing: parse_line_spacing(&li_style.line_height),
                para_space_before: px_to_pt(parse_px(&li_style.margin_top)),
                para_space_after: px_to_pt(parse_px(&li_style.margin_bottom)),
                margin: [marker_margin, 0.0, 0.0, 0.0],
            },
        }));
    }

    /// Marks an element and its entire subtree as consumed. Preorder
    /// indices of a subtree are contiguous, which makes this a range insert.
    fn mark_processed(&mut self, node: &DomNode) {
        for index in node.index..=node.max_index() {
            self.processed.insert(index);
        }
    }
}

fn has_pseudo_content(content: &str) -> bool {
    !matches!(content, "" | "none" | "normal")
}

fn has_class(node: &DomNode, class: &str) -> bool {
    node.class_name.split_whitespace().any(|c| c == class)
}

fn id_suffix(node: &DomNode) -> String {
    if node.id.is_empty() {
        String::new()
    } else {
        format!(" (id '{}')", node.id)
    }
}

fn is_layout_container(display: &str) -> bool {
    matches!(display, "flex" | "grid" | "inline-flex" | "inline-grid")
}

fn has_visual_styling(node: &DomNode) -> bool {
    let style = &node.style;
    parse_color(&style.background_color).is_some()
        || style.background_image != "none"
        || parse_px(&style.border_top_width) > 0.0
        || parse_px(&style.border_right_width) > 0.0
        || parse_px(&style.border_bottom_width) > 0.0
        || parse_px(&style.border_left_width) > 0.0
        || (style.box_shadow != "none" && !style.box_shadow.is_empty())
}

fn rect_position(node: &DomNode) -> Position {
    Position {
        x: px_to_in(node.rect.left),
        y: px_to_in(node.rect.top),
        w: px_to_in(node.rect.width),
        h: px_to_in(node.rect.height),
    }
}

/// Cell padding in the renderer's `[left, right, bottom, top]` point order.
fn padding_margins(node: &DomNode) -> [f64; 4] {
    [
        px_to_pt(parse_px(&node.style.padding_left)),
        px_to_pt(parse_px(&node.style.padding_right)),
        px_to_pt(parse_px(&node.style.padding_bottom)),
        px_to_pt(parse_px(&node.style.padding_top)),
    ]
}

fn border_color(css: &str) -> String {
    parse_color(css)
        .map(|c| c.hex)
        .unwrap_or_else(|| "000000".to_string())
}

/// Borders in `[top, right, bottom, left]` order, `None` when no edge has a
/// border at all.
fn cell_borders(cell: &DomNode) -> Option<[Option<CellBorder>; 4]> {
    let style = &cell.style;
    let make = |width: &str, color: &str| {
        let px = parse_px(width);
        if px > 0.0 {
            Some(CellBorder {
                pt: px_to_pt(px),
                color: border_color(color),
            })
        } else {
            None
        }
    };
    let borders = [
        make(&style.border_top_width, &style.border_top_color),
        make(&style.border_right_width, &style.border_right_color),
        make(&style.border_bottom_width, &style.border_bottom_color),
        make(&style.border_left_width, &style.border_left_color),
    ];
    if borders.iter().all(Option::is_none) {
        None
    } else {
        Some(borders)
    }
}

/// Resolves a computed `border-radius` to the renderer's radius-in-inches.
/// Percentages of 50% and above encode a full circle as `1`.
fn resolve_corner_radius(radius: &str, node: &DomNode) -> f64 {
    let first = radius.split_whitespace().next().unwrap_or("");
    if let Some(pct) = first.strip_suffix('%') {
        let p: f64 = pct.parse().unwrap_or(0.0);
        if p >= 50.0 {
            return 1.0;
        }
        let min_side = node.rect.width.min(node.rect.height);
        return (p / 100.0) * px_to_in(min_side);
    }
    if let Some(pt) = first.strip_suffix("pt") {
        return pt.parse::<f64>().unwrap_or(0.0) / 72.0;
    }
    if let Some(px) = first.strip_suffix("px") {
        return px.parse::<f64>().unwrap_or(0.0) / 96.0;
    }
    0.0
}

fn collect_descendants<'a>(node: &'a DomNode, tag: &str, out: &mut Vec<&'a DomNode>) {
    for child in node.child_elements() {
        if child.tag == tag {
            out.push(child);
        } else {
            collect_descendants(child, tag, out);
        }
    }
}

/// Scales values so they sum to `total`, preserving their proportions.
fn scale_to_total(values: &mut [f64], total: f64) {
    let sum: f64 = values.iter().sum();
    if sum > 0.0 {
        let factor = total / sum;
        for v in values.iter_mut() {
            *v *= factor;
        }
    }
}

/// The bullet glyph a text payload starts with, when it does.
fn leading_manual_bullet(text: &TextContent) -> Option<char> {
    let first = match text {
        TextContent::Plain(s) => s.trim_start(),
        TextContent::Runs(runs) => runs.first().map(|r| r.text.as_str())?.trim_start(),
    };
    let mut chars = first.chars();
    let glyph = chars.next()?;
    if MANUAL_BULLET_GLYPHS.contains(&glyph) && chars.next().is_some_and(|c| c.is_whitespace()) {
        Some(glyph)
    } else {
        None
    }
}

/// Strips a hand-written bullet glyph from the head of a list item.
fn strip_manual_bullet(runs: &mut Vec<Run>) {
    if let Some(first) = runs.first_mut() {
        let trimmed = first.text.trim_start();
        let mut chars = trimmed.chars();
        if let Some(glyph) = chars.next() {
            if MANUAL_BULLET_GLYPHS.contains(&glyph)
                && chars.clone().next().is_some_and(|c| c.is_whitespace())
            {
                first.text = chars.as_str().trim_start().to_string();
            }
        }
    }
    trim_run_sequence(runs);
}
