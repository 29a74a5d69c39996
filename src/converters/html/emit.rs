//! Drives the slide builder from a validated description, in document order,
//! applying the renderer-specific position adjustments.

use std::path::PathBuf;

use log::warn;

use super::constants::SINGLE_LINE_EXPANSION;
use crate::builder::{
    ImageOptions, ShapeKind, ShapeOptions, SlideBackground, SlideBuilder, SlideId, TableOptions,
    TextOptions,
};
use crate::models::background::Background;
use crate::models::common::{Align, Position, VAlign};
use crate::models::elements::{SlideElement, TextElement};
use crate::models::shape::StrokeStyle;
use crate::models::text::TextContent;
use crate::models::SlideDescription;

/// Emits the description onto the given slide. The description must have
/// passed validation and rasterization; intermediate records are skipped
/// with a warning rather than emitted wrongly.
pub(crate) fn emit(description: &SlideDescription, builder: &mut dyn SlideBuilder, slide: SlideId) {
    match &description.background {
        Background::Color { value } => builder.set_background(
            slide,
            &SlideBackground::Color {
                color: value.clone(),
            },
        ),
        Background::Image { path } => {
            builder.set_background(slide, &SlideBackground::Image { path: path.clone() })
        }
        Background::Css { .. } | Background::Gradient { .. } => {
            warn!("background reached the emitter unrasterized; slide keeps the default fill");
        }
    }

    for element in &description.elements {
        match element {
            SlideElement::Image(image) => builder.add_image(
                slide,
                &ImageOptions {
                    path: PathBuf::from(&image.src),
                    position: image.position,
                },
            ),
            SlideElement::Line(line) => builder.add_shape(
                slide,
                ShapeKind::Line,
                &ShapeOptions {
                    position: Position {
                        x: line.x1,
                        y: line.y1,
                        w: line.x2 - line.x1,
                        h: line.y2 - line.y1,
                    },
                    line: Some(StrokeStyle {
                        color: line.color.clone(),
                        width: line.width,
                    }),
                },
            ),
            SlideElement::Shape(shape) => {
                let kind = if shape.shape.rect_radius > 0.0 {
                    ShapeKind::RoundRect
                } else {
                    ShapeKind::Rect
                };
                builder.add_text(
                    slide,
                    &TextContent::Plain(String::new()),
                    &TextOptions {
                        position: shape.position,
                        shape: Some(kind),
                        fill: shape.shape.fill.clone(),
                        line: shape.shape.line.clone(),
                        rect_radius: (shape.shape.rect_radius > 0.0)
                            .then_some(shape.shape.rect_radius),
                        shadow: shape.shape.shadow.clone(),
                        transparency: shape.shape.transparency,
                        ..TextOptions::default()
                    },
                );
            }
            SlideElement::List(list) => builder.add_text(
                slide,
                &TextContent::Runs(list.items.clone()),
                &TextOptions {
                    position: list.position,
                    font_size: Some(list.style.font_size),
                    font_face: Some(list.style.font_face.clone()),
                    color: Some(list.style.color.clone()),
                    align: Some(list.style.align),
                    line_spacing: list.style.line_spacing,
                    para_space_before: Some(list.style.para_space_before),
                    para_space_after: Some(list.style.para_space_after),
                    margin: Some(list.style.margin),
                    valign: Some(VAlign::Top),
                    ..TextOptions::default()
                },
            ),
            SlideElement::Table(table) => {
                let has_cols = !table.col_w.is_empty();
                let has_rows = !table.row_h.is_empty();
                builder.add_table(
                    slide,
                    &table.rows,
                    &TableOptions {
                        x: table.position.x,
                        y: table.position.y,
                        w: (!has_cols).then_some(table.position.w),
                        h: (!has_rows).then_some(table.position.h),
                        col_w: has_cols.then(|| table.col_w.clone()),
                        row_h: has_rows.then(|| table.row_h.clone()),
                    },
                );
            }
            SlideElement::Text(text) => emit_text(text, builder, slide),
            SlideElement::Svg(_) | SlideElement::BgImage(_) | SlideElement::Gradient(_) => {
                warn!("intermediate element reached the emitter unrasterized; skipped");
            }
        }
    }
}

fn emit_text(text: &TextElement, builder: &mut dyn SlideBuilder, slide: SlideId) {
    let style = &text.style;
    let position = expand_single_line(&text.position, style.font_size, style.line_spacing, style.align);

    builder.add_text(
        slide,
        &text.text,
        &TextOptions {
            position,
            font_size: Some(style.font_size),
            font_face: Some(style.font_face.clone()),
            color: Some(style.color.clone()),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            align: Some(style.align),
            valign: Some(style.valign.unwrap_or(VAlign::Top)),
            line_spacing: style.line_spacing,
            para_space_before: Some(style.para_space_before),
            para_space_after: Some(style.para_space_after),
            margin: Some(style.margin),
            rotate: style.rotate,
            transparency: style.transparency,
            inset: Some(0.0),
            ..TextOptions::default()
        },
    );
}

/// Widens single-line text boxes by 2% in the direction opposite the
/// alignment anchor; the downstream renderer systematically underestimates
/// single-line widths.
fn expand_single_line(
    position: &Position,
    font_size: f64,
    line_spacing: Option<f64>,
    align: Align,
) -> Position {
    let line_height_pt = f64::max(line_spacing.unwrap_or(0.0), font_size * 1.2);
    if position.h * 72.0 > 1.5 * line_height_pt {
        return *position;
    }
    let extra = position.w * SINGLE_LINE_EXPANSION;
    let mut expanded = *position;
    expanded.w += extra;
    match align {
        Align::Right => expanded.x -= extra,
        Align::Center => expanded.x -= extra / 2.0,
        Align::Left | Align::Justify => {}
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SlideLayout;
    use crate::models::elements::{ImageElement, LineElement, ShapeElement, TableElement};
    use crate::models::shape::ShapeStyle;
    use crate::models::table::TableCell;
    use crate::models::text::{TextStyle, TextTag};

    #[derive(Debug, PartialEq)]
    enum Call {
        Background(SlideBackground),
        Image(ImageOptions),
        Shape(ShapeKind, ShapeOptions),
        Text(TextContent, TextOptions),
        Table(usize, TableOptions),
    }

    struct RecordingBuilder {
        calls: Vec<Call>,
    }

    impl RecordingBuilder {
        fn new() -> Self {
            RecordingBuilder { calls: Vec::new() }
        }
    }

    impl SlideBuilder for RecordingBuilder {
        fn layout(&self) -> SlideLayout {
            SlideLayout {
                width: 9144000.0,
                height: 5143500.0,
            }
        }
        fn add_slide(&mut self) -> SlideId {
            SlideId(0)
        }
        fn set_background(&mut self, _slide: SlideId, background: &SlideBackground) {
            self.calls.push(Call::Background(background.clone()));
        }
        fn add_image(&mut self, _slide: SlideId, options: &ImageOptions) {
            self.calls.push(Call::Image(options.clone()));
        }
        fn add_shape(&mut self, _slide: SlideId, kind: ShapeKind, options: &ShapeOptions) {
            self.calls.push(Call::Shape(kind, options.clone()));
        }
        fn add_text(&mut self, _slide: SlideId, text: &TextContent, options: &TextOptions) {
            self.calls.push(Call::Text(text.clone(), options.clone()));
        }
        fn add_table(&mut self, _slide: SlideId, rows: &[Vec<TableCell>], options: &TableOptions) {
            self.calls.push(Call::Table(rows.len(), options.clone()));
        }
    }

    fn pos(x: f64, y: f64, w: f64, h: f64) -> Position {
        Position { x, y, w, h }
    }

    fn text_style(align: Align) -> TextStyle {
        TextStyle {
            font_size: 18.0,
            font_face: "Arial".to_string(),
            color: "000000".to_string(),
            align,
            line_spacing: None,
            para_space_before: 0.0,
            para_space_after: 0.0,
            margin: [0.0; 4],
            bold: Some(false),
            italic: Some(false),
            underline: Some(false),
            rotate: None,
            transparency: None,
            valign: None,
        }
    }

    fn description(elements: Vec<SlideElement>) -> SlideDescription {
        SlideDescription {
            background: Background::Color {
                value: "FFFFFF".to_string(),
            },
            elements,
            placeholders: vec![],
            errors: vec![],
        }
    }

    #[test]
    fn emits_in_document_order_with_mapped_calls() {
        let desc = description(vec![
            SlideElement::Shape(ShapeElement {
                position: pos(0.0, 0.0, 2.0, 2.0),
                shape: ShapeStyle {
                    fill: Some("EEEEEE".to_string()),
                    rect_radius: 0.25,
                    ..ShapeStyle::default()
                },
            }),
            SlideElement::Image(ImageElement {
                src: "/tmp/a.png".to_string(),
                position: pos(1.0, 1.0, 1.0, 1.0),
                style: None,
            }),
            SlideElement::Line(LineElement {
                x1: 0.0,
                y1: 0.5,
                x2: 3.0,
                y2: 0.5,
                width: 1.5,
                color: "FF0000".to_string(),
            }),
        ]);

        let mut builder = RecordingBuilder::new();
        emit(&desc, &mut builder, SlideId(0));

        assert_eq!(builder.calls.len(), 4);
        assert_eq!(
            builder.calls[0],
            Call::Background(SlideBackground::Color {
                color: "FFFFFF".to_string()
            })
        );
        match &builder.calls[1] {
            Call::Text(text, options) => {
                assert_eq!(*text, TextContent::Plain(String::new()));
                assert_eq!(options.shape, Some(ShapeKind::RoundRect));
                assert_eq!(options.rect_radius, Some(0.25));
                assert_eq!(options.fill.as_deref(), Some("EEEEEE"));
            }
            other => panic!("expected shape text call, got {other:?}"),
        }
        match &builder.calls[2] {
            Call::Image(options) => assert_eq!(options.path, PathBuf::from("/tmp/a.png")),
            other => panic!("expected image call, got {other:?}"),
        }
        match &builder.calls[3] {
            Call::Shape(kind, options) => {
                assert_eq!(*kind, ShapeKind::Line);
                assert_eq!(options.position, pos(0.0, 0.5, 3.0, 0.0));
                assert_eq!(options.line.as_ref().unwrap().width, 1.5);
            }
            other => panic!("expected line call, got {other:?}"),
        }
    }

    #[test]
    fn zero_radius_shape_is_plain_rect() {
        let desc = description(vec![SlideElement::Shape(ShapeElement {
            position: pos(0.0, 0.0, 1.0, 1.0),
            shape: ShapeStyle::default(),
        })]);
        let mut builder = RecordingBuilder::new();
        emit(&desc, &mut builder, SlideId(0));
        match &builder.calls[1] {
            Call::Text(_, options) => {
                assert_eq!(options.shape, Some(ShapeKind::Rect));
                assert_eq!(options.rect_radius, None);
            }
            other => panic!("expected shape call, got {other:?}"),
        }
    }

    #[test]
    fn table_with_column_widths_omits_overall_size() {
        let desc = description(vec![SlideElement::Table(TableElement {
            rows: vec![],
            position: pos(1.0, 1.0, 4.0, 2.0),
            col_w: vec![2.0, 2.0],
            row_h: vec![1.0, 1.0],
        })]);
        let mut builder = RecordingBuilder::new();
        emit(&desc, &mut builder, SlideId(0));
        match &builder.calls[1] {
            Call::Table(_, options) => {
                assert_eq!(options.w, None);
                assert_eq!(options.h, None);
                assert_eq!(options.col_w.as_deref(), Some(&[2.0, 2.0][..]));
                assert_eq!(options.row_h.as_deref(), Some(&[1.0, 1.0][..]));
            }
            other => panic!("expected table call, got {other:?}"),
        }
    }

    #[test]
    fn single_line_text_expands_away_from_anchor() {
        // 18pt font, default line height 21.6pt; 0.4" = 28.8pt <= 32.4pt,
        // so this is single-line.
        let single = |align| {
            SlideElement::Text(TextElement {
                tag: TextTag::P,
                text: TextContent::Plain("x".to_string()),
                position: pos(1.0, 1.0, 2.0, 0.4),
                style: text_style(align),
            })
        };

        for (align, expected_x) in [
            (Align::Left, 1.0),
            (Align::Center, 1.0 - 0.02),
            (Align::Right, 1.0 - 0.04),
        ] {
            let mut builder = RecordingBuilder::new();
            emit(&desc_with(single(align)), &mut builder, SlideId(0));
            match &builder.calls[1] {
                Call::Text(_, options) => {
                    assert!((options.position.w - 2.04).abs() < 1e-9, "{align:?}");
                    assert!((options.position.x - expected_x).abs() < 1e-9, "{align:?}");
                }
                other => panic!("expected text call, got {other:?}"),
            }
        }
    }

    #[test]
    fn multi_line_text_is_not_expanded() {
        let element = SlideElement::Text(TextElement {
            tag: TextTag::P,
            text: TextContent::Plain("x".to_string()),
            position: pos(1.0, 1.0, 2.0, 1.5),
            style: text_style(Align::Left),
        });
        let mut builder = RecordingBuilder::new();
        emit(&desc_with(element), &mut builder, SlideId(0));
        match &builder.calls[1] {
            Call::Text(_, options) => {
                assert_eq!(options.position, pos(1.0, 1.0, 2.0, 1.5));
                assert_eq!(options.inset, Some(0.0));
                assert_eq!(options.valign, Some(VAlign::Top));
            }
            other => panic!("expected text call, got {other:?}"),
        }
    }

    fn desc_with(element: SlideElement) -> SlideDescription {
        description(vec![element])
    }
}
