//! Flattens a text element's subtree into an ordered sequence of styled
//! runs, inheriting inline formatting from computed styles and honouring
//! `<br>` and block-level breaks.

use super::constants::{INLINE_TEXT_TAGS, INLINE_WRAPPER_TAGS};
use super::units::{
    first_font_family, is_bold_weight, parse_color, parse_px, px_to_pt, TextTransform,
};
use crate::models::dom::{DomChild, DomNode};
use crate::models::text::{Run, RunOptions};

/// Flattens `node`'s children into runs. In block-aware mode (used for
/// `<div>` and `<li>` containers) block-level descendants terminate their
/// text with a line break when meaningful content follows.
pub(crate) fn flatten_runs(node: &DomNode, block_aware: bool, errors: &mut Vec<String>) -> Vec<Run> {
    let base_size = px_to_pt(parse_px(&node.style.font_size));
    let transform = TextTransform::from_css(&node.style.text_transform);
    let mut flattener = Flattener {
        runs: Vec::new(),
        block_aware,
        errors,
    };
    flattener.walk(node, &RunOptions::default(), base_size, transform);
    trim_run_sequence(&mut flattener.runs);
    flattener.runs
}

/// The subtree's text as one collapsed string, `<br>` contributing a literal
/// newline, with the element's text-transform applied. Used for plain text
/// elements and table cells without inline formatting.
pub(crate) fn plain_text(node: &DomNode) -> String {
    let transform = TextTransform::from_css(&node.style.text_transform);
    let mut out = String::new();
    collect_plain(node, &mut out);
    transform.apply(out.trim())
}

fn collect_plain(node: &DomNode, out: &mut String) {
    for child in &node.children {
        match child {
            DomChild::Text { text } => out.push_str(&collapse_whitespace(text)),
            DomChild::Element(el) => {
                if el.tag == "br" {
                    out.push('\n');
                } else {
                    collect_plain(el, out);
                }
            }
        }
    }
}

/// True when the element has descendants that carry inline formatting of
/// their own, which forces run-based emission.
pub(crate) fn has_inline_formatting(node: &DomNode) -> bool {
    let wrappers: Vec<&str> = INLINE_TEXT_TAGS
        .iter()
        .copied()
        .filter(|t| *t != "br")
        .collect();
    node.has_descendant_tag(&wrappers)
}

/// Collapses consecutive whitespace (including newlines) to single spaces,
/// the way the browser renders text nodes.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Enforces the run-sequence trimming invariant: no leading whitespace on
/// the first run, no trailing whitespace on the last, no empty runs.
pub(crate) fn trim_run_sequence(runs: &mut Vec<Run>) {
    runs.retain(|r| !r.text.is_empty());
    while runs
        .first()
        .is_some_and(|r| r.text.trim_start().is_empty())
    {
        runs.remove(0);
    }
    while runs.last().is_some_and(|r| r.text.trim_end().is_empty()) {
        runs.pop();
    }
    if let Some(first) = runs.first_mut() {
        let trimmed = first.text.trim_start().to_string();
        first.text = trimmed;
    }
    if let Some(last) = runs.last_mut() {
        let trimmed = last.text.trim_end().to_string();
        last.text = trimmed;
    }
}

struct Flattener<'a> {
    runs: Vec<Run>,
    block_aware: bool,
    errors: &'a mut Vec<String>,
}

impl Flattener<'_> {
    fn walk(
        &mut self,
        node: &DomNode,
        opts: &RunOptions,
        font_size_pt: f64,
        transform: TextTransform,
    ) {
        // Coalescing needs to know whether the previous sibling was a text
        // or <br> node; entering or leaving an element resets the frame.
        let mut prev_inline_text = false;

        for (i, child) in node.children.iter().enumerate() {
            match child {
                DomChild::Text { text } => {
                    let collapsed = collapse_whitespace(text);
                    if collapsed.is_empty() {
                        continue;
                    }
                    let transformed = transform.apply(&collapsed);
                    self.append_text(&transformed, opts, prev_inline_text);
                    prev_inline_text = true;
                }
                DomChild::Element(el) if el.tag == "br" => {
                    self.append_text("\n", opts, prev_inline_text);
                    prev_inline_text = true;
                }
                DomChild::Element(el) => {
                    if is_layout_container(&el.style.display) {
                        // Flex/grid children are extracted as independent
                        // elements; the flattener never descends into them.
                        prev_inline_text = false;
                        continue;
                    }
                    if is_inline_child(el) {
                        self.check_inline_margins(el);
                        let (child_opts, child_size) =
                            derive_inline_options(el, opts, font_size_pt);
                        let child_transform = TextTransform::from_css(&el.style.text_transform);
                        self.walk(el, &child_opts, child_size, child_transform);
                    } else {
                        let before = self.runs.len();
                        let child_transform = TextTransform::from_css(&el.style.text_transform);
                        self.walk(el, opts, font_size_pt, child_transform);
                        if self.block_aware
                            && self.runs.len() > before
                            && has_following_content(&node.children[i + 1..])
                        {
                            if let Some(last) = self.runs.last_mut() {
                                last.options.break_line = Some(true);
                            }
                        }
                    }
                    prev_inline_text = false;
                }
            }
        }
    }

    /// Appends text, coalescing into the previous run when the preceding
    /// sibling was a text or `<br>` node.
    fn append_text(&mut self, text: &str, opts: &RunOptions, coalesce: bool) {
        if coalesce {
            if let Some(last) = self.runs.last_mut() {
                last.text.push_str(text);
                return;
            }
        }
        self.runs.push(Run::new(text, opts.clone()));
    }

    fn check_inline_margins(&mut self, el: &DomNode) {
        let left = parse_px(&el.style.margin_left);
        let right = parse_px(&el.style.margin_right);
        if left != 0.0 || right != 0.0 {
            self.errors.push(format!(
                "Inline element <{}> has horizontal margins ({}px left, {}px right); \
                 use padding on the enclosing block instead",
                el.tag, left, right
            ));
        }
    }
}

fn is_layout_container(display: &str) -> bool {
    matches!(display, "flex" | "grid" | "inline-flex" | "inline-grid")
}

fn is_inline_child(el: &DomNode) -> bool {
    INLINE_TEXT_TAGS.contains(&el.tag.as_str())
        || el.style.display.starts_with("inline")
        || el.style.display == "contents"
}

/// Whether anything after this position would still render text, which is
/// what makes a trailing block break meaningful.
fn has_following_content(rest: &[DomChild]) -> bool {
    rest.iter().any(|c| match c {
        DomChild::Text { text } => !text.trim().is_empty(),
        DomChild::Element(el) => el.style.display != "none",
    })
}

/// Computes the run options an inline wrapper contributes. Recognised
/// formatting wrappers override inheritance; other whitelisted inline tags
/// simply pass the frame through with their computed values.
fn derive_inline_options(
    el: &DomNode,
    inherited: &RunOptions,
    inherited_size_pt: f64,
) -> (RunOptions, f64) {
    let mut opts = inherited.clone();
    let size_pt = px_to_pt(parse_px(&el.style.font_size));

    if INLINE_WRAPPER_TAGS.contains(&el.tag.as_str()) {
        let family = first_font_family(&el.style.font_family);
        if is_bold_weight(&el.style.font_weight, &family) {
            opts.bold = Some(true);
        }
        if el.style.font_style == "italic" {
            opts.italic = Some(true);
        }
        if el.style.text_decoration_line.contains("underline") {
            opts.underline = Some(true);
        }
        if let Some(color) = parse_color(&el.style.color) {
            if color.hex != "000000" {
                opts.color = Some(color.hex);
            }
            if color.transparency > 0 {
                opts.transparency = Some(color.transparency);
            }
        }
        if (size_pt - inherited_size_pt).abs() > f64::EPSILON && size_pt > 0.0 {
            opts.font_size = Some(size_pt);
        }
    }

    let effective_size = if size_pt > 0.0 {
        size_pt
    } else {
        inherited_size_pt
    };
    (opts, effective_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dom::ComputedStyle;

    fn text(t: &str) -> DomChild {
        DomChild::Text {
            text: t.to_string(),
        }
    }

    fn element(tag: &str, style: ComputedStyle, children: Vec<DomChild>) -> DomNode {
        DomNode {
            tag: tag.to_string(),
            style,
            children,
            ..DomNode::default()
        }
    }

    fn bold_style() -> ComputedStyle {
        ComputedStyle {
            font_weight: "700".to_string(),
            ..ComputedStyle::default()
        }
    }

    #[test]
    fn nested_inline_formatting_produces_four_runs() {
        // <p>Hello <b>bold <i>both</i></b> end</p>
        let italic = ComputedStyle {
            font_weight: "700".to_string(),
            font_style: "italic".to_string(),
            ..ComputedStyle::default()
        };
        let p = element(
            "p",
            ComputedStyle::default(),
            vec![
                text("Hello "),
                DomChild::Element(element(
                    "b",
                    bold_style(),
                    vec![
                        text("bold "),
                        DomChild::Element(element("i", italic, vec![text("both")])),
                    ],
                )),
                text(" end"),
            ],
        );

        let mut errors = Vec::new();
        let runs = flatten_runs(&p, false, &mut errors);
        assert!(errors.is_empty());
        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0].text, "Hello ");
        assert_eq!(runs[0].options, RunOptions::default());
        assert_eq!(runs[1].text, "bold ");
        assert_eq!(runs[1].options.bold, Some(true));
        assert_eq!(runs[1].options.italic, None);
        assert_eq!(runs[2].text, "both");
        assert_eq!(runs[2].options.bold, Some(true));
        assert_eq!(runs[2].options.italic, Some(true));
        assert_eq!(runs[3].text, " end");
        assert_eq!(runs[3].options, RunOptions::default());
    }

    #[test]
    fn adjacent_text_and_br_coalesce() {
        // <p>one<br>two</p> stays a single run with an embedded newline
        let p = element(
            "p",
            ComputedStyle::default(),
            vec![
                text("one"),
                DomChild::Element(element("br", ComputedStyle::default(), vec![])),
                text("two"),
            ],
        );
        let mut errors = Vec::new();
        let runs = flatten_runs(&p, false, &mut errors);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "one\ntwo");
    }

    #[test]
    fn whitespace_collapses_and_sequence_is_trimmed() {
        let p = element(
            "p",
            ComputedStyle::default(),
            vec![text("  a \n  b  ")],
        );
        let mut errors = Vec::new();
        let runs = flatten_runs(&p, false, &mut errors);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "a b");
    }

    #[test]
    fn block_children_break_lines_when_content_follows() {
        // <li><div>first</div><div>second</div></li>
        let li = element(
            "li",
            ComputedStyle::default(),
            vec![
                DomChild::Element(element(
                    "div",
                    ComputedStyle::default(),
                    vec![text("first")],
                )),
                DomChild::Element(element(
                    "div",
                    ComputedStyle::default(),
                    vec![text("second")],
                )),
            ],
        );
        let mut errors = Vec::new();
        let runs = flatten_runs(&li, true, &mut errors);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].options.break_line, Some(true));
        assert_eq!(runs[1].options.break_line, None);
    }

    #[test]
    fn layout_containers_are_skipped() {
        let flex = ComputedStyle {
            display: "flex".to_string(),
            ..ComputedStyle::default()
        };
        let div = element(
            "div",
            ComputedStyle::default(),
            vec![
                text("kept"),
                DomChild::Element(element("div", flex, vec![text("dropped")])),
            ],
        );
        let mut errors = Vec::new();
        let runs = flatten_runs(&div, true, &mut errors);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "kept");
    }

    #[test]
    fn inline_horizontal_margins_are_reported() {
        let margined = ComputedStyle {
            margin_left: "4px".to_string(),
            ..ComputedStyle::default()
        };
        let p = element(
            "p",
            ComputedStyle::default(),
            vec![DomChild::Element(element(
                "span",
                margined,
                vec![text("x")],
            ))],
        );
        let mut errors = Vec::new();
        let runs = flatten_runs(&p, false, &mut errors);
        assert_eq!(runs.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("<span>"));
    }

    #[test]
    fn span_text_transform_propagates() {
        let upper = ComputedStyle {
            text_transform: "uppercase".to_string(),
            ..ComputedStyle::default()
        };
        let p = element(
            "p",
            ComputedStyle::default(),
            vec![DomChild::Element(element("span", upper, vec![text("shout")]))],
        );
        let mut errors = Vec::new();
        let runs = flatten_runs(&p, false, &mut errors);
        assert_eq!(runs[0].text, "SHOUT");
    }

    #[test]
    fn larger_span_font_size_is_explicit() {
        let big = ComputedStyle {
            font_size: "32px".to_string(),
            ..ComputedStyle::default()
        };
        let p = element(
            "p",
            ComputedStyle::default(),
            vec![
                text("a "),
                DomChild::Element(element("span", big, vec![text("b")])),
            ],
        );
        let mut errors = Vec::new();
        let runs = flatten_runs(&p, false, &mut errors);
        assert_eq!(runs[1].options.font_size, Some(24.0));
        assert_eq!(runs[0].options.font_size, None);
    }

    #[test]
    fn plain_text_preserves_br_newlines() {
        let p = element(
            "p",
            ComputedStyle::default(),
            vec![
                text("one  "),
                DomChild::Element(element("br", ComputedStyle::default(), vec![])),
                text("  two"),
            ],
        );
        assert_eq!(plain_text(&p), "one \n two");
    }
}
