use serde::{Deserialize, Serialize};

use crate::models::common::PxRect;

/// Body dimensions and scroll extents, probed before the viewport is sized.
/// All values in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyProbe {
    pub width: f64,
    pub height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

/// The bounded subset of computed CSS the engine inspects. Values are the
/// raw computed strings exactly as `getComputedStyle` reports them; parsing
/// into numbers and colours happens in the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedStyle {
    pub display: String,
    pub background_color: String,
    pub background_image: String,
    pub background_repeat: String,
    pub background_size: String,
    pub background_position: String,
    pub border_top_width: String,
    pub border_right_width: String,
    pub border_bottom_width: String,
    pub border_left_width: String,
    pub border_top_color: String,
    pub border_right_color: String,
    pub border_bottom_color: String,
    pub border_left_color: String,
    pub border_radius: String,
    pub box_shadow: String,
    pub color: String,
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration_line: String,
    pub text_transform: String,
    pub text_align: String,
    pub line_height: String,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
    pub padding_top: String,
    pub padding_right: String,
    pub padding_bottom: String,
    pub padding_left: String,
    pub transform: String,
    pub writing_mode: String,
    pub object_fit: String,
    pub object_position: String,
    pub list_style_type: String,
    pub vertical_align: String,
}

impl Default for ComputedStyle {
    /// CSS initial values, so fixtures and partially-populated snapshots
    /// behave like unstyled elements.
    fn default() -> Self {
        ComputedStyle {
            display: "block".to_string(),
            background_color: "rgba(0, 0, 0, 0)".to_string(),
            background_image: "none".to_string(),
            background_repeat: "repeat".to_string(),
            background_size: "auto".to_string(),
            background_position: "0% 0%".to_string(),
            border_top_width: "0px".to_string(),
            border_right_width: "0px".to_string(),
            border_bottom_width: "0px".to_string(),
            border_left_width: "0px".to_string(),
            border_top_color: "rgb(0, 0, 0)".to_string(),
            border_right_color: "rgb(0, 0, 0)".to_string(),
            border_bottom_color: "rgb(0, 0, 0)".to_string(),
            border_left_color: "rgb(0, 0, 0)".to_string(),
            border_radius: "0px".to_string(),
            box_shadow: "none".to_string(),
            color: "rgb(0, 0, 0)".to_string(),
            font_family: "Arial".to_string(),
            font_size: "16px".to_string(),
            font_weight: "400".to_string(),
            font_style: "normal".to_string(),
            text_decoration_line: "none".to_string(),
            text_transform: "none".to_string(),
            text_align: "start".to_string(),
            line_height: "normal".to_string(),
            margin_top: "0px".to_string(),
            margin_right: "0px".to_string(),
            margin_bottom: "0px".to_string(),
            margin_left: "0px".to_string(),
            padding_top: "0px".to_string(),
            padding_right: "0px".to_string(),
            padding_bottom: "0px".to_string(),
            padding_left: "0px".to_string(),
            transform: "none".to_string(),
            writing_mode: "horizontal-tb".to_string(),
            object_fit: "fill".to_string(),
            object_position: "50% 50%".to_string(),
            list_style_type: "disc".to_string(),
            vertical_align: "baseline".to_string(),
        }
    }
}

/// One element of the serialized DOM tree. `index` is the element's preorder
/// position in the snapshot; the extractor's processed-subtree set is keyed
/// on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomNode {
    pub index: usize,
    /// Lowercase tag name.
    pub tag: String,
    pub id: String,
    pub class_name: String,
    pub rect: PxRect,
    /// Unrotated layout dimensions; used for bounding-box correction under
    /// rotation.
    pub offset_width: f64,
    pub offset_height: f64,
    pub style: ComputedStyle,
    /// Computed `content` of `::before`; `"none"`/`"normal"` when absent.
    pub before_content: String,
    /// Computed `content` of `::after`.
    pub after_content: String,
    /// `src` attribute, `<img>` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// `colspan`, table cells only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    /// `rowspan`, table cells only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    /// Serialized markup, `<svg>` only. SVG subtrees are not walked further.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_html: Option<String>,
    pub children: Vec<DomChild>,
}

impl DomNode {
    /// The largest preorder index inside this subtree. Together with
    /// `index`, this bounds the contiguous index range the subtree occupies.
    pub fn max_index(&self) -> usize {
        let mut max = self.index;
        for child in &self.children {
            if let DomChild::Element(el) = child {
                max = max.max(el.max_index());
            }
        }
        max
    }

    /// Iterates over element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &DomNode> {
        self.children.iter().filter_map(|c| match c {
            DomChild::Element(el) => Some(el),
            DomChild::Text { .. } => None,
        })
    }

    /// The concatenated raw text of the subtree (`<br>` contributes a
    /// newline), before whitespace collapsing.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                DomChild::Text { text } => out.push_str(text),
                DomChild::Element(el) => {
                    if el.tag == "br" {
                        out.push('\n');
                    } else {
                        el.collect_text(out);
                    }
                }
            }
        }
    }

    /// True when any descendant element's tag is in `tags`.
    pub fn has_descendant_tag(&self, tags: &[&str]) -> bool {
        self.child_elements()
            .any(|el| tags.contains(&el.tag.as_str()) || el.has_descendant_tag(tags))
    }
}

/// A child node: either a nested element or a raw text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DomChild {
    Element(DomNode),
    Text { text: String },
}

/// The full serialized state of the laid-out page: the body element subtree.
/// The body's own computed style carries the slide background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    pub root: DomNode,
}
