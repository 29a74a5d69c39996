//! Bakes CSS constructs the downstream renderer cannot express (gradients,
//! background images, inline SVG, object-fit geometry, radii on images)
//! into PNG screenshots of isolated helper elements, rewriting the affected
//! records in place.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;

use super::constants::PX_PER_IN;
use super::units::parse_px;
use crate::errors::Result;
use crate::host::PageHost;
use crate::models::background::{Background, BackgroundStyle};
use crate::models::common::Position;
use crate::models::dom::BodyProbe;
use crate::models::elements::{ImageElement, ImageStyle, SlideElement};
use crate::models::SlideDescription;

const HELPER_ID: &str = "__h2s_raster__";

/// Replaces every intermediate record in the description with a rasterized
/// image. Returns the PNG files written; they are not deleted by the engine.
///
/// The page is blanked on first use (transparent backgrounds, cleared body),
/// then each construct is reproduced on a `position: fixed` helper element at
/// its original pixel box and screenshotted in isolation with the backdrop
/// omitted, so transparency survives into the PNG.
pub(crate) fn rasterize(
    page: &mut dyn PageHost,
    description: &mut SlideDescription,
    probe: &BodyProbe,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut rasterizer = Rasterizer {
        page,
        dir,
        files: Vec::new(),
        blanked: false,
    };

    let background = match &description.background {
        Background::Css { style } => {
            Some(rasterizer.bake_background_style(style, probe)?)
        }
        Background::Gradient { value, style } => {
            let style = style.clone().unwrap_or_else(|| BackgroundStyle {
                background_image: value.clone(),
                background_repeat: "no-repeat".to_string(),
                background_size: "auto".to_string(),
                background_position: "0% 0%".to_string(),
                background_color: "rgba(0, 0, 0, 0)".to_string(),
            });
            Some(rasterizer.bake_background_style(&style, probe)?)
        }
        Background::Color { .. } | Background::Image { .. } => None,
    };
    if let Some(path) = background {
        description.background = Background::Image { path };
    }

    for element in description.elements.iter_mut() {
        match element {
            SlideElement::BgImage(bg) => {
                let path = rasterizer.bake_div(&bg.position, &bg.style)?;
                *element = SlideElement::Image(ImageElement {
                    src: path.display().to_string(),
                    position: bg.position,
                    style: None,
                });
            }
            SlideElement::Gradient(gradient) => {
                let style = gradient.style.clone().unwrap_or_else(|| BackgroundStyle {
                    background_image: gradient.gradient.clone(),
                    background_repeat: "no-repeat".to_string(),
                    background_size: "auto".to_string(),
                    background_position: "0% 0%".to_string(),
                    background_color: "rgba(0, 0, 0, 0)".to_string(),
                });
                let path = rasterizer.bake_div(&gradient.position, &style)?;
                *element = SlideElement::Image(ImageElement {
                    src: path.display().to_string(),
                    position: gradient.position,
                    style: None,
                });
            }
            SlideElement::Svg(svg) => {
                let path = rasterizer.bake_svg(&svg.position, &svg.svg)?;
                *element = SlideElement::Image(ImageElement {
                    src: path.display().to_string(),
                    position: svg.position,
                    style: None,
                });
            }
            SlideElement::Image(image) if image_needs_baking(image) => {
                let path = rasterizer.bake_image(image)?;
                image.src = path.display().to_string();
                image.style = None;
            }
            _ => {}
        }
    }

    Ok(rasterizer.files)
}

/// Whether an `<img>` record carries presentation the renderer cannot
/// reproduce from the file alone.
fn image_needs_baking(image: &ImageElement) -> bool {
    let src = image.src.to_ascii_lowercase();
    let svg_source = src.split(['?', '#']).next().unwrap_or("").ends_with(".svg")
        || src.starts_with("data:image/svg");
    let Some(style) = &image.style else {
        return svg_source;
    };
    svg_source
        || style.object_fit != "fill"
        || style.object_position != "50% 50%"
        || parse_px(&style.border_radius) > 0.0
        || style.border_radius.contains('%')
}

struct Rasterizer<'a> {
    page: &'a mut dyn PageHost,
    dir: &'a Path,
    files: Vec<PathBuf>,
    blanked: bool,
}

impl Rasterizer<'_> {
    /// Strips the page down to a transparent empty body before the first
    /// helper is injected.
    fn ensure_blank(&mut self) -> Result<()> {
        if self.blanked {
            return Ok(());
        }
        self.page.evaluate(
            "(() => {\
                document.documentElement.style.background = 'transparent';\
                document.body.style.background = 'transparent';\
                document.body.innerHTML = '';\
                return true;\
             })()",
        )?;
        self.blanked = true;
        Ok(())
    }

    fn bake_background_style(
        &mut self,
        style: &BackgroundStyle,
        probe: &BodyProbe,
    ) -> Result<PathBuf> {
        let full = Position {
            x: 0.0,
            y: 0.0,
            w: probe.width / PX_PER_IN,
            h: probe.height / PX_PER_IN,
        };
        self.bake_div(&full, style)
    }

    fn bake_div(&mut self, position: &Position, style: &BackgroundStyle) -> Result<PathBuf> {
        let script = format!(
            "(() => {{\
                const el = document.createElement('div');\
                el.id = '{id}';\
                {placement}\
                el.style.backgroundImage = {image};\
                el.style.backgroundRepeat = {repeat};\
                el.style.backgroundSize = {size};\
                el.style.backgroundPosition = {pos};\
                el.style.backgroundColor = {color};\
                document.body.appendChild(el);\
                return true;\
             }})()",
            id = HELPER_ID,
            placement = placement_js(position),
            image = js_string(&style.background_image),
            repeat = js_string(&style.background_repeat),
            size = js_string(&style.background_size),
            pos = js_string(&style.background_position),
            color = js_string(&style.background_color),
        );
        self.capture(&script, false)
    }

    fn bake_svg(&mut self, position: &Position, markup: &str) -> Result<PathBuf> {
        let script = format!(
            "(() => {{\
                const el = document.createElement('div');\
                el.id = '{id}';\
                {placement}\
                el.innerHTML = {markup};\
                const svg = el.querySelector('svg');\
                if (svg) {{\
                    svg.setAttribute('width', '100%');\
                    svg.setAttribute('height', '100%');\
                }}\
                document.body.appendChild(el);\
                return true;\
             }})()",
            id = HELPER_ID,
            placement = placement_js(position),
            markup = js_string(markup),
        );
        self.capture(&script, false)
    }

    fn bake_image(&mut self, image: &ImageElement) -> Result<PathBuf> {
        let style = image.style.clone().unwrap_or(ImageStyle {
            object_fit: "fill".to_string(),
            object_position: "50% 50%".to_string(),
            border_radius: "0px".to_string(),
        });
        let script = format!(
            "(() => {{\
                const el = document.createElement('img');\
                el.id = '{id}';\
                {placement}\
                el.style.objectFit = {fit};\
                el.style.objectPosition = {pos};\
                el.style.borderRadius = {radius};\
                el.src = {src};\
                document.body.appendChild(el);\
                return true;\
             }})()",
            id = HELPER_ID,
            placement = placement_js(&image.position),
            fit = js_string(&style.object_fit),
            pos = js_string(&style.object_position),
            radius = js_string(&style.border_radius),
            src = js_string(&image.src),
        );
        self.capture(&script, true)
    }

    /// Injects a helper, screenshots it alone, removes it, and writes the
    /// PNG under the working directory with a collision-free name.
    fn capture(&mut self, inject_script: &str, wait_for_image: bool) -> Result<PathBuf> {
        self.ensure_blank()?;
        self.page.evaluate(inject_script)?;
        if wait_for_image {
            self.page.wait_for(&format!(
                "(() => {{ const el = document.getElementById('{HELPER_ID}'); \
                 return !!el && el.complete; }})()"
            ))?;
        }
        let bytes = self
            .page
            .screenshot_element(&format!("#{HELPER_ID}"), true)?;
        self.page.evaluate(&format!(
            "(() => {{ const el = document.getElementById('{HELPER_ID}'); \
             if (el) el.remove(); return true; }})()"
        ))?;

        let path = self.dir.join(format!(
            "raster-{}-{:08x}.png",
            Utc::now().format("%Y%m%d%H%M%S%3f"),
            rand::random::<u32>()
        ));
        fs::write(&path, bytes)?;
        debug!("rasterized helper element to {}", path.display());
        self.files.push(path.clone());
        Ok(path)
    }
}

/// The common fixed-position placement of a helper, pixel-exact at the
/// original box.
fn placement_js(position: &Position) -> String {
    format!(
        "el.style.position = 'fixed';\
         el.style.left = '{:.2}px';\
         el.style.top = '{:.2}px';\
         el.style.width = '{:.2}px';\
         el.style.height = '{:.2}px';",
        position.x * PX_PER_IN,
        position.y * PX_PER_IN,
        position.w * PX_PER_IN,
        position.h * PX_PER_IN,
    )
}

/// Serializes a string as a JavaScript string literal, escaping quotes and
/// control characters.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::background::Background;
    use crate::models::elements::{BgImageElement, ImageStyle, SvgElement};
    use serde_json::Value;

    /// A scripted page host that records calls and returns canned values.
    struct FakePage {
        evaluations: Vec<String>,
        screenshots: Vec<(String, bool)>,
    }

    impl FakePage {
        fn new() -> Self {
            FakePage {
                evaluations: Vec::new(),
                screenshots: Vec::new(),
            }
        }
    }

    impl PageHost for FakePage {
        fn navigate(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }
        fn set_viewport(&mut self, _width: u32, _height: u32) -> Result<()> {
            Ok(())
        }
        fn evaluate(&mut self, script: &str) -> Result<Value> {
            self.evaluations.push(script.to_string());
            Ok(Value::Bool(true))
        }
        fn wait_for(&mut self, _expression: &str) -> Result<()> {
            Ok(())
        }
        fn screenshot_element(&mut self, selector: &str, omit_background: bool) -> Result<Vec<u8>> {
            self.screenshots.push((selector.to_string(), omit_background));
            Ok(vec![0x89, b'P', b'N', b'G'])
        }
    }

    fn probe() -> BodyProbe {
        BodyProbe {
            width: 960.0,
            height: 540.0,
            scroll_width: 960.0,
            scroll_height: 540.0,
        }
    }

    fn position() -> Position {
        Position {
            x: 1.0,
            y: 1.0,
            w: 2.0,
            h: 1.0,
        }
    }

    #[test]
    fn solid_background_makes_no_screenshot_calls() {
        let mut page = FakePage::new();
        let dir = tempfile::tempdir().unwrap();
        let mut desc = SlideDescription {
            background: Background::Color {
                value: "123456".to_string(),
            },
            elements: vec![],
            placeholders: vec![],
            errors: vec![],
        };
        let files = rasterize(&mut page, &mut desc, &probe(), dir.path()).unwrap();
        assert!(files.is_empty());
        assert!(page.evaluations.is_empty());
        assert!(page.screenshots.is_empty());
    }

    #[test]
    fn intermediates_are_replaced_with_images() {
        let mut page = FakePage::new();
        let dir = tempfile::tempdir().unwrap();
        let mut desc = SlideDescription {
            background: Background::Gradient {
                value: "linear-gradient(red, blue)".to_string(),
                style: None,
            },
            elements: vec![
                SlideElement::Svg(SvgElement {
                    svg: "<svg></svg>".to_string(),
                    position: position(),
                }),
                SlideElement::BgImage(BgImageElement {
                    position: position(),
                    style: BackgroundStyle {
                        background_image: "url(\"x.png\")".to_string(),
                        background_repeat: "no-repeat".to_string(),
                        background_size: "cover".to_string(),
                        background_position: "center".to_string(),
                        background_color: "rgba(0, 0, 0, 0)".to_string(),
                    },
                }),
            ],
            placeholders: vec![],
            errors: vec![],
        };

        let files = rasterize(&mut page, &mut desc, &probe(), dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        for file in &files {
            assert!(file.exists());
        }
        assert!(matches!(desc.background, Background::Image { .. }));
        for element in &desc.elements {
            match element {
                SlideElement::Image(img) => assert!(img.style.is_none()),
                other => panic!("intermediate survived rasterization: {other:?}"),
            }
        }
        // every screenshot targeted the helper alone with backdrop omitted
        for (selector, omit) in &page.screenshots {
            assert_eq!(selector, "#__h2s_raster__");
            assert!(*omit);
        }
    }

    #[test]
    fn object_fit_image_is_baked_and_loses_style() {
        let mut page = FakePage::new();
        let dir = tempfile::tempdir().unwrap();
        let mut desc = SlideDescription {
            background: Background::Color {
                value: "FFFFFF".to_string(),
            },
            elements: vec![SlideElement::Image(ImageElement {
                src: "photo.jpg".to_string(),
                position: position(),
                style: Some(ImageStyle {
                    object_fit: "cover".to_string(),
                    object_position: "50% 50%".to_string(),
                    border_radius: "0px".to_string(),
                }),
            })],
            placeholders: vec![],
            errors: vec![],
        };
        let files = rasterize(&mut page, &mut desc, &probe(), dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        match &desc.elements[0] {
            SlideElement::Image(img) => {
                assert!(img.style.is_none());
                assert_eq!(img.src, files[0].display().to_string());
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn plain_image_is_untouched() {
        let mut page = FakePage::new();
        let dir = tempfile::tempdir().unwrap();
        let original = ImageElement {
            src: "photo.jpg".to_string(),
            position: position(),
            style: Some(ImageStyle {
                object_fit: "fill".to_string(),
                object_position: "50% 50%".to_string(),
                border_radius: "0px".to_string(),
            }),
        };
        let mut desc = SlideDescription {
            background: Background::Color {
                value: "FFFFFF".to_string(),
            },
            elements: vec![SlideElement::Image(original.clone())],
            placeholders: vec![],
            errors: vec![],
        };
        let files = rasterize(&mut page, &mut desc, &probe(), dir.path()).unwrap();
        assert!(files.is_empty());
        assert_eq!(desc.elements[0], SlideElement::Image(original));
    }

    #[test]
    fn svg_sourced_image_is_baked() {
        assert!(image_needs_baking(&ImageElement {
            src: "diagram.svg".to_string(),
            position: position(),
            style: None,
        }));
        assert!(!image_needs_baking(&ImageElement {
            src: "photo.png".to_string(),
            position: position(),
            style: None,
        }));
    }
}
