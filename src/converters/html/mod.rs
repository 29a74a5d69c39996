//! Translates one rendered HTML document into a single slide.
//!
//! The pipeline is strictly sequential: load the page, probe the body,
//! size the viewport, snapshot and extract the DOM, rasterize the CSS the
//! renderer cannot express, aggregate validation errors, and only then emit
//! to the slide builder. The same HTML plus the same browser version yields
//! the same description.

pub mod constants;

mod emit;
mod extract;
mod probe;
mod raster;
mod runs;
mod units;
mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::builder::{SlideBuilder, SlideId, SlideLayout};
use crate::errors::{Result, TranslateError};
use crate::host::PageHost;
use crate::models::placeholder::PlaceholderRegion;
use crate::models::SlideDescription;

/// Options for [`translate`].
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Populate this existing slide instead of adding a new one.
    pub slide: Option<SlideId>,
    /// Directory for rasterized images; a fresh directory under the OS temp
    /// root is created when absent.
    pub tmp_dir: Option<PathBuf>,
}

/// The result of a successful translation.
#[derive(Debug, Clone)]
pub struct Translated {
    /// The slide that was populated.
    pub slide: SlideId,
    /// Named placeholder rectangles (inches) reserved for caller content.
    pub placeholders: Vec<PlaceholderRegion>,
    /// Rasterized PNGs written during translation. The engine never deletes
    /// them; read them before discarding the working directory.
    pub raster_files: Vec<PathBuf>,
}

/// Translates the HTML file into one slide on `builder`.
///
/// On validation failure no slide content is emitted and the error carries
/// every violation at once. All error messages are prefixed with the HTML
/// file name.
pub fn translate(
    page: &mut dyn PageHost,
    html_file: &Path,
    builder: &mut dyn SlideBuilder,
    options: &TranslateOptions,
) -> Result<Translated> {
    let label = file_label(html_file);
    run_pipeline(page, html_file, builder, options).map_err(|e| prefix_error(e, &label))
}

/// Runs the extraction front half only: everything up to and including
/// rasterization and error accumulation, without driving a builder. The
/// returned description carries any violations in its `errors` field.
pub fn describe(
    page: &mut dyn PageHost,
    html_file: &Path,
    layout: &SlideLayout,
    options: &TranslateOptions,
) -> Result<SlideDescription> {
    let label = file_label(html_file);
    build_description(page, html_file, layout, options)
        .map(|(description, _)| description)
        .map_err(|e| prefix_error(e, &label))
}

fn run_pipeline(
    page: &mut dyn PageHost,
    html_file: &Path,
    builder: &mut dyn SlideBuilder,
    options: &TranslateOptions,
) -> Result<Translated> {
    let layout = builder.layout();
    let (description, raster_files) = build_description(page, html_file, &layout, options)?;

    if !description.errors.is_empty() {
        return Err(TranslateError::Validation(validate::format_errors(
            &description.errors,
        )));
    }

    let slide = options.slide.unwrap_or_else(|| builder.add_slide());
    emit::emit(&description, builder, slide);

    Ok(Translated {
        slide,
        placeholders: description.placeholders,
        raster_files,
    })
}

fn build_description(
    page: &mut dyn PageHost,
    html_file: &Path,
    layout: &SlideLayout,
    options: &TranslateOptions,
) -> Result<(SlideDescription, Vec<PathBuf>)> {
    page.navigate(&file_url(html_file)?)?;

    let probe = probe::probe_body(page)?;
    debug!(
        "body probed at {}x{}px (scroll {}x{})",
        probe.width, probe.height, probe.scroll_width, probe.scroll_height
    );
    page.set_viewport(probe.width.round() as u32, probe.height.round() as u32)?;

    let snapshot = extract::snapshot_page(page)?;
    let mut description = extract::extract(&snapshot);

    probe::check_dimensions(&probe, layout, &mut description.errors);
    let html_dir = html_file.parent().unwrap_or_else(|| Path::new("."));
    let mut errors = std::mem::take(&mut description.errors);
    validate::check_files(&description, html_dir, &mut errors);
    validate::check_text_bottom(&description, &probe, &mut errors);
    description.errors = errors;

    let tmp_dir = working_dir(options)?;
    let raster_files = raster::rasterize(page, &mut description, &probe, &tmp_dir)?;

    Ok((description, raster_files))
}

fn working_dir(options: &TranslateOptions) -> Result<PathBuf> {
    match &options.tmp_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            Ok(dir.clone())
        }
        None => Ok(tempfile::Builder::new()
            .prefix("html2slides-")
            .tempdir()?
            .into_path()),
    }
}

fn file_url(html_file: &Path) -> Result<String> {
    let absolute = fs::canonicalize(html_file)?;
    Ok(format!("file://{}", absolute.display()))
}

fn file_label(html_file: &Path) -> String {
    html_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| html_file.display().to_string())
}

/// Applies the failure contract: every surfaced message starts with the HTML
/// file name. Filesystem and snapshot failures are host-category errors.
fn prefix_error(error: TranslateError, label: &str) -> TranslateError {
    let message = error.to_string();
    if message.starts_with(label) {
        return error;
    }
    let prefixed = format!("{}: {}", label, message);
    match error {
        TranslateError::Validation(_) => TranslateError::Validation(prefixed),
        _ => TranslateError::Host(prefixed),
    }
}
