use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::convert::config::{ConversionPlan, ConvertConfig};
use crate::convert::output::{ensure_absent, OutputGuard};
use crate::convert::summary::{ClassSummary, ConversionSummary};
use crate::dataset::{decode_packed, scan_dataset};
use crate::error::{Error, Result};
use crate::idx::{IdxDataType, IdxHeader, IdxWriter};

/// Readers of this format commonly treat dimensions as signed 32-bit.
const MAX_SAMPLES: usize = i32::MAX as usize;

/// Converts a folder of per-class image folders into an IDX image tensor
/// (`[count, height, width]`) and an IDX label tensor (`[count]`).
///
/// Two passes over the input:
/// 1. `scan_dataset` lists classes and files in sorted order and checks every
///    image header against the shape of the first image.
/// 2. Images are decoded one at a time and streamed into the output files.
///    For every image the label code of its class (1-based, in class order)
///    is written, followed by its pixels row-major.
///
/// In grayscale mode each pixel and label is written as one byte (the low
/// byte of the packed ARGB value); otherwise as a 4-byte big-endian integer.
///
/// Both output files are created only after the scan succeeds, and are
/// deleted again if anything fails before they are complete.
pub fn convert(config: &ConvertConfig) -> Result<ConversionSummary> {
    let started = Instant::now();
    let images_path = config.images_path();
    let labels_path = config.labels_path();

    if !config.input_root.is_dir() {
        return Err(Error::InvalidInput { path: config.input_root.clone() });
    }
    ensure_absent(&[&images_path, &labels_path])?;

    info!(
        input = %config.input_root.display(),
        output = %config.output_root.display(),
        name = %config.output_base_name,
        grayscale = config.grayscale,
        "converting image folders to IDX"
    );

    let layout = scan_dataset(&config.input_root)?;
    let data_type = IdxDataType::for_grayscale(config.grayscale);
    let sample_count = layout.sample_count();

    if sample_count > MAX_SAMPLES {
        return Err(Error::TooManySamples { count: sample_count });
    }
    if layout.class_count() > data_type.max_value() as usize {
        return Err(Error::TooManyClasses { count: layout.class_count() });
    }

    let image_header = IdxHeader::new(
        data_type,
        vec![sample_count as u32, layout.height, layout.width],
    );
    let label_header = IdxHeader::new(data_type, vec![sample_count as u32]);

    // Declared before the writers so the files are closed before removal.
    let mut guard = OutputGuard::new();
    let mut images = IdxWriter::new(guard.create(&images_path)?, &image_header)
        .map_err(|e| Error::io(&images_path, e))?;
    let mut labels = IdxWriter::new(guard.create(&labels_path)?, &label_header)
        .map_err(|e| Error::io(&labels_path, e))?;

    for class in &layout.classes {
        debug!(class = %class.label, code = class.code, images = class.files.len(), "encoding class");
        for path in &class.files {
            labels
                .write_element(class.code)
                .map_err(|e| Error::io(&labels_path, e))?;

            let raster = decode_packed(path)?;
            if (raster.width, raster.height) != (layout.width, layout.height) {
                return Err(Error::ShapeMismatch {
                    path: path.clone(),
                    expected_width: layout.width,
                    expected_height: layout.height,
                    actual_width: raster.width,
                    actual_height: raster.height,
                });
            }
            images
                .write_elements(&raster.pixels)
                .map_err(|e| Error::io(&images_path, e))?;
        }
    }

    finish_file(images, &images_path)?;
    finish_file(labels, &labels_path)?;
    guard.commit();

    let summary = ConversionSummary {
        images_path,
        labels_path,
        data_type,
        sample_count,
        height: layout.height,
        width: layout.width,
        classes: layout
            .classes
            .iter()
            .map(|c| ClassSummary {
                label: c.label.clone(),
                code: c.code,
                count: c.files.len(),
            })
            .collect(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    info!(
        samples = summary.sample_count,
        classes = summary.classes.len(),
        height = summary.height,
        width = summary.width,
        elapsed_ms = summary.elapsed_ms,
        "conversion finished"
    );

    Ok(summary)
}

/// Runs every job of `plan` in order, stopping at the first failure.
pub fn convert_plan(plan: &ConversionPlan) -> Result<Vec<ConversionSummary>> {
    plan.jobs().iter().map(convert).collect()
}

fn finish_file(writer: IdxWriter<BufWriter<File>>, path: &Path) -> Result<()> {
    let buffered = writer.finish()?;
    let file = buffered
        .into_inner()
        .map_err(|e| Error::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| Error::io(path, e))
}
