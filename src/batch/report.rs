//! Batch report types.
//!
//! The batch never aborts on a bad image, annotation or box, so the report
//! is where callers find out what actually happened to each one.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Summary of one batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    /// Directory the crops were written to.
    pub output_dir: PathBuf,
    /// One entry per qualifying image, in processing order.
    pub images: Vec<ImageReport>,
}

impl BatchReport {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            images: Vec::new(),
        }
    }

    pub fn add(&mut self, image: ImageReport) {
        self.images.push(image);
    }

    /// Images that had a readable annotation file.
    pub fn processed_count(&self) -> usize {
        self.images
            .iter()
            .filter(|image| image.status == ImageStatus::Processed)
            .count()
    }

    pub fn missing_annotation_count(&self) -> usize {
        self.images
            .iter()
            .filter(|image| image.status == ImageStatus::MissingAnnotation)
            .count()
    }

    pub fn unreadable_annotation_count(&self) -> usize {
        self.images
            .iter()
            .filter(|image| matches!(image.status, ImageStatus::AnnotationUnreadable { .. }))
            .count()
    }

    /// Boxes that produced an actual crop.
    pub fn cropped_count(&self) -> usize {
        self.count_boxes(|outcome| matches!(outcome, BoxOutcome::Cropped { .. }))
    }

    /// Boxes that were degenerate and saved the original image instead.
    pub fn fallback_count(&self) -> usize {
        self.count_boxes(|outcome| matches!(outcome, BoxOutcome::Fallback))
    }

    pub fn failed_count(&self) -> usize {
        self.count_boxes(|outcome| matches!(outcome, BoxOutcome::Failed { .. }))
    }

    /// Annotation lines or elements rejected before a crop was attempted.
    pub fn skipped_entry_count(&self) -> usize {
        self.images.iter().map(|image| image.skipped_entries).sum()
    }

    fn count_boxes(&self, predicate: impl Fn(&BoxOutcome) -> bool) -> usize {
        self.images
            .iter()
            .flat_map(|image| image.boxes.iter())
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cropped {} image(s) into {}",
            self.processed_count(),
            self.output_dir.display()
        )?;
        writeln!(
            f,
            "  {} crop(s), {} fallback(s), {} failure(s)",
            self.cropped_count(),
            self.fallback_count(),
            self.failed_count()
        )?;

        let missing = self.missing_annotation_count();
        if missing > 0 {
            writeln!(f, "  {} image(s) without annotations", missing)?;
        }

        let unreadable = self.unreadable_annotation_count();
        if unreadable > 0 {
            writeln!(f, "  {} unreadable annotation file(s)", unreadable)?;
        }

        let skipped = self.skipped_entry_count();
        if skipped > 0 {
            writeln!(f, "  {} invalid annotation entr(ies) skipped", skipped)?;
        }

        let failures: Vec<(&ImageReport, &BoxReport)> = self
            .images
            .iter()
            .flat_map(|image| image.boxes.iter().map(move |entry| (image, entry)))
            .filter(|(_, entry)| matches!(entry.outcome, BoxOutcome::Failed { .. }))
            .collect();

        if !failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failures ({}):", failures.len())?;
            for (image, entry) in failures {
                if let BoxOutcome::Failed { message } = &entry.outcome {
                    writeln!(
                        f,
                        "  - {} crop{} {:?}: {}",
                        image.image, entry.index, entry.coordinates, message
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// What happened to one image.
#[derive(Clone, Debug, Serialize)]
pub struct ImageReport {
    /// File name of the image inside the image directory.
    pub image: String,
    pub status: ImageStatus,
    pub boxes: Vec<BoxReport>,
    pub skipped_entries: usize,
}

impl ImageReport {
    pub fn new(image: impl Into<String>, status: ImageStatus) -> Self {
        Self {
            image: image.into(),
            status,
            boxes: Vec::new(),
            skipped_entries: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageStatus {
    Processed,
    MissingAnnotation,
    AnnotationUnreadable { message: String },
}

/// One attempted box.
#[derive(Clone, Debug, Serialize)]
pub struct BoxReport {
    /// The `N` in `<stem>_crop<N>.<ext>`.
    pub index: usize,
    /// Raw annotation values in file order.
    pub coordinates: [f64; 4],
    pub output: PathBuf,
    pub outcome: BoxOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoxOutcome {
    Cropped { width: u32, height: u32 },
    Fallback,
    Failed { message: String },
}
