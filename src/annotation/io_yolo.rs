//! YOLO-style normalized text annotations.
//!
//! One box per line: `<class_label> <x_center> <y_center> <width> <height>`,
//! whitespace separated, with the four numbers given as fractions of the
//! image size. The class label is carried by the format but not used here.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{AnnotationReader, BoxEntries, RawBox};
use crate::error::CropError;

const LABEL_EXTENSION: &str = "txt";
const TOKENS_PER_LINE: usize = 5;

/// Reader for `<image_stem>.txt` label files.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizedReader;

impl AnnotationReader for NormalizedReader {
    fn extension(&self) -> &'static str {
        LABEL_EXTENSION
    }

    fn read_boxes(&self, path: &Path) -> Result<BoxEntries, CropError> {
        let file = File::open(path).map_err(CropError::Io)?;
        Ok(Box::new(NormalizedLines::new(BufReader::new(file), path)))
    }
}

/// Lazily parses label rows from a buffered text stream.
///
/// Each call to `next` consumes input up to the next non-blank line, so the
/// sequence can only be walked once. Blank lines are skipped; every other
/// line yields either a box or a [`CropError::NormalizedLineParse`].
pub struct NormalizedLines<R> {
    lines: std::io::Lines<R>,
    path: PathBuf,
    line_num: usize,
}

impl<R: BufRead> NormalizedLines<R> {
    /// `path` is used only to label errors.
    pub fn new(reader: R, path: &Path) -> Self {
        Self {
            lines: reader.lines(),
            path: path.to_path_buf(),
            line_num: 0,
        }
    }
}

impl<R: BufRead> Iterator for NormalizedLines<R> {
    type Item = Result<RawBox, CropError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line_num += 1;
            let line = match next {
                Ok(line) => line,
                Err(source) => return Some(Err(CropError::Io(source))),
            };

            match parse_label_line(&line, &self.path, self.line_num) {
                Ok(Some(raw)) => return Some(Ok(raw)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Parses one label row.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_label_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<Option<RawBox>, CropError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // One past the expected count is enough to tell "too many" apart.
    let tokens: Vec<&str> = trimmed
        .split_whitespace()
        .take(TOKENS_PER_LINE + 1)
        .collect();

    if tokens.len() != TOKENS_PER_LINE {
        let found = if tokens.len() > TOKENS_PER_LINE {
            format!("more than {TOKENS_PER_LINE}")
        } else {
            tokens.len().to_string()
        };
        return Err(CropError::NormalizedLineParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("expected {TOKENS_PER_LINE} tokens, found {found}: '{trimmed}'"),
        });
    }

    let x_center = parse_f64_token(tokens[1], "x_center", file_path, line_num)?;
    let y_center = parse_f64_token(tokens[2], "y_center", file_path, line_num)?;
    let width = parse_f64_token(tokens[3], "width", file_path, line_num)?;
    let height = parse_f64_token(tokens[4], "height", file_path, line_num)?;

    Ok(Some(RawBox::Normalized {
        x_center,
        y_center,
        width,
        height,
    }))
}

/// Fuzz-only entrypoint for single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<(), CropError> {
    let _ = parse_label_line(input, Path::new("<fuzz>"), 1)?;
    Ok(())
}

fn parse_f64_token(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<f64, CropError> {
    raw.parse::<f64>()
        .map_err(|_| CropError::NormalizedLineParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("invalid {field_name} '{raw}'; expected floating-point number"),
        })
}
