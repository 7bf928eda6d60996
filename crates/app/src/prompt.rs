//! Terminal preview and interactive save prompt

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use image::GrayImage;
use synthesis::MaskSink;

/// Glyphs from dark to bright
const RAMP: &[u8] = b" .:-=+*#%@";

/// Outcome of the save prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDecision {
    pub saved: bool,
    pub path: Option<PathBuf>,
}

/// Downsample a mask to at most `max_cols` characters wide
///
/// Each glyph shows the brightest pixel in its cell so thin hairs survive.
/// Terminal cells are about twice as tall as wide, so rows cover twice the
/// pixels of columns.
pub fn render_preview(mask: &GrayImage, max_cols: u32) -> String {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 || max_cols == 0 {
        return String::new();
    }

    let cell_w = width.div_ceil(max_cols).max(1);
    let cell_h = cell_w * 2;
    let cols = width.div_ceil(cell_w);
    let rows = height.div_ceil(cell_h);

    let mut out = String::with_capacity(((cols + 1) * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let brightest = (row * cell_h..((row + 1) * cell_h).min(height))
                .flat_map(|y| (col * cell_w..((col + 1) * cell_w).min(width)).map(move |x| (x, y)))
                .map(|(x, y)| mask.get_pixel(x, y)[0])
                .max()
                .unwrap_or(0);
            let index = brightest as usize * (RAMP.len() - 1) / u8::MAX as usize;
            out.push(RAMP[index] as char);
        }
        out.push('\n');
    }
    out
}

/// Show the mask and ask whether to save it
///
/// Mirrors the y/n + filename dialogue of the research scripts, with the
/// actual write delegated to `sink`.
pub fn prompt_save<R: BufRead + ?Sized, W: Write + ?Sized>(
    mask: &GrayImage,
    sink: &dyn MaskSink,
    input: &mut R,
    output: &mut W,
) -> Result<SaveDecision> {
    write!(output, "{}", render_preview(mask, 80))?;

    write!(output, "Save mask? (y/n): ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if !answer.trim().eq_ignore_ascii_case("y") {
        return Ok(SaveDecision {
            saved: false,
            path: None,
        });
    }

    write!(output, "Enter filename: ")?;
    output.flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;

    let path = sink.persist(mask, name.trim())?;
    writeln!(output, "Mask saved successfully!")?;

    Ok(SaveDecision {
        saved: true,
        path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use std::cell::RefCell;
    use std::io::Cursor;

    /// Records persisted names instead of writing files
    #[derive(Default)]
    struct RecordingSink {
        names: RefCell<Vec<String>>,
    }

    impl MaskSink for RecordingSink {
        fn persist(&self, _mask: &GrayImage, name: &str) -> synthesis::Result<PathBuf> {
            self.names.borrow_mut().push(name.to_string());
            Ok(PathBuf::from(format!("{name}.png")))
        }
    }

    #[test]
    fn test_preview_marks_hair() {
        let mut mask = GrayImage::new(4, 2);
        mask.put_pixel(3, 0, Luma([255]));
        let preview = render_preview(&mask, 4);
        assert_eq!(preview, "   @\n");
    }

    #[test]
    fn test_preview_downsamples() {
        let mask = GrayImage::new(400, 300);
        let preview = render_preview(&mask, 80);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines[0].len(), 80);
        // 5 px wide cells, 10 px tall
        assert_eq!(lines.len(), 30);
    }

    #[test]
    fn test_prompt_declined() {
        let sink = RecordingSink::default();
        let mut input = Cursor::new("n\n");
        let mut output = Vec::new();

        let decision = prompt_save(&GrayImage::new(2, 2), &sink, &mut input, &mut output).unwrap();
        assert!(!decision.saved);
        assert!(sink.names.borrow().is_empty());
    }

    #[test]
    fn test_prompt_accepted() {
        let sink = RecordingSink::default();
        let mut input = Cursor::new("Y\nmy_mask\n");
        let mut output = Vec::new();

        let decision = prompt_save(&GrayImage::new(2, 2), &sink, &mut input, &mut output).unwrap();
        assert!(decision.saved);
        assert_eq!(decision.path, Some(PathBuf::from("my_mask.png")));
        assert_eq!(*sink.names.borrow(), vec!["my_mask".to_string()]);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Mask saved successfully!"));
    }
}
