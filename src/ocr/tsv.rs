use anyhow::{anyhow, Context, Result};

use super::region::{BoundingBox, TextRegion};

/// Tesseract TSV columns: level, page_num, block_num, par_num, line_num,
/// word_num, left, top, width, height, conf, text
const TSV_FIELD_COUNT: usize = 12;

/// Level 5 rows are words; everything above is layout.
const WORD_LEVEL: i32 = 5;

/// A word collected for the line currently being assembled.
struct PendingLine {
    key: (i32, i32, i32),
    words: Vec<TextRegion>,
}

impl PendingLine {
    fn into_region(self) -> Option<TextRegion> {
        let mut boxes = self.words.iter().map(|w| w.bounding_box);
        let first = boxes.next()?;
        let bounding_box = boxes.fold(first, |acc, b| acc.union(&b));

        let text = self
            .words
            .iter()
            .filter_map(|w| w.value.as_deref())
            .collect::<Vec<_>>()
            .join(" ");

        Some(TextRegion {
            value: Some(text),
            corner_points: bounding_box.corners(),
            bounding_box,
            components: self.words,
        })
    }
}

fn parse_field<T: std::str::FromStr>(fields: &[&str], idx: usize, name: &str, row: usize) -> Result<T> {
    fields[idx]
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("Invalid {} '{}' on TSV row {}", name, fields[idx], row + 1))
}

/// Parses Tesseract TSV output into one region per text line.
///
/// Words are grouped by (block, paragraph, line). Each line region holds the
/// words joined by a single space, the union of the word boxes, and the word
/// regions as components. Words with empty text or with a confidence below
/// `min_confidence` (including Tesseract's `-1`) are dropped.
pub fn parse_tsv_regions(tsv: &str, min_confidence: f32) -> Result<Vec<TextRegion>> {
    let mut regions: Vec<TextRegion> = Vec::new();
    let mut current: Option<PendingLine> = None;

    for (row, line) in tsv.lines().enumerate().skip(1) {
        // Skip header
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < TSV_FIELD_COUNT {
            continue;
        }

        let level: i32 = parse_field(&fields, 0, "level", row)?;
        if level != WORD_LEVEL {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let conf: f32 = parse_field(&fields, 10, "confidence", row)?;
        if conf < 0.0 || conf < min_confidence {
            continue;
        }

        let key = (
            parse_field(&fields, 2, "block_num", row)?,
            parse_field(&fields, 3, "par_num", row)?,
            parse_field(&fields, 4, "line_num", row)?,
        );
        let bounding_box = BoundingBox::new(
            parse_field(&fields, 6, "left", row)?,
            parse_field(&fields, 7, "top", row)?,
            parse_field(&fields, 8, "width", row)?,
            parse_field(&fields, 9, "height", row)?,
        );
        let word = TextRegion::new(text, bounding_box);

        match current.as_mut() {
            Some(pending) if pending.key == key => pending.words.push(word),
            _ => {
                // Moved to a new line, flush the previous one
                if let Some(region) = current.take().and_then(PendingLine::into_region) {
                    regions.push(region);
                }
                current = Some(PendingLine {
                    key,
                    words: vec![word],
                });
            }
        }
    }

    // Don't forget the last line
    if let Some(region) = current.and_then(PendingLine::into_region) {
        regions.push(region);
    }

    Ok(regions)
}

/// Reads and parses a TSV file written by `tesseract ... tsv`.
pub fn read_tsv_regions(path: &std::path::Path, min_confidence: f32) -> Result<Vec<TextRegion>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read TSV file {}", path.display()))?;
    parse_tsv_regions(&content, min_confidence)
        .with_context(|| format!("Failed to parse TSV file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn word(block: i32, line: i32, word: i32, left: i32, top: i32, conf: f32, text: &str) -> String {
        format!(
            "5\t1\t{}\t1\t{}\t{}\t{}\t{}\t40\t20\t{}\t{}",
            block, line, word, left, top, conf, text
        )
    }

    fn tsv(rows: &[String]) -> String {
        let mut out = vec![HEADER.to_string()];
        out.extend(rows.iter().cloned());
        out.join("\n")
    }

    #[test]
    fn test_words_grouped_into_lines() {
        let input = tsv(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t".to_string(),
            word(1, 1, 1, 10, 100, 95.0, "Next"),
            word(1, 1, 2, 60, 102, 91.0, "Round"),
            word(1, 2, 1, 10, 300, 88.0, "Quit"),
        ]);

        let regions = parse_tsv_regions(&input, 0.0).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].value.as_deref(), Some("Next Round"));
        assert_eq!(regions[0].bounding_box, BoundingBox::new(10, 100, 90, 22));
        assert_eq!(regions[0].components.len(), 2);
        assert_eq!(regions[0].corner_points.len(), 4);
        assert_eq!(regions[1].value.as_deref(), Some("Quit"));
    }

    #[test]
    fn test_same_line_number_in_other_block_is_new_line() {
        let input = tsv(&[
            word(1, 1, 1, 10, 100, 95.0, "Left"),
            word(2, 1, 1, 400, 100, 95.0, "Right"),
        ]);

        let regions = parse_tsv_regions(&input, 0.0).unwrap();
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn test_low_confidence_and_empty_words_skipped() {
        let input = tsv(&[
            word(1, 1, 1, 10, 100, 30.0, "noise"),
            word(1, 1, 2, 60, 100, 90.0, "Keep"),
            word(1, 2, 1, 10, 200, 90.0, " "),
            word(1, 3, 1, 10, 300, -1.0, "gone"),
        ]);

        let regions = parse_tsv_regions(&input, 60.0).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].value.as_deref(), Some("Keep"));
    }

    #[test]
    fn test_short_rows_ignored() {
        let input = format!("{}\n5\t1\t1\n", HEADER);
        assert!(parse_tsv_regions(&input, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_number_is_error() {
        let input = tsv(&["5\t1\t1\t1\t1\t1\tleft\t0\t10\t10\t90\tWord".to_string()]);
        assert!(parse_tsv_regions(&input, 0.0).is_err());
    }
}
