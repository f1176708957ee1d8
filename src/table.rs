use std::fmt;

use crate::models::Detection;

/// Row-oriented summary of a detection list, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub category: String,
    pub score: f32,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Tabular view over detections for terminal display. Zero detections is
/// a valid, empty table.
#[derive(Debug, Clone, Default)]
pub struct DetectionTable {
    rows: Vec<TableRow>,
}

impl DetectionTable {
    pub fn from_detections(detections: &[Detection]) -> Self {
        let rows = detections
            .iter()
            .map(|d| TableRow {
                category: d.category.clone(),
                score: d.score,
                left: d.bounding_box.left,
                top: d.bounding_box.top,
                width: d.bounding_box.width,
                height: d.bounding_box.height,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for DetectionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category_width = self
            .rows
            .iter()
            .map(|r| r.category.len())
            .chain(std::iter::once("Category".len()))
            .max()
            .unwrap_or(8);

        writeln!(
            f,
            "{:<category_width$}  {:>6}  {:>8}  {:>8}  {:>8}  {:>8}",
            "Category", "Score", "Left", "Top", "Width", "Height"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<category_width$}  {:>6.2}  {:>8.1}  {:>8.1}  {:>8.1}  {:>8.1}",
                row.category, row.score, row.left, row.top, row.width, row.height
            )?;
        }
        Ok(())
    }
}
