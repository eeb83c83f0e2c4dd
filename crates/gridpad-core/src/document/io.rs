use super::state::Document;
use crate::error::Result;
use crate::storage::{from_csv, read_csv, to_csv, write_csv};
use log::info;
use std::path::Path;

impl Document {
    /// Cell contents as CSV text.
    pub fn to_csv(&self) -> String {
        to_csv(&self.matrix)
    }

    /// Replace the grid with parsed CSV text, in one step.
    ///
    /// All styling is reset; the grid keeps its dimensions.
    pub fn import_csv(&mut self, text: &str) -> Result<()> {
        let (rows, columns) = self.dimensions();
        self.replace_matrix(from_csv(text, rows, columns))?;
        info!("Imported CSV into {}x{} grid", rows, columns);
        Ok(())
    }

    /// Read a CSV file and import it.
    ///
    /// The file is fully read and parsed before the grid is touched.
    pub fn import_csv_file(&mut self, path: &Path) -> Result<()> {
        let (rows, columns) = self.dimensions();
        let matrix = read_csv(path, rows, columns)?;
        self.replace_matrix(matrix)?;
        info!("Imported {} into {}x{} grid", path.display(), rows, columns);
        Ok(())
    }

    /// Export to a CSV file.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        write_csv(path, &self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{Document, EditableProperties, PropertyChange};
    use gridpad_engine::engine::CellId;

    #[test]
    fn test_import_resets_style_and_pads() {
        let mut doc = Document::new(2, 2);
        let origin = CellId::new(0, 0);
        doc.focus(&origin).unwrap();
        doc.set_property(&origin, PropertyChange::Bold(true)).unwrap();
        doc.set_property(&origin, PropertyChange::BackgroundColor("#123456".into()))
            .unwrap();

        doc.import_csv("x,y\nz").unwrap();

        assert_eq!(doc.matrix().contents(), vec![vec!["x", "y"], vec!["z", ""]]);
        assert!(doc.matrix().iter().all(|c| c.has_default_style()));
        // Focus survives, and the snapshot follows the restyled cell.
        assert_eq!(doc.focused(), Some(origin));
        assert_eq!(doc.editable_properties(), &EditableProperties::default());
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let mut doc = Document::new(2, 3);
        doc.commit_edit(&CellId::new(0, 2), "c").unwrap();
        doc.commit_edit(&CellId::new(1, 0), "d").unwrap();
        let csv = doc.to_csv();
        assert_eq!(csv, ",,c,\nd,,,\n");

        let mut other = Document::new(2, 3);
        other.import_csv(&csv).unwrap();
        assert_eq!(other.matrix(), doc.matrix());
    }

    #[test]
    fn test_file_import_failure_leaves_grid_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new(1, 1);
        doc.commit_edit(&CellId::new(0, 0), "keep").unwrap();
        assert!(doc.import_csv_file(&dir.path().join("missing.csv")).is_err());
        assert_eq!(doc.cell(&CellId::new(0, 0)).unwrap().content, "keep");
    }

    #[test]
    fn test_file_export_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("excel.csv");
        let mut doc = Document::new(2, 2);
        doc.commit_edit(&CellId::new(1, 1), "z").unwrap();
        doc.export_csv(&path).unwrap();

        let mut other = Document::new(2, 2);
        other.import_csv_file(&path).unwrap();
        assert_eq!(other.cell(&CellId::new(1, 1)).unwrap().content, "z");
    }
}
