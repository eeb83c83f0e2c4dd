//! Scroll synchronisation between the cell viewport and its headers, and the
//! visible-window maths a virtualized renderer needs.
//!
//! Sync is one-directional: the main viewport drives both headers. Headers
//! never report scrolls back, so there is no feedback loop to guard.

use std::ops::Range;

/// Extra rows/columns rendered beyond each edge of the viewport.
pub const OVERSCAN: usize = 1;

/// A header viewport that can be scrolled to an offset (in pixels).
pub trait ScrollTarget {
    fn scroll_to(&mut self, offset: f64);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

/// Item sizes and viewport size for a fixed-size virtualized grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridWindow {
    pub rows: usize,
    pub columns: usize,
    pub column_width: f64,
    pub row_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

fn visible(offset: f64, extent: f64, item: f64, count: usize) -> Range<usize> {
    if count == 0 || item <= 0.0 || extent <= 0.0 {
        return 0..0;
    }
    let offset = offset.max(0.0);
    let first = (offset / item).floor() as usize;
    let last = ((offset + extent) / item).ceil() as usize;
    let start = first.saturating_sub(OVERSCAN).min(count);
    let end = last.saturating_add(OVERSCAN).min(count);
    start..end
}

impl GridWindow {
    pub fn new(rows: usize, columns: usize, column_width: f64, row_height: f64) -> Self {
        GridWindow {
            rows,
            columns,
            column_width,
            row_height,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    /// Viewport resize notification.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
    }

    /// Full scrollable size `(width, height)` of the grid.
    pub fn content_size(&self) -> (f64, f64) {
        (
            self.columns as f64 * self.column_width,
            self.rows as f64 * self.row_height,
        )
    }

    /// Largest meaningful scroll offset for the current viewport.
    pub fn max_scroll(&self) -> ScrollOffset {
        let (width, height) = self.content_size();
        ScrollOffset {
            top: (height - self.viewport_height).max(0.0),
            left: (width - self.viewport_width).max(0.0),
        }
    }

    pub fn visible_rows(&self, scroll_top: f64) -> Range<usize> {
        visible(scroll_top, self.viewport_height, self.row_height, self.rows)
    }

    pub fn visible_columns(&self, scroll_left: f64) -> Range<usize> {
        visible(scroll_left, self.viewport_width, self.column_width, self.columns)
    }
}

/// Keeps the row and column header viewports aligned with the main viewport.
///
/// Either header may be missing (not mounted yet); it is aligned to the last
/// known offset when attached.
pub struct ViewportSync {
    window: GridWindow,
    offset: ScrollOffset,
    column_header: Option<Box<dyn ScrollTarget>>,
    row_header: Option<Box<dyn ScrollTarget>>,
}

impl ViewportSync {
    pub fn new(window: GridWindow) -> Self {
        ViewportSync {
            window,
            offset: ScrollOffset::default(),
            column_header: None,
            row_header: None,
        }
    }

    pub fn window(&self) -> &GridWindow {
        &self.window
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn attach_column_header(&mut self, mut header: Box<dyn ScrollTarget>) {
        header.scroll_to(self.offset.left);
        self.column_header = Some(header);
    }

    pub fn attach_row_header(&mut self, mut header: Box<dyn ScrollTarget>) {
        header.scroll_to(self.offset.top);
        self.row_header = Some(header);
    }

    pub fn detach_column_header(&mut self) -> Option<Box<dyn ScrollTarget>> {
        self.column_header.take()
    }

    pub fn detach_row_header(&mut self) -> Option<Box<dyn ScrollTarget>> {
        self.row_header.take()
    }

    /// Main viewport scrolled: column header follows `left`, row header `top`.
    pub fn on_main_scroll(&mut self, scroll_top: f64, scroll_left: f64) {
        self.offset = ScrollOffset {
            top: scroll_top,
            left: scroll_left,
        };
        if let Some(header) = self.column_header.as_mut() {
            header.scroll_to(scroll_left);
        }
        if let Some(header) = self.row_header.as_mut() {
            header.scroll_to(scroll_top);
        }
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.window.resize(width, height);
    }

    /// Rows and columns to render for the current offset.
    pub fn visible_range(&self) -> (Range<usize>, Range<usize>) {
        (
            self.window.visible_rows(self.offset.top),
            self.window.visible_columns(self.offset.left),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<f64>>>);

    impl ScrollTarget for Recorder {
        fn scroll_to(&mut self, offset: f64) {
            self.0.borrow_mut().push(offset);
        }
    }

    fn window() -> GridWindow {
        let mut w = GridWindow::new(100, 100, 100.0, 28.0);
        w.resize(450.0, 280.0);
        w
    }

    #[test]
    fn test_headers_follow_main_viewport() {
        let columns = Recorder::default();
        let rows = Recorder::default();
        let mut sync = ViewportSync::new(window());
        sync.attach_column_header(Box::new(columns.clone()));
        sync.attach_row_header(Box::new(rows.clone()));

        sync.on_main_scroll(56.0, 310.0);
        sync.on_main_scroll(84.0, 0.0);

        assert_eq!(*columns.0.borrow(), vec![0.0, 310.0, 0.0]);
        assert_eq!(*rows.0.borrow(), vec![0.0, 56.0, 84.0]);
    }

    #[test]
    fn test_missing_headers_are_tolerated() {
        let mut sync = ViewportSync::new(window());
        sync.on_main_scroll(10.0, 20.0);
        assert_eq!(sync.offset(), ScrollOffset { top: 10.0, left: 20.0 });

        let columns = Recorder::default();
        sync.attach_column_header(Box::new(columns.clone()));
        assert_eq!(*columns.0.borrow(), vec![20.0]);

        assert!(sync.detach_column_header().is_some());
        assert!(sync.detach_row_header().is_none());
        sync.on_main_scroll(0.0, 0.0);
        assert_eq!(columns.0.borrow().len(), 1);

        let rows = Recorder::default();
        sync.attach_row_header(Box::new(rows.clone()));
        assert!(sync.detach_row_header().is_some());
        sync.on_main_scroll(30.0, 0.0);
        assert_eq!(*rows.0.borrow(), vec![0.0]);
    }

    #[test]
    fn test_sync_sized_from_config() {
        let config = GridConfig::from_toml(
            "row_limit = 20\ncolumn_limit = 8\ncolumn_width = 50.0\nrow_height = 20.0\n",
        )
        .unwrap();
        let mut sync = ViewportSync::new(config.window());
        assert_eq!(sync.visible_range(), (0..0, 0..0));

        sync.on_resize(200.0, 100.0);
        assert_eq!(sync.window().content_size(), (400.0, 400.0));
        assert_eq!(sync.visible_range(), (0..6, 0..5));

        let max = sync.window().max_scroll();
        assert_eq!(max, ScrollOffset { top: 300.0, left: 200.0 });
        sync.on_main_scroll(max.top, max.left);
        assert_eq!(sync.visible_range(), (14..20, 3..8));
    }

    #[test]
    fn test_visible_range_includes_overscan() {
        let mut sync = ViewportSync::new(window());
        assert_eq!(sync.visible_range(), (0..11, 0..6));

        sync.on_main_scroll(280.0, 1000.0);
        assert_eq!(sync.visible_range(), (9..21, 9..16));
    }

    #[test]
    fn test_visible_range_clamps_at_end() {
        let w = window();
        let max = w.max_scroll();
        assert_eq!(max, ScrollOffset { top: 2520.0, left: 9550.0 });
        assert_eq!(w.visible_rows(max.top), 89..100);
        assert_eq!(w.visible_columns(max.left), 94..100);
    }

    #[test]
    fn test_empty_viewport_shows_nothing() {
        let w = GridWindow::new(10, 10, 100.0, 28.0);
        assert_eq!(w.visible_rows(0.0), 0..0);
        assert_eq!(w.content_size(), (1000.0, 280.0));
    }

    #[test]
    fn test_resize_through_sync() {
        let mut sync = ViewportSync::new(GridWindow::new(5, 5, 100.0, 28.0));
        sync.on_resize(200.0, 56.0);
        assert_eq!(sync.window().viewport_width, 200.0);
        assert_eq!(sync.visible_range(), (0..3, 0..3));
    }
}
