/// Maps between screen pixels and grid cells.
///
/// The grid is fitted into a content rectangle and centered; on top of
/// the fit the user can zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridView {
    area: (f32, f32, f32, f32),
    cols: usize,
    rows: usize,
    base_cell_size: f32,
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 32.0;

impl GridView {
    /// Fit a `cols x rows` grid into the rectangle at `(x, y)` of size `w x h`
    pub fn fit(cols: usize, rows: usize, area: (f32, f32, f32, f32)) -> Self {
        let mut view = Self {
            area,
            cols,
            rows,
            base_cell_size: 0.0,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        };
        view.refit(cols, rows, area);
        view
    }

    /// Follow a resized window or grid, keeping zoom and pan
    pub fn refit(&mut self, cols: usize, rows: usize, area: (f32, f32, f32, f32)) {
        let (_, _, w, h) = area;
        self.area = area;
        self.cols = cols;
        self.rows = rows;
        self.base_cell_size = if cols == 0 || rows == 0 {
            0.0
        } else {
            (w / cols as f32).min(h / rows as f32).max(0.0)
        };
    }

    pub fn cell_size(&self) -> f32 {
        self.base_cell_size * self.zoom
    }

    /// Screen position of the grid's top-left corner
    pub fn origin(&self) -> (f32, f32) {
        let (x, y, w, h) = self.area;
        let base_w = self.base_cell_size * self.cols as f32;
        let base_h = self.base_cell_size * self.rows as f32;
        (x + (w - base_w) / 2.0 + self.pan_x, y + (h - base_h) / 2.0 + self.pan_y)
    }

    pub fn area_contains(&self, sx: f32, sy: f32) -> bool {
        let (x, y, w, h) = self.area;
        sx >= x && sx < x + w && sy >= y && sy < y + h
    }

    /// Cell under a screen point; may lie outside the grid
    pub fn screen_to_cell(&self, sx: f32, sy: f32) -> (i64, i64) {
        let size = self.cell_size();
        if size <= 0.0 {
            return (-1, -1);
        }
        let (ox, oy) = self.origin();
        (((sx - ox) / size).floor() as i64, ((sy - oy) / size).floor() as i64)
    }

    /// Top-left screen corner of a cell
    pub fn cell_to_screen(&self, x: i64, y: i64) -> (f32, f32) {
        let size = self.cell_size();
        let (ox, oy) = self.origin();
        (ox + x as f32 * size, oy + y as f32 * size)
    }

    /// Half-open cell ranges `(x0, y0, x1, y1)` visible in the area
    pub fn visible_cells(&self) -> (usize, usize, usize, usize) {
        let (x, y, w, h) = self.area;
        let (min_x, min_y) = self.screen_to_cell(x, y);
        let (max_x, max_y) = self.screen_to_cell(x + w, y + h);
        let clamp = |v: i64, hi: usize| v.clamp(0, hi as i64) as usize;
        (
            clamp(min_x, self.cols),
            clamp(min_y, self.rows),
            clamp(max_x + 1, self.cols),
            clamp(max_y + 1, self.rows),
        )
    }

    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self, factor: f32) {
        self.zoom = (self.zoom / factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Back to the fitted view
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}
