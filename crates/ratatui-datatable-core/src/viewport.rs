/// Scroll position of a widget over content larger than its viewport.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = i64::from(self.y) + i64::from(delta);
        self.y = next.clamp(0, i64::from(self.max_y())) as u32;
    }

    /// Percentage of content above the bottom edge of the viewport, or `None` when everything
    /// fits.
    pub fn percent_y(&self) -> Option<u8> {
        if self.content_h == 0 || self.viewport_h == 0 || self.content_h <= u32::from(self.viewport_h)
        {
            return None;
        }
        let visible_bottom = f64::from(self.y.saturating_add(u32::from(self.viewport_h)));
        let pct = (visible_bottom / f64::from(self.content_h) * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(u32::from(self.viewport_h))
    }

    fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(u32::from(self.viewport_w))
    }
}
