/// Vertical scroll position of a page taller than the viewport.
///
/// `top()` is the page top relative to the viewport top: `0.0` when
/// scrolled to the top, increasingly negative while scrolling down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    top: f32,
    page_height: f32,
    viewport_height: f32,
}

impl ScrollState {
    pub fn new(page_height: f32, viewport_height: f32) -> Self {
        Self {
            top: 0.0,
            page_height: page_height.max(0.0),
            viewport_height: viewport_height.max(0.0),
        }
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    /// How far the page can scroll before its bottom reaches the viewport bottom
    pub fn max_scroll(&self) -> f32 {
        (self.page_height - self.viewport_height).max(0.0)
    }

    /// Scroll down by `pixels` (negative scrolls up). Returns whether the offset changed.
    pub fn scroll_by(&mut self, pixels: f32) -> bool {
        let next = (self.top - pixels).clamp(-self.max_scroll(), 0.0);
        let changed = next != self.top;
        self.top = next;
        changed
    }

    pub fn scroll_to(&mut self, distance_from_top: f32) -> bool {
        let next = (-distance_from_top).clamp(-self.max_scroll(), 0.0);
        let changed = next != self.top;
        self.top = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_the_top() {
        let scroll = ScrollState::new(4000.0, 800.0);
        assert_eq!(scroll.top(), 0.0);
        assert_eq!(scroll.max_scroll(), 3200.0);
    }

    #[test]
    fn scrolling_down_goes_negative_and_clamps() {
        let mut scroll = ScrollState::new(4000.0, 800.0);
        assert!(scroll.scroll_by(120.0));
        assert_eq!(scroll.top(), -120.0);
        scroll.scroll_by(1e6);
        assert_eq!(scroll.top(), -3200.0);
        assert!(!scroll.scroll_by(10.0));
    }

    #[test]
    fn cannot_scroll_above_the_top() {
        let mut scroll = ScrollState::new(4000.0, 800.0);
        assert!(!scroll.scroll_by(-50.0));
        assert_eq!(scroll.top(), 0.0);
    }

    #[test]
    fn page_shorter_than_viewport_never_scrolls() {
        let mut scroll = ScrollState::new(300.0, 800.0);
        assert!(!scroll.scroll_to(100.0));
        assert_eq!(scroll.top(), 0.0);
    }
}
