use egui::Pos2;

/// One circular stamp in display coordinates.
///
/// `size` is the diameter in display pixels at the moment the stamp was made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Stroke {
    pub fn new(pos: Pos2, size: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            size,
        }
    }

    pub fn pos(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    fn distance(&self, pos: Pos2) -> f32 {
        let dx = self.x - pos.x;
        let dy = self.y - pos.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Ordered list of stamps. Strokes are only appended or removed, never modified.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mask(Vec<Stroke>);

impl Mask {
    pub fn push(&mut self, stroke: Stroke) {
        self.0.push(stroke);
    }

    /// Removes every stroke whose distance to `pos` is at most
    /// `max(stroke.size, eraser_size) / 2`. Returns the number of removed strokes.
    pub fn erase_near(&mut self, pos: Pos2, eraser_size: f32) -> usize {
        let before = self.0.len();
        self.0.retain(|s| s.distance(pos) > s.size.max(eraser_size) / 2.0);
        before - self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Stroke] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Mask {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Stroke> for Mask {
    fn from_iter<T: IntoIterator<Item = Stroke>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(strokes: &[(f32, f32, f32)]) -> Mask {
        strokes
            .iter()
            .map(|&(x, y, size)| Stroke::new(Pos2::new(x, y), size))
            .collect()
    }

    #[test]
    fn erase_removes_strokes_on_the_boundary() {
        let mut m = mask(&[(0.0, 0.0, 10.0)]);
        // 3-4-5 triangle: distance is exactly the radius
        assert_eq!(m.erase_near(Pos2::new(3.0, 4.0), 10.0), 1);
        assert!(m.is_empty());
    }

    #[test]
    fn erase_keeps_strokes_just_outside() {
        let mut m = mask(&[(0.0, 0.0, 10.0)]);
        assert_eq!(m.erase_near(Pos2::new(5.01, 0.0), 10.0), 0);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn large_eraser_clears_many_small_strokes() {
        let mut m = mask(&[(0.0, 0.0, 5.0), (10.0, 0.0, 5.0), (0.0, 20.0, 5.0), (40.0, 0.0, 5.0)]);
        let removed = m.erase_near(Pos2::new(0.0, 0.0), 50.0);
        assert_eq!(removed, 3);
        assert_eq!(m, mask(&[(40.0, 0.0, 5.0)]));
    }

    #[test]
    fn small_eraser_still_clears_large_strokes_reaching_it() {
        let mut m = mask(&[(0.0, 0.0, 50.0)]);
        assert_eq!(m.erase_near(Pos2::new(20.0, 0.0), 5.0), 1);
    }

    #[test]
    fn erase_preserves_order_of_survivors() {
        let mut m = mask(&[
            (0.0, 0.0, 10.0),
            (100.0, 0.0, 10.0),
            (1.0, 1.0, 10.0),
            (200.0, 0.0, 10.0),
        ]);
        m.erase_near(Pos2::new(0.0, 0.0), 10.0);
        assert_eq!(m, mask(&[(100.0, 0.0, 10.0), (200.0, 0.0, 10.0)]));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut m = mask(&[(0.0, 0.0, 10.0), (5.0, 5.0, 20.0)]);
        m.clear();
        assert!(m.is_empty());
        m.clear();
        assert_eq!(m, Mask::default());
    }
}
