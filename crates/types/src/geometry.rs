#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Converts a top-left based rectangle into PDF user space, where the
    /// origin sits at the bottom-left corner of a page of `page_height` points.
    pub fn to_pdf_space(&self, page_height: f32) -> Rect {
        Rect {
            x: self.x,
            y: page_height - self.bottom(),
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_to_pdf_space_flips_origin() {
        let r = Rect::new(10.0, 20.0, 100.0, 30.0);
        let flipped = r.to_pdf_space(800.0);
        assert_eq!(flipped.x, 10.0);
        assert_eq!(flipped.y, 750.0);
        assert_eq!(flipped.height, 30.0);
    }
}
