use crate::render::Color;

/// d3 `schemeCategory10`.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

const UNKNOWN_BRAND_COLOR: Color = Color::from_rgb8(0x6c, 0x75, 0x7d);

/// Ordinal brand → color mapping over a sorted brand list.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandPalette {
    brands: Vec<String>,
}

impl BrandPalette {
    /// `brands` must be sorted; [`Dataset::brands`](crate::core::Dataset::brands) is.
    #[must_use]
    pub fn new(brands: Vec<String>) -> Self {
        Self { brands }
    }

    #[must_use]
    pub fn color_for(&self, brand: &str) -> Color {
        match self.brands.binary_search_by(|probe| probe.as_str().cmp(brand)) {
            Ok(index) => CATEGORY10[index % CATEGORY10.len()],
            Err(_) => UNKNOWN_BRAND_COLOR,
        }
    }
}
