use image::GrayImage;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Pixel coordinate of a detected laser dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaserPosition {
    pub x: u32,
    pub y: u32,
}

impl LaserPosition {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position, in pixels
    pub fn distance_to(&self, other: &LaserPosition) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Spatial moments of a closed contour polygon
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Compute polygon moments with Green's theorem over the border points.
    ///
    /// The sign is normalised so `m00` is never negative, whichever way the
    /// border is traversed.
    pub fn from_polygon(points: &[Point<u32>]) -> Self {
        if points.len() < 3 {
            return Self::default();
        }

        let mut a = 0.0f64;
        let mut sx = 0.0f64;
        let mut sy = 0.0f64;

        for (i, p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            let (x0, y0) = (p.x as f64, p.y as f64);
            let (x1, y1) = (q.x as f64, q.y as f64);

            let cross = x0 * y1 - x1 * y0;
            a += cross;
            sx += (x0 + x1) * cross;
            sy += (y0 + y1) * cross;
        }

        let mut moments = Self {
            m00: a / 2.0,
            m10: sx / 6.0,
            m01: sy / 6.0,
        };

        if moments.m00 < 0.0 {
            moments.m00 = -moments.m00;
            moments.m10 = -moments.m10;
            moments.m01 = -moments.m01;
        }

        moments
    }

    /// Centroid of the region, or None for a degenerate (zero area) contour
    pub fn centroid(&self) -> Option<LaserPosition> {
        if self.m00 == 0.0 {
            return None;
        }

        let cx = self.m10 / self.m00;
        let cy = self.m01 / self.m00;
        Some(LaserPosition::new(cx.max(0.0) as u32, cy.max(0.0) as u32))
    }
}

/// External contour of a connected foreground region
#[derive(Debug, Clone)]
pub struct Blob {
    pub points: Vec<Point<u32>>,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Blob {
    /// Build a blob from its ordered border points. Returns None for an empty border.
    pub fn from_points(points: Vec<Point<u32>>) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);

        for p in &points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            points,
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn moments(&self) -> Moments {
        Moments::from_polygon(&self.points)
    }

    /// Area enclosed by the border polygon
    pub fn area(&self) -> f64 {
        self.moments().m00
    }

    pub fn centroid(&self) -> Option<LaserPosition> {
        self.moments().centroid()
    }

    /// Mean brightness of the bounding box region
    pub fn average_brightness(&self, gray: &GrayImage) -> f32 {
        let max_x = self.max_x.min(gray.width().saturating_sub(1));
        let max_y = self.max_y.min(gray.height().saturating_sub(1));
        let mut sum: u64 = 0;
        let mut count: u64 = 0;

        for y in self.min_y..=max_y {
            for x in self.min_x..=max_x {
                if x < gray.width() && y < gray.height() {
                    sum += gray.get_pixel(x, y)[0] as u64;
                    count += 1;
                }
            }
        }

        if count > 0 {
            sum as f32 / count as f32
        } else {
            0.0
        }
    }
}

/// Inclusive HSV bounds (hue 0..180, saturation and value 0..255)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

// Red hue wraps around 0, so it needs a range on each side
const RED_RANGES: [HsvRange; 2] = [
    HsvRange::new([0, 50, 50], [10, 255, 255]),
    HsvRange::new([170, 50, 50], [180, 255, 255]),
];
const GREEN_RANGES: [HsvRange; 1] = [HsvRange::new([40, 50, 50], [80, 255, 255])];
const BLUE_RANGES: [HsvRange; 1] = [HsvRange::new([100, 50, 50], [130, 255, 255])];

/// Laser colours supported by the HSV detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LaserColor {
    #[default]
    Red,
    Green,
    Blue,
}

impl LaserColor {
    pub fn hsv_ranges(&self) -> &'static [HsvRange] {
        match self {
            LaserColor::Red => &RED_RANGES,
            LaserColor::Green => &GREEN_RANGES,
            LaserColor::Blue => &BLUE_RANGES,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LaserColor::Red => "red",
            LaserColor::Green => "green",
            LaserColor::Blue => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    /// Brightest spot in the grayscale frame
    #[default]
    Brightness,
    /// Colour segmentation in HSV space
    Hsv,
}

impl DetectionMethod {
    pub fn name(&self) -> &'static str {
        match self {
            DetectionMethod::Brightness => "brightness",
            DetectionMethod::Hsv => "hsv",
        }
    }
}

/// A located laser dot together with the blob it came from
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub position: LaserPosition,
    pub area: f64,
    pub brightness: f32,
}
