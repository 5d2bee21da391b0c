use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use crate::models::Blob;

/// Find the outer borders of top-level foreground regions in a binary image.
///
/// Holes and anything nested inside a hole are skipped.
pub fn find_external_blobs(binary: &GrayImage) -> Vec<Blob> {
    find_contours::<u32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| Blob::from_points(c.points))
        .collect()
}
