/// View helpers for the feedback form
///
/// - Star rating row (stars.rs)
/// - Upload area and preview grid (previews.rs)

pub mod previews;
pub mod stars;
