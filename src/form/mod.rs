/// Feedback form logic
///
/// Everything here is independent of the GUI:
/// - Field and layout definitions (field.rs)
/// - Phone number mask (phone.rs)
/// - Star rating state (rating.rs)
/// - Selected photos and file checks (upload.rs)
/// - Validation rules (validate.rs)
/// - The controller tying them together (controller.rs)

pub mod controller;
pub mod field;
pub mod phone;
pub mod rating;
pub mod upload;
pub mod validate;

pub use controller::FormController;
pub use field::{Field, FormLayout};
pub use upload::{FileInfo, UploadLimits};
