//! # Image References and Generation
//!
//! Catalog records carry an `image` field that is either a lightweight
//! remote reference (URL) or an inline `data:` payload. Inline payloads
//! are what blow quota budgets, so the degrade-and-retry policy in the
//! repositories keys off the distinction made here.
//!
//! Image *generation* is an external collaborator: an opaque capability
//! that may produce an image for a product or fail silently. On failure
//! or absence the stable placeholder reference is used.

use microfarm_core::Category;

/// The stable placeholder reference used whenever no usable image exists.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1530836369250-ef72a3f5cda8?auto=format&fit=crop&q=80&w=800";

/// Whether the image value is an inline (non-referential) payload.
#[inline]
pub fn is_inline(image: &str) -> bool {
    image.starts_with("data:")
}

/// Whether a record still needs an image produced for it.
pub fn needs_generation(image: &str) -> bool {
    image.is_empty() || image.contains("placeholder.com")
}

/// The image-generation collaborator.
///
/// Implementations wrap whatever service produces product photography.
/// The contract is deliberately thin: return an image value or `None`;
/// failures must be silent - the caller proceeds with the placeholder.
pub trait ImageGenerator: std::fmt::Debug {
    fn generate(&self, name: &str, category: Category, description: &str) -> Option<String>;
}

/// The default collaborator: generates nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImageGenerator;

impl ImageGenerator for NoopImageGenerator {
    fn generate(&self, _name: &str, _category: Category, _description: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_detection() {
        assert!(is_inline("data:image/jpeg;base64,AAAA"));
        assert!(!is_inline("https://example.com/img.jpg"));
        assert!(!is_inline(""));
    }

    #[test]
    fn test_needs_generation() {
        assert!(needs_generation(""));
        assert!(needs_generation("https://via.placeholder.com/800"));
        assert!(!needs_generation(PLACEHOLDER_IMAGE));
        assert!(!needs_generation("data:image/jpeg;base64,AAAA"));
    }
}
