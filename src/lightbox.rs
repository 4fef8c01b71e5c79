//! Lightbox Navigator

use crate::variants::{Variant, VariantId};

/// One image in the flattened lightbox sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxImage {
    /// Variant the image belongs to
    pub variant: VariantId,

    /// Position within the variant's images
    pub image_index: usize,

    /// Image path
    pub url: String,
}

/// Flatten variants into one sequence: variant order, then image order.
#[must_use]
pub fn flatten(variants: &[Variant]) -> Vec<LightboxImage> {
    variants
        .iter()
        .flat_map(|variant| {
            variant
                .images
                .iter()
                .enumerate()
                .map(|(image_index, url)| LightboxImage {
                    variant: variant.id,
                    image_index,
                    url: url.clone(),
                })
        })
        .collect()
}

/// Open/next/prev/close navigation over the selected product's images.
#[derive(Debug, Default)]
pub struct Lightbox {
    images: Vec<LightboxImage>,
    open: Option<usize>,
}

impl Lightbox {
    /// Build a closed lightbox over `variants`.
    #[must_use]
    pub fn new(variants: &[Variant]) -> Self {
        Self {
            images: flatten(variants),
            open: None,
        }
    }

    /// The flattened sequence.
    #[must_use]
    pub fn images(&self) -> &[LightboxImage] {
        &self.images
    }

    /// Number of images in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Whether an image is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Index of the showing image.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.open
    }

    /// The showing image.
    #[must_use]
    pub fn current(&self) -> Option<&LightboxImage> {
        self.open.and_then(|index| self.images.get(index))
    }

    /// Show the image at `index`, clamped to the last image.
    ///
    /// Stays closed when the sequence is empty.
    pub fn open(&mut self, index: usize) -> Option<&LightboxImage> {
        self.open = self.clamp(index);

        self.current()
    }

    /// Advance one image, wrapping from the last to the first.
    pub fn next(&mut self) -> Option<&LightboxImage> {
        let len = self.images.len();

        if let Some(index) = self.open.as_mut()
            && len > 0
        {
            *index = (*index + 1) % len;
        }

        self.current()
    }

    /// Step back one image, wrapping from the first to the last.
    pub fn prev(&mut self) -> Option<&LightboxImage> {
        let len = self.images.len();

        if let Some(index) = self.open.as_mut()
            && len > 0
        {
            *index = (*index + len - 1) % len;
        }

        self.current()
    }

    /// Hide the lightbox.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Swap in a new variant list, keeping the open index valid.
    ///
    /// An open lightbox whose sequence becomes empty closes.
    pub fn replace_variants(&mut self, variants: &[Variant]) {
        self.images = flatten(variants);
        self.open = self.open.and_then(|index| self.clamp(index));
    }

    fn clamp(&self, index: usize) -> Option<usize> {
        self.images.len().checked_sub(1).map(|last| index.min(last))
    }
}
