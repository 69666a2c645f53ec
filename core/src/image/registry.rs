//! Registry of all images known to the application.

use super::{Image, ImageId};

/// Owns every [`Image`] and hands out stable [`ImageId`]s.
///
/// Images are never removed, so ids stay valid for the registry's lifetime.
/// Global cache invalidation walks the whole registry.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    images: Vec<Image>,
}

impl ImageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image and return its id.
    pub fn add(&mut self, image: Image) -> ImageId {
        let id = ImageId(self.images.len());
        log::trace!("Registering image {:?} as {:?}", image.name, id);
        self.images.push(image);
        id
    }

    /// Look up an image.
    pub fn get(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id.0)
    }

    /// Look up an image mutably.
    pub fn get_mut(&mut self, id: ImageId) -> Option<&mut Image> {
        self.images.get_mut(id.0)
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// All ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ImageId> + '_ {
        (0..self.images.len()).map(ImageId)
    }

    /// Iterate over images with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ImageId, &Image)> {
        self.images
            .iter()
            .enumerate()
            .map(|(index, image)| (ImageId(index), image))
    }

    /// Iterate mutably over images with their ids.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ImageId, &mut Image)> {
        self.images
            .iter_mut()
            .enumerate()
            .map(|(index, image)| (ImageId(index), image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageBuffer;

    #[test]
    fn test_add_and_lookup() {
        let mut registry = ImageRegistry::new();
        assert!(registry.is_empty());

        let a = registry.add(Image::new("a", ImageBuffer::solid(4, 4, [255; 4])));
        let b = registry.add(Image::unloaded("b"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).map(|i| i.name.as_str()), Some("a"));
        assert!(registry.get(b).is_some_and(|i| i.buffer.is_none()));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_unknown_id() {
        let registry = ImageRegistry::new();
        assert!(registry.get(ImageId(3)).is_none());
    }
}
