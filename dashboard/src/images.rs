//! Built-in image catalog and caption presets

use std::sync::Arc;

use dashboard_components::{Description, ImageDescriptor};

const EXTERNAL_URL: &str = "http://www.google.com";

/// The gallery sequence, rooted at `asset_base`
pub fn gallery(asset_base: &str) -> Vec<Arc<ImageDescriptor>> {
    let path = |name: &str| format!("{}/{}", asset_base, name);
    vec![
        ImageDescriptor::new(path("img1.jpg")).with_external_url(EXTERNAL_URL),
        ImageDescriptor::new(path("img2.png")).with_description("Description 2"),
        ImageDescriptor::new(path("img3.jpg"))
            .with_thumbnail(path("thumbs/img3.png"))
            .with_description("Description 3")
            .with_external_url(EXTERNAL_URL),
        ImageDescriptor::new(path("img4.jpg"))
            .with_description("Description 4")
            .with_external_url(EXTERNAL_URL),
        ImageDescriptor::new(path("img5.jpg")).with_thumbnail(path("thumbs/img5.jpg")),
    ]
    .into_iter()
    .map(Arc::new)
    .collect()
}

/// Single featured image shown above the strips
pub fn featured(asset_base: &str) -> Vec<Arc<ImageDescriptor>> {
    vec![Arc::new(
        ImageDescriptor::new(format!("{}/img1.jpg", asset_base))
            .with_thumbnail(format!("{}/thumbs/img1.jpg", asset_base))
            .with_description("Description 1")
            .with_external_url(EXTERNAL_URL),
    )]
}

/// Caption of the direct gallery
pub fn custom_description() -> Description {
    Description {
        image_text: "Look this image ".into(),
        number_separator: " of ".into(),
        before_text_description: " => ".into(),
        custom_full_description: None,
    }
}

/// Caption of the observable gallery, rewritten on every visible-index event
pub fn custom_full_description() -> Description {
    Description {
        custom_full_description: Some("Custom description of the current visible image".into()),
        ..Description::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_paths() {
        let images = gallery("assets");

        assert_eq!(images.len(), 5);
        assert_eq!(images[0].source_url, "assets/img1.jpg");
        assert_eq!(images[2].thumbnail_url.as_deref(), Some("assets/thumbs/img3.png"));
        assert!(images[4].description.is_none());
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            custom_description().render(0, 5, Some("Description 1")),
            "Look this image 1 of 5 => Description 1"
        );
        assert_eq!(
            custom_full_description().render(3, 5, None),
            "Custom description of the current visible image"
        );
    }
}
