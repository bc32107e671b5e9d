//! Slide definitions.

use crate::element::{Element, ElementId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique slide identifier.
pub type SlideId = Uuid;

/// Slide-to-slide transition hint, opaque to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    #[default]
    None,
    Fade,
    Slide,
    Convex,
    Concave,
    Zoom,
}

/// Transition speed hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionSpeed {
    #[default]
    Default,
    Fast,
    Slow,
}

/// How a background image is fitted to the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSize {
    #[default]
    Cover,
    Contain,
}

/// The background the render layer should paint for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundLayer<'a> {
    /// A background image; takes precedence over any color.
    Image { url: &'a str, size: BackgroundSize },
    /// A solid color (CSS color string).
    Color(&'a str),
}

/// One slide: metadata plus an ordered sequence of positioned elements.
///
/// Element order determines serialization order and z-index on overlap, and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(default = "Uuid::new_v4", deserialize_with = "crate::element::lenient_id")]
    pub id: SlideId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Audio URL or embedded data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_size: Option<BackgroundSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_speed: Option<TransitionSpeed>,
}

impl Slide {
    /// Create an empty slide with a fresh id.
    pub fn new() -> Self {
        Self::with_title("New Slide")
    }

    /// Create an empty slide with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            summary: String::new(),
            elements: Vec::new(),
            audio: None,
            transcript: None,
            background_color: None,
            background_image: None,
            background_size: None,
            transition: None,
            transition_speed: None,
        }
    }

    /// The background to paint: the image when set, else the color, else none.
    pub fn background(&self) -> Option<BackgroundLayer<'_>> {
        if let Some(url) = self.background_image.as_deref() {
            return Some(BackgroundLayer::Image {
                url,
                size: self.background_size.unwrap_or_default(),
            });
        }
        self.background_color.as_deref().map(BackgroundLayer::Color)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slide_is_empty() {
        let slide = Slide::new();
        assert!(slide.elements.is_empty());
        assert_eq!(slide.title, "New Slide");
    }

    #[test]
    fn test_background_image_wins_over_color() {
        let mut slide = Slide::new();
        slide.background_color = Some("#ffffff".to_string());
        assert_eq!(slide.background(), Some(BackgroundLayer::Color("#ffffff")));

        slide.background_image = Some("https://example.com/bg.jpg".to_string());
        assert_eq!(
            slide.background(),
            Some(BackgroundLayer::Image {
                url: "https://example.com/bg.jpg",
                size: BackgroundSize::Cover,
            })
        );
    }

    #[test]
    fn test_slide_json_round_trip() {
        let mut slide = Slide::with_title("Overview");
        slide.summary = "What you will learn".to_string();
        slide.transition = Some(Transition::Convex);
        slide.transition_speed = Some(TransitionSpeed::Fast);
        slide.transcript = Some("A smooth explanation.".to_string());

        let json = serde_json::to_string(&slide).expect("serialize");
        let back: Slide = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, slide);
    }

    #[test]
    fn test_minimal_wire_slide_gets_defaults() {
        let json = r#"{"id":"slide-1","title":"Welcome","summary":"","elements":[]}"#;
        let slide: Slide = serde_json::from_str(json).expect("deserialize");
        assert!(slide.elements.is_empty());
        assert_eq!(slide.transition, None);
        assert!(slide.background().is_none());
    }
}
