//! Slide element definitions.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique element identifier.
pub type ElementId = Uuid;

/// Default lower bound for element width during resize.
pub const DEFAULT_MIN_WIDTH: f64 = 50.0;
/// Default lower bound for element height during resize.
pub const DEFAULT_MIN_HEIGHT: f64 = 30.0;
/// Default upper bound for element width during resize.
pub const DEFAULT_MAX_WIDTH: f64 = 800.0;
/// Default upper bound for element height during resize.
pub const DEFAULT_MAX_HEIGHT: f64 = 600.0;

/// The closed set of element kinds the canvas knows how to host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Quiz,
    Code,
    List,
}

/// One multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Default for QuizQuestion {
    fn default() -> Self {
        Self {
            question: "Sample question?".to_string(),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct: 0,
            explanation: None,
        }
    }
}

/// Typed element content.
///
/// On the wire every variant collapses to a single `content` string next to a
/// `type` tag (the persisted layout of the editor); in memory each kind gets
/// its real shape so callers never re-parse a sibling-tagged string.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    /// Plain text, possibly multi-line.
    Text(String),
    /// Image URL or data URI.
    Image(String),
    /// A structured quiz question.
    Quiz(QuizQuestion),
    /// Source code, shown verbatim.
    Code(String),
    /// Bullet list items.
    List(Vec<String>),
}

impl ElementContent {
    /// The kind tag this content serializes under.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::Text(_) => ElementKind::Text,
            ElementContent::Image(_) => ElementKind::Image,
            ElementContent::Quiz(_) => ElementKind::Quiz,
            ElementContent::Code(_) => ElementKind::Code,
            ElementContent::List(_) => ElementKind::List,
        }
    }

    /// Flatten to the wire `content` string.
    ///
    /// Lists join with newlines, quiz questions serialize to a JSON string,
    /// everything else passes through verbatim.
    pub fn to_wire(&self) -> String {
        match self {
            ElementContent::Text(text) | ElementContent::Code(text) | ElementContent::Image(text) => {
                text.clone()
            }
            ElementContent::List(items) => items.join("\n"),
            ElementContent::Quiz(question) => {
                serde_json::to_string(question).unwrap_or_default()
            }
        }
    }

    /// Rebuild typed content from a wire `(type, content)` pair.
    ///
    /// A quiz string that does not parse as a question degrades to a text
    /// element instead of rejecting the containing document.
    pub fn from_wire(kind: ElementKind, content: &str) -> Self {
        match kind {
            ElementKind::Text => ElementContent::Text(content.to_string()),
            ElementKind::Code => ElementContent::Code(content.to_string()),
            ElementKind::Image => ElementContent::Image(content.to_string()),
            ElementKind::List => ElementContent::List(
                content
                    .split('\n')
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            ElementKind::Quiz => match serde_json::from_str::<QuizQuestion>(content) {
                Ok(question) => ElementContent::Quiz(question),
                Err(err) => {
                    log::warn!("quiz content did not parse ({err}), keeping it as text");
                    ElementContent::Text(content.to_string())
                }
            },
        }
    }
}

/// Optional per-element resize bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeConstraints {
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl SizeConstraints {
    /// Effective `(min, max)` width bounds, falling back to the defaults.
    pub fn width_bounds(&self) -> (f64, f64) {
        (
            self.min_width.unwrap_or(DEFAULT_MIN_WIDTH),
            self.max_width.unwrap_or(DEFAULT_MAX_WIDTH),
        )
    }

    /// Effective `(min, max)` height bounds, falling back to the defaults.
    pub fn height_bounds(&self) -> (f64, f64) {
        (
            self.min_height.unwrap_or(DEFAULT_MIN_HEIGHT),
            self.max_height.unwrap_or(DEFAULT_MAX_HEIGHT),
        )
    }
}

/// Named entry transition played for an element during slide playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Animation {
    #[default]
    None,
    FadeIn,
    SlideInLeft,
    SlideInRight,
    SlideInUp,
    SlideInDown,
    ZoomIn,
    ZoomOut,
    RotateIn,
    Bounce,
}

impl Animation {
    pub fn is_none(&self) -> bool {
        matches!(self, Animation::None)
    }
}

/// A single positioned content item on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireElement", into = "WireElement")]
pub struct Element {
    pub id: ElementId,
    pub content: ElementContent,
    /// Top-left position in slide-local pixel space.
    pub position: Point,
    /// `None` means auto: the render layer determines the extent.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub constraints: SizeConstraints,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub animation: Animation,
    pub animation_delay_ms: u64,
    /// `None` defaults to 1000 ms at playback.
    pub animation_duration_ms: Option<u64>,
    /// Opaque presentation-layer reveal hint.
    pub fragment_type: Option<String>,
    /// Lower indices fire earlier during staged reveal.
    pub fragment_index: Option<u32>,
}

impl Element {
    /// Create an element with a fresh id at the origin.
    pub fn new(content: ElementContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            position: Point::ZERO,
            width: None,
            height: None,
            constraints: SizeConstraints::default(),
            font_size: None,
            color: None,
            background_color: None,
            animation: Animation::None,
            animation_delay_ms: 0,
            animation_duration_ms: None,
            fragment_type: None,
            fragment_index: None,
        }
    }

    /// Create an element of the given kind with its type-specific defaults.
    pub fn with_defaults(kind: ElementKind, position: Point) -> Self {
        let (content, width, height, font_size, min_width, min_height) = match kind {
            ElementKind::Text => (
                ElementContent::Text("New text content".to_string()),
                None,
                None,
                16.0,
                DEFAULT_MIN_WIDTH,
                DEFAULT_MIN_HEIGHT,
            ),
            ElementKind::Image => (
                ElementContent::Image("/placeholder.svg?height=200&width=300".to_string()),
                Some(300.0),
                Some(200.0),
                18.0,
                100.0,
                50.0,
            ),
            ElementKind::Code => (
                ElementContent::Code(
                    "// Your code here\nfunction hello() {\n  console.log('Hello, World!');\n}"
                        .to_string(),
                ),
                Some(400.0),
                Some(200.0),
                14.0,
                200.0,
                100.0,
            ),
            ElementKind::List => (
                ElementContent::List(vec![
                    "First item".to_string(),
                    "Second item".to_string(),
                    "Third item".to_string(),
                ]),
                Some(250.0),
                Some(150.0),
                14.0,
                150.0,
                80.0,
            ),
            ElementKind::Quiz => (
                ElementContent::Quiz(QuizQuestion::default()),
                None,
                None,
                18.0,
                DEFAULT_MIN_WIDTH,
                DEFAULT_MIN_HEIGHT,
            ),
        };

        Self {
            position,
            width,
            height,
            font_size: Some(font_size),
            constraints: SizeConstraints {
                min_width: Some(min_width),
                min_height: Some(min_height),
                max_width: Some(DEFAULT_MAX_WIDTH),
                max_height: Some(DEFAULT_MAX_HEIGHT),
            },
            ..Self::new(content)
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }
}

/// Accept any string as an id: a well-formed uuid is kept, anything else
/// (legacy timestamp-style ids, model-invented ids) gets a fresh uuid.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Uuid::parse_str(&raw).unwrap_or_else(|_| Uuid::new_v4()))
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Accept a number, the legacy `"auto"` string, or nothing; anything
/// non-numeric means auto.
fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64))
}

/// Wire kind tag; `title`/`summary` are legacy spellings of text elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WireKind {
    Text,
    Image,
    Quiz,
    Code,
    List,
    Title,
    Summary,
}

impl From<ElementKind> for WireKind {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => WireKind::Text,
            ElementKind::Image => WireKind::Image,
            ElementKind::Quiz => WireKind::Quiz,
            ElementKind::Code => WireKind::Code,
            ElementKind::List => WireKind::List,
        }
    }
}

impl From<WireKind> for ElementKind {
    fn from(kind: WireKind) -> Self {
        match kind {
            WireKind::Text | WireKind::Title | WireKind::Summary => ElementKind::Text,
            WireKind::Image => ElementKind::Image,
            WireKind::Quiz => ElementKind::Quiz,
            WireKind::Code => ElementKind::Code,
            WireKind::List => ElementKind::List,
        }
    }
}

/// The persisted flat shape of an element: a `type` tag plus a `content`
/// string, geometry and styling as optional camelCase siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireElement {
    #[serde(default = "Uuid::new_v4", deserialize_with = "lenient_id")]
    id: ElementId,
    #[serde(rename = "type")]
    kind: WireKind,
    #[serde(default)]
    content: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(
        default,
        deserialize_with = "lenient_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    width: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Animation::is_none")]
    animation: Animation,
    #[serde(default, skip_serializing_if = "is_zero")]
    animation_delay: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    animation_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fragment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fragment_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_height: Option<f64>,
}

impl From<WireElement> for Element {
    fn from(wire: WireElement) -> Self {
        Self {
            id: wire.id,
            content: ElementContent::from_wire(wire.kind.into(), &wire.content),
            position: Point::new(wire.x, wire.y),
            width: wire.width,
            height: wire.height,
            constraints: SizeConstraints {
                min_width: wire.min_width,
                min_height: wire.min_height,
                max_width: wire.max_width,
                max_height: wire.max_height,
            },
            font_size: wire.font_size,
            color: wire.color,
            background_color: wire.background_color,
            animation: wire.animation,
            animation_delay_ms: wire.animation_delay,
            animation_duration_ms: wire.animation_duration,
            fragment_type: wire.fragment_type,
            fragment_index: wire.fragment_index,
        }
    }
}

impl From<Element> for WireElement {
    fn from(element: Element) -> Self {
        Self {
            id: element.id,
            kind: element.content.kind().into(),
            content: element.content.to_wire(),
            x: element.position.x,
            y: element.position.y,
            width: element.width,
            height: element.height,
            font_size: element.font_size,
            color: element.color,
            background_color: element.background_color,
            animation: element.animation,
            animation_delay: element.animation_delay_ms,
            animation_duration: element.animation_duration_ms,
            fragment_type: element.fragment_type,
            fragment_index: element.fragment_index,
            min_width: element.constraints.min_width,
            min_height: element.constraints.min_height,
            max_width: element.constraints.max_width,
            max_height: element.constraints.max_height,
        }
    }
}
