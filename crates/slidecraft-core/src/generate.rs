//! Tolerant parsing of AI-generated slide and quiz records.
//!
//! Hosted models are asked for strict JSON and frequently return something
//! close to it. The rule here is the one the surrounding flow expects:
//! recover field by field with documented defaults, never reject a whole
//! batch over one bad record, and fall back to a single raw-text slide when
//! nothing parses at all.

use crate::element::{
    Animation, Element, ElementContent, ElementKind, QuizQuestion, SizeConstraints,
};
use crate::slide::{BackgroundSize, Slide, Transition, TransitionSpeed};
use kurbo::Point;
use serde_json::Value;

/// Outcome of parsing a provider's slide-generation response.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedSlides {
    /// The response carried a usable slide batch.
    Parsed(Vec<Slide>),
    /// Nothing parseable: a single fallback slide carries the raw text.
    Fallback(Slide),
}

impl GeneratedSlides {
    /// Parse raw provider text. Accepts the wrapped document layout, a bare
    /// slide array, or `{"slides": [...]}`; anything else produces the
    /// fallback slide titled after `topic` with the text as one text element.
    pub fn from_text(topic: &str, text: &str) -> Self {
        let slides = serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|value| extract_slides(&value));

        match slides {
            Some(records) if !records.is_empty() => {
                GeneratedSlides::Parsed(records.iter().map(slide_from_value).collect())
            }
            _ => {
                log::warn!("slide generation response did not parse, using fallback slide");
                GeneratedSlides::Fallback(fallback_slide(topic, text))
            }
        }
    }

    /// The slides regardless of which path produced them.
    pub fn into_slides(self) -> Vec<Slide> {
        match self {
            GeneratedSlides::Parsed(slides) => slides,
            GeneratedSlides::Fallback(slide) => vec![slide],
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GeneratedSlides::Fallback(_))
    }
}

fn extract_slides(value: &Value) -> Option<Vec<Value>> {
    if let Some(array) = value.as_array() {
        return Some(array.clone());
    }
    value.get("slides").and_then(Value::as_array).cloned()
}

fn fallback_slide(topic: &str, text: &str) -> Slide {
    let mut slide = Slide::with_title(topic);
    slide.summary = "AI-generated content".to_string();
    slide.transcript = Some(format!("Generated content about {topic}"));
    let mut element = Element::new(ElementContent::Text(text.to_string()));
    element.position = Point::new(50.0, 100.0);
    slide.elements.push(element);
    slide
}

/// Build a slide from one generated record, defaulting every missing field.
fn slide_from_value(value: &Value) -> Slide {
    let mut slide = Slide::with_title(str_field(value, "title").unwrap_or("Untitled"));
    slide.summary = str_field(value, "summary").unwrap_or_default().to_string();
    slide.audio = str_field(value, "audio").map(str::to_string);
    slide.transcript = str_field(value, "transcript").map(str::to_string);
    slide.background_color = str_field(value, "backgroundColor").map(str::to_string);
    slide.background_image = str_field(value, "backgroundImage").map(str::to_string);
    slide.background_size = parse_enum::<BackgroundSize>(value, "backgroundSize");
    slide.transition = parse_enum::<Transition>(value, "transition");
    slide.transition_speed = parse_enum::<TransitionSpeed>(value, "transitionSpeed");

    if let Some(elements) = value.get("elements").and_then(Value::as_array) {
        slide.elements = elements.iter().filter_map(element_from_value).collect();
    }
    slide
}

/// Build an element from one generated record.
///
/// Unknown kinds degrade to text, missing geometry defaults to the origin,
/// and records that are not objects at all are dropped (the batch survives).
fn element_from_value(value: &Value) -> Option<Element> {
    let object = value.as_object()?;

    let kind = match object.get("type").and_then(Value::as_str) {
        Some("image") => ElementKind::Image,
        Some("quiz") => ElementKind::Quiz,
        Some("code") => ElementKind::Code,
        Some("list") => ElementKind::List,
        // "text", the legacy "title"/"summary", and anything the model
        // invented all land on text.
        _ => ElementKind::Text,
    };
    let content = object
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default();

    // Position is either flat `x`/`y` or a nested `position` object (the
    // shape the original fallback path emitted).
    let position = object.get("position").unwrap_or(value);
    let x = num_field(position, "x").unwrap_or(0.0);
    let y = num_field(position, "y").unwrap_or(0.0);

    let mut element = Element::new(ElementContent::from_wire(kind, content));
    element.position = Point::new(x, y);
    element.width = num_field(value, "width");
    element.height = num_field(value, "height");
    element.font_size = num_field(value, "fontSize");
    element.color = str_field(value, "color").map(str::to_string);
    element.background_color = str_field(value, "backgroundColor").map(str::to_string);
    element.animation = parse_enum::<Animation>(value, "animation").unwrap_or_default();
    element.animation_delay_ms = num_field(value, "animationDelay").unwrap_or(0.0).max(0.0) as u64;
    element.animation_duration_ms =
        num_field(value, "animationDuration").map(|ms| ms.max(0.0) as u64);
    element.fragment_type = str_field(value, "fragmentType").map(str::to_string);
    element.fragment_index = num_field(value, "fragmentIndex").map(|idx| idx.max(0.0) as u32);
    element.constraints = SizeConstraints {
        min_width: num_field(value, "minWidth"),
        min_height: num_field(value, "minHeight"),
        max_width: num_field(value, "maxWidth"),
        max_height: num_field(value, "maxHeight"),
    };
    Some(element)
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn num_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

fn parse_enum<T: serde::de::DeserializeOwned>(value: &Value, key: &str) -> Option<T> {
    value
        .get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
}

/// Outcome of parsing a provider's quiz-generation response.
///
/// Always holds at least one question: when nothing parses, the documented
/// fallback question stands in and `fallback` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizBatch {
    pub questions: Vec<QuizQuestion>,
    pub fallback: bool,
}

impl QuizBatch {
    /// Parse raw provider text: either a single question object or a
    /// `{"questions": [...]}` batch. Every well-formed question in a batch is
    /// kept; callers that only want one take [`first`](Self::first).
    pub fn from_text(text: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(text).ok();
        let questions: Vec<QuizQuestion> = match &parsed {
            Some(value) if value.get("question").is_some() => {
                question_from_value(value).into_iter().collect()
            }
            Some(value) => value
                .get("questions")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(question_from_value).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        };

        if questions.is_empty() {
            log::warn!("quiz generation response did not parse, using fallback question");
            return Self {
                questions: vec![fallback_question()],
                fallback: true,
            };
        }
        Self {
            questions,
            fallback: false,
        }
    }

    /// The question a caller inserts as the quiz element.
    pub fn first(&self) -> &QuizQuestion {
        &self.questions[0]
    }

    /// Wrap the first question as a quiz element.
    pub fn into_element(self) -> Element {
        let mut questions = self.questions;
        Element::new(ElementContent::Quiz(questions.swap_remove(0)))
    }
}

fn question_from_value(value: &Value) -> Option<QuizQuestion> {
    let question = value.get("question").and_then(Value::as_str)?.to_string();
    let options: Vec<String> = value
        .get("options")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if options.is_empty() {
        return None;
    }
    let correct = value
        .get("correct")
        .and_then(Value::as_u64)
        .map(|idx| idx as usize)
        .filter(|idx| *idx < options.len())
        .unwrap_or(0);
    Some(QuizQuestion {
        question,
        options,
        correct,
        explanation: value
            .get("explanation")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn fallback_question() -> QuizQuestion {
    QuizQuestion {
        question: "What is the main topic of this content?".to_string(),
        options: vec![
            "Option A".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
            "Option D".to_string(),
        ],
        correct: 0,
        explanation: Some("Based on the provided content.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_wrapped_slide_batch() {
        let text = r##"{
            "slides": [
                {
                    "id": "slide-1",
                    "title": "Solar Energy",
                    "summary": "Why it matters",
                    "backgroundColor": "#123456",
                    "transition": "convex",
                    "elements": [
                        {"id": "el-1", "type": "text", "content": "Renewable.", "x": 60, "y": 80, "fontSize": 24},
                        {"id": "el-2", "type": "list", "content": "Clean\nCheap", "x": 50, "y": 200}
                    ]
                }
            ],
            "exportedAt": "2025-08-14T11:20:47.679Z",
            "format": "slide-editor-v2",
            "version": "2.0.0"
        }"##;

        let generated = GeneratedSlides::from_text("Solar Energy", text);
        assert!(!generated.is_fallback());
        let slides = generated.into_slides();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Solar Energy");
        assert_eq!(slides[0].transition, Some(Transition::Convex));
        assert_eq!(slides[0].elements.len(), 2);
        assert_eq!(slides[0].elements[0].position, Point::new(60.0, 80.0));
        assert_eq!(
            slides[0].elements[1].content,
            ElementContent::List(vec!["Clean".to_string(), "Cheap".to_string()])
        );
    }

    #[test]
    fn test_bad_record_defaults_instead_of_rejecting() {
        let text = r#"{"slides": [
            {"elements": [
                {"type": "text", "content": "ok"},
                "not an object",
                {"type": "hologram", "content": "unknown kind", "x": "NaN"}
            ]}
        ]}"#;

        let slides = GeneratedSlides::from_text("topic", text).into_slides();
        assert_eq!(slides[0].title, "Untitled");
        // The string record is dropped, the unknown kind degrades to text.
        assert_eq!(slides[0].elements.len(), 2);
        assert_eq!(slides[0].elements[1].kind(), ElementKind::Text);
        assert_eq!(slides[0].elements[1].position, Point::ZERO);
    }

    #[test]
    fn test_nested_position_object_is_accepted() {
        let text = r#"{"slides": [{"elements": [
            {"type": "text", "content": "x", "position": {"x": 50, "y": 100}}
        ]}]}"#;
        let slides = GeneratedSlides::from_text("t", text).into_slides();
        assert_eq!(slides[0].elements[0].position, Point::new(50.0, 100.0));
    }

    #[test]
    fn test_unparseable_text_becomes_fallback_slide() {
        let raw = "Here are your slides!\n1. Intro\n2. Detail";
        let generated = GeneratedSlides::from_text("Rust", raw);
        assert!(generated.is_fallback());

        let slides = generated.into_slides();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Rust");
        assert_eq!(slides[0].summary, "AI-generated content");
        assert_eq!(
            slides[0].elements[0].content,
            ElementContent::Text(raw.to_string())
        );
        assert_eq!(slides[0].elements[0].position, Point::new(50.0, 100.0));
    }

    #[test]
    fn test_empty_batch_is_fallback() {
        let generated = GeneratedSlides::from_text("t", r#"{"slides": []}"#);
        assert!(generated.is_fallback());
    }

    #[test]
    fn test_single_question_quiz() {
        let text = r#"{"question": "2+2?", "options": ["3", "4"], "correct": 1, "explanation": "Basic sum"}"#;
        let batch = QuizBatch::from_text(text);
        assert!(!batch.fallback);
        assert_eq!(batch.questions.len(), 1);
        assert_eq!(batch.first().correct, 1);
        assert_eq!(batch.first().explanation.as_deref(), Some("Basic sum"));
    }

    #[test]
    fn test_question_batch_keeps_all_questions() {
        let text = r#"{"questions": [
            {"question": "Q1?", "options": ["a", "b"], "correct": 0},
            {"question": "Q2?", "options": ["c", "d"], "correct": 1},
            {"question": "broken", "options": []}
        ]}"#;
        let batch = QuizBatch::from_text(text);
        assert_eq!(batch.questions.len(), 2);
        assert_eq!(batch.first().question, "Q1?");
        assert_eq!(batch.questions[1].question, "Q2?");
    }

    #[test]
    fn test_out_of_range_correct_index_resets() {
        let text = r#"{"question": "Q?", "options": ["a", "b"], "correct": 9}"#;
        let batch = QuizBatch::from_text(text);
        assert_eq!(batch.first().correct, 0);
    }

    #[test]
    fn test_quiz_fallback_on_garbage() {
        let batch = QuizBatch::from_text("Sure! Here's a quiz for you:");
        assert!(batch.fallback);
        assert_eq!(batch.first().options.len(), 4);
        assert_eq!(batch.first().correct, 0);
    }

    #[test]
    fn test_quiz_batch_into_element() {
        let text = r#"{"question": "Q?", "options": ["a", "b"], "correct": 1}"#;
        let element = QuizBatch::from_text(text).into_element();
        assert_eq!(element.kind(), ElementKind::Quiz);
    }
}
