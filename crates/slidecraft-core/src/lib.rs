//! Slidecraft Core Library
//!
//! Platform-agnostic data structures and logic for the slidecraft slide
//! editor: the deck/element store, canvas interaction (drag, resize, grid
//! snapping), playback sequencing, and the persisted document layout. The
//! render layer is an external collaborator that reads geometry and play
//! state from here.

pub mod deck;
pub mod document;
pub mod element;
pub mod generate;
pub mod grid;
pub mod interaction;
pub mod placement;
pub mod sequencer;
pub mod slide;
pub mod storage;

pub use deck::Deck;
pub use document::{DeckDocument, DocumentError, ExportOptions};
pub use element::{
    Animation, Element, ElementContent, ElementId, ElementKind, QuizQuestion, SizeConstraints,
};
pub use generate::{GeneratedSlides, QuizBatch};
pub use grid::GridPolicy;
pub use interaction::{ActiveSession, CanvasController, ResizeHandle, SelectionState};
pub use placement::{PlacementRng, SplitMix64};
pub use sequencer::{PlayState, ScheduledAnimation, Sequencer, SequencerEvent};
pub use slide::{BackgroundLayer, BackgroundSize, Slide, SlideId, Transition, TransitionSpeed};
