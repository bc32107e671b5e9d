//! Deck: the slide/element store.

use crate::element::{Element, ElementId, ElementKind};
use crate::placement::{self, PlacementRng};
use crate::slide::{Slide, SlideId};

/// The ordered slide collection plus the currently addressed slide.
///
/// A deck always holds at least one slide, and `current` is always a valid
/// index. Every mutation is applied synchronously; there is no batching
/// window a caller has to account for.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    slides: Vec<Slide>,
    current: usize,
}

impl Deck {
    /// Create a deck with a single empty slide.
    pub fn new() -> Self {
        Self {
            slides: vec![Slide::new()],
            current: 0,
        }
    }

    /// Create a deck from existing slides, selecting the first.
    ///
    /// Returns `None` for an empty list; the editor requires at least one
    /// slide at all times.
    pub fn from_slides(slides: Vec<Slide>) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        Some(Self { slides, current: 0 })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Address a different slide. No-op when out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn current_slide_mut(&mut self) -> &mut Slide {
        &mut self.slides[self.current]
    }

    /// Insert a new empty slide immediately after the current one and select it.
    pub fn add_slide(&mut self) -> SlideId {
        let slide = Slide::new();
        let id = slide.id;
        self.slides.insert(self.current + 1, slide);
        self.current += 1;
        log::debug!("added slide {id} at index {}", self.current);
        id
    }

    /// Insert a batch after the current slide, in order, and select the first
    /// inserted slide. No-op for an empty batch.
    pub fn add_multiple_slides(&mut self, slides: Vec<Slide>) {
        if slides.is_empty() {
            return;
        }
        let count = slides.len();
        let at = self.current + 1;
        self.slides.splice(at..at, slides);
        self.current = at;
        log::debug!("inserted {count} slides at index {at}");
    }

    /// Remove the slide at `index`.
    ///
    /// Refuses (returns `false`) when only one slide remains or the index is
    /// out of range. When the deleted slide was at or before the current one,
    /// the current index decrements, floored at zero.
    pub fn delete_slide(&mut self, index: usize) -> bool {
        if self.slides.len() == 1 || index >= self.slides.len() {
            return false;
        }
        self.slides.remove(index);
        if index <= self.current && self.current > 0 {
            self.current -= 1;
        }
        // Deleting the last slide while it was current.
        self.current = self.current.min(self.slides.len() - 1);
        true
    }

    /// Mutate the current slide in place.
    pub fn update_slide(&mut self, update: impl FnOnce(&mut Slide)) {
        update(&mut self.slides[self.current]);
    }

    /// Append a new element to the current slide with type-specific defaults
    /// and a randomized position within the visible canvas area.
    pub fn add_element(&mut self, kind: ElementKind, rng: &mut dyn PlacementRng) -> ElementId {
        let element = Element::with_defaults(kind, placement::initial_position(rng));
        let id = element.id;
        self.slides[self.current].elements.push(element);
        log::debug!("added {kind:?} element {id} to slide {}", self.current);
        id
    }

    /// Mutate the matching element of the current slide in place.
    /// Returns `false` (no-op) when the element is not found.
    pub fn update_element(&mut self, id: ElementId, update: impl FnOnce(&mut Element)) -> bool {
        match self.slides[self.current].element_mut(id) {
            Some(element) => {
                update(element);
                true
            }
            None => false,
        }
    }

    /// Remove the matching element from the current slide.
    /// Returns `false` (no-op) when the element is not found.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let elements = &mut self.slides[self.current].elements;
        let before = elements.len();
        elements.retain(|el| el.id != id);
        elements.len() != before
    }

    /// Look up an element on the current slide.
    pub fn find_element(&self, id: ElementId) -> Option<&Element> {
        self.current_slide().element(id)
    }

    /// Move the slide at `from` to `to`, shifting the slides in between.
    ///
    /// The current index follows the moved slide if it was the one moved,
    /// and otherwise keeps addressing the same slide it did before.
    pub fn reorder_slides(&mut self, from: usize, to: usize) -> bool {
        if from >= self.slides.len() || to >= self.slides.len() || from == to {
            return false;
        }
        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);

        if self.current == from {
            self.current = to;
        } else if self.current > from && self.current <= to {
            self.current -= 1;
        } else if self.current < from && self.current >= to {
            self.current += 1;
        }
        true
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
