//! Canvas interaction: selection, drag and resize sessions.

use crate::deck::Deck;
use crate::element::{ElementId, SizeConstraints};
use crate::grid::GridPolicy;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum visible footprint kept inside the canvas while dragging, even when
/// the element's own box is larger.
pub const MIN_VISIBLE_WIDTH: f64 = 100.0;
pub const MIN_VISIBLE_HEIGHT: f64 = 50.0;

/// Start size assumed when a resize begins on an auto-sized element.
pub const AUTO_SIZE_FALLBACK: Size = Size::new(200.0, 100.0);

/// The eight resize handles attached to the selected element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Nw,
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
    ];

    /// Sign applied to the pointer delta on each axis; zero leaves the axis
    /// at its session start value.
    pub fn axis_signs(self) -> (f64, f64) {
        match self {
            ResizeHandle::Se => (1.0, 1.0),
            ResizeHandle::Sw => (-1.0, 1.0),
            ResizeHandle::Ne => (1.0, -1.0),
            ResizeHandle::Nw => (-1.0, -1.0),
            ResizeHandle::N => (0.0, -1.0),
            ResizeHandle::S => (0.0, 1.0),
            ResizeHandle::E => (1.0, 0.0),
            ResizeHandle::W => (-1.0, 0.0),
        }
    }

    /// CSS cursor name for the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::Nw => "nw-resize",
            ResizeHandle::N => "n-resize",
            ResizeHandle::Ne => "ne-resize",
            ResizeHandle::E => "e-resize",
            ResizeHandle::Se => "se-resize",
            ResizeHandle::S => "s-resize",
            ResizeHandle::Sw => "sw-resize",
            ResizeHandle::W => "w-resize",
        }
    }
}

/// The ephemeral state tracked between a pointer-down and its matching
/// pointer-up. At most one session exists at a time; starting a new one
/// discards the old.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveSession {
    Dragging {
        element: ElementId,
        pointer_start: Point,
        element_start: Point,
    },
    Resizing {
        element: ElementId,
        handle: ResizeHandle,
        pointer_start: Point,
        start_size: Size,
    },
}

/// Which element is selected and whether it is in inline-edit mode.
///
/// Single-item focus per canvas: selecting an element clears editing of any
/// other element, and preview mode suppresses manipulation entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selected: Option<ElementId>,
    editing: Option<ElementId>,
    pub preview_mode: bool,
}

impl SelectionState {
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn editing(&self) -> Option<ElementId> {
        self.editing
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    pub fn select(&mut self, id: ElementId) {
        if self.selected != Some(id) {
            self.editing = None;
        }
        self.selected = Some(id);
    }

    /// Enter inline-edit mode for an element (double-click); also selects it.
    pub fn begin_editing(&mut self, id: ElementId) {
        self.selected = Some(id);
        self.editing = Some(id);
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    /// Clear selection and editing (blank-canvas click).
    pub fn clear(&mut self) {
        self.selected = None;
        self.editing = None;
    }
}

/// Drives drag and resize gestures against a deck.
///
/// The three pointer events are the only session transitions; geometry is
/// recomputed from the session start on every move (last write wins, no
/// accumulated drift) and written to the deck immediately.
#[derive(Debug, Clone)]
pub struct CanvasController {
    canvas_size: Size,
    session: Option<ActiveSession>,
    pub selection: SelectionState,
}

impl CanvasController {
    pub fn new(canvas_size: Size) -> Self {
        Self {
            canvas_size,
            session: None,
            selection: SelectionState::default(),
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.session, Some(ActiveSession::Dragging { .. }))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.session, Some(ActiveSession::Resizing { .. }))
    }

    /// Pointer-down on an element body: select it and open a drag session,
    /// superseding any prior session. Ignored in preview mode or when the
    /// element is not on the current slide.
    pub fn pointer_down_on_element(&mut self, deck: &Deck, id: ElementId, pointer: Point) -> bool {
        if self.selection.preview_mode {
            return false;
        }
        let Some(element) = deck.find_element(id) else {
            return false;
        };
        self.selection.select(id);
        self.session = Some(ActiveSession::Dragging {
            element: id,
            pointer_start: pointer,
            element_start: element.position,
        });
        log::trace!("drag session opened for {id}");
        true
    }

    /// Pointer-down on a resize handle: open a resize session. An auto-sized
    /// axis starts from the fixed 200x100 fallback for delta purposes.
    pub fn pointer_down_on_handle(
        &mut self,
        deck: &Deck,
        id: ElementId,
        handle: ResizeHandle,
        pointer: Point,
    ) -> bool {
        if self.selection.preview_mode {
            return false;
        }
        let Some(element) = deck.find_element(id) else {
            return false;
        };
        self.selection.select(id);
        self.session = Some(ActiveSession::Resizing {
            element: id,
            handle,
            pointer_start: pointer,
            start_size: Size::new(
                element.width.unwrap_or(AUTO_SIZE_FALLBACK.width),
                element.height.unwrap_or(AUTO_SIZE_FALLBACK.height),
            ),
        });
        log::trace!("resize session opened for {id} ({handle:?})");
        true
    }

    /// Pointer-move: recompute geometry from the session start and write it
    /// to the deck. Returns `false` when no session is active or the element
    /// vanished mid-gesture.
    pub fn pointer_move(&mut self, deck: &mut Deck, policy: &GridPolicy, pointer: Point) -> bool {
        match &self.session {
            Some(ActiveSession::Dragging {
                element,
                pointer_start,
                element_start,
            }) => {
                let delta = pointer - *pointer_start;
                let position = drag_position(policy, self.canvas_size, *element_start, delta);
                deck.update_element(*element, |el| el.position = position)
            }
            Some(ActiveSession::Resizing {
                element,
                handle,
                pointer_start,
                start_size,
            }) => {
                let Some(constraints) = deck.find_element(*element).map(|el| el.constraints) else {
                    return false;
                };
                let delta = pointer - *pointer_start;
                let size = resize_dimensions(policy, &constraints, *handle, *start_size, delta);
                deck.update_element(*element, |el| {
                    el.width = Some(size.width);
                    el.height = Some(size.height);
                })
            }
            None => false,
        }
    }

    /// Pointer-up anywhere in the document: the session always terminates,
    /// even when the pointer left the canvas.
    pub fn pointer_up(&mut self) {
        self.session = None;
    }

    /// Pointer-down on blank canvas: clear selection and editing.
    pub fn pointer_down_on_canvas(&mut self) {
        self.selection.clear();
    }
}

/// Drag geometry: snap each axis of the proposed position, then clamp so the
/// minimum visible footprint stays inside the canvas.
pub fn drag_position(policy: &GridPolicy, canvas: Size, element_start: Point, delta: Vec2) -> Point {
    let snapped = policy.snap_point(element_start + delta);
    Point::new(
        snapped.x.max(0.0).min((canvas.width - MIN_VISIBLE_WIDTH).max(0.0)),
        snapped.y.max(0.0).min((canvas.height - MIN_VISIBLE_HEIGHT).max(0.0)),
    )
}

/// Resize geometry: apply the handle's axis signs to the pointer delta, snap
/// both dimensions, then clamp into the element's effective size bounds.
pub fn resize_dimensions(
    policy: &GridPolicy,
    constraints: &SizeConstraints,
    handle: ResizeHandle,
    start: Size,
    delta: Vec2,
) -> Size {
    let (sx, sy) = handle.axis_signs();
    let width = policy.snap(start.width + sx * delta.x);
    let height = policy.snap(start.height + sy * delta.y);

    let (min_w, max_w) = constraints.width_bounds();
    let (min_h, max_h) = constraints.height_bounds();
    Size::new(
        width.max(min_w).min(max_w),
        height.max(min_h).min(max_h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementContent, ElementKind};
    use crate::placement::SplitMix64;
    use crate::slide::Slide;

    const CANVAS: Size = Size::new(960.0, 540.0);

    fn no_snap() -> GridPolicy {
        GridPolicy {
            snap_to_grid: false,
            ..GridPolicy::default()
        }
    }

    fn deck_with_element(element: Element) -> (Deck, ElementId) {
        let id = element.id;
        let mut slide = Slide::new();
        slide.elements.push(element);
        (Deck::from_slides(vec![slide]).expect("deck"), id)
    }

    #[test]
    fn test_drag_clamps_to_lower_bound() {
        // Element at (10, 10), pointer delta (-100, -100): clamps to (0, 0).
        let mut element = Element::new(ElementContent::Text("t".to_string()));
        element.position = Point::new(10.0, 10.0);
        let (mut deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        assert!(controller.pointer_down_on_element(&deck, id, Point::new(200.0, 200.0)));
        assert!(controller.pointer_move(&mut deck, &no_snap(), Point::new(100.0, 100.0)));

        let el = deck.find_element(id).expect("element");
        assert_eq!(el.position, Point::ZERO);
    }

    #[test]
    fn test_drag_clamps_to_visible_footprint() {
        let mut element = Element::new(ElementContent::Text("t".to_string()));
        element.position = Point::new(10.0, 10.0);
        let (mut deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.pointer_down_on_element(&deck, id, Point::ZERO);
        controller.pointer_move(&mut deck, &no_snap(), Point::new(5000.0, 5000.0));

        let el = deck.find_element(id).expect("element");
        assert_eq!(el.position.x, CANVAS.width - MIN_VISIBLE_WIDTH);
        assert_eq!(el.position.y, CANVAS.height - MIN_VISIBLE_HEIGHT);
    }

    #[test]
    fn test_drag_snaps_before_clamping() {
        let mut element = Element::new(ElementContent::Text("t".to_string()));
        element.position = Point::new(40.0, 40.0);
        let (mut deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.pointer_down_on_element(&deck, id, Point::ZERO);
        controller.pointer_move(&mut deck, &GridPolicy::default(), Point::new(13.0, 29.0));

        let el = deck.find_element(id).expect("element");
        assert_eq!(el.position, Point::new(60.0, 60.0));
        assert_eq!(el.position.x % 20.0, 0.0);
        assert_eq!(el.position.y % 20.0, 0.0);
    }

    #[test]
    fn test_resize_east_clamps_to_max_width() {
        // Width 100 with max 200: an east-handle delta of +500 lands on 200,
        // height untouched.
        let mut element = Element::new(ElementContent::Text("t".to_string()));
        element.position = Point::new(50.0, 50.0);
        element.width = Some(100.0);
        element.height = Some(80.0);
        element.constraints.min_width = Some(50.0);
        element.constraints.max_width = Some(200.0);
        let (mut deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        assert!(controller.pointer_down_on_handle(&deck, id, ResizeHandle::E, Point::ZERO));
        assert!(controller.pointer_move(&mut deck, &no_snap(), Point::new(500.0, 0.0)));

        let el = deck.find_element(id).expect("element");
        assert_eq!(el.width, Some(200.0));
        assert_eq!(el.height, Some(80.0));
    }

    #[test]
    fn test_resize_respects_min_bounds() {
        let mut element = Element::new(ElementContent::Text("t".to_string()));
        element.width = Some(300.0);
        element.height = Some(200.0);
        let (mut deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.pointer_down_on_handle(&deck, id, ResizeHandle::Se, Point::ZERO);
        controller.pointer_move(&mut deck, &no_snap(), Point::new(-1000.0, -1000.0));

        let el = deck.find_element(id).expect("element");
        // Defaults apply since the element carries no explicit constraints.
        assert_eq!(el.width, Some(50.0));
        assert_eq!(el.height, Some(30.0));
    }

    #[test]
    fn test_resize_handle_signs() {
        let policy = no_snap();
        let constraints = SizeConstraints::default();
        let start = Size::new(200.0, 100.0);
        let delta = Vec2::new(10.0, 20.0);

        let nw = resize_dimensions(&policy, &constraints, ResizeHandle::Nw, start, delta);
        assert_eq!((nw.width, nw.height), (190.0, 80.0));

        let n = resize_dimensions(&policy, &constraints, ResizeHandle::N, start, delta);
        assert_eq!((n.width, n.height), (200.0, 80.0));

        let w = resize_dimensions(&policy, &constraints, ResizeHandle::W, start, delta);
        assert_eq!((w.width, w.height), (190.0, 100.0));
    }

    #[test]
    fn test_resize_snaps_to_grid() {
        let mut element = Element::new(ElementContent::Text("t".to_string()));
        element.width = Some(100.0);
        element.height = Some(60.0);
        let (mut deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.pointer_down_on_handle(&deck, id, ResizeHandle::Se, Point::ZERO);
        controller.pointer_move(&mut deck, &GridPolicy::default(), Point::new(13.0, 27.0));

        let el = deck.find_element(id).expect("element");
        assert_eq!(el.width.map(|w| w % 20.0), Some(0.0));
        assert_eq!(el.height.map(|h| h % 20.0), Some(0.0));
    }

    #[test]
    fn test_auto_size_falls_back_for_resize() {
        let element = Element::new(ElementContent::Text("t".to_string()));
        let (mut deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.pointer_down_on_handle(&deck, id, ResizeHandle::Se, Point::ZERO);
        controller.pointer_move(&mut deck, &no_snap(), Point::new(50.0, 50.0));

        let el = deck.find_element(id).expect("element");
        assert_eq!(el.width, Some(250.0));
        assert_eq!(el.height, Some(150.0));
    }

    #[test]
    fn test_sessions_are_mutually_exclusive() {
        let element = Element::new(ElementContent::Text("t".to_string()));
        let (deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.pointer_down_on_element(&deck, id, Point::ZERO);
        assert!(controller.is_dragging());

        // A handle press supersedes the drag session.
        controller.pointer_down_on_handle(&deck, id, ResizeHandle::Se, Point::ZERO);
        assert!(controller.is_resizing());
        assert!(!controller.is_dragging());

        controller.pointer_up();
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_preview_mode_blocks_sessions() {
        let element = Element::new(ElementContent::Text("t".to_string()));
        let (deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.selection.preview_mode = true;
        assert!(!controller.pointer_down_on_element(&deck, id, Point::ZERO));
        assert!(!controller.pointer_down_on_handle(&deck, id, ResizeHandle::E, Point::ZERO));
        assert!(controller.session().is_none());
    }

    #[test]
    fn test_move_without_session_is_noop() {
        let mut deck = Deck::new();
        let mut rng = SplitMix64::new(3);
        deck.add_element(ElementKind::Text, &mut rng);

        let mut controller = CanvasController::new(CANVAS);
        assert!(!controller.pointer_move(&mut deck, &no_snap(), Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_blank_click_clears_selection() {
        let element = Element::new(ElementContent::Text("t".to_string()));
        let (deck, id) = deck_with_element(element);

        let mut controller = CanvasController::new(CANVAS);
        controller.pointer_down_on_element(&deck, id, Point::ZERO);
        controller.pointer_up();
        assert!(controller.selection.is_selected(id));

        controller.pointer_down_on_canvas();
        assert_eq!(controller.selection.selected(), None);
        assert_eq!(controller.selection.editing(), None);
    }

    #[test]
    fn test_selecting_other_element_stops_editing() {
        let mut selection = SelectionState::default();
        let a = ElementId::new_v4();
        let b = ElementId::new_v4();

        selection.begin_editing(a);
        assert_eq!(selection.editing(), Some(a));

        selection.select(b);
        assert_eq!(selection.selected(), Some(b));
        assert_eq!(selection.editing(), None);
    }
}
