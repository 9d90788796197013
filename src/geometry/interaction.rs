//! Pointer interaction: a pure press/move/release state machine and the
//! viewer that applies its actions to the transform and the shape.

use super::shape::{ShapeEditor, ShapeMode};
use super::transform::ViewTransform;
use crate::config::ViewerConfig;
use glam::DVec2;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// Toolkit-independent input event, positions in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// `modifier` is the shape-creation modifier (e.g. Ctrl).
    Press {
        position: DVec2,
        button: PointerButton,
        modifier: bool,
    },
    DoublePress {
        position: DVec2,
        button: PointerButton,
        modifier: bool,
    },
    Move {
        position: DVec2,
    },
    Release {
        position: DVec2,
        button: PointerButton,
    },
    /// Scroll; positive `delta` zooms in around `position`.
    Wheel {
        position: DVec2,
        delta: f64,
    },
}

/// What a primary press landed on, computed by the caller before transitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressHits {
    pub point: Option<usize>,
    pub inside_shape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    PanningCanvas {
        last: DVec2,
    },
    DraggingPoint {
        index: usize,
    },
    DraggingShape {
        last: DVec2,
    },
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    AddPoint(DVec2),
    RemoveLastPoint,
    DragPoint { index: usize, position: DVec2 },
    /// Whole-shape move by a view-space delta.
    DragShape { delta: DVec2 },
    Pan { delta: DVec2 },
    ZoomIn { pivot: DVec2 },
    ZoomOut { pivot: DVec2 },
    FitToWindow,
}

impl InteractionState {
    /// Compute the next state and the action to perform.
    ///
    /// `hits` is only consulted for unmodified primary presses.
    pub fn transition(self, event: &PointerEvent, hits: PressHits) -> (Self, Action) {
        match *event {
            PointerEvent::Press {
                position,
                button: PointerButton::Primary,
                modifier: true,
            } => (InteractionState::Idle, Action::AddPoint(position)),
            PointerEvent::Press {
                position,
                button: PointerButton::Primary,
                modifier: false,
            } => {
                if let Some(index) = hits.point {
                    (InteractionState::DraggingPoint { index }, Action::None)
                } else if hits.inside_shape {
                    (InteractionState::DraggingShape { last: position }, Action::None)
                } else {
                    (InteractionState::PanningCanvas { last: position }, Action::None)
                }
            }
            PointerEvent::Press {
                button: PointerButton::Secondary,
                ..
            } => (self, Action::RemoveLastPoint),
            PointerEvent::DoublePress {
                position,
                button: PointerButton::Primary,
                modifier,
            } => {
                if modifier {
                    (self, Action::AddPoint(position))
                } else {
                    (self, Action::FitToWindow)
                }
            }
            PointerEvent::DoublePress {
                button: PointerButton::Secondary,
                ..
            } => (self, Action::RemoveLastPoint),
            PointerEvent::Move { position } => match self {
                InteractionState::Idle => (self, Action::None),
                InteractionState::PanningCanvas { last } => (
                    InteractionState::PanningCanvas { last: position },
                    Action::Pan {
                        delta: position - last,
                    },
                ),
                InteractionState::DraggingPoint { index } => {
                    (self, Action::DragPoint { index, position })
                }
                InteractionState::DraggingShape { last } => (
                    InteractionState::DraggingShape { last: position },
                    Action::DragShape {
                        delta: position - last,
                    },
                ),
            },
            PointerEvent::Release {
                button: PointerButton::Primary,
                ..
            } => (InteractionState::Idle, Action::None),
            PointerEvent::Wheel { position, delta } => {
                if delta > 0.0 {
                    (self, Action::ZoomIn { pivot: position })
                } else if delta < 0.0 {
                    (self, Action::ZoomOut { pivot: position })
                } else {
                    (self, Action::None)
                }
            }
            _ => (self, Action::None),
        }
    }
}

/// What changed after handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub points_changed: bool,
    pub view_changed: bool,
}

/// One image viewer: transform, editable shape and interaction state.
#[derive(Debug, Clone)]
pub struct AnnotationViewer {
    transform: ViewTransform,
    editor: ShapeEditor,
    state: InteractionState,
    config: ViewerConfig,
}

impl AnnotationViewer {
    pub fn new(viewport_size: DVec2, config: ViewerConfig) -> Self {
        Self {
            transform: ViewTransform::new(viewport_size).with_min_scale(config.min_scale),
            editor: ShapeEditor::default(),
            state: InteractionState::Idle,
            config,
        }
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn editor(&self) -> &ShapeEditor {
        &self.editor
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn points(&self) -> &[DVec2] {
        self.editor.points()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Show a new image; the view is refit and any gesture in progress ends.
    pub fn load_image(&mut self, image_size: DVec2) {
        self.transform.load_image(image_size);
        self.state = InteractionState::Idle;
    }

    pub fn unload_image(&mut self) {
        self.transform.unload_image();
        self.state = InteractionState::Idle;
    }

    pub fn resize_viewport(&mut self, viewport_size: DVec2) {
        self.transform.resize_viewport(viewport_size);
    }

    pub fn set_mode(&mut self, mode: ShapeMode) {
        self.editor.set_mode(mode);
        self.state = InteractionState::Idle;
    }

    pub fn set_points(&mut self, points: Vec<DVec2>) -> bool {
        self.editor.set_points(points)
    }

    pub fn clear_points(&mut self) {
        self.editor.clear();
    }

    pub fn zoom_in(&mut self, pivot: DVec2) {
        self.transform.zoom(self.config.zoom_in_factor, pivot);
    }

    pub fn zoom_out(&mut self, pivot: DVec2) {
        self.transform.zoom(self.config.zoom_out_factor, pivot);
    }

    pub fn fit_to_window(&mut self) {
        self.transform.fit_to_window();
    }

    pub fn reset_zoom(&mut self) {
        self.transform.reset_zoom();
    }

    fn press_hits(&self, event: &PointerEvent) -> PressHits {
        let PointerEvent::Press {
            position,
            button: PointerButton::Primary,
            modifier: false,
        } = *event
        else {
            return PressHits::default();
        };

        let point = self
            .editor
            .hit_test_point(&self.transform, position, self.config.hit_radius_pixels);
        let inside_shape = point.is_none() && self.editor.hit_test_shape(&self.transform, position);
        PressHits {
            point,
            inside_shape,
        }
    }

    /// Feed one pointer event through the state machine and apply its action.
    pub fn handle_event(&mut self, event: PointerEvent) -> EventOutcome {
        let hits = self.press_hits(&event);
        let (next, action) = self.state.transition(&event, hits);
        if next != self.state {
            trace!("interaction {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.apply(action)
    }

    fn apply(&mut self, action: Action) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        match action {
            Action::None => {}
            Action::AddPoint(position) => {
                outcome.points_changed = self.editor.add_point(&self.transform, position);
            }
            Action::RemoveLastPoint => {
                outcome.points_changed = self.editor.remove_last_point();
            }
            Action::DragPoint { index, position } => {
                outcome.points_changed = self.editor.drag_point(&self.transform, index, position);
            }
            Action::DragShape { delta } => {
                let scale = self.transform.scale();
                if scale > 0.0 {
                    outcome.points_changed = self.editor.drag_shape(&self.transform, delta / scale);
                }
            }
            Action::Pan { delta } => {
                let before = self.transform.pan_offset();
                self.transform.pan(delta);
                outcome.view_changed = self.transform.pan_offset() != before;
            }
            Action::ZoomIn { pivot } => {
                self.zoom_in(pivot);
                outcome.view_changed = self.transform.has_image();
            }
            Action::ZoomOut { pivot } => {
                self.zoom_out(pivot);
                outcome.view_changed = self.transform.has_image();
            }
            Action::FitToWindow => {
                self.transform.fit_to_window();
                outcome.view_changed = self.transform.has_image();
            }
        }
        outcome
    }
}
