use egui::{Event, PointerButton, Pos2, Rect, TouchId, TouchPhase};

/// Pointer input reduced to what the stroke store understands.
/// Positions are relative to the top-left corner of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Begin(Pos2),
    Continue(Pos2),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Mouse,
    Touch(TouchId),
}

/// Turns raw mouse and touch events into [`Gesture`]s.
///
/// Only one gesture is tracked at a time, so a second finger is ignored.
/// Backends emulate pointer events for the first touch; those are swallowed
/// while a touch gesture is active.
#[derive(Debug, Default)]
pub struct GestureTracker {
    active: Option<Source>,
}

impl GestureTracker {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn process(&mut self, events: &[Event], surface: Rect) -> Vec<Gesture> {
        let local = |pos: Pos2| (pos - surface.min).to_pos2();
        let mut gestures = Vec::new();

        for event in events {
            match *event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    if self.active.is_none() && surface.contains(pos) {
                        self.active = Some(Source::Mouse);
                        gestures.push(Gesture::Begin(local(pos)));
                    }
                }
                Event::PointerButton {
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                }
                | Event::PointerGone => {
                    if self.active == Some(Source::Mouse) {
                        self.active = None;
                        gestures.push(Gesture::End);
                    }
                }
                Event::PointerMoved(pos) => {
                    if self.active == Some(Source::Mouse) {
                        if surface.contains(pos) {
                            gestures.push(Gesture::Continue(local(pos)));
                        } else {
                            // Leaving the surface ends the stroke
                            self.active = None;
                            gestures.push(Gesture::End);
                        }
                    }
                }
                Event::Touch { id, phase, pos, .. } => match (phase, self.active) {
                    (TouchPhase::Start, None) => {
                        if surface.contains(pos) {
                            self.active = Some(Source::Touch(id));
                            gestures.push(Gesture::Begin(local(pos)));
                        }
                    }
                    (TouchPhase::Start, Some(Source::Mouse)) => {
                        // Emulated press of this very touch arrived first
                        self.active = Some(Source::Touch(id));
                    }
                    (TouchPhase::Move, Some(Source::Touch(active))) if active == id => {
                        gestures.push(Gesture::Continue(local(pos)));
                    }
                    (TouchPhase::End | TouchPhase::Cancel, Some(Source::Touch(active)))
                        if active == id =>
                    {
                        self.active = None;
                        gestures.push(Gesture::End);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        gestures
    }
}
