use egui::Pos2;
use indexmap::IndexMap;

use crate::model::TargetRelation;
use crate::render::animator::Animator;
use crate::render::canvas::{paint_race, Canvas};
use crate::render::layout::{compute_race_layout, RaceLayout, RacerId, RacerLayout, Selection};

/// The drawn race: current layout plus the motion registry for its racers.
///
/// Owns both so a re-render can tear the old racers' tasks down before the
/// new ones exist.
pub struct RaceView {
    layout: Option<RaceLayout>,
    animator: Animator,
    hovered: Option<RacerId>,
}

impl RaceView {
    pub fn new() -> Self {
        Self::with_animator(Animator::new())
    }

    pub fn with_animator(animator: Animator) -> Self {
        Self {
            layout: None,
            animator,
            hovered: None,
        }
    }

    /// Full re-render from a new relation set.
    pub fn rebuild(&mut self, relations: &IndexMap<String, TargetRelation>, now: f64) {
        self.animator.clear();
        self.hovered = None;

        let layout = compute_race_layout(relations);
        self.animator.rebuild(&layout, now);
        log::info!(
            "race laid out: {} tracks, {} racers",
            layout.tracks.len(),
            self.animator.len()
        );
        self.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<&RaceLayout> {
        self.layout.as_ref()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn hovered(&self) -> Option<&RacerId> {
        self.hovered.as_ref()
    }

    /// Layout of the racer under the pointer, if any.
    pub fn hovered_racer(&self) -> Option<&RacerLayout> {
        let id = self.hovered.as_ref()?;
        self.layout.as_ref()?.racers().find(|r| &r.id == id)
    }

    pub fn tick(&mut self, now: f64) {
        self.animator.tick(now);
    }

    /// Needs another frame soon.
    pub fn is_animating(&self) -> bool {
        !self.animator.is_empty()
    }

    pub fn paint(&self, canvas: &mut dyn Canvas, now: f64) {
        if let Some(layout) = &self.layout {
            paint_race(canvas, layout, &self.animator, now);
        }
    }

    /// What a click at `pos` (scene coordinates) selects.
    pub fn click(&self, pos: Pos2, now: f64) -> Option<Selection> {
        let layout = self.layout.as_ref()?;
        layout.hit_test(pos, |id| self.animator.drift(id, now))
    }

    /// Track pointer focus; `None` means the pointer left the canvas.
    /// Returns whether the pointer is over a racer.
    pub fn hover(&mut self, pos: Option<Pos2>, now: f64) -> bool {
        let over = match (&self.layout, pos) {
            (Some(layout), Some(pos)) => layout
                .racer_at(pos, |id| self.animator.drift(id, now))
                .map(|r| r.id.clone()),
            _ => None,
        };

        if over != self.hovered {
            if let Some(prev) = self.hovered.take() {
                self.animator.set_hover(&prev, false, now);
            }
            if let Some(next) = &over {
                self.animator.set_hover(next, true, now);
            }
            self.hovered = over;
        }
        self.hovered.is_some()
    }
}

impl Default for RaceView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RaceDataset;
    use crate::render::canvas::tests::{Op, RecordingCanvas};
    use egui::Vec2;

    fn dataset() -> RaceDataset {
        RaceDataset::from_json(
            r#"{"relations": {
                "Alpha": {"chasers": {"Beta": {"score": 10}, "기타": {"score": 99}}},
                "Gamma": {"chasers": {}}
            }}"#,
        )
        .unwrap()
    }

    fn beta() -> RacerId {
        RacerId {
            target: "Alpha".to_string(),
            chaser: "Beta".to_string(),
        }
    }

    #[test]
    fn nothing_drawn_before_first_layout() {
        let view = RaceView::with_animator(Animator::with_seed(1));
        let mut canvas = RecordingCanvas::default();
        view.paint(&mut canvas, 0.0);
        assert!(canvas.ops.is_empty());
        assert_eq!(view.click(Pos2::new(100.0, 100.0), 0.0), None);
        assert!(!view.is_animating());
    }

    #[test]
    fn rebuild_tears_down_previous_racers() {
        let mut view = RaceView::with_animator(Animator::with_seed(1));
        view.rebuild(&dataset().relations, 0.0);
        assert!(view.animator().frame(&beta(), 0.0).is_some());

        let next = RaceDataset::from_json(
            r#"{"relations": {"Delta": {"chasers": {"Eps": {"score": 1}}}}}"#,
        )
        .unwrap();
        view.rebuild(&next.relations, 3.0);
        assert_eq!(view.animator().frame(&beta(), 3.0), None);
        assert_eq!(view.animator().len(), 1);
        assert_eq!(view.layout().unwrap().tracks.len(), 1);
    }

    #[test]
    fn click_follows_the_moving_marker() {
        let mut view = RaceView::with_animator(Animator::with_seed(5));
        view.rebuild(&dataset().relations, 0.0);
        let now = 0.7;
        view.tick(now);

        let base = view.layout().unwrap().tracks[0].racers[0].center;
        let dy = view.animator().drift(&beta(), now);
        assert_eq!(
            view.click(base + Vec2::new(0.0, dy), now),
            Some(Selection::Chaser {
                target: "Alpha".to_string(),
                chaser: "Beta".to_string()
            })
        );

        let gamma = &view.layout().unwrap().tracks[1];
        let finish = gamma.finish_hotspot.center();
        assert_eq!(view.click(finish, now), Some(Selection::Target("Gamma".to_string())));
    }

    #[test]
    fn hover_enter_and_leave() {
        let mut view = RaceView::with_animator(Animator::with_seed(5));
        view.rebuild(&dataset().relations, 0.0);
        let base = view.layout().unwrap().tracks[0].racers[0].center;
        let dy = view.animator().drift(&beta(), 0.0);

        assert!(view.hover(Some(base + Vec2::new(0.0, dy)), 0.0));
        assert_eq!(view.hovered(), Some(&beta()));
        let racer = view.hovered_racer().unwrap();
        assert_eq!((racer.rank, racer.score), (0, 10.0));
        let lit = view.animator().frame(&beta(), 0.25).unwrap();
        assert!(lit.pulse_opacity >= 0.6 - 1e-6);

        assert!(!view.hover(None, 0.3));
        assert_eq!(view.hovered(), None);
        assert!(view.hovered_racer().is_none());
        let dark = view.animator().frame(&beta(), 0.55).unwrap();
        assert!(dark.pulse_opacity < 0.6);
    }

    #[test]
    fn paints_every_track() {
        let mut view = RaceView::with_animator(Animator::with_seed(2));
        view.rebuild(&dataset().relations, 0.0);
        let mut canvas = RecordingCanvas::default();
        view.paint(&mut canvas, 0.1);
        let names: Vec<&str> = canvas
            .ops
            .iter()
            .filter_map(|o| match o {
                Op::Text(_, t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert!(names.contains(&"Alpha"));
        assert!(names.contains(&"Gamma"));
        assert!(names.contains(&"Beta"));
        assert!(!names.contains(&"기타"));
    }
}
