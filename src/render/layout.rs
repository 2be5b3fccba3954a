use egui::{Align2, Color32, Pos2, Rect, Stroke, Vec2};
use indexmap::IndexMap;

use crate::model::{TargetRelation, SENTINEL_ENTITY};

pub const MAX_TRACKS: usize = 6;
pub const MAX_RACERS: usize = 5;

pub const CANVAS_HEIGHT: f32 = 520.0;
pub const MARGIN_TOP: f32 = 40.0;
pub const MARGIN_BOTTOM: f32 = 60.0;
pub const MARGIN_LEFT: f32 = 80.0;
pub const TRACK_WIDTH: f32 = 200.0;
pub const TRACK_GAP: f32 = 40.0;

/// Racers sit in this slice of the start → finish span.
pub const RATIO_MIN: f32 = 0.75;
pub const RATIO_MAX: f32 = 0.95;

pub const RACER_RADIUS: f32 = 14.0;
pub const PULSE_BASE_RADIUS: f32 = 18.0;
const RACER_X_OFFSET: f32 = -60.0;
const RACER_RANK_STAGGER: f32 = -18.0;
const LABEL_OFFSET_Y: f32 = 28.0;
const LABEL_HIT_WIDTH: f32 = 48.0;
const LABEL_HIT_HEIGHT: f32 = 16.0;
const FINISH_HALF_WIDTH: f32 = 40.0;
const FINISH_HOTSPOT_HEIGHT: f32 = 70.0;

pub const START_LABEL: &str = "출발선";
pub const FINISH_LABEL: &str = "결승선";

/// Tableau 10, indexed by rank.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(0x4e, 0x79, 0xa7),
    Color32::from_rgb(0xf2, 0x8e, 0x2c),
    Color32::from_rgb(0xe1, 0x57, 0x59),
    Color32::from_rgb(0x76, 0xb7, 0xb2),
    Color32::from_rgb(0x59, 0xa1, 0x4f),
    Color32::from_rgb(0xed, 0xc9, 0x49),
    Color32::from_rgb(0xaf, 0x7a, 0xa1),
    Color32::from_rgb(0xff, 0x9d, 0xa7),
    Color32::from_rgb(0x9c, 0x75, 0x5f),
    Color32::from_rgb(0xba, 0xb0, 0xab),
];

const TRACK_COLOR: Color32 = Color32::from_rgb(0xbb, 0xbb, 0xbb);
const FINISH_COLOR: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
const MARKER_OUTLINE: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);

/// Identity of one racer: a chaser on a given target's track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RacerId {
    pub target: String,
    pub chaser: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RacerLayout {
    pub id: RacerId,
    /// 0 = best score on the track.
    pub rank: usize,
    pub score: f64,
    /// 0 = start line, 1 = finish line.
    pub ratio: f32,
    /// Resting centre; the animator drifts around it vertically.
    pub center: Pos2,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub target: String,
    pub center_x: f32,
    pub racers: Vec<RacerLayout>,
    pub finish_hotspot: Rect,
}

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Target(String),
    Chaser { target: String, chaser: String },
}

/// Text styles the canvas knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Start / finish captions.
    Caption,
    /// Entity names.
    Name,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Text {
        pos: Pos2,
        anchor: Align2,
        text: String,
        role: TextRole,
    },
    /// Filled racer marker; drawn at `center` plus the racer's drift.
    Marker {
        racer: RacerId,
        center: Pos2,
        radius: f32,
        fill: Color32,
        stroke: Stroke,
    },
    /// Racer name under the marker; follows the drift.
    RacerLabel {
        racer: RacerId,
        pos: Pos2,
        text: String,
    },
    /// Outline ring whose radius/opacity come from the animator.
    Pulse {
        racer: RacerId,
        center: Pos2,
        color: Color32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaceLayout {
    pub width: f32,
    pub height: f32,
    pub tracks: Vec<TrackLayout>,
}

impl RaceLayout {
    pub fn start_y(&self) -> f32 {
        self.height - MARGIN_BOTTOM
    }

    pub fn finish_y(&self) -> f32 {
        MARGIN_TOP
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn racers(&self) -> impl Iterator<Item = &RacerLayout> {
        self.tracks.iter().flat_map(|t| t.racers.iter())
    }

    /// Everything to draw, back to front.
    pub fn primitives(&self) -> Vec<Primitive> {
        let start_y = self.start_y();
        let finish_y = self.finish_y();
        let mut out = Vec::new();

        for track in &self.tracks {
            let x = track.center_x;
            out.push(Primitive::Line {
                from: Pos2::new(x, start_y),
                to: Pos2::new(x, finish_y),
                stroke: Stroke::new(6.0, TRACK_COLOR),
            });
            out.push(Primitive::Text {
                pos: Pos2::new(x - 20.0, start_y + 24.0),
                anchor: Align2::LEFT_BOTTOM,
                text: START_LABEL.to_string(),
                role: TextRole::Caption,
            });
            out.push(Primitive::Text {
                pos: Pos2::new(x - 20.0, finish_y - 14.0),
                anchor: Align2::LEFT_BOTTOM,
                text: FINISH_LABEL.to_string(),
                role: TextRole::Caption,
            });
            out.push(Primitive::Line {
                from: Pos2::new(x - FINISH_HALF_WIDTH, finish_y),
                to: Pos2::new(x + FINISH_HALF_WIDTH, finish_y),
                stroke: Stroke::new(3.0, FINISH_COLOR),
            });
            out.push(Primitive::Text {
                pos: Pos2::new(x, finish_y - 28.0),
                anchor: Align2::CENTER_BOTTOM,
                text: track.target.clone(),
                role: TextRole::Name,
            });

            for racer in &track.racers {
                out.push(Primitive::Marker {
                    racer: racer.id.clone(),
                    center: racer.center,
                    radius: RACER_RADIUS,
                    fill: racer.color,
                    stroke: Stroke::new(1.3, MARKER_OUTLINE),
                });
                out.push(Primitive::RacerLabel {
                    racer: racer.id.clone(),
                    pos: racer.center + Vec2::new(0.0, LABEL_OFFSET_Y),
                    text: racer.id.chaser.clone(),
                });
                out.push(Primitive::Pulse {
                    racer: racer.id.clone(),
                    center: racer.center,
                    color: racer.color,
                });
            }
        }
        out
    }

    /// Topmost racer under `pos`, given each racer's current vertical drift.
    ///
    /// Racers are searched front to back in paint order. A racer is hit on its
    /// marker or on its name label.
    pub fn racer_at<F>(&self, pos: Pos2, drift: F) -> Option<&RacerLayout>
    where
        F: Fn(&RacerId) -> f32,
    {
        self.tracks
            .iter()
            .rev()
            .flat_map(|t| t.racers.iter().rev())
            .find(|r| {
                let center = r.center + Vec2::new(0.0, drift(&r.id));
                center.distance(pos) <= RACER_RADIUS || label_rect(center).contains(pos)
            })
    }

    /// Resolve a click: racers first, then finish hotspots.
    pub fn hit_test<F>(&self, pos: Pos2, drift: F) -> Option<Selection>
    where
        F: Fn(&RacerId) -> f32,
    {
        if let Some(racer) = self.racer_at(pos, drift) {
            return Some(Selection::Chaser {
                target: racer.id.target.clone(),
                chaser: racer.id.chaser.clone(),
            });
        }
        self.tracks
            .iter()
            .find(|t| t.finish_hotspot.contains(pos))
            .map(|t| Selection::Target(t.target.clone()))
    }
}

/// Lay out the first [`MAX_TRACKS`] targets in insertion order.
pub fn compute_race_layout(relations: &IndexMap<String, TargetRelation>) -> RaceLayout {
    let visible = relations.len().clamp(1, MAX_TRACKS);
    let width = visible as f32 * TRACK_WIDTH
        + (visible as f32 - 1.0) * TRACK_GAP
        + 2.0 * MARGIN_LEFT;

    let mut layout = RaceLayout {
        width,
        height: CANVAS_HEIGHT,
        tracks: Vec::with_capacity(visible),
    };
    let start_y = layout.start_y();
    let finish_y = layout.finish_y();

    for (index, (target, relation)) in relations.iter().take(MAX_TRACKS).enumerate() {
        let center_x = track_center_x(index);
        let racers = rank_chasers(relation)
            .into_iter()
            .enumerate()
            .map(|(rank, (chaser, score, ratio))| RacerLayout {
                id: RacerId {
                    target: target.clone(),
                    chaser: chaser.to_string(),
                },
                rank,
                score,
                ratio,
                center: Pos2::new(
                    center_x + RACER_X_OFFSET + rank as f32 * RACER_RANK_STAGGER,
                    ratio_to_y(ratio, start_y, finish_y),
                ),
                color: PALETTE[rank % PALETTE.len()],
            })
            .collect();

        layout.tracks.push(TrackLayout {
            target: target.clone(),
            center_x,
            racers,
            finish_hotspot: Rect::from_min_size(
                Pos2::new(center_x - FINISH_HALF_WIDTH, finish_y - FINISH_HOTSPOT_HEIGHT),
                Vec2::new(FINISH_HALF_WIDTH * 2.0, FINISH_HOTSPOT_HEIGHT),
            ),
        });
    }

    layout
}

/// Clickable area of a racer's name label.
fn label_rect(center: Pos2) -> Rect {
    Rect::from_min_size(
        center + Vec2::new(-LABEL_HIT_WIDTH / 2.0, LABEL_OFFSET_Y),
        Vec2::new(LABEL_HIT_WIDTH, LABEL_HIT_HEIGHT),
    )
}

pub fn track_center_x(index: usize) -> f32 {
    MARGIN_LEFT + index as f32 * (TRACK_WIDTH + TRACK_GAP) + TRACK_WIDTH / 2.0
}

pub fn ratio_to_y(ratio: f32, start_y: f32, finish_y: f32) -> f32 {
    start_y - (start_y - finish_y) * ratio
}

/// Map a score onto the finish-side band. `max_score` is floored at 1.
pub fn score_ratio(score: f64, max_score: f64) -> f32 {
    let normalized = score.max(0.0) / max_score.max(1.0);
    (RATIO_MIN + normalized as f32 * (RATIO_MAX - RATIO_MIN)).clamp(RATIO_MIN, RATIO_MAX)
}

/// Top chasers of one track as `(name, score, ratio)`, best first.
fn rank_chasers(relation: &TargetRelation) -> Vec<(&str, f64, f32)> {
    let mut entries: Vec<(&str, f64)> = relation
        .chasers
        .iter()
        .filter(|(name, _)| name.as_str() != SENTINEL_ENTITY)
        .map(|(name, stat)| (name.as_str(), stat.score))
        .collect();
    let max_score = entries.iter().map(|(_, s)| *s).fold(1.0, f64::max);
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
        .into_iter()
        .take(MAX_RACERS)
        .map(|(name, score)| (name, score, score_ratio(score, max_score)))
        .collect()
}
