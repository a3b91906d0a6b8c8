use crate::constants::*;
use crate::error::ChoreoError;
use crate::geometry::{Frame, Viewport};
use crate::timeline::{Pose, ResolvedPose, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollageSide {
    /// Tall image on the left, two stacked images on the right.
    MainLeft,
    /// Tall image on the right; every horizontal direction is mirrored.
    MainRight,
}

impl CollageSide {
    #[inline]
    fn main_sign(self) -> f32 {
        match self {
            CollageSide::MainLeft => -1.0,
            CollageSide::MainRight => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollageImage {
    pub src: &'static str,
    pub alt: &'static str,
    pub frame: Frame,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBlock {
    pub heading: &'static str,
    pub accent: &'static str,
    pub body: &'static str,
    pub frame: Frame,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Chips {
    None,
    /// Chips rendered inside the text block; they move with it.
    Inline(&'static [&'static str]),
    /// A separately animated row: chips stagger in, the row exits as one.
    Row {
        labels: &'static [&'static str],
        frame: Frame,
    },
}

/// Animatable element of a collage section, in timeline target order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Main,
    StackTop,
    StackBottom,
    Text,
    ChipRow,
    Chip(usize),
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::Main => 0,
            Slot::StackTop => 1,
            Slot::StackBottom => 2,
            Slot::Text => 3,
            Slot::ChipRow => 4,
            Slot::Chip(i) => 5 + i,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::Main => "main",
            Slot::StackTop => "stack-top",
            Slot::StackBottom => "stack-bottom",
            Slot::Text => "text",
            Slot::ChipRow => "chip-row",
            Slot::Chip(_) => "chip",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CinematicSection {
    pub id: &'static str,
    pub z_index: i32,
    pub side: CollageSide,
    /// Main, stack top, stack bottom.
    pub images: [CollageImage; 3],
    pub text: TextBlock,
    pub chips: Chips,
}

impl CinematicSection {
    pub fn row_chips(&self) -> &'static [&'static str] {
        match self.chips {
            Chips::Row { labels, .. } => labels,
            _ => &[],
        }
    }

    pub fn target_count(&self) -> usize {
        match self.chips {
            Chips::Row { labels, .. } => 5 + labels.len(),
            _ => 4,
        }
    }

    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = vec![Slot::Main, Slot::StackTop, Slot::StackBottom, Slot::Text];
        if let Chips::Row { labels, .. } = self.chips {
            slots.push(Slot::ChipRow);
            slots.extend((0..labels.len()).map(Slot::Chip));
        }
        slots
    }

    /// Entrance, hold and exit for this collage on a timeline spanning 1.0.
    pub fn timeline(&self) -> Timeline {
        let s = self.side.main_sign();
        let text_at = match self.side {
            CollageSide::MainLeft => ENTRANCE_OFFSETS[3],
            CollageSide::MainRight => MIRRORED_TEXT_OFFSET,
        };
        let mut b = Timeline::builder(self.target_count())
            .enter(
                Slot::Main.index(),
                Pose::hidden(s * ENTER_X_VW, 0.0),
                ENTRANCE_OFFSETS[0],
                ENTRANCE_TWEEN,
            )
            .enter(
                Slot::StackTop.index(),
                Pose::hidden(-s * ENTER_X_VW, 0.0),
                ENTRANCE_OFFSETS[1],
                ENTRANCE_TWEEN,
            )
            .enter(
                Slot::StackBottom.index(),
                Pose::hidden(-s * ENTER_X_VW, ENTER_STACK_Y_VH),
                ENTRANCE_OFFSETS[2],
                ENTRANCE_TWEEN,
            )
            .enter(
                Slot::Text.index(),
                Pose::hidden(0.0, ENTER_TEXT_Y_VH),
                text_at,
                ENTRANCE_TWEEN,
            );
        for i in 0..self.row_chips().len() {
            b = b.enter(
                Slot::Chip(i).index(),
                Pose::hidden(0.0, ENTER_CHIP_Y_VH).with_scale(ENTER_CHIP_SCALE),
                CHIP_ENTRANCE_OFFSET + CHIP_STAGGER * i as f32,
                ENTRANCE_TWEEN,
            );
        }

        b = b
            .exit(
                Slot::Main.index(),
                Pose::hidden(s * EXIT_X_VW, 0.0),
                EXIT_START,
                EXIT_TWEEN,
            )
            .exit(
                Slot::StackTop.index(),
                Pose::hidden(-s * EXIT_X_VW, 0.0),
                EXIT_START,
                EXIT_TWEEN,
            )
            .exit(
                Slot::StackBottom.index(),
                Pose::hidden(-s * EXIT_X_VW, 0.0),
                EXIT_START_LATE,
                EXIT_TWEEN,
            )
            .exit(
                Slot::Text.index(),
                Pose::hidden(0.0, EXIT_TEXT_Y_VH),
                EXIT_START,
                EXIT_TWEEN,
            );
        if matches!(self.chips, Chips::Row { .. }) {
            b = b.exit(
                Slot::ChipRow.index(),
                Pose::hidden(0.0, EXIT_CHIPS_Y_VH),
                EXIT_START_LATE,
                EXIT_TWEEN,
            );
        }
        b.build()
    }
}

/// Handles a mounted section announces for animation.
///
/// Binding is all-or-nothing: if any handle the section's shape needs is
/// missing, no timeline is built for it.
#[derive(Debug)]
pub struct SectionHandles<H> {
    pub main: Option<H>,
    pub stack_top: Option<H>,
    pub stack_bottom: Option<H>,
    pub text: Option<H>,
    pub chip_row: Option<H>,
    pub chips: Vec<H>,
}

impl<H> Default for SectionHandles<H> {
    fn default() -> Self {
        Self {
            main: None,
            stack_top: None,
            stack_bottom: None,
            text: None,
            chip_row: None,
            chips: Vec::new(),
        }
    }
}

impl<H> SectionHandles<H> {
    pub fn bind(self, section: &CinematicSection) -> Result<BoundSection<H>, ChoreoError> {
        let need = |h: Option<H>, slot: Slot| h.ok_or(ChoreoError::MissingHandle(slot.name()));
        let mut handles = vec![
            need(self.main, Slot::Main)?,
            need(self.stack_top, Slot::StackTop)?,
            need(self.stack_bottom, Slot::StackBottom)?,
            need(self.text, Slot::Text)?,
        ];
        let chip_count = section.row_chips().len();
        if matches!(section.chips, Chips::Row { .. }) {
            handles.push(need(self.chip_row, Slot::ChipRow)?);
            if self.chips.len() != chip_count {
                return Err(ChoreoError::MissingHandle(Slot::Chip(0).name()));
            }
            handles.extend(self.chips);
        }
        Ok(BoundSection {
            id: section.id,
            handles,
            timeline: section.timeline(),
        })
    }
}

#[derive(Debug)]
pub struct BoundSection<H> {
    pub id: &'static str,
    handles: Vec<H>,
    timeline: Timeline,
}

impl<H> BoundSection<H> {
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    pub fn apply(&self, progress: f32, viewport: Viewport, mut f: impl FnMut(&H, ResolvedPose)) {
        for (i, h) in self.handles.iter().enumerate() {
            f(h, self.timeline.pose_at(i, progress).resolve(viewport));
        }
    }
}
