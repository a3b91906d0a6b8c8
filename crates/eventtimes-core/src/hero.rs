use crate::constants::*;
use crate::ease::Ease;
use crate::geometry::Viewport;
use glam::Vec2;

/// How far the hero has scrolled out, linear in \[0, 1\] between hero top
/// and hero bottom.
pub fn fade_progress(scroll: f64, hero_top: f64, hero_height: f64) -> f32 {
    if hero_height <= 0.0 {
        return 0.0;
    }
    ((scroll - hero_top) / hero_height).clamp(0.0, 1.0) as f32
}

/// Content and image fade at fade progress `t`. Returns `(opacity, y_px)`.
pub fn hero_fade(t: f32) -> (f32, f32) {
    let t = t.clamp(0.0, 1.0);
    (1.0 - t, -HERO_FADE_RISE_PX * t)
}

/// Staggered load-in played once when the page starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intro {
    pub delay_sec: f32,
    pub stagger_sec: f32,
    pub duration_sec: f32,
    pub from_y_px: f32,
    pub from_scale: f32,
}

pub const CONTENT_INTRO: Intro = Intro {
    delay_sec: 0.3,
    stagger_sec: 0.15,
    duration_sec: 1.0,
    from_y_px: 40.0,
    from_scale: 1.0,
};

pub const IMAGE_INTRO: Intro = Intro {
    delay_sec: 0.5,
    stagger_sec: 0.1,
    duration_sec: 1.2,
    from_y_px: 0.0,
    from_scale: 0.95,
};

pub const NAV_INTRO: Intro = Intro {
    delay_sec: 0.3,
    stagger_sec: 0.0,
    duration_sec: 1.0,
    from_y_px: -100.0,
    from_scale: 1.0,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroPose {
    pub opacity: f32,
    pub y_px: f32,
    pub scale: f32,
}

impl Intro {
    pub fn sample(&self, index: usize, elapsed_sec: f32) -> IntroPose {
        let start = self.delay_sec + self.stagger_sec * index as f32;
        let t = if self.duration_sec <= 0.0 {
            1.0
        } else {
            (elapsed_sec - start) / self.duration_sec
        };
        let k = Ease::Power2Out.apply(t);
        IntroPose {
            opacity: k,
            y_px: self.from_y_px * (1.0 - k),
            scale: 1.0 - (1.0 - self.from_scale) * (1.0 - k),
        }
    }

    pub fn is_done(&self, count: usize, elapsed_sec: f32) -> bool {
        let last = self.stagger_sec * count.saturating_sub(1) as f32;
        elapsed_sec >= self.delay_sec + last + self.duration_sec
    }
}

/// Endless up-and-back drift of hero image `index`, in px (negative is up).
pub fn float_offset(index: usize, elapsed_sec: f32) -> f32 {
    let rise = if index == 0 {
        HERO_FLOAT_RISE_PX[0]
    } else {
        HERO_FLOAT_RISE_PX[1]
    };
    let period = HERO_FLOAT_PERIOD_SEC + HERO_FLOAT_PERIOD_STEP_SEC * index as f32;
    let t = elapsed_sec - HERO_FLOAT_DELAY_STEP_SEC * index as f32;
    if t <= 0.0 {
        return 0.0;
    }
    let phase = t / period;
    let frac = phase.fract();
    // yoyo: odd legs run backwards
    let leg = if (phase as u64) % 2 == 0 { frac } else { 1.0 - frac };
    -rise * Ease::SineInOut.apply(leg)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub x_px: f32,
    pub y_px: f32,
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
}

impl Tilt {
    pub fn lerp(a: Tilt, b: Tilt, t: f32) -> Tilt {
        Tilt {
            x_px: a.x_px + (b.x_px - a.x_px) * t,
            y_px: a.y_px + (b.y_px - a.y_px) * t,
            rotate_x_deg: a.rotate_x_deg + (b.rotate_x_deg - a.rotate_x_deg) * t,
            rotate_y_deg: a.rotate_y_deg + (b.rotate_y_deg - a.rotate_y_deg) * t,
        }
    }
}

/// Parallax target for hero image `index` with the pointer at `pointer`
/// (viewport CSS px). Deeper images travel further; all tilt alike.
pub fn hero_parallax(pointer: Vec2, viewport: Viewport, index: usize) -> Tilt {
    if viewport.is_empty() {
        return Tilt::default();
    }
    let center = Vec2::new(viewport.width as f32, viewport.height as f32) * 0.5;
    let moved = (pointer - center) / HERO_PARALLAX_DIVISOR;
    let depth = (index + 1) as f32 * HERO_PARALLAX_DEPTH_STEP;
    Tilt {
        x_px: moved.x * depth,
        y_px: moved.y * depth,
        rotate_x_deg: -moved.y * HERO_TILT_DEG_PER_PX,
        rotate_y_deg: moved.x * HERO_TILT_DEG_PER_PX,
    }
}

/// Eases a [`Tilt`] toward its latest target. Each retarget starts a fresh
/// ease-out from wherever the image currently is.
#[derive(Clone, Copy, Debug, Default)]
pub struct TiltTween {
    from: Tilt,
    to: Tilt,
    current: Tilt,
    elapsed_sec: f32,
}

impl TiltTween {
    pub fn current(&self) -> Tilt {
        self.current
    }

    pub fn retarget(&mut self, to: Tilt) {
        if to == self.to {
            return;
        }
        self.from = self.current;
        self.to = to;
        self.elapsed_sec = 0.0;
    }

    pub fn step(&mut self, dt_sec: f32) -> Tilt {
        self.elapsed_sec += dt_sec.max(0.0);
        let k = Ease::Power2Out.apply(self.elapsed_sec / HERO_TILT_EASE_SEC);
        self.current = Tilt::lerp(self.from, self.to, k);
        self.current
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroPose {
    pub x_px: f32,
    pub y_px: f32,
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl HeroPose {
    pub fn image(intro: IntroPose, float_px: f32, tilt: Tilt, fade: (f32, f32)) -> Self {
        Self {
            x_px: tilt.x_px,
            y_px: intro.y_px + float_px + tilt.y_px + fade.1,
            rotate_x_deg: tilt.rotate_x_deg,
            rotate_y_deg: tilt.rotate_y_deg,
            scale: intro.scale,
            opacity: intro.opacity * fade.0,
        }
    }

    pub fn content(intro: IntroPose, fade: (f32, f32)) -> Self {
        Self {
            x_px: 0.0,
            y_px: intro.y_px + fade.1,
            rotate_x_deg: 0.0,
            rotate_y_deg: 0.0,
            scale: intro.scale,
            opacity: intro.opacity * fade.0,
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0) rotateX({:.3}deg) rotateY({:.3}deg) scale({:.4})",
            self.x_px, self.y_px, self.rotate_x_deg, self.rotate_y_deg, self.scale
        )
    }

    pub fn css_opacity(&self) -> String {
        format!("{:.3}", self.opacity)
    }
}
