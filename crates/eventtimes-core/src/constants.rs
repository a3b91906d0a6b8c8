// Shared tuning constants for the choreography core.

// Layout
pub const DESKTOP_MIN_WIDTH_PX: f64 = 1024.0; // pinning, rail and snapping only at or above this

// Collage timeline, in normalized timeline units (the whole timeline spans 1.0)
pub const ENTRANCE_OFFSETS: [f32; 4] = [0.0, 0.06, 0.10, 0.12]; // main, stack top, stack bottom, text
pub const MIRRORED_TEXT_OFFSET: f32 = 0.14; // text lands a beat later when the main image is on the right
pub const CHIP_ENTRANCE_OFFSET: f32 = 0.16;
pub const CHIP_STAGGER: f32 = 0.02;
pub const ENTRANCE_TWEEN: f32 = 0.14;
pub const HOLD_START: f32 = 0.30;
pub const EXIT_START: f32 = 0.70;
pub const EXIT_START_LATE: f32 = 0.72;
pub const EXIT_TWEEN: f32 = 0.28;

// Entrance and exit offsets (viewport-relative)
pub const ENTER_X_VW: f32 = 60.0;
pub const ENTER_STACK_Y_VH: f32 = 10.0;
pub const ENTER_TEXT_Y_VH: f32 = 18.0;
pub const ENTER_CHIP_Y_VH: f32 = 10.0;
pub const ENTER_CHIP_SCALE: f32 = 0.92;
pub const EXIT_X_VW: f32 = 18.0;
pub const EXIT_TEXT_Y_VH: f32 = -10.0;
pub const EXIT_CHIPS_Y_VH: f32 = -6.0;

// Pinning
pub const COLLAGE_PIN_RATIO: f64 = 1.3; // pinned for 1.3x the section's own height
pub const COLLAGE_SCRUB_SEC: f32 = 0.6;
pub const RAIL_SCRUB_SEC: f32 = 1.0;
pub const RAIL_PIN_PADDING_PX: f64 = 500.0;

// Global snap
pub const SNAP_TOLERANCE: f64 = 0.02; // fraction of total scroll
pub const SNAP_MIN_DURATION_SEC: f64 = 0.15;
pub const SNAP_MAX_DURATION_SEC: f64 = 0.35;
pub const SNAP_FULL_DURATION_DISTANCE: f64 = 0.10; // fractional distance that takes the max duration
pub const SNAP_IDLE_MS: u64 = 150; // scroll must be quiet this long before settling
pub const SNAP_REAGGREGATE_DEBOUNCE_MS: u64 = 200;
pub const SNAP_SETTLED_EPSILON_PX: f64 = 1.0;

// Particle field
pub const PARTICLE_COUNT: usize = 60;
pub const ORB_COUNT: usize = 4;
pub const FIELD_HALF_EXTENT_XY: f32 = 10.0;
pub const FIELD_HALF_EXTENT_Z: f32 = 5.0;
pub const PARTICLE_VELOCITY_XY_SPAN: f32 = 0.005;
pub const PARTICLE_VELOCITY_Z_SPAN: f32 = 0.002;
pub const WOBBLE_AMPLITUDE: f32 = 0.002;
pub const WOBBLE_X_RATE: f32 = 0.5;
pub const WOBBLE_Y_RATE: f32 = 0.3;
pub const POINTER_SCALE: f32 = 5.0; // pointer NDC -> field units
pub const ATTRACTION_RADIUS: f32 = 5.0;
pub const ATTRACTION_GAIN: f32 = 0.0005;
pub const FIELD_SPIN_RATE: f32 = 0.02; // rad per second around +Y

pub const ORB_SPREAD: [f32; 3] = [15.0, 10.0, 5.0];
pub const ORB_SCALE_MIN: f32 = 0.15;
pub const ORB_SCALE_SPAN: f32 = 0.25;
pub const ORB_SPEED_MIN: f32 = 0.5;
pub const ORB_SPEED_SPAN: f32 = 0.5;
pub const ORB_BOB_AMPLITUDE: f32 = 0.5;

// Particle look
pub const FIELD_CAMERA_Z: f32 = 8.0;
pub const FIELD_FOV_DEG: f32 = 60.0;
pub const PARTICLE_SIZE: f32 = 0.06;
pub const PARTICLE_OPACITY: f32 = 0.4;
pub const ORB_OPACITY: f32 = 0.1;
pub const GOLD_RGB: [f32; 3] = [0.788, 0.659, 0.416]; // #C9A86A
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 1.5;

// Navigation
pub const NAV_SCROLLED_PX: f64 = 50.0;
pub const SCROLL_TOP_VISIBLE_PX: f64 = 500.0;

// Hero
pub const HERO_FADE_RISE_PX: f32 = 50.0;
pub const HERO_FADE_SCRUB_SEC: f32 = 1.0;
pub const HERO_PARALLAX_DIVISOR: f32 = 50.0; // pointer px per px of offset
pub const HERO_PARALLAX_DEPTH_STEP: f32 = 0.3; // image i moves with depth (i + 1) * step
pub const HERO_TILT_DEG_PER_PX: f32 = 0.5;
pub const HERO_TILT_EASE_SEC: f32 = 1.0;
pub const HERO_FLOAT_RISE_PX: [f32; 2] = [12.0, 8.0]; // first image, every other image
pub const HERO_FLOAT_PERIOD_SEC: f32 = 2.5;
pub const HERO_FLOAT_PERIOD_STEP_SEC: f32 = 0.5;
pub const HERO_FLOAT_DELAY_STEP_SEC: f32 = 0.3;

// Reveal on enter
pub const REVEAL_START_RATIO: f64 = 0.8; // section top crosses 80% of the viewport height
pub const REVEAL_RISE_PX: f32 = 30.0;

// Packages
pub const PACKAGE_FEATURE_PREVIEW: usize = 5;

// Inquiry
pub const CONFIRMATION_WINDOW_SEC: u64 = 3;
