pub mod catalog;
pub mod constants;
pub mod ease;
pub mod error;
pub mod geometry;
pub mod hero;
pub mod inquiry;
pub mod nav;
pub mod particles;
pub mod pin;
pub mod rail;
pub mod reveal;
pub mod scrub;
pub mod section;
pub mod showcase;
pub mod snap;
pub mod timeline;

pub use ease::Ease;
pub use error::ChoreoError;
pub use geometry::{Extent, Frame, Viewport};
pub use pin::{
    LayoutProbe, PinDuration, PinEvent, PinPlacement, PinRegistry, PinState, PinnedRegion, RegionId,
};
pub use section::{BoundSection, CinematicSection, SectionHandles, Slot};
pub use timeline::{Phase, Pose, ResolvedPose, Timeline};

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
