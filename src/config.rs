//! Compile-time render and fractal constants.

/// Number of first-ring children per sphere.
pub const TYPE1_SPHERES_COUNT : usize = 6;
/// Number of second-ring children per sphere.
pub const TYPE2_SPHERES_COUNT : usize = 3;

/// Children spawned per sphere, over both rings.
pub const TOTAL_SPHERES_COUNT : usize = TYPE1_SPHERES_COUNT + TYPE2_SPHERES_COUNT;

// Polar angle of each ring, measured from the parent's axis. The first ring
// sits on the parent's equator; the second is tilted towards the axis.
pub const TYPE1_SPHERES_DEGREE : f32 = 90.0;
pub const TYPE2_SPHERES_DEGREE : f32 = 30.0;

// Azimuth phase of the first child in each ring; siblings are spread evenly
// over the remaining 360 degrees.
pub const TYPE1_SPHERES_ROTATION : f32 = 0.0;
pub const TYPE2_SPHERES_ROTATION : f32 = 60.0;

/// Radius of the root sphere.
pub const STARTING_RADIUS : f32 = 1.0;
/// Child-to-parent radius ratio.
pub const SPHERE_RATIO : f32 = 1.0 / 3.0;

pub const SCREEN_WIDTH  : usize = 800;
pub const SCREEN_HEIGHT : usize = 600;

/// Target presenter frame rate.
pub const FPS : u32 = 60;

pub const SCREEN_RATIO : f32 = SCREEN_HEIGHT as f32 / SCREEN_WIDTH as f32;

/// `sin( fov / 2 )` of the vertical field of view.
pub const SIN_HALF_FOV : f32 = 0.4794255386;

/// Screen-space size (in pixels) of a unit-radius sphere at distance 1;
/// divide by the actual distance to project an arbitrary sphere.
pub const PIXEL_AT_DISTANCE : f32 = 2.0 * SIN_HALF_FOV * SCREEN_HEIGHT as f32;
