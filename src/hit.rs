// Local imports
use crate::config::STARTING_RADIUS;
use crate::ray::Ray;
use crate::simd::{SimdF32, SimdVec3};
use crate::vec3::Vec3;

/// Colour of rays that leave the scene; the buffer starts out filled with it.
pub const SKY_COLOR : Vec3 = Vec3 { x: 0.178, y: 0.461, z: 0.853 };

/// Per-channel scale pulling the depth-derived base colours apart.
pub const HASH_CONST : Vec3 = Vec3 { x: 3.5353123, y: 4.1459123, z: 1.3490423 };

/// Closest accepted hit per lane of one ray packet.
///
/// `min` and `max` clip the accepted `t` window; `max` tightens with every
/// accepted hit, so later hits can only move closer. `result` keeps the ray
/// parameter of the accepted hit, or -1 while the lane has none; `level` is
/// the recursion depth of the hit sphere (-1 for none) and drives shading.
/// `radius` (squared) and `sphere_center` mirror the hit sphere itself.
pub struct HitRecord {
  pub sphere_center : SimdVec3,
  pub result : SimdF32,
  pub min    : SimdF32,
  pub max    : SimdF32,
  pub radius : SimdF32,
  pub level  : SimdF32
}

impl HitRecord {
  pub const DEFAULT_MIN : f32 = -0.99;
  pub const DEFAULT_MAX : f32 = f32::MAX;

  pub fn new( ) -> HitRecord {
    HitRecord::with_range( HitRecord::DEFAULT_MIN, HitRecord::DEFAULT_MAX )
  }

  /// A record that only accepts hits with `min < t < max`.
  pub fn with_range( min : f32, max : f32 ) -> HitRecord {
    HitRecord {
      sphere_center: SimdVec3::splat( Vec3::ZERO ),
      result: SimdF32::splat( -1.0 ),
      min:    SimdF32::splat( min ),
      max:    SimdF32::splat( max ),
      radius: SimdF32::splat( 0.0 ),
      level:  SimdF32::splat( -1.0 )
    }
  }

  /// Shades lane `lane`: the sky colour when nothing was hit, otherwise a
  /// colour hashed from the recursion depth and darkened towards the bottom
  /// of the scene. The division blows up near `y = -1`; those extremes are
  /// part of the look.
  pub fn extract_color( &self, ray : &Ray, lane : usize ) -> Vec3 {
    let result = self.result.extract( lane );
    if HitRecord::DEFAULT_MIN > result {
      return SKY_COLOR;
    }

    let level = self.level.extract( lane );
    let col = Vec3::new( level.sin( ),
                         ( level + 1.0 ).sin( ),
                         ( level + 2.0 ).sin( ) ) * HASH_CONST;

    let origin = ray.origin( ).extract( lane );
    let dir = ray.direction( ).extract( lane );
    let point = origin + dir * result;

    col / ( STARTING_RADIUS + point.y )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::simd::{self, LANES};
  use approx::assert_abs_diff_eq;

  fn axis_ray( ) -> Ray {
    Ray::new( SimdVec3::splat( Vec3::new( 0.0, 0.0, 5.0 ) ),
              SimdVec3::splat( Vec3::new( 0.0, 0.0, -1.0 ) ) )
  }

  #[test]
  fn fresh_record_shades_sky_everywhere( ) {
    if !simd::available( ) {
      return;
    }

    let records = HitRecord::new( );
    let ray = axis_ray( );

    for k in 0..LANES {
      assert_eq!( records.extract_color( &ray, k ), SKY_COLOR );
    }
  }

  #[test]
  fn hit_color_is_hashed_from_the_depth( ) {
    if !simd::available( ) {
      return;
    }

    let mut records = HitRecord::new( );
    records.result = SimdF32::splat( 4.0 );
    records.level = SimdF32::splat( 0.0 );

    // Hit point (0,0,1) has y = 0, so the darkening divisor is exactly 1.
    let expected = Vec3::new( 0.0_f32.sin( ), 1.0_f32.sin( ), 2.0_f32.sin( ) ) * HASH_CONST;

    let ray = axis_ray( );
    for k in 0..LANES {
      let col = records.extract_color( &ray, k );
      assert_abs_diff_eq!( col.x, expected.x, epsilon = 1e-5 );
      assert_abs_diff_eq!( col.y, expected.y, epsilon = 1e-5 );
      assert_abs_diff_eq!( col.z, expected.z, epsilon = 1e-5 );
    }
  }
}
