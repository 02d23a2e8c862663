// Local imports
use crate::config::{SCREEN_HEIGHT, SCREEN_RATIO, SCREEN_WIDTH};
use crate::simd::{SimdVec3, LANES};
use crate::vec3::Vec3;

/// A packet of `LANES` rays sharing one structure-of-arrays representation.
/// Lane `k` is one scalar ray; directions should be of unit length.
#[derive(Copy,Clone)]
pub struct Ray {
  origin : SimdVec3,
  dir    : SimdVec3
}

impl Ray {
  pub fn new( origin : SimdVec3, dir : SimdVec3 ) -> Ray {
    Ray { origin, dir }
  }

  pub fn origin( &self ) -> &SimdVec3 {
    &self.origin
  }

  pub fn direction( &self ) -> &SimdVec3 {
    &self.dir
  }

  /// Builds the primary rays for the horizontal pixel strip starting at
  /// `(x, y)`; lane `k` covers pixel `x + k`. All lanes share the camera
  /// origin.
  pub fn cast_rays( origin : Vec3, x : usize, y : usize ) -> Ray {
    let mut dirs = [ Vec3::ZERO; LANES ];

    for k in 0..LANES {
      let mut u = ( x + k ) as f32 / SCREEN_WIDTH as f32;
      let mut v = y as f32 / SCREEN_HEIGHT as f32;
      v *= SCREEN_RATIO;
      u = ( u - 0.5 ) * 2.0;
      v = ( v - 0.5 ) * 2.0;

      dirs[ k ] = Vec3::new( u, v, -1.0 ).normalize( );
    }

    Ray::new( SimdVec3::splat( origin ), SimdVec3::from_lanes( dirs ) )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::simd;
  use approx::assert_abs_diff_eq;

  #[test]
  fn lanes_cover_adjacent_pixels( ) {
    if !simd::available( ) {
      return;
    }

    let origin = Vec3::new( 0.0, 0.0, 5.0 );
    let packet = Ray::cast_rays( origin, 0, 300 );

    for k in 0..LANES {
      assert_eq!( packet.origin( ).extract( k ), origin );

      let dir = packet.direction( ).extract( k );
      assert_abs_diff_eq!( dir.len( ), 1.0, epsilon = 1e-6 );

      // Rays of one strip march left to right over the screen.
      if k > 0 {
        assert!( dir.x > packet.direction( ).extract( k - 1 ).x );
      }
    }
  }

  #[test]
  fn center_strip_points_down_the_view_axis( ) {
    if !simd::available( ) {
      return;
    }

    // The strip at the vertical screen centre has v = 0; its first lane at
    // the horizontal centre points straight down -z.
    let packet = Ray::cast_rays( Vec3::ZERO, SCREEN_WIDTH / 2, 2 * SCREEN_HEIGHT / 3 );
    let dir = packet.direction( ).extract( 0 );

    assert_abs_diff_eq!( dir.x, 0.0, epsilon = 1e-6 );
    assert_abs_diff_eq!( dir.y, 0.0, epsilon = 1e-6 );
    assert_abs_diff_eq!( dir.z, -1.0, epsilon = 1e-6 );
  }
}
