// Fallback backend for targets without vector instructions. Every type is a
// one-lane wrapper around the plain scalar operation, so the packet code
// stays testable on any machine.

// External imports
use std::ops;
// Local imports
use crate::vec3::Vec3;

pub const LANES : usize = 1;

/// The scalar backend runs everywhere.
pub fn available( ) -> bool {
  true
}

#[derive(Copy,Clone)]
pub struct SimdF32( f32 );

#[derive(Copy,Clone)]
pub struct SimdBool( bool );

/// Structure-of-arrays packet of `LANES` vectors.
#[derive(Copy,Clone)]
pub struct SimdVec3 {
  pub x : SimdF32,
  pub y : SimdF32,
  pub z : SimdF32
}

impl SimdF32 {
  pub fn splat( v : f32 ) -> SimdF32 {
    SimdF32( v )
  }

  pub fn sqrt( self ) -> SimdF32 {
    SimdF32( self.0.sqrt( ) )
  }

  pub fn ge( self, rhs : SimdF32 ) -> SimdBool {
    SimdBool( self.0 >= rhs.0 )
  }

  pub fn lt( self, rhs : SimdF32 ) -> SimdBool {
    SimdBool( self.0 < rhs.0 )
  }

  /// True where `min < self < max`, both bounds strict.
  pub fn in_range( self, min : SimdF32, max : SimdF32 ) -> SimdBool {
    SimdBool( self.0 > min.0 && self.0 < max.0 )
  }

  pub fn extract( self, lane : usize ) -> f32 {
    debug_assert!( lane < LANES );
    self.0
  }
}

impl ops::Add for SimdF32 {
  type Output = SimdF32;

  fn add( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( self.0 + rhs.0 )
  }
}

impl ops::Sub for SimdF32 {
  type Output = SimdF32;

  fn sub( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( self.0 - rhs.0 )
  }
}

impl ops::Mul for SimdF32 {
  type Output = SimdF32;

  fn mul( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( self.0 * rhs.0 )
  }
}

impl ops::Div for SimdF32 {
  type Output = SimdF32;

  fn div( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( self.0 / rhs.0 )
  }
}

impl SimdBool {
  /// True if any lane is set.
  pub fn any( self ) -> bool {
    self.0
  }

  /// `a` where the lane is set, `b` elsewhere.
  pub fn select( self, a : SimdF32, b : SimdF32 ) -> SimdF32 {
    if self.0 { a } else { b }
  }

  pub fn select_vec3( self, a : SimdVec3, b : SimdVec3 ) -> SimdVec3 {
    SimdVec3 {
      x: self.select( a.x, b.x ),
      y: self.select( a.y, b.y ),
      z: self.select( a.z, b.z )
    }
  }
}

impl SimdVec3 {
  /// Broadcasts one vector into every lane.
  pub fn splat( v : Vec3 ) -> SimdVec3 {
    SimdVec3 {
      x: SimdF32::splat( v.x ),
      y: SimdF32::splat( v.y ),
      z: SimdF32::splat( v.z )
    }
  }

  /// Packs `vs[ i ]` into lane `i` of each component register.
  pub fn from_lanes( vs : [ Vec3; LANES ] ) -> SimdVec3 {
    SimdVec3::splat( vs[ 0 ] )
  }

  pub fn dot( self, rhs : SimdVec3 ) -> SimdF32 {
    self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
  }

  /// Scales every vector by the float in its lane.
  pub fn scale( self, rhs : SimdF32 ) -> SimdVec3 {
    SimdVec3 { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
  }

  pub fn extract( self, lane : usize ) -> Vec3 {
    Vec3::new( self.x.extract( lane ), self.y.extract( lane ), self.z.extract( lane ) )
  }
}

impl ops::Add for SimdVec3 {
  type Output = SimdVec3;

  fn add( self, rhs : SimdVec3 ) -> SimdVec3 {
    SimdVec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
  }
}

impl ops::Sub for SimdVec3 {
  type Output = SimdVec3;

  fn sub( self, rhs : SimdVec3 ) -> SimdVec3 {
    SimdVec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
  }
}

impl ops::Mul for SimdVec3 {
  type Output = SimdVec3;

  fn mul( self, rhs : SimdVec3 ) -> SimdVec3 {
    SimdVec3 { x: self.x * rhs.x, y: self.y * rhs.y, z: self.z * rhs.z }
  }
}
