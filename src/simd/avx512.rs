// 16-wide backend over the AVX-512 registers. Comparisons land in the
// dedicated mask registers instead of a float register, so `SimdBool` wraps
// a bitmask rather than a lane-wide pattern.
//
// The intrinsics are issued unconditionally; callers that are not sure about
// the host CPU should check `available()` first.

// External imports
use std::arch::x86_64::*;
use std::ops;
// Local imports
use crate::vec3::Vec3;

pub const LANES : usize = 16;

/// True if the host CPU can run this backend.
pub fn available( ) -> bool {
  is_x86_feature_detected!( "avx512f" )
}

/// `LANES` floats in one register.
#[derive(Copy,Clone)]
pub struct SimdF32( __m512 );

/// One bit per lane.
#[derive(Copy,Clone)]
pub struct SimdBool( __mmask16 );

/// Structure-of-arrays packet of `LANES` vectors.
#[derive(Copy,Clone)]
pub struct SimdVec3 {
  pub x : SimdF32,
  pub y : SimdF32,
  pub z : SimdF32
}

impl SimdF32 {
  pub fn splat( v : f32 ) -> SimdF32 {
    SimdF32( unsafe { _mm512_set1_ps( v ) } )
  }

  pub fn sqrt( self ) -> SimdF32 {
    SimdF32( unsafe { _mm512_sqrt_ps( self.0 ) } )
  }

  pub fn ge( self, rhs : SimdF32 ) -> SimdBool {
    SimdBool( unsafe { _mm512_cmp_ps_mask::< _CMP_GE_OQ >( self.0, rhs.0 ) } )
  }

  pub fn lt( self, rhs : SimdF32 ) -> SimdBool {
    SimdBool( unsafe { _mm512_cmp_ps_mask::< _CMP_LT_OQ >( self.0, rhs.0 ) } )
  }

  /// True where `min < self < max`, both bounds strict.
  pub fn in_range( self, min : SimdF32, max : SimdF32 ) -> SimdBool {
    unsafe {
      let above = _mm512_cmp_ps_mask::< _CMP_GT_OQ >( self.0, min.0 );
      let below = _mm512_cmp_ps_mask::< _CMP_LT_OQ >( self.0, max.0 );
      SimdBool( above & below )
    }
  }

  pub fn extract( self, lane : usize ) -> f32 {
    debug_assert!( lane < LANES );
    let mut vals = [ 0.0_f32; LANES ];
    unsafe { _mm512_storeu_ps( vals.as_mut_ptr( ), self.0 ) };
    vals[ lane ]
  }
}

impl ops::Add for SimdF32 {
  type Output = SimdF32;

  fn add( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( unsafe { _mm512_add_ps( self.0, rhs.0 ) } )
  }
}

impl ops::Sub for SimdF32 {
  type Output = SimdF32;

  fn sub( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( unsafe { _mm512_sub_ps( self.0, rhs.0 ) } )
  }
}

impl ops::Mul for SimdF32 {
  type Output = SimdF32;

  fn mul( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( unsafe { _mm512_mul_ps( self.0, rhs.0 ) } )
  }
}

impl ops::Div for SimdF32 {
  type Output = SimdF32;

  fn div( self, rhs : SimdF32 ) -> SimdF32 {
    SimdF32( unsafe { _mm512_div_ps( self.0, rhs.0 ) } )
  }
}

impl SimdBool {
  /// True if any lane is set.
  pub fn any( self ) -> bool {
    self.0 != 0
  }

  /// `a` where the lane is set, `b` elsewhere.
  pub fn select( self, a : SimdF32, b : SimdF32 ) -> SimdF32 {
    // The blend picks its second operand where the mask bit is set.
    SimdF32( unsafe { _mm512_mask_blend_ps( self.0, b.0, a.0 ) } )
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
    let mut xs = [ 0.0_f32; LANES ];
    let mut ys = [ 0.0_f32; LANES ];
    let mut zs = [ 0.0_f32; LANES ];
    for i in 0..LANES {
      xs[ i ] = vs[ i ].x;
      ys[ i ] = vs[ i ].y;
      zs[ i ] = vs[ i ].z;
    }

    unsafe {
      SimdVec3 {
        x: SimdF32( _mm512_loadu_ps( xs.as_ptr( ) ) ),
        y: SimdF32( _mm512_loadu_ps( ys.as_ptr( ) ) ),
        z: SimdF32( _mm512_loadu_ps( zs.as_ptr( ) ) )
      }
    }
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
