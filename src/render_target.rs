// External imports
use std::sync::atomic::{AtomicU32, Ordering};
// Local imports
use crate::hit::SKY_COLOR;
use crate::vec3::Vec3;

/// The shared pixel buffer: a row-major `width x height` grid of RGB f32
/// triples. Render workers overwrite pixels at will while the presenter
/// reads; nobody takes a lock. Each channel is one relaxed atomic cell, so
/// a concurrently-read pixel can tear *between* its channels — the next
/// sample on that pixel repairs it, and the buffer is an approximation
/// being refined anyway.
pub struct RenderTarget {
  width    : usize,
  height   : usize,
  channels : Box< [ AtomicU32 ] >
}

impl RenderTarget {
  /// A buffer filled with the sky colour.
  pub fn new( width : usize, height : usize ) -> RenderTarget {
    let mut channels = Vec::with_capacity( width * height * 3 );
    for _i in 0..( width * height ) {
      channels.push( AtomicU32::new( SKY_COLOR.x.to_bits( ) ) );
      channels.push( AtomicU32::new( SKY_COLOR.y.to_bits( ) ) );
      channels.push( AtomicU32::new( SKY_COLOR.z.to_bits( ) ) );
    }

    RenderTarget { width, height, channels: channels.into_boxed_slice( ) }
  }

  pub fn width( &self ) -> usize {
    self.width
  }

  pub fn height( &self ) -> usize {
    self.height
  }

  /// Writes one pixel. Callable from many threads at once; the lane that
  /// samples a pixel last wins.
  pub fn write( &self, x : usize, y : usize, v : Vec3 ) {
    let i = ( y * self.width + x ) * 3;
    self.channels[ i     ].store( v.x.to_bits( ), Ordering::Relaxed );
    self.channels[ i + 1 ].store( v.y.to_bits( ), Ordering::Relaxed );
    self.channels[ i + 2 ].store( v.z.to_bits( ), Ordering::Relaxed );
  }

  pub fn read( &self, x : usize, y : usize ) -> Vec3 {
    let i = ( y * self.width + x ) * 3;
    Vec3::new(
      f32::from_bits( self.channels[ i     ].load( Ordering::Relaxed ) ),
      f32::from_bits( self.channels[ i + 1 ].load( Ordering::Relaxed ) ),
      f32::from_bits( self.channels[ i + 2 ].load( Ordering::Relaxed ) ) )
  }

  /// Copies the current frame into `out` (row-major, `width * height`
  /// entries), e.g. for one presenter upload.
  pub fn snapshot( &self, out : &mut [ Vec3 ] ) {
    debug_assert_eq!( out.len( ), self.width * self.height );

    for y in 0..self.height {
      for x in 0..self.width {
        out[ y * self.width + x ] = self.read( x, y );
      }
    }
  }
}
