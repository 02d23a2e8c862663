// External imports
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// Local imports
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::hit::HitRecord;
use crate::ray::Ray;
use crate::render_target::RenderTarget;
use crate::simd::{self, LANES};
use crate::sphereflake::SphereFlake;
use crate::vec3::Vec3;

/// Camera origin at startup, and the one the presenter resets to.
pub const DEFAULT_CAMERA : Vec3 = Vec3 { x: 0.0, y: 0.0, z: 5.0 };

// The camera origin shared with the workers. The components are stored
// relaxed and independently; a worker reading during a presenter move can
// see a mixed origin, which costs one stale sample at worst.
struct SharedCamera {
  x : AtomicU32,
  y : AtomicU32,
  z : AtomicU32
}

impl SharedCamera {
  fn new( v : Vec3 ) -> SharedCamera {
    SharedCamera {
      x: AtomicU32::new( v.x.to_bits( ) ),
      y: AtomicU32::new( v.y.to_bits( ) ),
      z: AtomicU32::new( v.z.to_bits( ) )
    }
  }

  fn store( &self, v : Vec3 ) {
    self.x.store( v.x.to_bits( ), Ordering::Relaxed );
    self.y.store( v.y.to_bits( ), Ordering::Relaxed );
    self.z.store( v.z.to_bits( ), Ordering::Relaxed );
  }

  fn load( &self ) -> Vec3 {
    Vec3::new(
      f32::from_bits( self.x.load( Ordering::Relaxed ) ),
      f32::from_bits( self.y.load( Ordering::Relaxed ) ),
      f32::from_bits( self.z.load( Ordering::Relaxed ) ) )
  }
}

// Everything the workers share with the presenter-facing handle.
struct Shared {
  target : RenderTarget,
  camera : SharedCamera,
  flake  : SphereFlake,
  quit   : AtomicBool
}

/// The render coordinator. Owns the frame buffer, the fractal tables and a
/// pool of worker threads that refine the buffer from random samples for as
/// long as the engine lives.
///
/// The presenter drives it with [`Engine::update`] once per frame and reads
/// the current image back through [`Engine::buffer`].
pub struct Engine {
  shared  : Arc< Shared >,
  workers : Vec< thread::JoinHandle< ( ) > >
}

impl Engine {
  /// Spawns one render worker per hardware thread, minus one core kept free
  /// for the presenter.
  pub fn new( camera : Vec3 ) -> Engine {
    if !simd::available( ) {
      warn!( "the compiled SIMD backend is not supported by this CPU" );
    }

    let shared = Arc::new( Shared {
      target: RenderTarget::new( SCREEN_WIDTH, SCREEN_HEIGHT ),
      camera: SharedCamera::new( camera ),
      flake:  SphereFlake::new( ),
      quit:   AtomicBool::new( false )
    } );

    let worker_count = thread::available_parallelism( )
      .map( |n| n.get( ) )
      .unwrap_or( 2 )
      .saturating_sub( 1 )
      .max( 1 );
    info!( "spawning {} render workers, {} rays per packet", worker_count, LANES );

    let mut workers = Vec::with_capacity( worker_count );
    for _i in 0..worker_count {
      let shared = Arc::clone( &shared );
      workers.push( thread::spawn( move || render_worker( &shared ) ) );
    }

    Engine { shared, workers }
  }

  /// Publishes a new camera origin; workers pick it up with their next
  /// sample.
  pub fn update( &self, camera : Vec3 ) {
    self.shared.camera.store( camera );
  }

  /// The live frame buffer, for one presenter upload.
  pub fn buffer( &self ) -> &RenderTarget {
    &self.shared.target
  }

  /// Stops and joins all workers. Safe to call more than once; also runs on
  /// drop.
  pub fn shutdown( &mut self ) {
    self.shared.quit.store( true, Ordering::Release );
    for worker in self.workers.drain( .. ) {
      let _ = worker.join( );
    }
    debug!( "render workers joined" );
  }
}

impl Drop for Engine {
  fn drop( &mut self ) {
    self.shutdown( );
  }
}

// The endless per-thread refinement loop: pick a random packet-aligned
// pixel strip, trace it through the fractal, write `LANES` colours back.
fn render_worker( shared : &Shared ) {
  let seed = SystemTime::now( )
    .duration_since( UNIX_EPOCH )
    .map( |d| d.as_nanos( ) as u64 )
    .unwrap_or( 0 );
  let mut rng = SmallRng::seed_from_u64( seed );

  loop {
    let x = rng.gen_range( 0..SCREEN_WIDTH / LANES ) * LANES;
    let y = rng.gen_range( 0..SCREEN_HEIGHT );

    let ray = Ray::cast_rays( shared.camera.load( ), x, y );
    let mut records = HitRecord::new( );

    shared.flake.intersect( &ray, &mut records );

    for k in 0..LANES {
      shared.target.write( x + k, y, records.extract_color( &ray, k ) );
    }

    if shared.quit.load( Ordering::Acquire ) {
      return;
    }
  }
}
