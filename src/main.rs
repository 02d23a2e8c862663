// External imports
use std::fs::File;
use std::io::{BufWriter, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;

// Local imports
use sphereflake::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use sphereflake::hit::SKY_COLOR;
use sphereflake::{Engine, Vec3, DEFAULT_CAMERA};

// Headless counterpart of the windowed presenter, for native debugging and
// benchmarking. It spins up the engine, lets the workers refine the frame
// for a while while reporting how much of the buffer has been sampled, and
// dumps the final image to a PPM file.

const REFINE_SECONDS : u64 = 3;
const REPORT_MILLIS  : u64 = 500;

const OUTPUT_PATH : &str = "sphereflake.ppm";

fn main( ) -> anyhow::Result< ( ) > {
  env_logger::init( );

  let mut engine = Engine::new( DEFAULT_CAMERA );
  let mut frame = vec![ Vec3::ZERO; SCREEN_WIDTH * SCREEN_HEIGHT ];

  let start = Instant::now( );
  while start.elapsed( ) < Duration::from_secs( REFINE_SECONDS ) {
    thread::sleep( Duration::from_millis( REPORT_MILLIS ) );

    engine.buffer( ).snapshot( &mut frame );
    let sampled = frame.iter( ).filter( |p| !is_sky( **p ) ).count( );
    println!( "{:>5} ms: {} of {} pixels off the sky colour",
              start.elapsed( ).as_millis( ), sampled, frame.len( ) );
  }

  engine.buffer( ).snapshot( &mut frame );
  engine.shutdown( );

  write_ppm( OUTPUT_PATH, &frame )?;
  println!( "frame written to {}", OUTPUT_PATH );

  Ok( ( ) )
}

// Pixels that were sampled and missed are rewritten with the sky colour, so
// this undercounts actual samples; good enough as a progress indicator.
fn is_sky( p : Vec3 ) -> bool {
  p.x == SKY_COLOR.x && p.y == SKY_COLOR.y && p.z == SKY_COLOR.z
}

/// Dumps the frame as a binary PPM, clamped to [0,1].
fn write_ppm( path : &str, frame : &[ Vec3 ] ) -> anyhow::Result< ( ) > {
  let file = File::create( path )
    .with_context( || format!( "failed to create {}", path ) )?;
  let mut out = BufWriter::new( file );

  write!( out, "P6\n{} {}\n255\n", SCREEN_WIDTH, SCREEN_HEIGHT )?;
  for p in frame {
    out.write_all( &[ to_byte( p.x ), to_byte( p.y ), to_byte( p.z ) ] )?;
  }

  Ok( ( ) )
}

fn to_byte( v : f32 ) -> u8 {
  ( v.min( 1.0 ).max( 0.0 ) * 255.0 ) as u8
}
