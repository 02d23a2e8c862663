// Boundary scenarios for the packet traversal, checked per lane against a
// one-ray scalar reference tracer that mirrors the traversal rules.

use approx::assert_relative_eq;

use sphereflake::config::{PIXEL_AT_DISTANCE, SCREEN_HEIGHT, SCREEN_WIDTH,
                          TOTAL_SPHERES_COUNT, TYPE1_SPHERES_COUNT,
                          TYPE1_SPHERES_DEGREE, TYPE1_SPHERES_ROTATION,
                          TYPE2_SPHERES_COUNT, TYPE2_SPHERES_DEGREE,
                          TYPE2_SPHERES_ROTATION};
use sphereflake::simd::{self, SimdVec3, LANES};
use sphereflake::sphereflake::{MAX_DEPTH, RADII};
use sphereflake::{HitRecord, Ray, SphereFlake, Vec3};

fn uniform_packet( origin : Vec3, dir : Vec3 ) -> Ray {
  Ray::new( SimdVec3::splat( origin ), SimdVec3::splat( dir ) )
}

// After any traversal a lane either saw nothing (both sentinels) or carries
// a finite t inside the initial window.
fn assert_lane_invariants( records : &HitRecord ) {
  for k in 0..LANES {
    let result = records.result.extract( k );
    let level = records.level.extract( k );

    assert!( !result.is_nan( ) );
    if level < 0.0 {
      assert_eq!( result, -1.0 );
      assert_eq!( level, -1.0 );
    } else {
      assert!( result > HitRecord::DEFAULT_MIN );
      assert!( result <= HitRecord::DEFAULT_MAX );
    }
  }
}

#[test]
fn head_on_ray_records_the_stable_root( ) {
  if !simd::available( ) {
    return;
  }

  let flake = SphereFlake::new( );
  let ray = uniform_packet( Vec3::new( 0.0, 0.0, 5.0 ), Vec3::new( 0.0, 0.0, -1.0 ) );
  let mut records = HitRecord::new( );

  flake.intersect( &ray, &mut records );
  assert_lane_invariants( &records );

  // The stable-root choice keeps t0 + sqrt(D) for t0 >= 0, so the axial ray
  // from (0,0,5) records the far surface of the unit root sphere: t = 6.
  for k in 0..LANES {
    assert_relative_eq!( records.result.extract( k ), 6.0, max_relative = 1e-5 );
    assert_eq!( records.level.extract( k ), 0.0 );
  }
}

#[test]
fn sideways_ray_misses_everything( ) {
  if !simd::available( ) {
    return;
  }

  let flake = SphereFlake::new( );
  let ray = uniform_packet( Vec3::new( 0.0, 0.0, 5.0 ), Vec3::new( 1.0, 0.0, 0.0 ) );
  let mut records = HitRecord::new( );

  flake.intersect( &ray, &mut records );
  assert_lane_invariants( &records );

  for k in 0..LANES {
    assert_eq!( records.result.extract( k ), -1.0 );
    assert_eq!( records.level.extract( k ), -1.0 );
  }
}

#[test]
fn ray_from_inside_the_window_hits_the_root( ) {
  if !simd::available( ) {
    return;
  }

  let flake = SphereFlake::new( );
  let ray = uniform_packet( Vec3::new( 0.0, 0.0, 1.5 ), Vec3::new( 0.0, 0.0, -1.0 ) );
  let mut records = HitRecord::with_range( 0.0, f32::MAX );

  flake.intersect( &ray, &mut records );

  // t0 = 1.5 against the unit root gives the stable root 1.5 + 1.
  for k in 0..LANES {
    assert_relative_eq!( records.result.extract( k ), 2.5, max_relative = 1e-5 );
    assert_eq!( records.level.extract( k ), 0.0 );
  }
}

#[test]
fn distant_camera_descends_no_further_than_the_root( ) {
  if !simd::available( ) {
    return;
  }

  let flake = SphereFlake::new( );
  let ray = uniform_packet( Vec3::new( 0.0, 0.0, 5000.0 ), Vec3::new( 0.0, 0.0, -1.0 ) );
  let mut records = HitRecord::new( );

  flake.intersect( &ray, &mut records );
  assert_lane_invariants( &records );

  // Every child is under a pixel from this far away, so only the root is
  // ever tested.
  for k in 0..LANES {
    assert_relative_eq!( records.result.extract( k ), 5001.0, max_relative = 1e-5 );
    assert_eq!( records.level.extract( k ), 0.0 );
  }
}

#[test]
fn packet_lanes_match_the_scalar_reference( ) {
  if !simd::available( ) {
    return;
  }

  let flake = SphereFlake::new( );
  let camera = Vec3::new( 0.0, 0.0, 5.0 );

  // One strip through the view centre (mostly hits), one towards the screen
  // corner (mostly sky).
  let strips = [ ( SCREEN_WIDTH / 2 - LANES, 2 * SCREEN_HEIGHT / 3 ), ( 0, 300 ) ];

  for &( x, y ) in &strips {
    let ray = Ray::cast_rays( camera, x, y );
    let mut records = HitRecord::new( );
    flake.intersect( &ray, &mut records );
    assert_lane_invariants( &records );

    for k in 0..LANES {
      let expected = ref_trace( camera, ray.direction( ).extract( k ) );
      let result = records.result.extract( k );

      if expected.result == -1.0 {
        assert_eq!( result, -1.0, "lane {} of strip ({},{})", k, x, y );
      } else {
        assert_relative_eq!( result, expected.result, max_relative = 1e-5 );
      }
      assert_eq!( records.level.extract( k ), expected.level,
                  "lane {} of strip ({},{})", k, x, y );
    }
  }
}

// ---------------------------------------------------------------------------
// The reference: the same traversal rules, one ray at a time.

struct RefHit {
  result : f32,
  min    : f32,
  max    : f32,
  level  : f32
}

struct RefTables {
  rotate_sin : [ f32; TOTAL_SPHERES_COUNT ],
  rotate_cos : [ f32; TOTAL_SPHERES_COUNT ],
  polar_sin  : [ f32; TOTAL_SPHERES_COUNT ],
  polar_cos  : [ f32; TOTAL_SPHERES_COUNT ]
}

fn ref_tables( ) -> RefTables {
  let angle1 = ( 360.0 / TYPE1_SPHERES_COUNT as f32 ).to_radians( );
  let angle2 = ( 360.0 / TYPE2_SPHERES_COUNT as f32 ).to_radians( );
  let phase1 = TYPE1_SPHERES_ROTATION.to_radians( );
  let phase2 = TYPE2_SPHERES_ROTATION.to_radians( );
  let polar1 = TYPE1_SPHERES_DEGREE.to_radians( );
  let polar2 = TYPE2_SPHERES_DEGREE.to_radians( );

  let mut t = RefTables {
    rotate_sin: [ 0.0; TOTAL_SPHERES_COUNT ],
    rotate_cos: [ 0.0; TOTAL_SPHERES_COUNT ],
    polar_sin:  [ 0.0; TOTAL_SPHERES_COUNT ],
    polar_cos:  [ 0.0; TOTAL_SPHERES_COUNT ]
  };

  for k in 0..TYPE1_SPHERES_COUNT {
    t.rotate_sin[ k ] = ( phase1 + angle1 * k as f32 ).sin( );
    t.rotate_cos[ k ] = ( phase1 + angle1 * k as f32 ).cos( );
    t.polar_sin[ k ] = polar1.sin( );
    t.polar_cos[ k ] = polar1.cos( );
  }
  for k in 0..TYPE2_SPHERES_COUNT {
    t.rotate_sin[ TYPE1_SPHERES_COUNT + k ] = ( phase2 + angle2 * k as f32 ).sin( );
    t.rotate_cos[ TYPE1_SPHERES_COUNT + k ] = ( phase2 + angle2 * k as f32 ).cos( );
    t.polar_sin[ TYPE1_SPHERES_COUNT + k ] = polar2.sin( );
    t.polar_cos[ TYPE1_SPHERES_COUNT + k ] = polar2.cos( );
  }

  t
}

fn ref_trace( origin : Vec3, dir : Vec3 ) -> RefHit {
  let tables = ref_tables( );
  let mut hit = RefHit { result: -1.0, min: -0.99, max: f32::MAX, level: -1.0 };

  ref_recurs( &tables, origin, dir, Vec3::ZERO, Vec3::new( 0.0, 1.0, 0.0 ),
              Vec3::new( 0.0, 0.0, 1.0 ), 0, &mut hit );
  hit
}

fn ref_sphere( origin : Vec3, dir : Vec3, center : Vec3, radius_sqr : f32,
               depth : f32, record : bool, hit : &mut RefHit ) -> bool {
  let deltap = center - origin;
  let ddp = dir.dot( deltap );
  let remedy = deltap - dir * ddp;
  let discrim = radius_sqr - remedy.dot( remedy );

  if discrim < 0.0 {
    return false;
  }
  if !record {
    return true;
  }

  let s = discrim.sqrt( );
  let t = if ddp >= 0.0 { ddp + s } else { ddp - s };
  if t > hit.min && t < hit.max {
    hit.max = t;
    hit.result = t;
    hit.level = depth;
  }

  true
}

fn ref_recurs( tables : &RefTables, origin : Vec3, dir : Vec3, center : Vec3,
               direction : Vec3, par_dir : Vec3, depth : usize, hit : &mut RefHit ) {
  if depth == MAX_DEPTH {
    return;
  }

  let ra = RADII[ depth ];
  if !ref_sphere( origin, dir, center, ra * ra * 4.0, depth as f32, false, hit ) {
    return;
  }
  ref_sphere( origin, dir, center, ra * ra, depth as f32, true, hit );

  let child_radius = RADII[ depth + 1 ];
  let rad_dist = ra + child_radius;

  for i in 0..TOTAL_SPHERES_COUNT {
    let perp1 = direction.cross( par_dir ).normalize( );
    let perp2 = direction.cross( perp1 ).normalize( );
    let rot = perp1 * ( tables.polar_sin[ i ] * tables.rotate_cos[ i ] )
            + perp2 * ( tables.polar_sin[ i ] * tables.rotate_sin[ i ] );
    let new_dir = rot + direction * tables.polar_cos[ i ];

    let child_center = new_dir * rad_dist + center;
    let child_dir = new_dir.normalize( );

    let dist = ( origin - child_center ).len( );
    if PIXEL_AT_DISTANCE * child_radius / dist < 1.0 || dist < child_radius {
      continue;
    }

    ref_recurs( tables, origin, dir, child_center, child_dir, direction,
                depth + 1, hit );
  }
}
