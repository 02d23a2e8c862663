// Local imports
use crate::config::{PIXEL_AT_DISTANCE, SPHERE_RATIO, STARTING_RADIUS,
                    TOTAL_SPHERES_COUNT, TYPE1_SPHERES_COUNT, TYPE1_SPHERES_DEGREE,
                    TYPE1_SPHERES_ROTATION, TYPE2_SPHERES_COUNT, TYPE2_SPHERES_DEGREE,
                    TYPE2_SPHERES_ROTATION};
use crate::hit::HitRecord;
use crate::ray::Ray;
use crate::simd::{SimdBool, SimdF32, SimdVec3};
use crate::vec3::Vec3;

/// One past the last depth whose squared radius is still a positive `f32`;
/// recursion below it cannot contribute a hit.
pub const MAX_DEPTH : usize = max_depth( );

const fn max_depth( ) -> usize {
  let mut radius = STARTING_RADIUS;
  let mut depth = 1;
  while radius * radius > 0.0 {
    radius /= 3.0;
    depth += 1;
  }
  depth
}

/// Sphere radius per recursion depth; each level shrinks by `SPHERE_RATIO`.
pub const RADII : [ f32; MAX_DEPTH + 1 ] = radii( );

const fn radii( ) -> [ f32; MAX_DEPTH + 1 ] {
  let mut rs = [ 0.0; MAX_DEPTH + 1 ];
  rs[ 0 ] = STARTING_RADIUS;
  let mut d = 1;
  while d <= MAX_DEPTH {
    rs[ d ] = rs[ d - 1 ] * SPHERE_RATIO;
    d += 1;
  }
  rs
}

/// One sphere of the fractal during traversal. The direction is the axis the
/// sphere's own children are placed around.
#[derive(Copy,Clone)]
pub struct Sphere {
  pub center    : Vec3,
  pub direction : Vec3
}

/// The recursive sphere fractal: a unit sphere at the origin with its axis
/// along +y, each sphere carrying six equatorial and three tilted children a
/// third of its size. Child placement only depends on the child index, so the
/// sines and cosines involved are tabled once up front.
pub struct SphereFlake {
  rotate_sin : [ f32; TOTAL_SPHERES_COUNT ],
  rotate_cos : [ f32; TOTAL_SPHERES_COUNT ],
  polar_sin  : [ f32; TOTAL_SPHERES_COUNT ],
  polar_cos  : [ f32; TOTAL_SPHERES_COUNT ]
}

impl SphereFlake {
  pub fn new( ) -> SphereFlake {
    let angle1 = ( 360.0 / TYPE1_SPHERES_COUNT as f32 ).to_radians( );
    let angle2 = ( 360.0 / TYPE2_SPHERES_COUNT as f32 ).to_radians( );
    let phase1 = TYPE1_SPHERES_ROTATION.to_radians( );
    let phase2 = TYPE2_SPHERES_ROTATION.to_radians( );

    let mut rotate_sin = [ 0.0; TOTAL_SPHERES_COUNT ];
    let mut rotate_cos = [ 0.0; TOTAL_SPHERES_COUNT ];
    for k in 0..TYPE1_SPHERES_COUNT {
      rotate_sin[ k ] = ( phase1 + angle1 * k as f32 ).sin( );
      rotate_cos[ k ] = ( phase1 + angle1 * k as f32 ).cos( );
    }
    for k in 0..TYPE2_SPHERES_COUNT {
      rotate_sin[ TYPE1_SPHERES_COUNT + k ] = ( phase2 + angle2 * k as f32 ).sin( );
      rotate_cos[ TYPE1_SPHERES_COUNT + k ] = ( phase2 + angle2 * k as f32 ).cos( );
    }

    let polar1 = TYPE1_SPHERES_DEGREE.to_radians( );
    let polar2 = TYPE2_SPHERES_DEGREE.to_radians( );

    let mut polar_sin = [ 0.0; TOTAL_SPHERES_COUNT ];
    let mut polar_cos = [ 0.0; TOTAL_SPHERES_COUNT ];
    for k in 0..TYPE1_SPHERES_COUNT {
      polar_sin[ k ] = polar1.sin( );
      polar_cos[ k ] = polar1.cos( );
    }
    for k in 0..TYPE2_SPHERES_COUNT {
      polar_sin[ TYPE1_SPHERES_COUNT + k ] = polar2.sin( );
      polar_cos[ TYPE1_SPHERES_COUNT + k ] = polar2.cos( );
    }

    SphereFlake { rotate_sin, rotate_cos, polar_sin, polar_cos }
  }

  /// Updates `records` with the closest fractal hit in every lane of the
  /// packet.
  pub fn intersect( &self, ray : &Ray, records : &mut HitRecord ) {
    let root = Sphere {
      center:    Vec3::ZERO,
      direction: Vec3::new( 0.0, 1.0, 0.0 )
    };

    self.intersect_recurs( ray, &root, Vec3::new( 0.0, 0.0, 1.0 ), 0, records );
  }

  fn intersect_recurs( &self, ray : &Ray, current : &Sphere, par_dir : Vec3,
                       depth : usize, records : &mut HitRecord ) {
    if depth == MAX_DEPTH {
      return;
    }

    // A sphere of twice the radius bounds the sphere and all its
    // descendants; if no lane reaches it the whole subtree is skipped.
    if !self.sphere_intersect( ray, current.center, depth, true, records ).any( ) {
      return;
    }

    self.sphere_intersect( ray, current.center, depth, false, records );

    let child_radius = RADII[ depth + 1 ];
    let rad_dist = RADII[ depth ] + child_radius;
    let camera = ray.origin( ).extract( 0 );

    for i in 0..TOTAL_SPHERES_COUNT {
      let child = self.child_sphere( current, par_dir, rad_dist, i );

      // Discard children that are under a pixel on screen, or that the
      // camera is inside of.
      let dist = ( camera - child.center ).len( );
      let pixel_size = PIXEL_AT_DISTANCE * child_radius / dist;
      if pixel_size < 1.0 || dist < child_radius {
        continue;
      }

      self.intersect_recurs( ray, &child, current.direction, depth + 1, records );
    }
  }

  /// Places child `i` on the surface of `current`, touching it. `par_dir` is
  /// the direction of the sphere one level up, which anchors the azimuth
  /// frame on the parent's surface.
  fn child_sphere( &self, current : &Sphere, par_dir : Vec3, rad_dist : f32,
                   i : usize ) -> Sphere {
    let perp1 = current.direction.cross( par_dir ).normalize( );
    let perp2 = current.direction.cross( perp1 ).normalize( );

    let rot = perp1 * ( self.polar_sin[ i ] * self.rotate_cos[ i ] )
            + perp2 * ( self.polar_sin[ i ] * self.rotate_sin[ i ] );
    let new_dir = rot + current.direction * self.polar_cos[ i ];

    Sphere {
      center:    new_dir * rad_dist + current.center,
      direction: new_dir.normalize( )
    }
  }

  /// Intersects the packet with a single sphere of the depth's radius and
  /// returns the mask of lanes with a non-negative discriminant. With
  /// `bounding` the radius is doubled and the record stays untouched;
  /// otherwise every lane whose stable root falls inside the record's
  /// `(min, max)` window adopts the hit.
  fn sphere_intersect( &self, ray : &Ray, center : Vec3, depth : usize,
                       bounding : bool, hit : &mut HitRecord ) -> SimdBool {
    let ra = RADII[ depth ];
    let radius_sqr = SimdF32::splat( ra * ra * if bounding { 4.0 } else { 1.0 } );

    let center = SimdVec3::splat( center );
    let deltap = center - *ray.origin( );
    let ddp = ray.direction( ).dot( deltap );

    let remedy_term = deltap - ray.direction( ).scale( ddp );
    let discrim = radius_sqr - remedy_term.dot( remedy_term );

    let compare_res = discrim.ge( SimdF32::splat( 0.0 ) );
    if bounding || !compare_res.any( ) {
      return compare_res;
    }

    // Stable quadratic root per "Numerical Recipes in C" (Press et al.):
    // take the root away from the cancellation. Lanes with a negative
    // discriminant produce NaN here and fail the range check below.
    let sqrt_val = discrim.sqrt( );
    let ddp_ge = ddp.ge( SimdF32::splat( 0.0 ) );
    let result = ddp_ge.select( ddp + sqrt_val, ddp - sqrt_val );

    let cmp_range = result.in_range( hit.min, hit.max );

    hit.max           = cmp_range.select( result, hit.max );
    hit.result        = cmp_range.select( result, hit.result );
    hit.sphere_center = cmp_range.select_vec3( center, hit.sphere_center );
    hit.radius        = cmp_range.select( radius_sqr, hit.radius );
    hit.level         = cmp_range.select( SimdF32::splat( depth as f32 ), hit.level );

    compare_res
  }
}
