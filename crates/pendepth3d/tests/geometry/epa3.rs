use crate::shapes::{simplex_along, tetrahedron_dirs, Ball, ConvexPoints, Cuboid};
use approx::assert_relative_eq;
use pendepth3d::math::{Isometry, Point, Real, Vector};
use pendepth3d::query::epa::{Epa, EpaOptions};
use pendepth3d::query::gjk::{CSOPoint, ConstantPoint, Simplex};
use pendepth3d::query::{self, Penetration};
use pendepth3d::shape::SupportMap;

/// Tighter than the defaults, with enough room for the extra triangles it needs.
fn ball_options() -> EpaOptions {
    EpaOptions::default()
        .with_rel_error(1.0e-3)
        .with_capacities(500, 2000)
}

fn assert_ball_ball_contact(penetration: &Penetration) {
    assert_relative_eq!(penetration.depth(), 0.5, epsilon = 1.0e-3);
    assert_relative_eq!(
        penetration.normal().unwrap().into_inner(),
        Vector::x(),
        epsilon = 3.0e-2
    );
    assert_relative_eq!(penetration.point1, Point::new(1.0, 0.0, 0.0), epsilon = 3.0e-2);
    assert_relative_eq!(penetration.point2, Point::new(0.5, 0.0, 0.0), epsilon = 3.0e-2);
}

/// A ball whose support mapping returns the point opposite to the expected one.
struct InvertedBall(Ball);

impl SupportMap for InvertedBall {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.0.local_support_point(&-*dir)
    }
}

#[test]
fn ball_ball_with_default_options() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(1.5, 0.0, 0.0);
    let simplex = simplex_along(&pos12, &ball, &ball, &[Vector::x(), -Vector::x()]);
    let options = EpaOptions::default();

    let penetration = query::penetration_depth(&pos12, &ball, &ball, &simplex, options)
        .expect("EPA did not converge.")
        .expect("Penetration not found.");

    // The depth is never overestimated, and underestimated by at most `rel_error`.
    assert!(penetration.depth() <= 0.5 + 1.0e-5);
    assert!(penetration.depth() >= 0.5 * (1.0 - options.rel_error) - 1.0e-5);
    assert!(penetration.normal().unwrap().dot(&Vector::x()) > 0.99);
}

#[test]
fn ball_ball_from_segment() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(1.5, 0.0, 0.0);
    let simplex = simplex_along(&pos12, &ball, &ball, &[Vector::x(), -Vector::x()]);
    assert_eq!(simplex.len(), 2);

    let penetration = query::penetration_depth(&pos12, &ball, &ball, &simplex, ball_options())
        .expect("EPA did not converge.")
        .expect("Penetration not found.");
    assert_ball_ball_contact(&penetration);
}

#[test]
fn ball_ball_from_triangle() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(1.5, 0.0, 0.0);
    let (sin, cos) = (120.0 as Real).to_radians().sin_cos();
    let dirs = [
        Vector::x(),
        Vector::new(cos, sin, 0.0),
        Vector::new(cos, -sin, 0.0),
    ];
    let simplex = simplex_along(&pos12, &ball, &ball, &dirs);

    let penetration = query::penetration_depth(&pos12, &ball, &ball, &simplex, ball_options())
        .expect("EPA did not converge.")
        .expect("Penetration not found.");
    assert_ball_ball_contact(&penetration);
}

#[test]
fn ball_ball_from_tetrahedron_missing_the_origin() {
    // The four points lie above the origin: the last one is discarded and the
    // remaining triangle is blown up instead.
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(1.5, 0.0, 0.0);
    let dirs = [
        Vector::new(1.0, 0.0, 0.2),
        Vector::new(-0.5, 0.866, 0.2),
        Vector::new(-0.5, -0.866, 0.2),
        Vector::z(),
    ];
    let simplex = simplex_along(&pos12, &ball, &ball, &dirs);

    let penetration = query::penetration_depth(&pos12, &ball, &ball, &simplex, ball_options())
        .expect("EPA did not converge.")
        .expect("Penetration not found.");
    assert_ball_ball_contact(&penetration);
}

#[test]
#[allow(non_snake_case)]
fn cuboid_cuboid_EPA() {
    let c = Cuboid::new(Vector::new(2.0, 1.0, 1.0));
    let m1 = Isometry::translation(3.5, 0.0, 0.0);
    let m2 = Isometry::identity();
    let pos12 = m1.inv_mul(&m2);

    let simplex = simplex_along(&pos12, &c, &c, &tetrahedron_dirs());
    let res = query::penetration_depth(&pos12, &c, &c, &simplex, EpaOptions::default())
        .expect("EPA did not converge.")
        .expect("Penetration not found.");
    assert_relative_eq!(res.depth(), 0.5, epsilon = 1.0e-5);
    assert_relative_eq!(res.vector, -Vector::x() * 0.5, epsilon = 1.0e-5);
    assert_relative_eq!(res.point1.x, -2.0, epsilon = 1.0e-5);
    assert_relative_eq!(res.point2.x, -1.5, epsilon = 1.0e-5);

    let m1 = Isometry::translation(0.0, 0.2, 0.0);
    let pos12 = m1.inv_mul(&m2);

    let simplex = simplex_along(&pos12, &c, &c, &tetrahedron_dirs());
    let res = query::penetration_depth(&pos12, &c, &c, &simplex, EpaOptions::default())
        .expect("EPA did not converge.")
        .expect("Penetration not found.");
    assert_relative_eq!(res.depth(), 1.8, epsilon = 1.0e-5);
    assert_relative_eq!(res.vector, -Vector::y() * 1.8, epsilon = 1.0e-5);
}

#[test]
fn cuboid_matches_its_vertex_cloud() {
    let half_extents = Vector::new(2.0, 1.0, 1.0);
    let cuboid = Cuboid::new(half_extents);
    let cloud = ConvexPoints {
        points: (0..8)
            .map(|i| {
                let sign = |bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
                Point::new(
                    half_extents.x * sign(1),
                    half_extents.y * sign(2),
                    half_extents.z * sign(4),
                )
            })
            .collect(),
    };
    let pos12 = Isometry::translation(-3.5, 0.0, 0.0);

    let simplex = simplex_along(&pos12, &cuboid, &cuboid, &tetrahedron_dirs());
    let expected = query::penetration_depth(&pos12, &cuboid, &cuboid, &simplex, EpaOptions::default())
        .unwrap()
        .unwrap();

    let simplex = simplex_along(&pos12, &cloud, &cloud, &tetrahedron_dirs());
    let res = query::penetration_depth(&pos12, &cloud, &cloud, &simplex, EpaOptions::default())
        .unwrap()
        .unwrap();

    assert_relative_eq!(res.vector, expected.vector, epsilon = 1.0e-5);
}

#[test]
fn touching_contact_has_no_depth() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(2.0, 0.0, 0.0);
    let simplex = simplex_along(&pos12, &ball, &ball, &[Vector::x()]);

    assert_eq!(
        query::penetration_depth(&pos12, &ball, &ball, &simplex, EpaOptions::default()),
        Ok(None)
    );
    assert_eq!(
        query::penetration_depth(&pos12, &ball, &ball, &Simplex::new(), EpaOptions::default()),
        Ok(None)
    );
}

#[test]
fn separated_shapes_have_no_depth() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(3.0, 0.0, 0.0);
    let simplex = simplex_along(&pos12, &ball, &ball, &[Vector::x(), -Vector::x()]);
    let mut epa = Epa::new();

    for _ in 0..2 {
        assert_eq!(epa.closest_points(&pos12, &ball, &ball, &simplex), Ok(None));
    }
}

#[test]
fn collinear_simplex_has_no_depth() {
    let g1 = ConstantPoint(Point::origin());
    let g2 = ConstantPoint(Point::origin());
    let pts: Vec<_> = [1.0, 2.0, -1.0, 3.0]
        .iter()
        .map(|x| CSOPoint::new(Point::new(*x, 0.0, 0.0), Point::origin()))
        .collect();
    let simplex = Simplex::from_points(&pts).unwrap();

    assert_eq!(
        query::penetration_depth(&Isometry::identity(), &g1, &g2, &simplex, EpaOptions::default()),
        Ok(None)
    );
}

#[test]
fn repeated_queries_are_identical() {
    let cuboid = Cuboid::new(Vector::new(2.0, 1.0, 1.0));
    let pos12 = Isometry::translation(-3.4, 0.1, 0.0);
    let simplex = simplex_along(&pos12, &cuboid, &cuboid, &tetrahedron_dirs());

    let fresh = query::penetration_depth(&pos12, &cuboid, &cuboid, &simplex, ball_options())
        .unwrap()
        .expect("Penetration not found.");

    let mut epa = Epa::with_options(ball_options());
    let first = epa.closest_points(&pos12, &cuboid, &cuboid, &simplex).unwrap();

    // Run something else in between to make sure no state leaks across queries.
    let ball = Ball::new(1.0);
    let ball_pos12 = Isometry::translation(1.5, 0.0, 0.0);
    let other = simplex_along(&ball_pos12, &ball, &ball, &[Vector::x(), -Vector::x()]);
    assert!(epa
        .closest_points(&ball_pos12, &ball, &ball, &other)
        .unwrap()
        .is_some());

    let second = epa.closest_points(&pos12, &cuboid, &cuboid, &simplex).unwrap();

    assert_eq!(first, Some(fresh));
    assert_eq!(second, Some(fresh));
}

#[test]
fn converged_polytope_is_a_closed_manifold() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(1.5, 0.0, 0.0);
    let simplex = simplex_along(&pos12, &ball, &ball, &[Vector::x(), -Vector::x()]);
    let mut epa = Epa::with_options(ball_options());

    let penetration = epa
        .closest_points(&pos12, &ball, &ball, &simplex)
        .unwrap()
        .unwrap();
    assert_ball_ball_contact(&penetration);

    assert!(epa.vertices().len() > 5);
    assert!(epa.mesh().free() > 4);
    assert_eq!(epa.mesh().check_topology(), Ok(()));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "behind the polytope")]
fn broken_support_mapping_is_caught_in_debug_builds() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(0.5, 0.0, 0.0);
    let simplex = simplex_along(&pos12, &ball, &ball, &tetrahedron_dirs());
    let inverted = InvertedBall(Ball::new(1.0));

    let options = EpaOptions::default();
    let _ = query::penetration_depth(&pos12, &inverted, &inverted, &simplex, options);
}

#[test]
#[cfg(not(debug_assertions))]
fn broken_support_mapping_has_no_depth_in_release_builds() {
    let ball = Ball::new(1.0);
    let pos12 = Isometry::translation(0.5, 0.0, 0.0);
    let simplex = simplex_along(&pos12, &ball, &ball, &tetrahedron_dirs());
    let inverted = InvertedBall(Ball::new(1.0));

    assert_eq!(
        query::penetration_depth(&pos12, &inverted, &inverted, &simplex, EpaOptions::default()),
        Ok(None)
    );
}
