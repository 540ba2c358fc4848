use crate::shapes::{simplex_along, tetrahedron_dirs, Ball, Cuboid};
use approx::assert_relative_eq;
use pendepth3d::math::{Isometry, Point, Vector};
use pendepth3d::query::epa::{Epa, EpaOptions};
use pendepth3d::query::gjk::ConstantOrigin;

#[test]
fn project_origin_on_ball_boundary() {
    let ball = Ball::new(2.0);
    let m = Isometry::translation(1.8, 0.0, 0.0);
    let dirs = [Vector::x(), -Vector::x()];
    let simplex = simplex_along(&m.inverse(), &ball, &ConstantOrigin, &dirs);
    let options = EpaOptions::default()
        .with_rel_error(1.0e-3)
        .with_capacities(500, 2000);
    let mut epa = Epa::with_options(options);

    let proj = epa
        .project_origin(&m, &ball, &simplex)
        .expect("EPA did not converge.")
        .expect("The origin is not inside of the ball.");
    assert_relative_eq!(proj, Point::new(-2.0, 0.0, 0.0), epsilon = 5.0e-2);
}

#[test]
fn project_origin_on_cuboid_boundary() {
    let cuboid = Cuboid::new(Vector::new(1.0, 2.0, 3.0));
    let m = Isometry::translation(0.2, 0.0, 0.5);
    let simplex = simplex_along(&m.inverse(), &cuboid, &ConstantOrigin, &tetrahedron_dirs());

    let proj = Epa::new()
        .project_origin(&m, &cuboid, &simplex)
        .unwrap()
        .unwrap();
    assert_relative_eq!(proj, Point::new(-1.0, 0.0, -0.5), epsilon = 1.0e-5);
}
