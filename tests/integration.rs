use branchlet_engine::BranchletEngine;
use branchlet_engine::geom::{
    BranchletError, BranchletMode, Branchlets, Point3, Segment, Skeleton, Vec3, vector_polar,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_segments(rng: &mut StdRng, count: usize) -> Vec<Segment> {
    let mut radius = rng.random_range(0.05..0.3);
    (0..count)
        .map(|_| {
            let direction = Vec3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(0.2..1.5),
                rng.random_range(-1.0..1.0),
            );
            radius *= rng.random_range(0.6..1.0);
            Segment::new(direction, radius)
        })
        .collect()
}

fn distance(a: [f64; 3], b: Point3) -> f64 {
    Point3::from_array(a).distance_to(b)
}

#[test]
fn random_skeletons_produce_consistent_buffers() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let sides = rng.random_range(2..12usize);
        let segment_count = rng.random_range(1..7usize);
        let segments = random_segments(&mut rng, segment_count);
        let start = Point3::new(
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
        );
        let skeleton = Skeleton::new(start, segments.clone()).expect("skeleton");

        let branchlets = Branchlets::create(start, sides, &segments, 0.0).expect("branchlet");
        let buffers = branchlets.buffers();
        buffers.validate().expect("valid buffers");

        assert_eq!(buffers.vertex_count(), (segment_count + 1) * sides + 1);
        assert_eq!(buffers.uv_connects().len(), buffers.face_connects().len());
        let corner_total: u32 = buffers.face_counts().iter().sum();
        assert_eq!(corner_total as usize, buffers.face_connects().len());

        // End rings are circles of the end segment radius.
        let positions = buffers.positions();
        let first_radius = segments[0].radius();
        for p in &positions[..sides] {
            assert!((distance(*p, start) - first_radius).abs() < 1e-9);
        }
        let tip = skeleton.tip();
        let last = segments[segment_count - 1];
        let last_ring = segment_count * sides;
        for p in &positions[last_ring..last_ring + sides] {
            assert!((distance(*p, tip) - last.radius()).abs() < 1e-9);
        }

        let cap = positions[positions.len() - 1];
        assert!((distance(cap, tip) - last.radius()).abs() < 1e-9);
    }
}

#[test]
fn tube_v_never_decreases_along_a_column() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let sides = rng.random_range(3..10usize);
        let segment_count = rng.random_range(1..6usize);
        let segments = random_segments(&mut rng, segment_count);
        let v_offset = rng.random_range(0.0..20.0);

        let branchlets =
            Branchlets::create(Point3::ORIGIN, sides, &segments, v_offset).expect("tube");
        let uvs = branchlets.buffers().uvs();
        let stride = sides + 1;

        for column in 0..stride {
            assert_eq!(uvs[column][1], v_offset);
            for ring in 1..=segment_count {
                let below = uvs[(ring - 1) * stride + column][1];
                let here = uvs[ring * stride + column][1];
                assert!(here >= below, "column {column} ring {ring}: {here} < {below}");
            }
        }
        for ring in 0..=segment_count {
            assert_eq!(uvs[ring * stride + sides][1], uvs[ring * stride][1]);
        }
    }
}

#[test]
fn polar_round_trips_random_vectors() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..1000 {
        let angle = rng.random_range(0.0..std::f64::consts::TAU);
        let length = rng.random_range(1e-3..1e3);
        let polar = vector_polar(length * angle.cos(), length * angle.sin());
        let diff = (polar - angle).abs();
        assert!(diff < 1e-9 || (std::f64::consts::TAU - diff) < 1e-9);
    }
}

#[test]
fn batch_of_random_skeletons_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(99);
    let batch: Vec<(Skeleton, f64)> = (0..16)
        .map(|i| {
            let count = rng.random_range(1..5usize);
            let start = Point3::new(f64::from(i), 0.0, 0.0);
            let skeleton = Skeleton::new(start, random_segments(&mut rng, count)).expect("skeleton");
            (skeleton, f64::from(i) * 2.0)
        })
        .collect();

    let mut sequential = Branchlets::new(7).expect("tube");
    for (skeleton, v_offset) in &batch {
        sequential.add_skeleton(skeleton, *v_offset).expect("add");
    }

    let mut batched = Branchlets::new(7).expect("tube");
    batched.add_batch(&batch).expect("batch");

    assert_eq!(batched.buffers(), sequential.buffers());
    assert_eq!(batched.diagnostics().branchlet_count, 16);
    assert_eq!(
        batched.diagnostics().degenerate_joint_count,
        sequential.diagnostics().degenerate_joint_count
    );
}

#[test]
fn empty_skeleton_is_an_error() {
    assert_eq!(
        Skeleton::new(Point3::ORIGIN, Vec::new()),
        Err(BranchletError::EmptySkeleton)
    );
    let mut branchlets = Branchlets::new(BranchletMode::Strip.sides()).expect("strip");
    assert_eq!(
        branchlets.add_one(Point3::ORIGIN, &[], 0.0),
        Err(BranchletError::EmptySkeleton)
    );
}

#[test]
fn engine_builds_several_branchlets() {
    let mut engine = BranchletEngine::new(5);
    for i in 0..3 {
        let x = f64::from(i);
        assert!(engine
            .add_branchlet(&[x, 0.0, 0.0], &[0.0, 1.0, 0.0, 0.2, 1.0, 0.0], &[0.1, 0.05], x)
            .is_ok());
    }

    assert_eq!(engine.vertex_count(), 3 * (3 * 5 + 1));
    assert_eq!(engine.face_count(), 3 * (2 * 5 + 5));
    assert_eq!(engine.uv_count(), 3 * (3 * 6 + 5));
    assert!(engine.is_buildable());
    assert!(engine.warning_messages().is_empty());
    assert!(engine.diagnostics_summary().starts_with("B:3 "));
}
