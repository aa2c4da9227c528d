use branchlet_engine::geom::{Branchlets, Point3, Segment, Vec3, write_snapshot};

fn normalize_snapshot_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    if normalized.ends_with('\n') {
        normalized
    } else {
        format!("{normalized}\n")
    }
}

fn assert_snapshot(op: &str, branchlets: &Branchlets, expected: &str) {
    branchlets
        .buffers()
        .validate()
        .expect("buffers should be internally consistent");
    let actual = normalize_snapshot_text(&write_snapshot(op, branchlets.buffers()));
    let expected = normalize_snapshot_text(expected);
    assert_eq!(actual, expected, "golden mismatch for `{op}`");
}

#[test]
fn golden_strip_single() {
    let branchlets = Branchlets::create(
        Point3::ORIGIN,
        2,
        &[Segment::new(Vec3::new(0.0, 1.0, 0.0), 0.5)],
        0.0,
    )
    .expect("strip");

    assert_snapshot(
        "strip_single",
        &branchlets,
        "\
# branchlet-engine golden v1
op strip_single
quantize 1.0e-6
buffers.vertex_count 5
buffers.face_count 2
buffers.uv_count 5
p 0.500000 0.000000 0.000000
p -0.500000 0.000000 0.000000
p 0.500000 1.000000 0.000000
p -0.500000 1.000000 0.000000
p 0.000000 1.500000 0.000000
f 0 1 3 2
fuv 0 1 3 2
f 2 3 4
fuv 2 3 4
uv 0.000000 0.000000
uv 1.000000 0.000000
uv 0.000000 1.000000
uv 1.000000 1.000000
uv 0.500000 1.707107
",
    );
}

#[test]
fn golden_square_tube_single() {
    let branchlets = Branchlets::create(
        Point3::ORIGIN,
        4,
        &[Segment::new(Vec3::new(0.0, 1.0, 0.0), 1.0)],
        0.0,
    )
    .expect("tube");

    assert_snapshot(
        "square_tube_single",
        &branchlets,
        "\
# branchlet-engine golden v1
op square_tube_single
quantize 1.0e-6
buffers.vertex_count 9
buffers.face_count 8
buffers.uv_count 14
p 1.000000 0.000000 0.000000
p 0.000000 0.000000 -1.000000
p -1.000000 0.000000 0.000000
p 0.000000 0.000000 1.000000
p 1.000000 1.000000 0.000000
p 0.000000 1.000000 -1.000000
p -1.000000 1.000000 0.000000
p 0.000000 1.000000 1.000000
p 0.000000 2.000000 0.000000
f 0 1 5 4
fuv 0 1 6 5
f 1 2 6 5
fuv 1 2 7 6
f 2 3 7 6
fuv 2 3 8 7
f 3 0 4 7
fuv 3 4 9 8
f 4 5 8
fuv 5 6 10
f 5 6 8
fuv 6 7 11
f 6 7 8
fuv 7 8 12
f 7 4 8
fuv 8 9 13
uv 0.000000 0.000000
uv 0.250000 0.000000
uv 0.500000 0.000000
uv 0.750000 0.000000
uv 1.000000 0.000000
uv 0.000000 0.176777
uv 0.250000 0.176777
uv 0.500000 0.176777
uv 0.750000 0.176777
uv 1.000000 0.176777
uv 0.125000 0.426777
uv 0.375000 0.426777
uv 0.625000 0.426777
uv 0.875000 0.426777
",
    );
}
