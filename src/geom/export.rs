//! Text exports of a buffer set: Wavefront OBJ and a quantized snapshot
//! format for golden comparisons.

use std::fmt::Write as _;
use std::io;

use super::buffers::MeshBuffers;

const SNAPSHOT_QUANTIZE: f64 = 1e-6;
pub const SNAPSHOT_DECIMALS: usize = 6;

/// Writes `buffers` as an OBJ object named `name`.
///
/// Faces keep their quad/triangle arity and reference both vertex and UV
/// (`f v/vt ...`, 1-based), so the tube seam survives the round trip.
pub fn write_obj<W: io::Write>(w: &mut W, buffers: &MeshBuffers, name: &str) -> io::Result<()> {
    writeln!(w, "# branchlet-engine")?;
    writeln!(w, "o {name}")?;

    for p in buffers.positions() {
        writeln!(w, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for uv in buffers.uvs() {
        writeln!(w, "vt {} {}", uv[0], uv[1])?;
    }

    let mut offset = 0usize;
    for &count in buffers.face_counts() {
        let count = count as usize;
        let range = offset..offset + count;
        let (Some(face), Some(face_uvs)) = (
            buffers.face_connects().get(range.clone()),
            buffers.uv_connects().get(range),
        ) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "face counts exceed the index buffers",
            ));
        };

        write!(w, "f")?;
        for (v, vt) in face.iter().zip(face_uvs) {
            write!(w, " {}/{}", v + 1, vt + 1)?;
        }
        writeln!(w)?;
        offset += count;
    }

    Ok(())
}

fn quantize_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
    // Collapse -0.0 so mirrored rings print identically.
    if q == 0.0 { 0.0 } else { q }
}

fn write_f64(out: &mut String, value: f64) {
    let value = quantize_f64(value);
    let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
}

fn write_values_line(out: &mut String, prefix: &str, values: &[f64]) {
    out.push_str(prefix);
    for &value in values {
        out.push(' ');
        write_f64(out, value);
    }
    out.push('\n');
}

fn write_index_line(out: &mut String, prefix: &str, indices: &[u32]) {
    out.push_str(prefix);
    for index in indices {
        let _ = write!(out, " {index}");
    }
    out.push('\n');
}

/// Line-oriented, quantized dump of every buffer, stable across platforms.
#[must_use]
pub fn write_snapshot(op: &str, buffers: &MeshBuffers) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# branchlet-engine golden v1");
    let _ = writeln!(out, "op {op}");
    let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");

    let _ = writeln!(out, "buffers.vertex_count {}", buffers.vertex_count());
    let _ = writeln!(out, "buffers.face_count {}", buffers.face_count());
    let _ = writeln!(out, "buffers.uv_count {}", buffers.uv_count());

    for p in buffers.positions() {
        write_values_line(&mut out, "p", p);
    }

    let mut offset = 0usize;
    for &count in buffers.face_counts() {
        let range = offset..offset + count as usize;
        if let (Some(face), Some(face_uvs)) = (
            buffers.face_connects().get(range.clone()),
            buffers.uv_connects().get(range),
        ) {
            write_index_line(&mut out, "f", face);
            write_index_line(&mut out, "fuv", face_uvs);
        }
        offset += count as usize;
    }

    for uv in buffers.uvs() {
        write_values_line(&mut out, "uv", uv);
    }

    out
}
