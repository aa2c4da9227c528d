#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;

use std::fmt;

use geom::{BranchletDiagnostics, Branchlets, MeshBuffers, MeshExport, Point3, Segment, Vec3};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not initialize rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Host-facing accumulator of branchlet geometry.
///
/// Construction never fails: an invalid side count is recorded as a warning and
/// every later call leaves the buffers empty.
#[wasm_bindgen]
pub struct BranchletEngine {
    sides: u32,
    branchlets: Option<Branchlets>,
    /// Engine-level warnings; build counts live on `branchlets`.
    diagnostics: BranchletDiagnostics,
}

#[wasm_bindgen]
impl BranchletEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(sides: u32) -> BranchletEngine {
        let mut diagnostics = BranchletDiagnostics::new();
        let branchlets = match Branchlets::new(sides as usize) {
            Ok(branchlets) => Some(branchlets),
            Err(err) => {
                diagnostics.add_warning(err.to_string());
                None
            }
        };

        BranchletEngine {
            sides,
            branchlets,
            diagnostics,
        }
    }

    #[wasm_bindgen]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Appends one branchlet.
    ///
    /// `start` is `[x, y, z]`, `directions` packs one `[x, y, z]` triple per
    /// segment and `radii` holds one radius per segment.
    #[wasm_bindgen]
    pub fn add_branchlet(
        &mut self,
        start: &[f64],
        directions: &[f64],
        radii: &[f64],
        v_offset: f64,
    ) -> Result<(), JsValue> {
        let Some(branchlets) = self.branchlets.as_mut() else {
            let message = format!("ignoring branchlet: {} sides cannot be built", self.sides);
            debug_log!("{message}");
            self.diagnostics.add_warning(message);
            return Ok(());
        };

        let start = point_from_slice(start).map_err(|err| js_error(&err))?;
        let segments = segments_from_flat(directions, radii).map_err(|err| js_error(&err))?;
        branchlets
            .add_one(start, &segments, v_offset)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn vertex_count(&self) -> usize {
        self.buffers().map_or(0, MeshBuffers::vertex_count)
    }

    #[wasm_bindgen]
    pub fn face_count(&self) -> usize {
        self.buffers().map_or(0, MeshBuffers::face_count)
    }

    #[wasm_bindgen]
    pub fn uv_count(&self) -> usize {
        self.buffers().map_or(0, MeshBuffers::uv_count)
    }

    /// Whether the host would accept the current buffers.
    #[wasm_bindgen]
    pub fn is_buildable(&self) -> bool {
        self.buffers().is_some_and(MeshBuffers::is_buildable)
    }

    #[wasm_bindgen]
    pub fn warnings(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.diagnostics().warnings)
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn diagnostics_summary(&self) -> String {
        self.diagnostics().summary()
    }

    /// Serializes the hand-off buffers (`vertexCount`, `vertices`, `faceCounts`,
    /// `faceConnects`, `us`, `vs`, `uvConnects`).
    #[wasm_bindgen]
    pub fn get_mesh(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.mesh_export()).map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn get_obj(&self, name: &str) -> Result<String, JsValue> {
        let mut bytes = Vec::new();
        let empty = MeshBuffers::new();
        let buffers = self.buffers().unwrap_or(&empty);
        geom::write_obj(&mut bytes, buffers, name).map_err(to_js_error)?;
        String::from_utf8(bytes).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        if let Some(branchlets) = self.branchlets.as_mut() {
            branchlets.clear();
        }
    }
}

impl BranchletEngine {
    fn buffers(&self) -> Option<&MeshBuffers> {
        self.branchlets.as_ref().map(Branchlets::buffers)
    }

    fn mesh_export(&self) -> MeshExport {
        self.buffers().map(MeshBuffers::to_export).unwrap_or_default()
    }

    /// Build diagnostics with the engine's own warnings merged in.
    #[must_use]
    pub fn diagnostics(&self) -> BranchletDiagnostics {
        let mut combined = self
            .branchlets
            .as_ref()
            .map(|b| b.diagnostics().clone())
            .unwrap_or_default();
        combined.merge(&self.diagnostics);
        combined
    }

    /// Warnings recorded so far, for native callers.
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.diagnostics().warnings
    }
}

fn point_from_slice(values: &[f64]) -> Result<Point3, String> {
    match values {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(format!("start point needs 3 coordinates, got {}", values.len())),
    }
}

fn segments_from_flat(directions: &[f64], radii: &[f64]) -> Result<Vec<Segment>, String> {
    if directions.len() % 3 != 0 {
        return Err(format!(
            "directions length {} is not a multiple of 3",
            directions.len()
        ));
    }
    if directions.len() / 3 != radii.len() {
        return Err(format!(
            "{} directions but {} radii",
            directions.len() / 3,
            radii.len()
        ));
    }

    Ok(directions
        .chunks_exact(3)
        .zip(radii)
        .map(|(d, &radius)| Segment::new(Vec3::new(d[0], d[1], d[2]), radius))
        .collect())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
