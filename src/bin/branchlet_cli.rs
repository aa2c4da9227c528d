#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("branchlet_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use branchlet_engine::geom::{
        BranchletOptions, Branchlets, Point3, Segment, Skeleton, Vec3, write_obj, write_snapshot,
    };
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const USAGE: &str = r#"branchlet_cli (branchlet-engine)

USAGE:
  branchlet_cli list
  branchlet_cli run <scenario|all> [options]

SCENARIOS:
  straight_tube
  bent_tube
  shallow_joint
  flat_strip
  tuft

OPTIONS (run):
  --out-dir <dir>    Write <scenario>.obj and/or <scenario>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single scenario only)
  --snap <path>      Write golden-style snapshot (single scenario only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut write_obj = true;
        let mut write_snap = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => overwrite = true,
                "--no-obj" => write_obj = false,
                "--no-snap" => write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !write_obj && !write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            if scenario_name == "all" {
                for scenario in Scenario::ALL {
                    run_one_scenario_to_dir(*scenario, dir, write_obj, write_snap, overwrite)?;
                }
                return Ok(());
            }

            let scenario = Scenario::from_str(scenario_name.as_str())
                .ok_or_else(|| unknown_scenario(&scenario_name))?;
            return run_one_scenario_to_dir(scenario, dir, write_obj, write_snap, overwrite);
        }

        if scenario_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let scenario =
            Scenario::from_str(scenario_name.as_str()).ok_or_else(|| unknown_scenario(&scenario_name))?;
        let output = run_scenario(scenario)?;

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{}", output.snapshot);
        }

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &output.branchlets, output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(&output);
        Ok(())
    }

    fn run_one_scenario_to_dir(
        scenario: Scenario,
        dir: &Path,
        write_obj: bool,
        write_snap: bool,
        overwrite: bool,
    ) -> Result<(), String> {
        let output = run_scenario(scenario)?;

        if write_snap {
            let path = dir.join(format!("{}.snap", output.name));
            write_text_file(&path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        if write_obj {
            let path = dir.join(format!("{}.obj", output.name));
            write_obj_file(&path, &output.branchlets, output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(&output);
        Ok(())
    }

    fn report(output: &ScenarioOutput) {
        let buffers = output.branchlets.buffers();
        eprintln!(
            "{}: vertices={} faces={} uvs={} | {}",
            output.name,
            buffers.vertex_count(),
            buffers.face_count(),
            buffers.uv_count(),
            output.branchlets.diagnostics().summary()
        );
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = format!("unknown scenario `{name}`\n\navailable scenarios:\n");
        for scenario in Scenario::ALL {
            msg.push_str("  ");
            msg.push_str(scenario.name());
            msg.push('\n');
        }
        msg
    }

    fn refuse_existing(path: &Path, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        Ok(())
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        refuse_existing(path, overwrite)?;
        fs::write(path, text).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, branchlets: &Branchlets, name: &str, overwrite: bool) -> Result<(), String> {
        branchlets
            .buffers()
            .validate()
            .map_err(|e| format!("buffer validation failed: {e}"))?;
        refuse_existing(path, overwrite)?;

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);
        write_obj(&mut w, branchlets.buffers(), name).map_err(|e| format!("write obj: {e}"))?;
        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    #[derive(Clone, Copy)]
    enum Scenario {
        StraightTube,
        BentTube,
        ShallowJoint,
        FlatStrip,
        Tuft,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::StraightTube,
            Scenario::BentTube,
            Scenario::ShallowJoint,
            Scenario::FlatStrip,
            Scenario::Tuft,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::StraightTube => "straight_tube",
                Scenario::BentTube => "bent_tube",
                Scenario::ShallowJoint => "shallow_joint",
                Scenario::FlatStrip => "flat_strip",
                Scenario::Tuft => "tuft",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            Self::ALL.iter().copied().find(|s| s.name() == name)
        }
    }

    struct ScenarioOutput {
        name: &'static str,
        branchlets: Branchlets,
        snapshot: String,
    }

    fn run_scenario(scenario: Scenario) -> Result<ScenarioOutput, String> {
        let name = scenario.name();
        let branchlets = match scenario {
            Scenario::StraightTube => single(
                4,
                &[
                    Segment::new(Vec3::new(0.0, 1.0, 0.0), 0.1),
                    Segment::new(Vec3::new(0.0, 1.0, 0.0), 0.1),
                ],
            )?,
            Scenario::BentTube => single(8, &bent_segments())?,
            Scenario::ShallowJoint => single(
                6,
                &[
                    Segment::new(Vec3::new(0.0, 1.0, 0.0), 0.5),
                    Segment::new(Vec3::new(0.3, 1.0, 0.0), 0.4),
                ],
            )?,
            Scenario::FlatStrip => single(2, &bent_segments())?,
            Scenario::Tuft => tuft()?,
        };

        Ok(ScenarioOutput {
            name,
            snapshot: write_snapshot(name, branchlets.buffers()),
            branchlets,
        })
    }

    fn bent_segments() -> Vec<Segment> {
        vec![
            Segment::new(Vec3::new(0.0, 1.0, 0.0), 0.3),
            Segment::new(Vec3::new(0.8, 1.0, 0.0), 0.2),
            Segment::new(Vec3::new(0.0, 0.5, 0.9), 0.1),
        ]
    }

    fn single(sides: usize, segments: &[Segment]) -> Result<Branchlets, String> {
        Branchlets::create(Point3::ORIGIN, sides, segments, 0.0).map_err(|e| e.to_string())
    }

    /// Five tapering branchlets fanned around the Y axis, stacked in v.
    fn tuft() -> Result<Branchlets, String> {
        let options = BranchletOptions {
            u_width_multiplier: 1.0,
            texture_aspect: 2.0,
        };
        let mut branchlets = Branchlets::with_options(5, options).map_err(|e| e.to_string())?;

        let batch = (0..5)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::TAU / 5.0;
                let (sin, cos) = angle.sin_cos();
                let segments = vec![
                    Segment::new(Vec3::new(0.3 * cos, 1.0, 0.3 * sin), 0.08),
                    Segment::new(Vec3::new(0.6 * cos, 0.6, 0.6 * sin), 0.05),
                    Segment::new(Vec3::new(0.5 * cos, 0.1, 0.5 * sin), 0.02),
                ];
                let skeleton = Skeleton::new(Point3::ORIGIN, segments).map_err(|e| e.to_string())?;
                Ok((skeleton, f64::from(i) * 4.0))
            })
            .collect::<Result<Vec<_>, String>>()?;

        branchlets.add_batch(&batch).map_err(|e| e.to_string())?;
        Ok(branchlets)
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
