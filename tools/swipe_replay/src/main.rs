mod trace;

use std::{cell::Cell, fs, path::PathBuf, rc::Rc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use swipe_engine::{
    ActionBinding, GestureSession, GestureSignal, SurfaceCatalog, SurfaceKind, SwipeConfig,
    SwipeDirection, TouchFrame, TouchSurface,
};

use trace::{parse_expected, parse_trace, ReplaySample};

#[derive(Debug, Parser)]
#[command(name = "swipe_replay")]
#[command(about = "Replay captured touch traces through a gesture session")]
struct Cli {
    /// CSV with `touch_trace,ms,count,x0,y0,x1,y1` rows.
    trace: PathBuf,
    /// Built-in surface preset.
    #[arg(long, default_value = "card", value_parser = parse_surface_kind)]
    surface: SurfaceKind,
    /// Surface catalog TOML; overrides `--surface`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Catalog entry to use; defaults to the preset name.
    #[arg(long = "surface-name", requires = "config")]
    surface_name: Option<String>,
    /// File with one expected outcome label per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// Release emitted after the last sample when a finger is still down.
    #[arg(long = "tail-ms", default_value_t = 200)]
    tail_ms: u64,
}

#[derive(Clone, Debug)]
struct OutcomeRow {
    ms: u64,
    label: &'static str,
    detail: &'static str,
    signal: GestureSignal,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let text = fs::read_to_string(&cli.trace)
        .with_context(|| format!("failed to read {}", cli.trace.display()))?;
    let samples = parse_trace(&text, &cli.trace.display().to_string())?;
    log::info!(
        "replaying {} samples from {}",
        samples.len(),
        cli.trace.display()
    );

    let fired = Rc::new(Cell::new(0usize));
    let mut surface = TouchSurface::new(build_session(config, &fired));
    let rows = replay(&mut surface, &samples, cli.tail_ms);

    println!("outcome,ms,label,detail,x0,y0,x1,y1,distance_px,velocity_px_per_ms");
    for row in &rows {
        println!("{}", format_row(row));
    }

    let committed = rows
        .iter()
        .filter(|row| matches!(row.signal, GestureSignal::Committed(_)))
        .count();
    if committed != fired.get() {
        bail!(
            "handler count mismatch: {committed} commits, {} handler calls",
            fired.get()
        );
    }

    if let Some(expect_path) = &cli.expect {
        let text = fs::read_to_string(expect_path)
            .with_context(|| format!("failed to read {}", expect_path.display()))?;
        let expected = parse_expected(&text, &expect_path.display().to_string())?;
        let actual: Vec<&'static str> = rows.iter().map(|row| row.label).collect();
        if actual != expected {
            eprintln!("expected outcomes: {}", expected.join(","));
            eprintln!("actual outcomes:   {}", actual.join(","));
            bail!("outcome sequence mismatch");
        }
    }

    Ok(())
}

fn parse_surface_kind(raw: &str) -> Result<SurfaceKind, String> {
    SurfaceKind::from_name(raw).ok_or_else(|| {
        let names: Vec<&str> = SurfaceKind::ALL.iter().map(|kind| kind.name()).collect();
        format!("unknown surface '{raw}', expected one of {}", names.join(", "))
    })
}

fn resolve_config(cli: &Cli) -> Result<SwipeConfig> {
    let Some(path) = &cli.config else {
        return Ok(SwipeConfig::for_surface(cli.surface));
    };
    let catalog = SurfaceCatalog::from_path(path)
        .with_context(|| format!("failed to load catalog {}", path.display()))?;
    let name = cli
        .surface_name
        .as_deref()
        .unwrap_or_else(|| cli.surface.name());
    let config = catalog.require(name)?;
    log::info!("using catalog surface '{name}'");
    Ok(config)
}

fn build_session(config: SwipeConfig, fired: &Rc<Cell<usize>>) -> GestureSession {
    let mut session = GestureSession::new(config);
    for direction in SwipeDirection::ALL {
        let fired = Rc::clone(fired);
        session.bind(
            ActionBinding::new(direction, move |report| {
                fired.set(fired.get() + 1);
                log::debug!("handler {} at +{}ms", report.action.label(), report.elapsed_ms);
            })
            .with_label(direction.label()),
        );
    }
    let fired = Rc::clone(fired);
    session.on_tap(move |_| fired.set(fired.get() + 1));
    session
}

fn replay(surface: &mut TouchSurface, samples: &[ReplaySample], tail_ms: u64) -> Vec<OutcomeRow> {
    let mut rows = Vec::new();
    for sample in samples {
        collect(&mut rows, sample.ms, surface.tick(sample.ms, sample.frame));
    }

    // Traces often stop on the last contact frame; release so the gesture resolves.
    let still_touching = samples
        .last()
        .is_some_and(|sample| sample.frame.touch_count > 0);
    if let Some(last) = samples.last().filter(|_| still_touching) {
        let tail = last.ms.saturating_add(tail_ms);
        collect(&mut rows, tail, surface.tick(tail, TouchFrame::RELEASED));
    }
    rows
}

fn collect(rows: &mut Vec<OutcomeRow>, ms: u64, output: swipe_engine::GestureOutput) {
    for signal in output.iter() {
        let (label, detail) = match signal {
            GestureSignal::Committed(report) => (report.action.label(), ""),
            GestureSignal::Abandoned(reason) => ("abandoned", reason.label()),
            GestureSignal::Cancelled => ("cancelled", ""),
            GestureSignal::Started { .. } | GestureSignal::CandidateChanged { .. } => continue,
        };
        rows.push(OutcomeRow {
            ms,
            label,
            detail,
            signal: *signal,
        });
    }
}

fn format_row(row: &OutcomeRow) -> String {
    match row.signal {
        GestureSignal::Committed(report) => format!(
            "outcome,{},{},{},{:.1},{:.1},{:.1},{:.1},{:.1},{:.3}",
            row.ms,
            row.label,
            row.detail,
            report.origin.x,
            report.origin.y,
            report.end.x,
            report.end.y,
            report.distance_px,
            report.velocity_px_per_ms
        ),
        _ => format!("outcome,{},{},{},,,,,,", row.ms, row.label, row.detail),
    }
}
