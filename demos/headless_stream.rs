use indexmap::IndexMap;
use streamchart::charts::ChartKind;
use streamchart::core::{SineWaveGenerator, StreamBuffer};
use streamchart::perf::{PerformanceMonitor, default_memory_sampler};
use streamchart::pipeline::Aggregation;
use streamchart::render::NullRenderer;
use streamchart::runtime::{FrameDriver, Scheduler, StreamDriver, latest};
use streamchart::{Dashboard, DashboardConfig};

const START_MS: i64 = 1_700_000_000_000;
const FRAME_MS: i64 = 16;
const RUN_MS: i64 = 3_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = streamchart::telemetry::init_default_tracing();

    let config = DashboardConfig::default().with_aggregation(Aggregation::OneMinute);
    config.validate()?;

    let mut generator = SineWaveGenerator::seeded(42)
        .with_categories(config.categories.iter().map(String::as_str));
    let initial = generator.generate_initial(config.initial_point_count, START_MS);
    let (mut stream, snapshots) =
        StreamDriver::new(StreamBuffer::with_capacity(config.buffer_capacity)?, generator);
    stream.backfill(initial);

    let monitor = PerformanceMonitor::new(
        config.fps_window,
        config.metrics_refresh_ms,
        default_memory_sampler(),
    )?;
    let (frames, timings, metrics) = FrameDriver::new(monitor);

    let scheduler = Scheduler::new(START_MS);
    let _stream_task = scheduler.every(config.tick_interval_ms, stream)?;
    let _frame_task = scheduler.every_frame(frames);

    let mut dashboard = Dashboard::from_config(&config, START_MS)?;
    let mut surfaces: IndexMap<ChartKind, NullRenderer> = ChartKind::ALL
        .into_iter()
        .map(|kind| (kind, NullRenderer::default()))
        .collect();

    let mut now = START_MS;
    while now < START_MS + RUN_MS {
        now += FRAME_MS;
        scheduler.advance_to(now);
        if let Some(snapshot) = latest(&snapshots) {
            let report = dashboard.render_pass(&snapshot, &mut surfaces);
            let _ = timings.send(report.timings);
        }
        if let Some(committed) = latest(&metrics) {
            println!(
                "fps={} memory={:.2}MB points={} processing={:.3}ms render={:.3}ms",
                committed.fps,
                committed.memory_usage_mb,
                committed.data_point_count,
                committed.data_processing_time_ms,
                committed.render_time_ms
            );
        }
    }

    let stats = dashboard.cache_stats();
    println!("pipeline cache: hits={} misses={}", stats.hits, stats.misses);
    for (kind, renderer) in &surfaces {
        println!(
            "{kind}: frames={} last_commands={}",
            renderer.frames_rendered, renderer.last_command_count
        );
    }

    Ok(())
}
