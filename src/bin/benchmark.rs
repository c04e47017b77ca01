//! Headless timing of every backend on the demo workloads

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use gpu_compute_demo::application::measure;
use gpu_compute_demo::compute::{Backend, BackendSet, ComputeError};
use gpu_compute_demo::config::{DEFAULT_LOOP_COUNT, SUM_GRID_SIZE};
use gpu_compute_demo::domain::{LifeGrid, LifeRule};

/// Serial CPU runs are skipped above these sizes, they take too long
const SERIAL_COLOR_LIMIT: usize = 64;
const SERIAL_LIFE_LIMIT: usize = 1024;

fn format_ms(ms: Option<f64>) -> String {
    match ms {
        Some(ms) => format!("{ms:>12.2}"),
        None => format!("{:>12}", "-"),
    }
}

fn format_speedup(slow: Option<f64>, fast: Option<f64>) -> String {
    match (slow, fast) {
        (Some(slow), Some(fast)) if fast > 0.0 => format!("{:>9.1}x", slow / fast),
        _ => format!("{:>10}", "-"),
    }
}

/// Mean ms per call of `random_colors`, after one untimed warm-up call
/// that also builds the GPU kernel for this size
fn bench_colors(
    backends: &mut BackendSet,
    backend: Backend,
    size: usize,
    loop_count: u32,
    iterations: u32,
) -> Result<Option<f64>> {
    if !backends.is_available(backend) {
        return Ok(None);
    }
    let compute = backends.get_mut(backend)?;
    compute
        .random_colors(size, loop_count)
        .with_context(|| format!("{backend} warm-up for {size}x{size} colors"))?;

    let (result, ms) = measure(|| -> Result<(), ComputeError> {
        for _ in 0..iterations {
            compute.random_colors(size, loop_count)?;
        }
        Ok(())
    });
    result.with_context(|| format!("{backend} {size}x{size} colors"))?;
    Ok(Some(f64::from(ms) / f64::from(iterations)))
}

/// Mean ms per generation over `iterations` generations
fn bench_life(
    backends: &mut BackendSet,
    backend: Backend,
    start: &LifeGrid,
    rule: &LifeRule,
    iterations: u32,
) -> Result<Option<f64>> {
    if !backends.is_available(backend) {
        return Ok(None);
    }
    let compute = backends.get_mut(backend)?;
    let mut grid = compute
        .life_step(start, rule)
        .with_context(|| format!("{backend} life warm-up"))?;

    let (result, ms) = measure(|| -> Result<(), ComputeError> {
        for _ in 0..iterations {
            grid = compute.life_step(&grid, rule)?;
        }
        Ok(())
    });
    let (w, h) = start.dimensions();
    result.with_context(|| format!("{backend} life {w}x{h}"))?;
    Ok(Some(f64::from(ms) / f64::from(iterations)))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut backends = BackendSet::detect();
    match backends.gpu_adapter_name() {
        Some(name) => println!("GPU: {name}"),
        None => println!("GPU: none, GPU columns show '-'"),
    }
    println!("CPU threads: {}\n", rayon::current_num_threads());

    let sum_backend = backends.resolve(Backend::Gpu);
    let sum = backends
        .get_mut(sum_backend)?
        .sum_grid(SUM_GRID_SIZE, SUM_GRID_SIZE)
        .context("sum grid")?;
    println!("=== Sum grid {SUM_GRID_SIZE}x{SUM_GRID_SIZE} on {sum_backend} ===\n");
    for row in sum.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
        println!("{}", cells.join(""));
    }

    let loop_count = DEFAULT_LOOP_COUNT;
    println!("\n=== Random color matrix, {loop_count} draws per cell (ms) ===\n");
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>10}",
        "Size", "GPU", "CPU+Par", "CPU", "Speedup"
    );
    println!("{:-<60}", "");
    for size in [8, 16, 32, 64, 128] {
        let iterations = 3;
        let gpu = bench_colors(&mut backends, Backend::Gpu, size, loop_count, iterations)?;
        let parallel = bench_colors(&mut backends, Backend::CpuParallel, size, loop_count, iterations)?;
        let serial = if size <= SERIAL_COLOR_LIMIT {
            bench_colors(&mut backends, Backend::Cpu, size, loop_count, iterations)?
        } else {
            None
        };
        println!(
            "{:>10} {} {} {} {}",
            format!("{size}x{size}"),
            format_ms(gpu),
            format_ms(parallel),
            format_ms(serial),
            format_speedup(serial.or(parallel), gpu)
        );
    }

    let rule = LifeRule::conway();
    let mut rng = StdRng::seed_from_u64(0x11fe);
    println!("\n=== Game of Life, {rule}, ms per generation ===\n");
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>10}",
        "Size", "GPU", "CPU+Par", "CPU", "Speedup"
    );
    println!("{:-<60}", "");
    for size in [64, 256, 1024, 2048] {
        let iterations = 20;
        let mut grid = LifeGrid::new(size, size);
        grid.randomize(&mut rng, 0.25);

        let gpu = bench_life(&mut backends, Backend::Gpu, &grid, &rule, iterations)?;
        let parallel = bench_life(&mut backends, Backend::CpuParallel, &grid, &rule, iterations)?;
        let serial = if size <= SERIAL_LIFE_LIMIT {
            bench_life(&mut backends, Backend::Cpu, &grid, &rule, iterations)?
        } else {
            None
        };
        println!(
            "{:>10} {} {} {} {}",
            format!("{size}x{size}"),
            format_ms(gpu),
            format_ms(parallel),
            format_ms(serial),
            format_speedup(serial.or(parallel), gpu)
        );
    }

    Ok(())
}
