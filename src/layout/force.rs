use crate::config::ForceConfig;

use super::RelationGraph;
use super::text::hash_string;

const GOLDEN_RATIO: f32 = 1.618_034;
/// Softening term added to squared distances so coincident nodes still repel.
const REPULSION_SOFTENING: f32 = 0.25;
/// Keeps spring directions defined for coincident endpoints.
const SPRING_EPSILON: f32 = 0.01;
/// Initial angle jitter per hash bucket (100 buckets).
const SPIRAL_JITTER_STEP: f32 = 0.01;
const SPIRAL_INNER: f32 = 0.6;
const SPIRAL_SPREAD: f32 = 1.8;

/// Parameters of one simulation run, derived from the node count and the
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub width: f32,
    pub height: f32,
    pub ideal_length: f32,
    pub repulsion: f32,
    pub iterations: usize,
    pub padding: f32,
}

impl ForceParams {
    pub fn new(node_count: usize, width: f32, height: f32, config: &ForceConfig) -> Self {
        let width = width.max(config.min_width);
        let height = height.max(config.min_height);
        let n = node_count.max(1) as f32;
        let ideal_length = ((width * height / n).sqrt() * config.ideal_length_scale)
            .max(config.ideal_length_min)
            .min(config.ideal_length_max);
        let raw_iterations = (config.iteration_budget / n + config.iteration_base).floor();
        let iterations = (raw_iterations.max(0.0) as usize)
            .max(config.min_iterations)
            .min(config.max_iterations);
        Self {
            width,
            height,
            ideal_length,
            repulsion: ideal_length * ideal_length * config.repulsion_scale,
            iterations,
            padding: config.padding,
        }
    }

    fn clamp_x(&self, x: f32) -> f32 {
        x.max(self.padding).min(self.width - self.padding)
    }

    fn clamp_y(&self, y: f32) -> f32 {
        y.max(self.padding).min(self.height - self.padding)
    }
}

/// Index-addressed simulation state. Slot `i` belongs to `graph.nodes[i]`.
#[derive(Debug, Clone, Default)]
struct ForceArena {
    x: Vec<f32>,
    y: Vec<f32>,
    vx: Vec<f32>,
    vy: Vec<f32>,
    fx: Vec<f32>,
    fy: Vec<f32>,
}

impl ForceArena {
    fn with_len(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            vx: vec![0.0; len],
            vy: vec![0.0; len],
            fx: vec![0.0; len],
            fy: vec![0.0; len],
        }
    }

    fn len(&self) -> usize {
        self.x.len()
    }

    fn clear_forces(&mut self) {
        self.fx.fill(0.0);
        self.fy.fill(0.0);
    }
}

/// Runs the force-directed simulation and writes the final coordinates back
/// into `graph.nodes`.
///
/// The run is fully deterministic: the start positions come from a golden
/// angle spiral jittered by node id hashes, and termination is a fixed
/// iteration count with no convergence test.
pub fn layout_force(graph: &mut RelationGraph, width: f32, height: f32, config: &ForceConfig) {
    let count = graph.nodes.len();
    if count == 0 {
        return;
    }
    let params = ForceParams::new(count, width, height, config);
    let springs: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter_map(|edge| graph.endpoints(edge))
        .filter(|(source, target)| source != target)
        .collect();

    let mut arena = ForceArena::with_len(count);
    seed_spiral(&mut arena, graph, &params);

    log::debug!(
        "force layout: {} nodes, {} springs, {} iterations, ideal length {:.1}",
        count,
        springs.len(),
        params.iterations,
        params.ideal_length
    );

    for iter in 0..params.iterations {
        let alpha = cooling_alpha(iter, params.iterations, config);
        step(&mut arena, &springs, &params, config, alpha);
    }

    for (idx, node) in graph.nodes.iter_mut().enumerate() {
        node.x = arena.x[idx];
        node.y = arena.y[idx];
    }
}

/// Linear cooling with a floor, reached at `cooling_span` of the run.
pub fn cooling_alpha(iter: usize, iterations: usize, config: &ForceConfig) -> f32 {
    let span = iterations as f32 * config.cooling_span;
    if span <= 0.0 {
        return config.min_alpha;
    }
    (1.0 - iter as f32 / span).max(config.min_alpha)
}

fn seed_spiral(arena: &mut ForceArena, graph: &RelationGraph, params: &ForceParams) {
    let count = arena.len();
    let center_x = params.width / 2.0;
    let center_y = params.height / 2.0;
    let denom = count.saturating_sub(1).max(1) as f32;
    for (idx, node) in graph.nodes.iter().enumerate() {
        let i = idx as f32;
        let jitter = (hash_string(&node.id) % 100) as f32 * SPIRAL_JITTER_STEP;
        let angle = i * GOLDEN_RATIO * std::f32::consts::TAU + jitter;
        let radius = params.ideal_length * (SPIRAL_INNER + SPIRAL_SPREAD * i / denom);
        arena.x[idx] = params.clamp_x(center_x + angle.cos() * radius);
        arena.y[idx] = params.clamp_y(center_y + angle.sin() * radius);
    }
}

fn step(
    arena: &mut ForceArena,
    springs: &[(usize, usize)],
    params: &ForceParams,
    config: &ForceConfig,
    alpha: f32,
) {
    let count = arena.len();
    arena.clear_forces();

    // ── Repulsion, all unordered pairs ───────────────────────────────
    let max_range = params.ideal_length * config.repulsion_range;
    for i in 0..count {
        for j in (i + 1)..count {
            let dx = arena.x[i] - arena.x[j];
            let dy = arena.y[i] - arena.y[j];
            let dist = (dx * dx + dy * dy + REPULSION_SOFTENING).sqrt();
            let force = (params.repulsion / (dist * dist)) * dist.min(max_range) / dist.max(1.0);
            let fx = dx / dist * force;
            let fy = dy / dist * force;
            arena.fx[i] += fx;
            arena.fy[i] += fy;
            arena.fx[j] -= fx;
            arena.fy[j] -= fy;
        }
    }

    // ── Springs along edges ──────────────────────────────────────────
    for &(source, target) in springs {
        let dx = arena.x[target] - arena.x[source];
        let dy = arena.y[target] - arena.y[source];
        let dist = (dx * dx + dy * dy).sqrt() + SPRING_EPSILON;
        let force = config.spring_k * (dist - params.ideal_length);
        let fx = dx / dist * force;
        let fy = dy / dist * force;
        arena.fx[source] += fx;
        arena.fy[source] += fy;
        arena.fx[target] -= fx;
        arena.fy[target] -= fy;
    }

    // ── Centering and integration ────────────────────────────────────
    let center_x = params.width / 2.0;
    let center_y = params.height / 2.0;
    for idx in 0..count {
        arena.fx[idx] += config.center_k * (center_x - arena.x[idx]) * alpha;
        arena.fy[idx] += config.center_k * (center_y - arena.y[idx]) * alpha;

        arena.vx[idx] = (arena.vx[idx] + arena.fx[idx] * alpha) * config.damping;
        arena.vy[idx] = (arena.vy[idx] + arena.fy[idx] * alpha) * config.damping;
        arena.x[idx] = params.clamp_x(arena.x[idx] + arena.vx[idx]);
        arena.y[idx] = params.clamp_y(arena.y[idx] + arena.vy[idx]);
    }
}
