//! Fruchterman-Reingold force-directed layout
//!
//! Every pair of nodes repels with force k²/d and every edge attracts its
//! endpoints with force w·d²/k, where k is the optimal distance and w the edge
//! weight. A temperature caps each step and cools linearly to zero. The result
//! is centred on the origin and rescaled so the largest coordinate is 1.

use rand::Rng;
use thiserror::Error;

use super::{EdgeWeight, Graph};

/// A 2-D position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("layout diverged at iteration {iteration}")]
    NonFinite { iteration: usize },

    #[error("optimal distance must be positive, got {0}")]
    InvalidDistance(f64),
}

const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct ForceDirectedLayout {
    iterations: usize,
    optimal_distance: f64,
}

impl Default for ForceDirectedLayout {
    fn default() -> Self {
        Self {
            iterations: 50,
            optimal_distance: 0.3,
        }
    }
}

impl ForceDirectedLayout {
    pub fn new(iterations: usize, optimal_distance: f64) -> Self {
        Self {
            iterations,
            optimal_distance,
        }
    }

    /// Position every node of `graph`, indexed by node id
    pub fn compute<N, E, R>(
        &self,
        graph: &Graph<N, E>,
        rng: &mut R,
    ) -> Result<Vec<Position>, LayoutError>
    where
        E: EdgeWeight,
        R: Rng + ?Sized,
    {
        let k = self.optimal_distance;
        if !(k > 0.0 && k.is_finite()) {
            return Err(LayoutError::InvalidDistance(k));
        }

        let n = graph.node_count();
        match n {
            0 => return Ok(Vec::new()),
            1 => return Ok(vec![Position::default()]),
            _ => {}
        }

        let weights = weight_matrix(graph);
        let mut positions: Vec<Position> = (0..n)
            .map(|_| Position::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
            .collect();

        let mut temperature = 0.1 * extent(&positions);
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for iteration in 0..self.iterations {
            let mut displacement = vec![Position::default(); n];
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = positions[i].x - positions[j].x;
                    let dy = positions[i].y - positions[j].y;
                    let distance = dx.hypot(dy).max(MIN_DISTANCE);
                    let force =
                        k * k / (distance * distance) - weights[i * n + j] * distance / k;
                    displacement[i].x += dx * force;
                    displacement[i].y += dy * force;
                }
            }

            let mut moved = 0.0;
            for (position, delta) in positions.iter_mut().zip(&displacement) {
                let length = delta.x.hypot(delta.y).max(MIN_DISTANCE);
                let step_x = delta.x * temperature / length;
                let step_y = delta.y * temperature / length;
                position.x += step_x;
                position.y += step_y;
                moved += step_x.hypot(step_y);
            }

            if positions.iter().any(|p| !p.is_finite()) {
                return Err(LayoutError::NonFinite { iteration });
            }

            temperature -= cooling;
            if moved / (n as f64) < CONVERGENCE_THRESHOLD {
                break;
            }
        }

        rescale(&mut positions);
        Ok(positions)
    }
}

/// Dense symmetric weight matrix, row-major
fn weight_matrix<N, E: EdgeWeight>(graph: &Graph<N, E>) -> Vec<f64> {
    let n = graph.node_count();
    let mut weights = vec![0.0; n * n];
    for edge in graph.edges() {
        let w = edge.data.weight();
        weights[edge.source * n + edge.target] = w;
        weights[edge.target * n + edge.source] = w;
    }
    weights
}

fn extent(positions: &[Position]) -> f64 {
    let (min_x, max_x, min_y, max_y) = positions.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );
    (max_x - min_x).max(max_y - min_y)
}

/// Centre on the origin and scale into [-1, 1]
fn rescale(positions: &mut [Position]) {
    let n = positions.len() as f64;
    let mean_x = positions.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = positions.iter().map(|p| p.y).sum::<f64>() / n;

    let mut limit: f64 = 0.0;
    for p in positions.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }
    if limit > 0.0 {
        for p in positions.iter_mut() {
            p.x /= limit;
            p.y /= limit;
        }
    }
}
