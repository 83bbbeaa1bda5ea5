//! Orchestrates the cooperating Facades of the probabilistic risk layer
//! (§4.8): environment distance, per-object and robot distance,
//! co-occurrence, combined risk, c-space convolution, and the final PNF
//! facade.

use error_stack::Result;

use crate::error::NavFieldError;
use crate::facade::Facade;
use crate::flexgrid::FlexGrid;
use crate::kernel::Kernel;
use crate::neighborhood::Neighborhood;
use crate::numeric::INFINITY;

use super::buffer_zone::buffer_zone;
use super::cooccurrence::cooc;
use super::riskmap::RiskMapKind;
use super::sprite::Region;

/// A moving obstacle contributing a co-occurrence term.
#[derive(Debug, Clone)]
pub struct MovingObject {
    pub footprint: Region,
    pub radius: f64,
    pub speed: f64,
}

/// Static configuration for one [`compute`] run.
#[derive(Debug, Clone)]
pub struct RiskPipelineConfig {
    /// `(x_begin, x_end, y_begin, y_end)` of the shared grid geometry.
    pub bounds: (i64, i64, i64, i64),
    pub obstacles: Vec<(i64, i64)>,
    pub robot: Region,
    pub robot_radius: f64,
    pub robot_speed: f64,
    pub objects: Vec<MovingObject>,
    pub delta: f64,
    pub buffer_width: f64,
    pub buffer_degree: f64,
    pub scale: f64,
}

/// The full set of intermediate and final fields produced by the
/// pipeline, kept around so a caller can inspect any stage.
pub struct RiskPipeline {
    pub environment: Facade,
    pub robot_distance: Facade,
    pub object_distances: Vec<Facade>,
    pub risk: FlexGrid<f64>,
    pub workspace_risk: FlexGrid<f64>,
    pub pnf: Facade,
}

/// Run every stage of the probabilistic risk layer to quiescence.
pub fn compute(
    config: &RiskPipelineConfig,
    risk_map: &RiskMapKind,
) -> Result<RiskPipeline, NavFieldError> {
    let (x0, x1, y0, y1) = config.bounds;

    let environment = build_distance_facade(
        config,
        &config.obstacles.iter().copied().collect::<Vec<_>>(),
        None,
    )?;

    let robot_inflated = inflated_obstacles(&environment, config.robot_radius, x0, x1, y0, y1);
    let robot_distance = build_distance_facade(config, &robot_inflated, Some(&config.robot))?;

    let mut object_distances = Vec::with_capacity(config.objects.len());
    for object in &config.objects {
        let inflated = inflated_obstacles(&environment, object.radius, x0, x1, y0, y1);
        let facade = build_distance_facade(config, &inflated, Some(&object.footprint))?;
        object_distances.push(facade);
    }

    let mut risk: FlexGrid<f64> = FlexGrid::new();
    for iy in y0..y1 {
        for ix in x0..x1 {
            let (Some(env_distance), Some(d_rob)) = (
                environment.get_value(ix, iy),
                robot_distance.get_value(ix, iy),
            ) else {
                continue;
            };
            let static_risk = buffer_zone(env_distance, config.robot_radius, config.buffer_width, config.buffer_degree);
            let mut survival = 1.0 - static_risk;
            for (object, facade) in config.objects.iter().zip(object_distances.iter()) {
                let d_obj = facade.get_value(ix, iy).unwrap_or(INFINITY);
                let c = cooc(d_obj, d_rob, object.speed, config.robot_speed, config.delta);
                survival *= 1.0 - c;
            }
            risk.set(ix, iy, (1.0 - survival).clamp(0.0, 1.0));
        }
    }

    let mut workspace_risk: FlexGrid<f64> = FlexGrid::new();
    for iy in y0..y1 {
        for ix in x0..x1 {
            let mut worst = 0.0_f64;
            for &(dx, dy) in config.robot.offsets() {
                if let Some(&r) = risk_get(&risk, ix + dx, iy + dy) {
                    worst = worst.max(r);
                }
            }
            workspace_risk.set(ix, iy, worst);
        }
    }

    let mut pnf = Facade::new(Neighborhood::Four, "lsm", config.scale)?;
    pnf.add_range(x0, x1, y0, y1, pnf.kernel().freespace_meta());
    for iy in y0..y1 {
        for ix in x0..x1 {
            if let Some(&r) = risk_get(&workspace_risk, ix, iy) {
                pnf.set_meta(ix, iy, risk_map.risk_to_meta(r));
            }
        }
    }
    for (fx, fy) in config.robot.cells() {
        pnf.add_goal(fx, fy, 0.0);
    }
    run_to_completion(&mut pnf);

    Ok(RiskPipeline {
        environment,
        robot_distance,
        object_distances,
        risk,
        workspace_risk,
        pnf,
    })
}

fn risk_get(grid: &FlexGrid<f64>, ix: i64, iy: i64) -> Option<&f64> {
    grid.get(ix, iy)
}

fn inflated_obstacles(
    environment: &Facade,
    radius: f64,
    x0: i64,
    x1: i64,
    y0: i64,
    y1: i64,
) -> Vec<(i64, i64)> {
    let mut cells = Vec::new();
    for iy in y0..y1 {
        for ix in x0..x1 {
            if environment.get_value(ix, iy).is_some_and(|d| d <= radius) {
                cells.push((ix, iy));
            }
        }
    }
    cells
}

fn build_distance_facade(
    config: &RiskPipelineConfig,
    obstacles: &[(i64, i64)],
    goal_region: Option<&Region>,
) -> Result<Facade, NavFieldError> {
    let (x0, x1, y0, y1) = config.bounds;
    let mut facade = Facade::new(Neighborhood::Four, "lsm", config.scale)?;
    facade.add_range(x0, x1, y0, y1, facade.kernel().freespace_meta());
    let obstacle_meta = facade.kernel().obstacle_meta();
    for &(ox, oy) in obstacles {
        facade.set_meta(ox, oy, obstacle_meta);
    }
    match goal_region {
        Some(region) => {
            for (fx, fy) in region.cells() {
                facade.add_goal(fx, fy, 0.0);
            }
        }
        None => {
            for &(ox, oy) in obstacles {
                facade.add_goal(ox, oy, 0.0);
            }
        }
    }
    run_to_completion(&mut facade);
    Ok(facade)
}

fn run_to_completion(facade: &mut Facade) {
    while facade.have_work() {
        facade.compute_one(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::riskmap::RiskMapKind;
    use crate::risk::sprite::{Region, Sprite};

    #[test]
    fn pipeline_runs_to_completion_and_fills_every_stage() {
        let config = RiskPipelineConfig {
            bounds: (0, 6, 0, 6),
            obstacles: vec![(3, 3)],
            robot: Region::new((0, 0), Sprite::disk(0)),
            robot_radius: 0.5,
            robot_speed: 1.0,
            objects: vec![MovingObject {
                footprint: Region::new((5, 5), Sprite::disk(0)),
                radius: 0.5,
                speed: 1.0,
            }],
            delta: 0.5,
            buffer_width: 1.0,
            buffer_degree: 1.0,
            scale: 1.0,
        };
        let risk_map = RiskMapKind::spike(0.8, 2.0).unwrap();
        let result = compute(&config, &risk_map).unwrap();
        assert!(!result.environment.have_work());
        assert!(!result.pnf.have_work());
        assert!(result.risk.get(1, 1).is_some());
    }
}
