use glam::Vec3;
use log::trace;

use crate::{
    collision::{narrowphase::CollisionDetector, response::CollisionResponse},
    config::CollisionConfig,
    core::{CollisionMesh, CollisionPacket, Contact},
    error::Result,
    utils::{
        logging::{warn_if_iterations_exhausted, TraceSpan},
        profiling::DetectionStats,
    },
};

/// Outcome of one collide-and-slide call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Final world-space position.
    pub position: Vec3,
    /// Motion that could not be applied before the loop stopped.
    pub remaining: Vec3,
    /// Detection rounds performed.
    pub iterations: u32,
    /// First surface hit during the call, in world space.
    pub contact: Option<Contact>,
}

impl SweepResult {
    pub fn collided(&self) -> bool {
        self.contact.is_some()
    }
}

/// Moves an ellipsoid through a static mesh, repeatedly detecting the
/// earliest contact and letting the response redirect what is left of the
/// motion until the path is clear.
pub struct EllipsoidCollider {
    packet: CollisionPacket,
    detector: CollisionDetector,
    response: Box<dyn CollisionResponse>,
    config: CollisionConfig,
    stats: DetectionStats,
}

impl EllipsoidCollider {
    pub fn new<R>(radius: Vec3, response: R) -> Result<Self>
    where
        R: CollisionResponse + 'static,
    {
        Self::with_config(radius, response, CollisionConfig::default())
    }

    pub fn with_config<R>(radius: Vec3, response: R, config: CollisionConfig) -> Result<Self>
    where
        R: CollisionResponse + 'static,
    {
        Ok(Self {
            packet: CollisionPacket::new(Vec3::ZERO, Vec3::ZERO, radius)?,
            detector: CollisionDetector::with_epsilon(config.epsilon),
            response: Box::new(response),
            config,
            stats: DetectionStats::default(),
        })
    }

    pub fn radius(&self) -> Vec3 {
        self.packet.radius()
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CollisionConfig) {
        self.detector = CollisionDetector::with_epsilon(config.epsilon);
        self.config = config;
    }

    pub fn set_response<R>(&mut self, response: R)
    where
        R: CollisionResponse + 'static,
    {
        self.response = Box::new(response);
    }

    /// Packet state after the last detection round of the last call.
    pub fn packet(&self) -> &CollisionPacket {
        &self.packet
    }

    /// Detection counters summed over every round of the last call.
    pub fn last_stats(&self) -> DetectionStats {
        self.stats
    }

    pub fn collide(&mut self, mesh: &CollisionMesh, position: Vec3, velocity: Vec3) -> SweepResult {
        let _span = TraceSpan::new("ellipsoid collide");
        self.stats.reset();

        let mut position = position;
        let mut velocity = velocity;
        let mut iterations = 0;
        let mut contact = None;

        while iterations < self.config.max_iterations {
            if velocity.length() < self.config.min_velocity {
                break;
            }
            iterations += 1;

            self.packet.set(position, velocity);
            let mut round = DetectionStats::default();
            let hit = self
                .detector
                .detect_with_stats(mesh, &mut self.packet, &mut round);
            self.stats += round;

            if !hit {
                position += velocity;
                velocity = Vec3::ZERO;
                break;
            }

            if contact.is_none() {
                contact = self.packet.contact();
            }
            trace!(
                "round {iterations}: {:?} contact after {:.4} units",
                self.packet.collision_type(),
                self.packet.world_nearest_distance()
            );

            self.response
                .respond(&mut self.packet, self.config.displacement_distance);
            position = self.packet.position();
            velocity = self.packet.velocity();
        }

        let remaining_speed = velocity.length();
        if remaining_speed >= self.config.min_velocity {
            warn_if_iterations_exhausted(iterations, self.config.max_iterations, remaining_speed);
        }

        SweepResult {
            position,
            remaining: velocity,
            iterations,
            contact,
        }
    }
}
