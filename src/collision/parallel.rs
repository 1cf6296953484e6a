#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::narrowphase::CollisionDetector;
use crate::{
    core::{CollisionMesh, CollisionPacket},
    utils::profiling::DetectionStats,
};

/// Runs detection for many independent packets against one shared mesh.
///
/// The mesh is only read, so packets are processed in parallel when the
/// `parallel` feature is enabled. Returns statistics summed over all packets.
pub fn detect_all(
    detector: &CollisionDetector,
    mesh: &CollisionMesh,
    packets: &mut [CollisionPacket],
) -> DetectionStats {
    #[cfg(feature = "parallel")]
    {
        packets
            .par_iter_mut()
            .map(|packet| detect_one(detector, mesh, packet))
            .reduce(DetectionStats::default, |mut acc, stats| {
                acc += stats;
                acc
            })
    }

    #[cfg(not(feature = "parallel"))]
    {
        packets
            .iter_mut()
            .fold(DetectionStats::default(), |mut acc, packet| {
                acc += detect_one(detector, mesh, packet);
                acc
            })
    }
}

fn detect_one(
    detector: &CollisionDetector,
    mesh: &CollisionMesh,
    packet: &mut CollisionPacket,
) -> DetectionStats {
    let mut stats = DetectionStats::default();
    detector.detect_with_stats(mesh, packet, &mut stats);
    stats
}
