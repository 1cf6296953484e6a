use ellipsoid_sweep::*;

/// A floor with a wall at x = 6 facing back towards the origin.
fn room() -> Result<CollisionMesh, CollisionError> {
    let vertices = [
        // floor (z = 0)
        -20.0, -20.0, 0.0, 20.0, -20.0, 0.0, 0.0, 20.0, 0.0, //
        // wall (x = 6)
        6.0, -20.0, -5.0, 6.0, 0.0, 20.0, 6.0, 20.0, -5.0,
    ];
    CollisionMesh::build(&vertices, None, false)
}

fn main() -> Result<(), CollisionError> {
    env_logger::init();

    let mesh = room()?;
    let mut collider = EllipsoidCollider::new(Vec3::new(0.5, 0.5, 1.0), SlideResponse)?;

    // Walk diagonally into the wall while gravity presses down.
    let mut position = Vec3::new(0.0, 0.0, 1.5);
    let step = Vec3::new(0.4, 0.25, -0.3);

    for frame in 0..30 {
        let result = collider.collide(&mesh, position, step);
        position = result.position;
        if let Some(contact) = result.contact {
            println!(
                "frame {frame:2}: {:>8.3?} {:?} contact, normal {:.2?}",
                position, contact.kind, contact.normal
            );
        } else {
            println!("frame {frame:2}: {:>8.3?}", position);
        }
    }

    collider.last_stats().report();
    Ok(())
}
