//! Camera Demo
//!
//! Builds a model/view/projection chain for a spinning cube, packs it for a
//! uniform upload and logs where the cube corners land in clip space.
//!
//! Run with: RUST_LOG=kestrel_math=debug cargo run -p kestrel_math --example camera_demo

use kestrel_math::prelude::*;
use kestrel_math::upload::{pack_f32, pack_f32_bytes};
use kestrel_math::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let view = Mat4::look_at(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective(to_radian(45.0), 16.0 / 9.0, 0.1, 100.0);

    let corners = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];

    for step in 0..4 {
        let angle = step as f64 * std::f64::consts::FRAC_PI_4;
        let spin = Quat::from_euler(0.0, angle, 0.0, EulerOrder::default());
        let model = Mat4::from_rotation_translation(&spin, Vec3::new(0.0, 0.0, -1.0));
        let mvp = model * view * projection;

        let bytes = pack_f32_bytes(&[mvp]);
        tracing::info!(step, degrees = to_degree(angle), bytes = bytes.len(), "uploaded mvp");

        for corner in corners {
            let clip = corner.transform_mat4(&mvp);
            tracing::info!("  {corner} -> {clip}");
        }

        // round trip through the raw buffer an external renderer would hold
        let restored = Mat4::from_f32_slice(&pack_f32(&[mvp]))?;
        tracing::debug!(matches = restored.equals(&mvp), "restored from upload buffer");
    }

    // a mirrored model has no inverse under the positive-determinant policy
    let mirrored = Mat4::from_scaling(Vec3::new(-1.0, 1.0, 1.0));
    tracing::info!(
        det = mirrored.determinant(),
        identity = mirrored.invert() == Mat4::IDENTITY,
        "mirrored inverse"
    );

    Ok(())
}
