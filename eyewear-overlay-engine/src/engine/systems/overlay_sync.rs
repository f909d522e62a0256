use bevy::prelude::*;

use crate::engine::core::context::{FrameUpdate, OverlayContext};
use crate::engine::core::scheduler::TickScheduler;
use crate::engine::loading::model_loader::OverlayRoot;
use crate::engine::tracking::detector::ActiveDetector;

/// One tracking tick per frame; writes the stabilised transform onto the
/// overlay root. The root stays hidden until the first update.
pub fn run_tracking_tick(
    mut scheduler: ResMut<TickScheduler>,
    mut ctx: ResMut<OverlayContext>,
    mut detector: ResMut<ActiveDetector>,
    mut roots: Query<(&mut Transform, &mut Visibility), With<OverlayRoot>>,
) {
    let Some(update) = scheduler.advance(&mut ctx, detector.0.as_mut()) else {
        return;
    };

    let FrameUpdate::Updated(next) = update else {
        return;
    };

    for (mut transform, mut visibility) in &mut roots {
        *transform = next;
        *visibility = Visibility::Inherited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classification::classifier::SymmetryTolerance;
    use crate::engine::loading::prepare::PreparedAsset;
    use crate::engine::assets::asset_part::AssetPart;
    use crate::engine::assets::bounds::PartBounds;
    use crate::engine::tracking::detector::{Detection, LandmarkDetector};
    use crate::engine::tracking::landmarks::test_faces::{frame_from_face, frontal_face};

    /// Answers every request immediately with the same face.
    struct SteadyFace;

    impl LandmarkDetector for SteadyFace {
        fn request(&mut self) {}

        fn poll(&mut self) -> Option<Detection> {
            Some(Detection::Face(frame_from_face(&frontal_face(Vec3::new(0.0, 0.0, -400.0)))))
        }
    }

    fn app_with_model(prepared: bool) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<TickScheduler>()
            .insert_resource(ActiveDetector(Box::new(SteadyFace)))
            .add_systems(Update, run_tracking_tick);

        let mut ctx = OverlayContext::default();
        if prepared {
            let token = ctx.begin_load(0);
            let parts = vec![AssetPart::new(
                "frame",
                PartBounds::from_center_size(Vec3::ZERO, Vec3::new(2.0, 0.5, 0.5)),
            )];
            ctx.complete_load(token, PreparedAsset::prepare(parts, &SymmetryTolerance::default()));
        }
        app.insert_resource(ctx);
        app.world_mut()
            .spawn((OverlayRoot, Transform::IDENTITY, Visibility::Hidden));
        app
    }

    fn root_state(app: &mut App) -> (Transform, Visibility) {
        let mut query = app
            .world_mut()
            .query_filtered::<(&Transform, &Visibility), With<OverlayRoot>>();
        let (t, v) = query.single(app.world()).unwrap();
        (*t, *v)
    }

    #[test]
    fn root_follows_face_once_model_is_ready() {
        let mut app = app_with_model(true);

        // First tick only issues the request.
        app.update();
        assert_eq!(root_state(&mut app).1, Visibility::Hidden);

        app.update();
        let (transform, visibility) = root_state(&mut app);
        assert_eq!(visibility, Visibility::Inherited);
        assert!(transform.translation.z < -300.0);
        assert!(transform.scale.x > 1.0);
    }

    #[test]
    fn root_stays_hidden_without_model() {
        let mut app = app_with_model(false);
        for _ in 0..4 {
            app.update();
        }
        let (transform, visibility) = root_state(&mut app);
        assert_eq!(visibility, Visibility::Hidden);
        assert_eq!(transform, Transform::IDENTITY);
    }
}
