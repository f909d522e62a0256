use bevy::asset::LoadState;
use bevy::gltf::GltfMaterialName;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::scene::SceneInstanceReady;

use super::prepare::PreparedAsset;
use super::tokens::LoadToken;
use crate::engine::assets::asset_part::{AssetPart, PartMaterialProps};
use crate::engine::assets::bounds::PartBounds;
use crate::engine::assets::catalogue::ModelCatalogue;
use crate::engine::assets::overlay_manifest::OverlayManifest;
use crate::engine::assets::style::MaterialStyle;
use crate::engine::classification::classifier::{LensSource, PartRole};
use crate::engine::classification::materials::profile_for;
use crate::engine::core::context::{LoadOutcome, OverlayContext};
use crate::error::OverlayError;

/// Parent of every model scene; carries the tracked face transform.
#[derive(Component)]
pub struct OverlayRoot;

/// Ask for catalogue entry `model` to be loaded and shown.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelLoadRequest {
    pub model: usize,
}

/// The active style changed; displayed materials must follow.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StyleChanged;

/// Reported once per load that was not superseded.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum AssetStatus {
    Loaded {
        model: usize,
        name: String,
        parts: usize,
        lenses: usize,
        source: LensSource,
    },
    Failed {
        model: usize,
        reason: String,
    },
}

/// Scene entity of a load still in progress. Hidden until classified.
#[derive(Component, Debug, Clone)]
pub struct PendingModel {
    pub token: LoadToken,
    pub model: usize,
    pub path: String,
}

/// Set by the scene-ready observer once the glTF hierarchy exists.
#[derive(Component)]
pub struct SceneSpawned;

/// Scene entity of the model on screen, with the two shared materials its
/// parts use.
#[derive(Component, Debug, Clone)]
pub struct DisplayedModel {
    pub token: LoadToken,
    pub model: usize,
    pub lens_material: Handle<StandardMaterial>,
    pub frame_material: Handle<StandardMaterial>,
}

pub fn spawn_overlay_root(commands: &mut Commands) {
    commands.spawn((
        OverlayRoot,
        Transform::IDENTITY,
        Visibility::Hidden,
        Name::new("OverlayRoot"),
    ));
}

/// Start a scene load per request. Earlier pending loads are superseded and
/// their half-spawned scenes dropped.
pub fn start_model_loads(
    mut requests: EventReader<ModelLoadRequest>,
    mut ctx: ResMut<OverlayContext>,
    catalogue: Res<ModelCatalogue>,
    asset_server: Res<AssetServer>,
    roots: Query<Entity, With<OverlayRoot>>,
    pending: Query<(Entity, &PendingModel)>,
    mut status: EventWriter<AssetStatus>,
    mut commands: Commands,
) {
    let Ok(root) = roots.single() else {
        return;
    };

    for request in requests.read() {
        let Some(entry) = catalogue.entry(request.model) else {
            warn!("Ignoring load of unknown model {}", request.model);
            status.write(AssetStatus::Failed {
                model: request.model,
                reason: OverlayError::ModelIndexOutOfRange(request.model).to_string(),
            });
            continue;
        };

        for (entity, superseded) in &pending {
            debug!("Dropping superseded load {:?}", superseded.token);
            commands.entity(entity).despawn();
        }

        let token = ctx.begin_load(request.model);
        info!("Loading model '{}' from {} ({:?})", entry.name, entry.path, token);

        let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(entry.path.clone()));
        commands
            .spawn((
                SceneRoot(scene),
                Transform::IDENTITY,
                Visibility::Hidden,
                PendingModel {
                    token,
                    model: request.model,
                    path: entry.path.clone(),
                },
                Name::new(entry.name.clone()),
                ChildOf(root),
            ))
            .observe(mark_scene_spawned);
    }
}

fn mark_scene_spawned(trigger: Trigger<SceneInstanceReady>, mut commands: Commands) {
    commands.entity(trigger.target()).insert(SceneSpawned);
}

/// Report loads whose glTF failed before a scene was ever spawned.
pub fn detect_failed_loads(
    mut ctx: ResMut<OverlayContext>,
    asset_server: Res<AssetServer>,
    pending: Query<(Entity, &PendingModel, &SceneRoot), Without<SceneSpawned>>,
    mut status: EventWriter<AssetStatus>,
    mut commands: Commands,
) {
    for (entity, load, scene) in &pending {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&scene.0) {
            let result = Err(OverlayError::AssetLoadFailed(format!("{}: {}", load.path, err)));
            if let LoadOutcome::Failed(err) = ctx.complete_load(load.token, result) {
                error!("Model {} failed to load: {}", load.model, err);
                status.write(AssetStatus::Failed {
                    model: load.model,
                    reason: err.to_string(),
                });
            }
            commands.entity(entity).despawn();
        }
    }
}

/// Mesh entity seen during gathering, kept alongside its part.
struct GatheredMesh {
    entity: Entity,
    part: AssetPart,
}

/// Part name: the glTF node name joined with the primitive name.
fn part_name(own: Option<&Name>, parent: Option<&Name>, index: usize) -> String {
    match (parent, own) {
        (Some(p), Some(o)) => format!("{}/{}", p.as_str(), o.as_str()),
        (Some(n), None) | (None, Some(n)) => n.as_str().to_string(),
        (None, None) => format!("part_{}", index),
    }
}

fn material_props(material: Option<&StandardMaterial>) -> PartMaterialProps {
    let Some(material) = material else {
        return PartMaterialProps::default();
    };
    PartMaterialProps {
        opacity: Some(material.base_color.alpha()),
        transparent: !matches!(material.alpha_mode, AlphaMode::Opaque),
        transmission: Some(material.specular_transmission),
    }
}

/// Mesh bounds in the scene root's space.
fn part_bounds(aabb: &Aabb, mesh: &GlobalTransform, root: &GlobalTransform) -> Option<PartBounds> {
    let to_root = root.affine().inverse() * mesh.affine();
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);

    let corners = (0..8).map(|i| {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        to_root.transform_point3(center + half * sign)
    });
    PartBounds::from_points(corners)
}

/// Style `model` is shown with: its own manifest entry, else the
/// manifest-wide style. Host overrides are not carried across models.
fn model_style(manifest: Option<&OverlayManifest>, model: usize) -> MaterialStyle {
    let Some(manifest) = manifest else {
        return MaterialStyle::default();
    };
    manifest.style_for(model).resolve().unwrap_or_else(|err| {
        warn!("Style of model {} rejected, using defaults: {}", model, err);
        MaterialStyle::default()
    })
}

/// Once a pending scene has spawned and its meshes have bounds, classify it
/// and hand the result to the context.
pub fn classify_spawned_models(
    mut ctx: ResMut<OverlayContext>,
    pending: Query<(Entity, &PendingModel, &GlobalTransform), With<SceneSpawned>>,
    displayed: Query<Entity, With<DisplayedModel>>,
    children: Query<&Children>,
    meshes: Query<
        (
            Option<&Name>,
            Option<&ChildOf>,
            Option<&GltfMaterialName>,
            &MeshMaterial3d<StandardMaterial>,
            Option<&Aabb>,
            &GlobalTransform,
        ),
        With<Mesh3d>,
    >,
    names: Query<&Name>,
    catalogue: Res<ModelCatalogue>,
    manifest: Option<Res<OverlayManifest>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut status: EventWriter<AssetStatus>,
    mut commands: Commands,
) {
    for (entity, load, root_transform) in &pending {
        let mut gathered = Vec::new();
        let mut bounds_ready = true;

        for (index, descendant) in children.iter_descendants(entity).enumerate() {
            let Ok((name, parent, material_name, material, aabb, transform)) = meshes.get(descendant)
            else {
                continue;
            };
            // Bounds are computed the frame after the mesh appears.
            let Some(aabb) = aabb else {
                bounds_ready = false;
                break;
            };
            let Some(bounds) = part_bounds(aabb, transform, root_transform) else {
                continue;
            };

            let parent_name = parent.and_then(|p| names.get(p.parent()).ok());
            let part = AssetPart::new(part_name(name, parent_name, index), bounds).with_material(
                material_name.map(|m| m.0.clone()).unwrap_or_default(),
                material_props(materials.get(&material.0)),
            );
            gathered.push(GatheredMesh {
                entity: descendant,
                part,
            });
        }

        if !bounds_ready {
            continue;
        }

        let (mesh_entities, parts): (Vec<Entity>, Vec<AssetPart>) =
            gathered.into_iter().map(|g| (g.entity, g.part)).unzip();
        let result = PreparedAsset::prepare(parts, &ctx.symmetry);

        match ctx.complete_load(load.token, result) {
            LoadOutcome::Stale => {
                commands.entity(entity).despawn();
            }
            LoadOutcome::Failed(err) => {
                error!("Model {} could not be prepared: {}", load.model, err);
                status.write(AssetStatus::Failed {
                    model: load.model,
                    reason: err.to_string(),
                });
                commands.entity(entity).despawn();
            }
            LoadOutcome::Applied => {
                ctx.style = model_style(manifest.as_deref(), load.model);

                let Some(shown) = ctx.displayed() else {
                    continue;
                };
                let prepared = &shown.prepared;

                let lens_material = materials.add(profile_for(PartRole::Lens, &ctx.style).to_standard_material());
                let frame_material =
                    materials.add(profile_for(PartRole::Frame, &ctx.style).to_standard_material());

                for (mesh, role) in mesh_entities.iter().zip(&prepared.classification.roles) {
                    let handle = match role {
                        PartRole::Lens => lens_material.clone(),
                        PartRole::Frame => frame_material.clone(),
                    };
                    commands.entity(*mesh).insert((MeshMaterial3d(handle), *role));
                }

                for previous in &displayed {
                    commands.entity(previous).despawn();
                }

                commands
                    .entity(entity)
                    .remove::<(PendingModel, SceneSpawned)>()
                    .insert((
                        prepared.root_transform(),
                        Visibility::Inherited,
                        DisplayedModel {
                            token: load.token,
                            model: load.model,
                            lens_material,
                            frame_material,
                        },
                    ));

                let name = catalogue
                    .entry(load.model)
                    .map(|e| e.name.clone())
                    .unwrap_or_default();
                info!(
                    "Model '{}' ready: {} parts, {} lens ({:?})",
                    name,
                    prepared.parts.len(),
                    prepared.classification.lens_count(),
                    prepared.classification.source
                );
                status.write(AssetStatus::Loaded {
                    model: load.model,
                    name,
                    parts: prepared.parts.len(),
                    lenses: prepared.classification.lens_count(),
                    source: prepared.classification.source,
                });
            }
        }
    }
}

/// Rewrite the displayed model's two materials after a style change.
pub fn restyle_displayed_model(
    mut changes: EventReader<StyleChanged>,
    ctx: Res<OverlayContext>,
    displayed: Query<&DisplayedModel>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if changes.read().count() == 0 {
        return;
    }
    for model in &displayed {
        for (role, handle) in [
            (PartRole::Lens, &model.lens_material),
            (PartRole::Frame, &model.frame_material),
        ] {
            if let Some(material) = materials.get_mut(handle) {
                *material = profile_for(role, &ctx.style).to_standard_material();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::overlay_manifest::ModelEntry;
    use crate::engine::assets::style::{FrameMaterial, GlassesStyle};
    use approx::assert_relative_eq;
    use bevy::scene::Scene;

    #[test]
    fn part_names_prefer_node_then_primitive() {
        let node = Name::new("LensLeft");
        let prim = Name::new("Mesh.0");
        assert_eq!(part_name(Some(&prim), Some(&node), 3), "LensLeft/Mesh.0");
        assert_eq!(part_name(None, Some(&node), 3), "LensLeft");
        assert_eq!(part_name(None, None, 3), "part_3");
    }

    #[test]
    fn bounds_follow_mesh_transform_relative_to_root() {
        let aabb = Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
        let root = GlobalTransform::from(Transform::from_xyz(5.0, 0.0, 0.0));
        let mesh = GlobalTransform::from(
            Transform::from_xyz(7.0, 1.0, 0.0).with_scale(Vec3::new(2.0, 1.0, 0.5)),
        );

        let bounds = part_bounds(&aabb, &mesh, &root).unwrap();
        assert_relative_eq!(bounds.center().x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.center().y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.size().x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.size().z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn material_hints_read_alpha_and_transmission() {
        let glass = StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.4),
            alpha_mode: AlphaMode::Blend,
            specular_transmission: 0.9,
            ..default()
        };
        let props = material_props(Some(&glass));
        assert_eq!(props.opacity, Some(0.4));
        assert!(props.transparent);
        assert_eq!(props.transmission, Some(0.9));

        assert_eq!(material_props(None), PartMaterialProps::default());
    }

    const FRAME_BAR: Vec3 = Vec3::new(140.0, 16.0, 16.0);
    const LENS_PANE: Vec3 = Vec3::new(50.0, 40.0, 1.5);

    fn glasses_parts() -> Vec<(&'static str, Vec3, Vec3)> {
        vec![
            ("frame_top", Vec3::new(0.0, 20.0, 0.0), FRAME_BAR),
            ("lens_left", Vec3::new(-32.0, 0.0, 0.0), LENS_PANE),
            ("frame_bottom", Vec3::new(0.0, -20.0, 0.0), FRAME_BAR),
            ("lens_right", Vec3::new(32.0, 0.0, 0.0), LENS_PANE),
        ]
    }

    /// Model 0 carries a metal style of its own, model 1 uses the global one.
    fn manifest() -> OverlayManifest {
        let metal =
            GlassesStyle::from_json(r##"{ "frameMaterial": "metal", "lensColor": "#4a5d3a" }"##)
                .unwrap();
        OverlayManifest {
            models: vec![
                ModelEntry {
                    name: "Round Metal".into(),
                    path: "models/round_metal.gltf".into(),
                    style: Some(metal),
                },
                ModelEntry {
                    name: "Wayfarer".into(),
                    path: "models/wayfarer.gltf".into(),
                    style: None,
                },
            ],
            ..Default::default()
        }
    }

    fn loader_app() -> App {
        let manifest = manifest();
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<StandardMaterial>()
            .init_asset::<Scene>()
            .init_resource::<OverlayContext>()
            .insert_resource(ModelCatalogue::new(manifest.models.clone()))
            .insert_resource(manifest)
            .add_event::<ModelLoadRequest>()
            .add_event::<AssetStatus>()
            .add_event::<StyleChanged>()
            .add_systems(
                Update,
                (
                    start_model_loads,
                    classify_spawned_models,
                    restyle_displayed_model,
                )
                    .chain(),
            );
        app
    }

    /// Stand-in for a spawned glTF scene: a pending root whose mesh children
    /// already have bounds.
    fn spawn_scene(app: &mut App, model: usize) -> (Entity, Vec<Entity>) {
        let world = app.world_mut();
        let token = world.resource_mut::<OverlayContext>().begin_load(model);
        let source = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());

        let scene = world
            .spawn((
                PendingModel {
                    token,
                    model,
                    path: format!("models/{model}.gltf"),
                },
                SceneSpawned,
                Transform::IDENTITY,
                GlobalTransform::IDENTITY,
                Visibility::Hidden,
            ))
            .id();

        let meshes = glasses_parts()
            .into_iter()
            .map(|(name, center, size)| {
                world
                    .spawn((
                        Name::new(name),
                        Mesh3d(Handle::default()),
                        MeshMaterial3d(source.clone()),
                        Aabb::from_min_max(-size / 2.0, size / 2.0),
                        Transform::from_translation(center),
                        GlobalTransform::from_translation(center),
                        ChildOf(scene),
                    ))
                    .id()
            })
            .collect();
        (scene, meshes)
    }

    fn displayed(app: &mut App) -> DisplayedModel {
        let mut query = app.world_mut().query::<&DisplayedModel>();
        query.single(app.world()).unwrap().clone()
    }

    fn material(app: &App, handle: &Handle<StandardMaterial>) -> StandardMaterial {
        app.world()
            .resource::<Assets<StandardMaterial>>()
            .get(handle)
            .unwrap()
            .clone()
    }

    #[test]
    fn classified_scene_replaces_displayed_model() {
        let mut app = loader_app();
        let previous = app
            .world_mut()
            .spawn(DisplayedModel {
                token: LoadToken(0),
                model: 1,
                lens_material: Handle::default(),
                frame_material: Handle::default(),
            })
            .id();
        let (scene, meshes) = spawn_scene(&mut app, 0);

        app.update();

        assert!(app.world().get_entity(previous).is_err());
        let shown = displayed(&mut app);
        assert_eq!(shown.model, 0);
        assert!(app.world().get::<PendingModel>(scene).is_none());
        assert_eq!(
            app.world().get::<Visibility>(scene),
            Some(&Visibility::Inherited)
        );

        let expected = [PartRole::Frame, PartRole::Lens, PartRole::Frame, PartRole::Lens];
        for (mesh, role) in meshes.iter().zip(expected) {
            assert_eq!(app.world().get::<PartRole>(*mesh), Some(&role));
            let handle = &app
                .world()
                .get::<MeshMaterial3d<StandardMaterial>>(*mesh)
                .unwrap()
                .0;
            let wanted = match role {
                PartRole::Lens => &shown.lens_material,
                PartRole::Frame => &shown.frame_material,
            };
            assert_eq!(handle, wanted);
        }

        let events = app.world().resource::<Events<AssetStatus>>();
        let loaded: Vec<_> = events.iter_current_update_events().cloned().collect();
        assert_eq!(
            loaded,
            vec![AssetStatus::Loaded {
                model: 0,
                name: "Round Metal".into(),
                parts: 4,
                lenses: 2,
                source: LensSource::Scored,
            }]
        );
    }

    #[test]
    fn style_change_rewrites_both_materials() {
        let mut app = loader_app();
        spawn_scene(&mut app, 1);
        app.update();

        let restyled = GlassesStyle::from_json(
            r##"{ "lensColor": "#ff0000", "frameColor": "#00ff00", "tintOpacity": 0.2,
                 "frameMaterial": "metal" }"##,
        )
        .unwrap()
        .resolve()
        .unwrap();
        app.world_mut().resource_mut::<OverlayContext>().style = restyled;
        app.world_mut().send_event(StyleChanged);
        app.update();

        let shown = displayed(&mut app);
        let lens = material(&app, &shown.lens_material);
        let frame = material(&app, &shown.frame_material);
        let lens_wanted = profile_for(PartRole::Lens, &restyled).to_standard_material();
        let frame_wanted = profile_for(PartRole::Frame, &restyled).to_standard_material();
        assert_eq!(lens.base_color, lens_wanted.base_color);
        assert_eq!(frame.base_color, frame_wanted.base_color);
        assert_eq!(frame.metallic, frame_wanted.metallic);
        assert!(frame.metallic > 0.0);
    }

    #[test]
    fn unstyled_model_after_styled_one_uses_global_style() {
        let mut app = loader_app();
        let global = OverlayManifest::default().style.resolve().unwrap();

        spawn_scene(&mut app, 0);
        app.update();
        let metal = app.world().resource::<OverlayContext>().style;
        assert_ne!(metal, global);

        spawn_scene(&mut app, 1);
        app.update();

        assert_eq!(app.world().resource::<OverlayContext>().style, global);
        let shown = displayed(&mut app);
        assert_eq!(shown.model, 1);
        let frame = material(&app, &shown.frame_material);
        let lens = material(&app, &shown.lens_material);
        assert_eq!(frame.metallic, 0.0);
        assert_eq!(
            lens.base_color,
            profile_for(PartRole::Lens, &global)
                .to_standard_material()
                .base_color
        );
    }

    #[test]
    fn host_style_does_not_outlive_model_switch() {
        let mut app = loader_app();
        let host = MaterialStyle {
            frame_scale: 1.4,
            ..Default::default()
        };
        app.world_mut().resource_mut::<OverlayContext>().style = host;

        spawn_scene(&mut app, 1);
        app.update();

        assert_eq!(app.world().resource::<OverlayContext>().style.frame_scale, 1.0);
    }

    #[test]
    fn newer_request_drops_pending_scene() {
        let mut app = loader_app();
        app.world_mut()
            .spawn((OverlayRoot, Transform::IDENTITY, Visibility::Hidden));

        app.world_mut().send_event(ModelLoadRequest { model: 0 });
        app.update();
        app.world_mut().send_event(ModelLoadRequest { model: 1 });
        app.update();

        let mut query = app.world_mut().query::<&PendingModel>();
        let pending: Vec<PendingModel> = query.iter(app.world()).cloned().collect();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].model, 1);
        assert!(
            app.world()
                .resource::<OverlayContext>()
                .is_current(pending[0].token)
        );
    }

    #[test]
    fn model_style_falls_back_to_manifest_then_defaults() {
        let manifest = manifest();
        let metal = model_style(Some(&manifest), 0);
        assert_eq!(metal.frame_material, FrameMaterial::Metal);
        assert_eq!(model_style(Some(&manifest), 1), manifest.style.resolve().unwrap());
        assert_eq!(model_style(None, 0), MaterialStyle::default());
    }
}
