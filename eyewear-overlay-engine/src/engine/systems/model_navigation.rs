use bevy::prelude::*;

use crate::engine::assets::catalogue::ModelCatalogue;
use crate::engine::loading::model_loader::ModelLoadRequest;

/// Catalogue navigation from the host bridge or the keyboard.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelNavigation {
    Next,
    Previous,
    Select(usize),
}

pub fn handle_model_navigation(
    mut events: EventReader<ModelNavigation>,
    mut catalogue: ResMut<ModelCatalogue>,
    mut requests: EventWriter<ModelLoadRequest>,
) {
    for event in events.read() {
        let selected = match event {
            ModelNavigation::Next => catalogue.next(),
            ModelNavigation::Previous => catalogue.previous(),
            ModelNavigation::Select(index) => match catalogue.select(*index) {
                Ok(index) => Some(index),
                Err(err) => {
                    warn!("{}", err);
                    None
                }
            },
        };

        if let Some(model) = selected {
            requests.write(ModelLoadRequest { model });
        }
    }
}

/// Arrow keys step through the catalogue on native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn keyboard_model_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut navigation: EventWriter<ModelNavigation>,
) {
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        navigation.write(ModelNavigation::Next);
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        navigation.write(ModelNavigation::Previous);
    }
}
