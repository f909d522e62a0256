use super::bounds::PartBounds;

/// Material hints read from the part's source material. Every field is
/// optional in the source asset and defaults to "no signal".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartMaterialProps {
    pub opacity: Option<f32>,
    pub transparent: bool,
    pub transmission: Option<f32>,
}

/// A mesh region of a loaded model, as seen by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPart {
    pub name: String,
    pub material_name: String,
    pub material: PartMaterialProps,
    pub bounds: PartBounds,
}

impl AssetPart {
    pub fn new(name: impl Into<String>, bounds: PartBounds) -> Self {
        Self {
            name: name.into(),
            material_name: String::new(),
            material: PartMaterialProps::default(),
            bounds,
        }
    }

    pub fn with_material(mut self, material_name: impl Into<String>, props: PartMaterialProps) -> Self {
        self.material_name = material_name.into();
        self.material = props;
        self
    }
}
