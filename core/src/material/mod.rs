//! Materials and their registry.
//!
//! The registry always carries a built-in default material, used for
//! objects without material slots and for empty slots.

mod types;

pub use types::{CompiledMaterialHandle, Material, MaterialFlags, MaterialId, NodeTree};

/// Owns every [`Material`] plus the default material.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    default: Material,
}

impl MaterialRegistry {
    /// Create a registry holding only the default material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its id.
    pub fn add(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        id
    }

    /// Look up a material.
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Look up a material mutably.
    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    /// The built-in default material.
    pub fn default_material(&self) -> &Material {
        &self.default
    }

    /// The material shown for `id`, falling back to the default material when
    /// `id` is `None` or unknown.
    pub fn resolve_mut(&mut self, id: Option<MaterialId>) -> &mut Material {
        match id {
            Some(id) if id.0 < self.materials.len() => &mut self.materials[id.0],
            _ => &mut self.default,
        }
    }

    /// Redirect `id` through its active shader node.
    ///
    /// Materials using nodes show whatever the active material node points
    /// at, which may be nothing. Other materials resolve to themselves.
    pub fn active_node_material(&self, id: Option<MaterialId>) -> Option<MaterialId> {
        let material = self.get(id?)?;
        match (&material.node_tree, material.use_nodes) {
            (Some(tree), true) => tree.active_material,
            _ => id,
        }
    }

    /// Number of registered materials, excluding the default.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no materials were registered.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let registry = MaterialRegistry::new();
        let default = registry.default_material();
        assert_eq!(default.color, [0.8, 0.8, 0.8]);
        assert_eq!(default.specular_color, [1.0, 1.0, 1.0]);
        assert!(!default.has_alpha());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let mut registry = MaterialRegistry::new();
        let red = registry.add(Material::new("red").with_color([1.0, 0.0, 0.0]));

        assert_eq!(registry.resolve_mut(Some(red)).name, "red");
        assert_eq!(registry.resolve_mut(None).name, "default");
        assert_eq!(registry.resolve_mut(Some(MaterialId(42))).name, "default");
    }

    #[test]
    fn test_active_node_material() {
        let mut registry = MaterialRegistry::new();
        let inner = registry.add(Material::new("inner"));
        let with_node = registry.add(Material::new("outer").with_nodes(Some(inner)));
        let empty_node = registry.add(Material::new("empty").with_nodes(None));
        let plain = registry.add(Material::new("plain"));

        assert_eq!(registry.active_node_material(Some(with_node)), Some(inner));
        assert_eq!(registry.active_node_material(Some(empty_node)), None);
        assert_eq!(registry.active_node_material(Some(plain)), Some(plain));
        assert_eq!(registry.active_node_material(None), None);
    }

    #[test]
    fn test_node_tree_ignored_without_use_nodes() {
        let mut registry = MaterialRegistry::new();
        let inner = registry.add(Material::new("inner"));
        let mut outer = Material::new("outer").with_nodes(Some(inner));
        outer.use_nodes = false;
        let outer = registry.add(outer);

        assert_eq!(registry.active_node_material(Some(outer)), Some(outer));
    }
}
