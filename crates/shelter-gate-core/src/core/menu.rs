// crates/shelter-gate-core/src/core/menu.rs
// ============================================================================
// Module: Shelter Gate Menu Tree
// Description: Declarative capability-tagged navigation tree.
// Purpose: Single source of truth for which capability gates which destination.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The menu is a static tree of [`MenuNode`] values. A node with a target is
//! a destination (a sidebar item or an action button); a node without a
//! target is a grouping header and is never dispatched itself. The tree is
//! data only: presentation concerns such as icons live elsewhere.
//!
//! ## Invariants
//! - [`MenuTree::standard`] is built once per process and never mutated.
//! - Grouping headers have children and never carry a capability.
//! - Targets are unique across the tree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::capability::Capability;
use crate::core::session::CATALOG_ROUTE;
use crate::core::session::DASHBOARD_ROUTE;

// ============================================================================
// SECTION: Target
// ============================================================================

/// Opaque navigation destination (a route).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Creates a navigation target.
    #[must_use]
    pub fn new(route: impl Into<String>) -> Self {
        Self(route.into())
    }

    /// Returns the route as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Menu Node
// ============================================================================

/// One navigable destination or grouping header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Display label.
    pub label: String,
    /// Destination; `None` marks a grouping header.
    #[serde(default)]
    pub target: Option<Target>,
    /// Capability required to reach the destination; `None` means always permitted.
    #[serde(default)]
    pub required: Option<Capability>,
    /// Ordered child nodes.
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Creates a destination without children.
    #[must_use]
    pub fn leaf(
        label: impl Into<String>,
        target: impl Into<Target>,
        required: Option<Capability>,
    ) -> Self {
        Self {
            label: label.into(),
            target: Some(target.into()),
            required,
            children: Vec::new(),
        }
    }

    /// Creates a grouping header.
    #[must_use]
    pub fn header(label: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            label: label.into(),
            target: None,
            required: None,
            children,
        }
    }

    /// Returns a copy of this node with the given children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Returns true when this node is a grouping header.
    #[must_use]
    pub const fn is_header(&self) -> bool {
        self.target.is_none()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural problems in a menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// A node has an empty label.
    #[error("menu node has an empty label")]
    EmptyLabel,
    /// A grouping header has no children.
    #[error("menu header '{0}' has no children")]
    EmptyHeader(String),
    /// A grouping header carries a capability.
    #[error("menu header '{0}' must not require a capability")]
    GatedHeader(String),
    /// A target does not look like a route.
    #[error("menu target '{0}' must start with '/'")]
    InvalidTarget(String),
    /// A target appears more than once.
    #[error("menu target '{0}' is declared more than once")]
    DuplicateTarget(String),
}

// ============================================================================
// SECTION: Menu Tree
// ============================================================================

/// Immutable, ordered collection of root menu nodes.
///
/// Deserialization goes through [`MenuTree::new`], so a loaded tree is
/// always structurally valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MenuNode>", into = "Vec<MenuNode>")]
pub struct MenuTree {
    /// Root nodes in display order.
    roots: Vec<MenuNode>,
}

impl MenuTree {
    /// Builds a tree after validating its structure.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError`] when the tree is structurally invalid.
    pub fn new(roots: Vec<MenuNode>) -> Result<Self, MenuError> {
        let tree = Self {
            roots,
        };
        tree.validate()?;
        Ok(tree)
    }

    /// Returns the process-wide admin menu.
    #[must_use]
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<MenuTree> = OnceLock::new();
        STANDARD.get_or_init(|| Self {
            roots: standard_roots(),
        })
    }

    /// Returns the root nodes.
    #[must_use]
    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    /// Returns every node depth-first with its depth (roots are depth 0).
    #[must_use]
    pub fn walk(&self) -> Vec<(usize, &MenuNode)> {
        let mut out = Vec::new();
        for root in &self.roots {
            walk_inner(root, 0, &mut out);
        }
        out
    }

    /// Finds the destination node for a target.
    #[must_use]
    pub fn find(&self, target: &Target) -> Option<&MenuNode> {
        self.walk()
            .into_iter()
            .map(|(_, node)| node)
            .find(|node| node.target.as_ref() == Some(target))
    }

    /// Validates structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`MenuError`] found in depth-first order.
    pub fn validate(&self) -> Result<(), MenuError> {
        let mut seen = BTreeSet::new();
        for (_, node) in self.walk() {
            if node.label.trim().is_empty() {
                return Err(MenuError::EmptyLabel);
            }
            match &node.target {
                None => {
                    if node.children.is_empty() {
                        return Err(MenuError::EmptyHeader(node.label.clone()));
                    }
                    if node.required.is_some() {
                        return Err(MenuError::GatedHeader(node.label.clone()));
                    }
                }
                Some(target) => {
                    if !target.as_str().starts_with('/') {
                        return Err(MenuError::InvalidTarget(target.to_string()));
                    }
                    if !seen.insert(target.clone()) {
                        return Err(MenuError::DuplicateTarget(target.to_string()));
                    }
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<MenuNode>> for MenuTree {
    type Error = MenuError;

    fn try_from(roots: Vec<MenuNode>) -> Result<Self, Self::Error> {
        Self::new(roots)
    }
}

impl From<MenuTree> for Vec<MenuNode> {
    fn from(tree: MenuTree) -> Self {
        tree.roots
    }
}

/// Appends `node` and its descendants to `out`.
fn walk_inner<'a>(node: &'a MenuNode, depth: usize, out: &mut Vec<(usize, &'a MenuNode)>) {
    out.push((depth, node));
    for child in &node.children {
        walk_inner(child, depth + 1, out);
    }
}

// ============================================================================
// SECTION: Standard Menu
// ============================================================================

/// Builds the admin sidebar and its action buttons.
fn standard_roots() -> Vec<MenuNode> {
    use Capability as C;

    vec![
        MenuNode::leaf("Dashboard", DASHBOARD_ROUTE, None),
        MenuNode::header(
            "Mascotas",
            vec![
                MenuNode::leaf("Catálogo", CATALOG_ROUTE, None),
                MenuNode::leaf("Gestión de mascotas", "/mascotas/gestion", Some(C::ListarMascotas))
                    .with_children(vec![
                        MenuNode::leaf("Registrar mascota", "/mascotas/nueva", Some(C::CrearMascota)),
                        MenuNode::leaf("Editar mascota", "/mascotas/editar", Some(C::EditarMascota)),
                        MenuNode::leaf(
                            "Eliminar mascota",
                            "/mascotas/eliminar",
                            Some(C::EliminarMascota),
                        ),
                    ]),
            ],
        ),
        MenuNode::header(
            "Inventario",
            vec![
                MenuNode::leaf("Productos", "/inventario/productos", Some(C::ListarProductos))
                    .with_children(vec![
                        MenuNode::leaf(
                            "Nuevo producto",
                            "/inventario/productos/nuevo",
                            Some(C::CrearProducto),
                        ),
                        MenuNode::leaf(
                            "Editar producto",
                            "/inventario/productos/editar",
                            Some(C::EditarProducto),
                        ),
                        MenuNode::leaf(
                            "Eliminar producto",
                            "/inventario/productos/eliminar",
                            Some(C::EliminarProducto),
                        ),
                    ]),
                MenuNode::leaf("Categorías", "/inventario/categorias", Some(C::ListarCategorias))
                    .with_children(vec![
                        MenuNode::leaf(
                            "Nueva categoría",
                            "/inventario/categorias/nueva",
                            Some(C::CrearCategoria),
                        ),
                        MenuNode::leaf(
                            "Editar categoría",
                            "/inventario/categorias/editar",
                            Some(C::EditarCategoria),
                        ),
                        MenuNode::leaf(
                            "Eliminar categoría",
                            "/inventario/categorias/eliminar",
                            Some(C::EliminarCategoria),
                        ),
                    ]),
            ],
        ),
        MenuNode::header(
            "Administración",
            vec![
                MenuNode::leaf("Roles", "/roles", Some(C::ListarRoles)).with_children(vec![
                    MenuNode::leaf("Nuevo rol", "/roles/nuevo", Some(C::CrearRol)),
                    MenuNode::leaf("Editar rol", "/roles/editar", Some(C::EditarRol)),
                    MenuNode::leaf("Eliminar rol", "/roles/eliminar", Some(C::EliminarRol)),
                ]),
                MenuNode::leaf("Permisos", "/permisos", Some(C::AsignarPermisos)),
                MenuNode::leaf("Funcionarios", "/funcionarios", Some(C::ListarFuncionarios))
                    .with_children(vec![MenuNode::leaf(
                        "Registrar funcionario",
                        "/funcionarios/nuevo",
                        Some(C::CrearFuncionario),
                    )]),
            ],
        ),
        MenuNode::leaf(
            "Solicitudes de adopción",
            "/solicitudes-adopcion",
            Some(C::SolicitudesAdopcion),
        ),
        MenuNode::leaf("Reportes", "/reportes", Some(C::VerReportes)),
    ]
}
